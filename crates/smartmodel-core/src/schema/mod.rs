//! Schemas and property descriptors.
//!
//! A [`Schema`] maps property names to descriptors. Data descriptors carry
//! the constraints and functions the interception engine applies; virtual
//! descriptors compute their value on every read and have no storage.

mod constraint;

pub use constraint::{NestedSchema, PrimitiveKind, TypeConstraint};

use crate::{model::Model, value::Value};
use std::{fmt, rc::Rc};

/// Computed property: `(instance, schema) -> value`.
pub type VirtualFn = Rc<dyn Fn(&Model, &Schema) -> Value>;

/// Rule predicate; `true` means the rule is violated.
pub type Rule = Rc<dyn Fn(&Value) -> bool>;

/// Applied to incoming values before validation.
pub type Transform = Rc<dyn Fn(Value) -> Value>;

/// Applied to stored values on read.
pub type Format = Rc<dyn Fn(Value) -> Value>;

///
/// Schema
///
/// Declaration-ordered property descriptors. Redeclaring a name replaces
/// the earlier descriptor in place.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    entries: Vec<(String, Descriptor)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(self, name: impl Into<String>, descriptor: DataDescriptor) -> Self {
        self.with(name.into(), Descriptor::Data(descriptor))
    }

    #[must_use]
    pub fn virtual_field(
        self,
        name: impl Into<String>,
        f: impl Fn(&Model, &Self) -> Value + 'static,
    ) -> Self {
        self.with(name.into(), Descriptor::Virtual(Rc::new(f)))
    }

    fn with(mut self, name: String, descriptor: Descriptor) -> Self {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.entries.push((name, descriptor)),
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, descriptor)| descriptor)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.entries
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    /// Data descriptors only, in declaration order.
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &DataDescriptor)> {
        self.iter()
            .filter_map(|(key, descriptor)| descriptor.as_data().map(|data| (key, data)))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// Descriptor
///

#[derive(Clone)]
pub enum Descriptor {
    Data(DataDescriptor),
    Virtual(VirtualFn),
}

impl Descriptor {
    #[must_use]
    pub const fn as_data(&self) -> Option<&DataDescriptor> {
        match self {
            Self::Data(data) => Some(data),
            Self::Virtual(_) => None,
        }
    }

    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual(_))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(data) => data.fmt(f),
            Self::Virtual(_) => f.write_str("Virtual"),
        }
    }
}

///
/// DataDescriptor
///
/// The empty descriptor (no type, no flags, no functions) is what an
/// undeclared property gets outside strict mode.
///

#[derive(Clone, Default)]
pub struct DataDescriptor {
    pub ty: Option<TypeConstraint>,
    pub required: bool,
    pub readonly: bool,
    pub default: Option<Value>,
    pub rules: Vec<(String, Rule)>,
    pub transform: Option<Transform>,
    pub format: Option<Format>,
}

impl DataDescriptor {
    #[must_use]
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    #[must_use]
    pub fn ty(mut self, ty: impl Into<TypeConstraint>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Add a named rule. Rules run in the order they were added.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, f: impl Fn(&Value) -> bool + 'static) -> Self {
        self.rules.push((name.into(), Rc::new(f)));
        self
    }

    #[must_use]
    pub fn transform(mut self, f: impl Fn(Value) -> Value + 'static) -> Self {
        self.transform = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn format(mut self, f: impl Fn(Value) -> Value + 'static) -> Self {
        self.format = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DataDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|(name, _)| name.as_str()).collect();

        f.debug_struct("DataDescriptor")
            .field("ty", &self.ty)
            .field("required", &self.required)
            .field("readonly", &self.readonly)
            .field("default", &self.default)
            .field("rules", &rules)
            .field("transform", &self.transform.is_some())
            .field("format", &self.format.is_some())
            .finish()
    }
}

///
/// TESTS
///
