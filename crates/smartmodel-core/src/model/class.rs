use crate::{
    error::ModelError,
    model::Model,
    nested::{Nested, resolve_nested},
    schema::Schema,
    settings::Settings,
    validate::{Check, validate},
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{fmt, rc::Rc};

///
/// ModelClass
///
/// Compiled model kind: a name, a schema and the settings captured when it
/// was created. Clones share identity; see [`ModelClass::ptr_eq`].
///

#[derive(Clone)]
pub struct ModelClass {
    inner: Rc<ClassInner>,
}

struct ClassInner {
    name: String,
    schema: Schema,
    settings: Settings,
}

impl ModelClass {
    pub(crate) fn from_parts(name: String, schema: Schema, settings: Settings) -> Self {
        tracing::debug!(
            model = %name,
            fields = schema.len(),
            strict = settings.strict,
            "model class created"
        );

        Self {
            inner: Rc::new(ClassInner {
                name,
                schema,
                settings,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build an instance from plain object data.
    ///
    /// Data keys the schema declares but `data` omits take their default
    /// first; then every key in `data` is assigned in order.
    pub fn construct(&self, data: impl Into<Value>) -> Result<Model, ModelError> {
        self.construct_from(Some(data.into()))
    }

    /// Build an instance with defaults only.
    pub fn construct_empty(&self) -> Result<Model, ModelError> {
        self.construct_from(None)
    }

    pub(crate) fn construct_from(&self, data: Option<Value>) -> Result<Model, ModelError> {
        let entries = match data {
            None => Vec::new(),
            Some(Value::Map(entries)) => entries,
            Some(other) => return Err(ModelError::invalid_data(self.name(), other.kind())),
        };

        let model = Model::blank(self.clone());
        for (key, descriptor) in self.schema().data_fields() {
            if !entries.iter().any(|(k, _)| k == key) {
                model.assign(key, descriptor.default.clone())?;
            }
        }
        model.patch_entries(entries)?;

        Ok(model)
    }

    /// One instance for an object payload, one per element for an array.
    pub fn hydrate(&self, payload: impl Into<Value>) -> Result<Hydrated, ModelError> {
        match payload.into() {
            Value::List(items) => items
                .into_iter()
                .map(|item| self.construct(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Hydrated::Many),
            other => self.construct(other).map(Hydrated::One),
        }
    }

    // ------------------------------------------------------------------
    // Bulk validation
    // ------------------------------------------------------------------

    /// Validate a plain payload against every data key without building
    /// an instance. Never raises; `None` means no errors.
    #[must_use]
    pub fn check(&self, payload: &Value) -> Option<Invalidations> {
        self.check_filtered(payload, &[])
    }

    /// Like [`ModelClass::check`], dropping errors whose code matches one
    /// of `excluded` (`"rule"` or `"rule:min"`, for example).
    #[must_use]
    pub fn check_filtered(&self, payload: &Value, excluded: &[&str]) -> Option<Invalidations> {
        let payload = payload.to_plain();
        let mut invalidations = Invalidations::default();

        for (property, descriptor) in self.schema().data_fields() {
            let value = payload.field(property);

            if let Some(Nested::Single(class)) = resolve_nested(descriptor, property, self.settings())
                && let Some(data @ Value::Map(_)) = value
                && let Some(nested) = class.check_filtered(data, excluded)
            {
                invalidations.push(property, Invalidation::Nested(nested));
                continue;
            }

            let errors: Vec<ModelError> = validate(&Check {
                model: self.name(),
                property,
                descriptor: Some(descriptor),
                value,
                is_first: true,
                settings: self.settings(),
            })
            .into_iter()
            .filter(|err| !excluded.iter().any(|token| err.code.matches(token)))
            .collect();

            if !errors.is_empty() {
                invalidations.push(property, Invalidation::Errors(errors));
            }
        }

        (!invalidations.is_empty()).then_some(invalidations)
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.schema().iter().map(|(key, _)| key).collect();

        f.debug_struct("ModelClass")
            .field("name", &self.name())
            .field("fields", &fields)
            .finish_non_exhaustive()
    }
}

///
/// Hydrated
///

#[derive(Clone, Debug)]
pub enum Hydrated {
    One(Model),
    Many(Vec<Model>),
}

impl Hydrated {
    #[must_use]
    pub fn into_one(self) -> Option<Model> {
        match self {
            Self::One(model) => Some(model),
            Self::Many(_) => None,
        }
    }

    #[must_use]
    pub fn into_many(self) -> Option<Vec<Model>> {
        match self {
            Self::Many(models) => Some(models),
            Self::One(_) => None,
        }
    }
}

///
/// Invalidations
///
/// Errors per property, in schema order. Only properties with at least
/// one error appear.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
pub struct Invalidations(#[into_iterator(owned, ref)] Vec<(String, Invalidation)>);

impl Invalidations {
    fn push(&mut self, property: &str, invalidation: Invalidation) {
        self.0.push((property.to_string(), invalidation));
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Invalidation> {
        self.0
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, invalidation)| invalidation)
    }

    /// Direct errors for `property`; empty for nested entries.
    #[must_use]
    pub fn errors(&self, property: &str) -> &[ModelError] {
        match self.get(property) {
            Some(Invalidation::Errors(errors)) => errors,
            _ => &[],
        }
    }

    #[must_use]
    pub fn nested(&self, property: &str) -> Option<&Self> {
        match self.get(property) {
            Some(Invalidation::Nested(nested)) => Some(nested),
            _ => None,
        }
    }

    #[must_use]
    pub fn properties(&self) -> Vec<&str> {
        self.0.iter().map(|(key, _)| key.as_str()).collect()
    }
}

impl Serialize for Invalidations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (property, invalidation) in &self.0 {
            map.serialize_entry(property, invalidation)?;
        }

        map.end()
    }
}

///
/// Invalidation
///

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Invalidation {
    Errors(Vec<ModelError>),
    Nested(Invalidations),
}

///
/// TESTS
///
