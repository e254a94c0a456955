use crate::{
    model::ModelClass,
    schema::Schema,
    settings::Settings,
    value::{Value, ValueKind},
};
use derive_more::Display;
use smartmodel_utils::pascal_case;
use std::{cell::OnceCell, fmt, rc::Rc};

///
/// TypeConstraint
///
/// Closed set of shapes a data descriptor can declare. Checked through
/// the single dispatch [`TypeConstraint::accepts`].
///

#[derive(Clone)]
pub enum TypeConstraint {
    Primitive(PrimitiveKind),
    Model(ModelClass),
    Schema(NestedSchema),
    ListOf(ModelClass),
    OneOf(Vec<TypeConstraint>),
}

impl TypeConstraint {
    #[must_use]
    pub fn schema(schema: Schema) -> Self {
        Self::Schema(NestedSchema::new(schema))
    }

    #[must_use]
    pub fn model(class: &ModelClass) -> Self {
        Self::Model(class.clone())
    }

    #[must_use]
    pub fn list_of(class: &ModelClass) -> Self {
        Self::ListOf(class.clone())
    }

    #[must_use]
    pub fn one_of(alternatives: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::OneOf(alternatives.into_iter().map(Into::into).collect())
    }

    /// Whether `value` matches this constraint.
    ///
    /// Plain objects match any nested model type; the nested class
    /// validates them when it is constructed.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Primitive(kind) => kind.accepts(value),
            Self::Model(class) => match value {
                Value::Map(_) => true,
                Value::Model(model) => model.is_instance_of(class),
                _ => false,
            },
            Self::Schema(nested) => match value {
                Value::Map(_) => true,
                Value::Model(model) => nested
                    .compiled()
                    .is_none_or(|class| model.is_instance_of(class)),
                _ => false,
            },
            Self::ListOf(_) => value.is_list(),
            Self::OneOf(alternatives) => alternatives.iter().any(|alt| alt.accepts(value)),
        }
    }
}

impl From<PrimitiveKind> for TypeConstraint {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<Schema> for TypeConstraint {
    fn from(schema: Schema) -> Self {
        Self::schema(schema)
    }
}

impl From<&ModelClass> for TypeConstraint {
    fn from(class: &ModelClass) -> Self {
        Self::model(class)
    }
}

impl From<Vec<Self>> for TypeConstraint {
    fn from(alternatives: Vec<Self>) -> Self {
        Self::OneOf(alternatives)
    }
}

impl fmt::Debug for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Model(class) => write!(f, "Model({})", class.name()),
            Self::Schema(nested) => match nested.compiled() {
                Some(class) => write!(f, "Schema({})", class.name()),
                None => f.write_str("Schema(<uncompiled>)"),
            },
            Self::ListOf(class) => write!(f, "ListOf({})", class.name()),
            Self::OneOf(alternatives) => f.debug_list().entries(alternatives).finish(),
        }
    }
}

///
/// PrimitiveKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
    Date,
    Array,
    Object,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value.kind()),
            (Self::Boolean, ValueKind::Boolean)
                | (Self::Number, ValueKind::Number)
                | (Self::String, ValueKind::String)
                | (Self::Date, ValueKind::Date)
                | (Self::Array, ValueKind::Array)
                | (Self::Object, ValueKind::Object | ValueKind::Model)
        )
    }
}

///
/// NestedSchema
///
/// Sub-schema declared inline as a property type. Clones share one
/// compile cell, so a descriptor compiles its class at most once.
///

#[derive(Clone)]
pub struct NestedSchema {
    inner: Rc<NestedInner>,
}

struct NestedInner {
    schema: Schema,
    compiled: OnceCell<ModelClass>,
}

impl NestedSchema {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            inner: Rc::new(NestedInner {
                schema,
                compiled: OnceCell::new(),
            }),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    #[must_use]
    pub fn compiled(&self) -> Option<&ModelClass> {
        self.inner.compiled.get()
    }

    /// Compiled class for this sub-schema, built on first use.
    pub(crate) fn compile(&self, property: &str, settings: &Settings) -> ModelClass {
        self.inner
            .compiled
            .get_or_init(|| {
                let name = pascal_case(property);
                tracing::debug!(model = %name, property, "compiling nested model class");

                ModelClass::from_parts(name, self.inner.schema.clone(), settings.clone())
            })
            .clone()
    }
}

///
/// TESTS
///
