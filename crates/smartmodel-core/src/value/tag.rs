use crate::value::Value;
use std::fmt::{self, Display};

///
/// ValueKind
///
/// Run-time kind name of a value.
/// Labels are what type errors report and what primitive constraints match on.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Date,
    Array,
    Object,
    Model,
}

impl ValueKind {
    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
            Self::Model => "model",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub(super) const fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Int(_) | Value::Float(_) => ValueKind::Number,
        Value::Text(_) => ValueKind::String,
        Value::Date(_) => ValueKind::Date,
        Value::List(_) => ValueKind::Array,
        Value::Map(_) => ValueKind::Object,
        Value::Model(_) => ValueKind::Model,
    }
}
