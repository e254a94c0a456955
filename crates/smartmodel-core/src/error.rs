//! Error taxonomy.
//!
//! Every validation failure is a [`ModelError`] carrying the offending
//! property, a code, and the name of the model that produced it. Whether
//! a failure is raised to the caller or absorbed is decided per code
//! kind by the model's `exceptions` setting.

use crate::settings::Exceptions;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

/// Pseudo-property reported when construction data is not an object.
pub const DATA_PROPERTY: &str = "$data";

///
/// ModelError
///
/// Structured validation failure.
/// Serializes as `{ message, property, code, source }`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct ModelError {
    pub message: String,
    pub property: String,
    pub code: ErrorCode,
    #[serde(rename = "source")]
    pub model: String,
}

impl ModelError {
    pub fn new(
        code: ErrorCode,
        model: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            property: property.into(),
            code,
            model: model.into(),
        }
    }

    pub(crate) fn required(model: &str, property: &str) -> Self {
        Self::new(
            ErrorCode::Required,
            model,
            property,
            format!("Invalid value 'required' on property '{property}'"),
        )
    }

    pub(crate) fn required_delete(model: &str, property: &str) -> Self {
        Self::new(
            ErrorCode::Required,
            model,
            property,
            format!("Invalid delete on required property '{property}'"),
        )
    }

    pub(crate) fn readonly(model: &str, property: &str) -> Self {
        Self::new(
            ErrorCode::Readonly,
            model,
            property,
            format!("Invalid write on readonly property '{property}'"),
        )
    }

    pub(crate) fn type_mismatch(model: &str, property: &str, kind: impl Display) -> Self {
        Self::new(
            ErrorCode::Type,
            model,
            property,
            format!("Invalid type '{kind}' on property '{property}'"),
        )
    }

    pub(crate) fn strict(model: &str, property: &str) -> Self {
        Self::new(
            ErrorCode::Strict,
            model,
            property,
            format!("Invalid write on undeclared property '{property}' in strict mode"),
        )
    }

    pub(crate) fn rule(model: &str, property: &str, rule: &str) -> Self {
        Self::new(
            ErrorCode::Rule(rule.to_string()),
            model,
            property,
            format!("Invalid value '{rule}' on property '{property}'"),
        )
    }

    pub(crate) fn invalid_data(model: &str, kind: impl Display) -> Self {
        Self::new(
            ErrorCode::Type,
            model,
            DATA_PROPERTY,
            format!("Invalid model data of type '{kind}', expected an object"),
        )
    }

    /// Code kind used by the throw policy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

///
/// ErrorCode
///
/// Fixed tokens, or `rule:<name>` for custom rule violations.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    Required,
    Readonly,
    Type,
    Strict,
    Rule(String),
}

impl ErrorCode {
    /// The part of the code before any `:`.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::Readonly => ErrorKind::Readonly,
            Self::Type => ErrorKind::Type,
            Self::Strict => ErrorKind::Strict,
            Self::Rule(_) => ErrorKind::Rule,
        }
    }

    /// Whether a filter token names this code.
    ///
    /// A token matches the full code (`rule:min`) or its kind (`rule`).
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Rule(name) => {
                token == ErrorKind::Rule.label()
                    || token
                        .strip_prefix("rule:")
                        .is_some_and(|rest| rest == name)
            }
            other => token == other.kind().label(),
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(name) => write!(f, "rule:{name}"),
            other => f.write_str(other.kind().label()),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

///
/// ErrorKind
/// Code kind keyed by the `exceptions` setting.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Required,
    Readonly,
    Type,
    Strict,
    Rule,
}

impl ErrorKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Readonly => "readonly",
            Self::Type => "type",
            Self::Strict => "strict",
            Self::Rule => "rule",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Throw policy: only the first error decides.
///
/// `None` means its kind is absorbed and the operation silently becomes a
/// no-op, even when later errors are of a raising kind.
#[must_use]
pub fn first_raised(errors: Vec<ModelError>, exceptions: &Exceptions) -> Option<ModelError> {
    errors
        .into_iter()
        .next()
        .filter(|error| exceptions.raises(error.kind()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ExceptionKinds;

    #[test]
    fn codes_render_with_rule_prefix() {
        assert_eq!(ErrorCode::Required.to_string(), "required");
        assert_eq!(ErrorCode::Type.to_string(), "type");
        assert_eq!(ErrorCode::Rule("min".into()).to_string(), "rule:min");
        assert_eq!(ErrorCode::Rule("min".into()).kind(), ErrorKind::Rule);
    }

    #[test]
    fn filter_tokens_match_code_or_kind() {
        let rule = ErrorCode::Rule("min".into());

        assert!(rule.matches("rule"));
        assert!(rule.matches("rule:min"));
        assert!(!rule.matches("rule:max"));
        assert!(!rule.matches("min"));
        assert!(ErrorCode::Type.matches("type"));
        assert!(!ErrorCode::Type.matches("required"));
    }

    #[test]
    fn error_serializes_with_source_field() {
        let err = ModelError::rule("User", "age", "min");
        let json = serde_json::to_value(&err).expect("model error should serialize");

        assert_eq!(json["code"], "rule:min");
        assert_eq!(json["source"], "User");
        assert_eq!(json["property"], "age");
        assert_eq!(err.to_string(), "Invalid value 'min' on property 'age'");
    }

    #[test]
    fn absorbed_first_error_hides_later_ones() {
        let exceptions = Exceptions::Kinds(ExceptionKinds {
            type_: false,
            ..ExceptionKinds::uniform(true)
        });
        let errors = vec![
            ModelError::type_mismatch("M", "p", "string"),
            ModelError::rule("M", "p", "min"),
        ];

        assert!(first_raised(errors, &exceptions).is_none());
    }

    #[test]
    fn first_error_is_raised_when_its_kind_raises() {
        let exceptions = Exceptions::Kinds(ExceptionKinds {
            rule: false,
            ..ExceptionKinds::uniform(true)
        });
        let errors = vec![
            ModelError::type_mismatch("M", "p", "string"),
            ModelError::rule("M", "p", "min"),
        ];

        let raised = first_raised(errors, &exceptions).expect("type error should be raised");
        assert_eq!(raised.code, ErrorCode::Type);
    }

    #[test]
    fn nothing_raised_when_exceptions_disabled() {
        let errors = vec![ModelError::required("M", "p")];

        assert!(first_raised(errors, &Exceptions::All(false)).is_none());
    }
}
