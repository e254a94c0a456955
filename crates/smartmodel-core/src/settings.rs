//! Per-class settings and their override layer.
//!
//! A [`Settings`] value is captured once when a model class is created and
//! never changes afterwards. Callers compose their own configuration onto a
//! baseline with [`Settings::merged`]; the data half of an override can be
//! loaded from TOML text.

use crate::{error::ErrorKind, hooks::Hooks, predicate, value::Value};
use serde::Deserialize;
use std::{fmt, rc::Rc};
use thiserror::Error as ThisError;

/// Emptiness test used by `required`.
pub type EmptyFn = Rc<dyn Fn(Option<&Value>) -> bool>;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// Settings
///

#[derive(Clone)]
pub struct Settings {
    pub empty: EmptyFn,
    pub strict: bool,
    pub exceptions: Exceptions,
    pub methods: Hooks,
}

impl Settings {
    /// Compose `overrides` onto `self`, producing a new value.
    #[must_use]
    pub fn merged(&self, overrides: &SettingsOverride) -> Self {
        Self {
            empty: overrides
                .empty
                .clone()
                .unwrap_or_else(|| self.empty.clone()),
            strict: overrides.strict.unwrap_or(self.strict),
            exceptions: overrides
                .exceptions
                .as_ref()
                .map_or(self.exceptions, |ov| self.exceptions.merged(ov)),
            methods: self.methods.merged(&overrides.methods),
        }
    }

    pub(crate) fn is_empty(&self, value: Option<&Value>) -> bool {
        (self.empty)(value)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            empty: Rc::new(predicate::is_empty),
            strict: false,
            exceptions: Exceptions::default(),
            methods: Hooks::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("strict", &self.strict)
            .field("exceptions", &self.exceptions)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

///
/// Exceptions
///
/// Throw policy. `All` gates every kind at once, `Kinds` gates each kind
/// independently.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Exceptions {
    All(bool),
    Kinds(ExceptionKinds),
}

impl Exceptions {
    #[must_use]
    pub const fn raises(&self, kind: ErrorKind) -> bool {
        match self {
            Self::All(flag) => *flag,
            Self::Kinds(kinds) => kinds.get(kind),
        }
    }

    #[must_use]
    pub const fn merged(self, overrides: &ExceptionsOverride) -> Self {
        match overrides {
            ExceptionsOverride::All(flag) => Self::All(*flag),
            ExceptionsOverride::Kinds(ov) => {
                let base = match self {
                    Self::All(flag) => ExceptionKinds::uniform(flag),
                    Self::Kinds(kinds) => kinds,
                };

                Self::Kinds(base.merged(ov))
            }
        }
    }
}

impl Default for Exceptions {
    fn default() -> Self {
        Self::Kinds(ExceptionKinds::default())
    }
}

///
/// ExceptionKinds
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExceptionKinds {
    pub readonly: bool,
    pub required: bool,
    pub rule: bool,
    pub strict: bool,
    pub type_: bool,
}

impl ExceptionKinds {
    #[must_use]
    pub const fn uniform(flag: bool) -> Self {
        Self {
            readonly: flag,
            required: flag,
            rule: flag,
            strict: flag,
            type_: flag,
        }
    }

    #[must_use]
    pub const fn get(&self, kind: ErrorKind) -> bool {
        match kind {
            ErrorKind::Readonly => self.readonly,
            ErrorKind::Required => self.required,
            ErrorKind::Rule => self.rule,
            ErrorKind::Strict => self.strict,
            ErrorKind::Type => self.type_,
        }
    }

    pub const fn set(&mut self, kind: ErrorKind, flag: bool) {
        match kind {
            ErrorKind::Readonly => self.readonly = flag,
            ErrorKind::Required => self.required = flag,
            ErrorKind::Rule => self.rule = flag,
            ErrorKind::Strict => self.strict = flag,
            ErrorKind::Type => self.type_ = flag,
        }
    }

    const fn merged(self, ov: &ExceptionKindsOverride) -> Self {
        Self {
            readonly: pick(ov.readonly, self.readonly),
            required: pick(ov.required, self.required),
            rule: pick(ov.rule, self.rule),
            strict: pick(ov.strict, self.strict),
            type_: pick(ov.type_, self.type_),
        }
    }
}

impl Default for ExceptionKinds {
    fn default() -> Self {
        Self {
            readonly: false,
            required: true,
            rule: true,
            strict: false,
            type_: true,
        }
    }
}

const fn pick(over: Option<bool>, base: bool) -> bool {
    match over {
        Some(flag) => flag,
        None => base,
    }
}

// ============================================================================
// Overrides
// ============================================================================

///
/// SettingsOverride
///
/// Partial settings. Only `strict` and `exceptions` can come from text;
/// functions are attached in code.
///

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverride {
    pub strict: Option<bool>,
    pub exceptions: Option<ExceptionsOverride>,

    #[serde(skip)]
    pub empty: Option<EmptyFn>,

    #[serde(skip)]
    pub methods: Hooks,
}

impl SettingsOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the data fields from TOML.
    ///
    /// ```toml
    /// strict = true
    ///
    /// [exceptions]
    /// readonly = true
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Raise or absorb every kind.
    #[must_use]
    pub const fn exceptions(mut self, flag: bool) -> Self {
        self.exceptions = Some(ExceptionsOverride::All(flag));
        self
    }

    /// Gate one kind, keeping any other per-kind overrides.
    #[must_use]
    pub fn exception(mut self, kind: ErrorKind, flag: bool) -> Self {
        let mut kinds = match self.exceptions {
            Some(ExceptionsOverride::Kinds(kinds)) => kinds,
            Some(ExceptionsOverride::All(all)) => ExceptionKindsOverride::uniform(all),
            None => ExceptionKindsOverride::default(),
        };
        kinds.set(kind, flag);
        self.exceptions = Some(ExceptionsOverride::Kinds(kinds));
        self
    }

    #[must_use]
    pub fn empty(mut self, f: impl Fn(Option<&Value>) -> bool + 'static) -> Self {
        self.empty = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn methods(mut self, methods: Hooks) -> Self {
        self.methods = methods;
        self
    }
}

impl fmt::Debug for SettingsOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsOverride")
            .field("strict", &self.strict)
            .field("exceptions", &self.exceptions)
            .field("empty", &self.empty.is_some())
            .field("methods", &self.methods)
            .finish()
    }
}

///
/// ExceptionsOverride
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum ExceptionsOverride {
    All(bool),
    Kinds(ExceptionKindsOverride),
}

///
/// ExceptionKindsOverride
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExceptionKindsOverride {
    pub readonly: Option<bool>,
    pub required: Option<bool>,
    pub rule: Option<bool>,
    pub strict: Option<bool>,
    #[serde(rename = "type")]
    pub type_: Option<bool>,
}

impl ExceptionKindsOverride {
    const fn uniform(flag: bool) -> Self {
        Self {
            readonly: Some(flag),
            required: Some(flag),
            rule: Some(flag),
            strict: Some(flag),
            type_: Some(flag),
        }
    }

    const fn set(&mut self, kind: ErrorKind, flag: bool) {
        let slot = match kind {
            ErrorKind::Readonly => &mut self.readonly,
            ErrorKind::Required => &mut self.required,
            ErrorKind::Rule => &mut self.rule,
            ErrorKind::Strict => &mut self.strict,
            ErrorKind::Type => &mut self.type_,
        };
        *slot = Some(flag);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_policy() {
        let settings = Settings::default();

        assert!(!settings.strict);
        assert!(settings.exceptions.raises(ErrorKind::Required));
        assert!(settings.exceptions.raises(ErrorKind::Type));
        assert!(settings.exceptions.raises(ErrorKind::Rule));
        assert!(!settings.exceptions.raises(ErrorKind::Readonly));
        assert!(!settings.exceptions.raises(ErrorKind::Strict));
    }

    #[test]
    fn per_kind_override_merges_key_by_key() {
        let merged = Settings::default().merged(
            &SettingsOverride::new()
                .exception(ErrorKind::Readonly, true)
                .exception(ErrorKind::Type, false),
        );

        assert!(merged.exceptions.raises(ErrorKind::Readonly));
        assert!(!merged.exceptions.raises(ErrorKind::Type));
        assert!(merged.exceptions.raises(ErrorKind::Required));
    }

    #[test]
    fn boolean_override_replaces() {
        let merged = Settings::default().merged(&SettingsOverride::new().exceptions(false));

        assert_eq!(merged.exceptions, Exceptions::All(false));
        assert!(!merged.exceptions.raises(ErrorKind::Required));
    }

    #[test]
    fn kinds_over_all_start_from_uniform_base() {
        let base = Settings::default().merged(&SettingsOverride::new().exceptions(true));
        let merged = base.merged(&SettingsOverride::new().exception(ErrorKind::Rule, false));

        assert!(merged.exceptions.raises(ErrorKind::Strict));
        assert!(!merged.exceptions.raises(ErrorKind::Rule));
    }

    #[test]
    fn merging_leaves_base_untouched() {
        let base = Settings::default();
        let _ = base.merged(&SettingsOverride::new().strict(true));

        assert!(!base.strict);
    }

    #[test]
    fn loads_from_toml() {
        let ov = SettingsOverride::from_toml_str(
            r#"
            strict = true

            [exceptions]
            readonly = true
            type = false
            "#,
        )
        .expect("settings should parse");
        let merged = Settings::default().merged(&ov);

        assert!(merged.strict);
        assert!(merged.exceptions.raises(ErrorKind::Readonly));
        assert!(!merged.exceptions.raises(ErrorKind::Type));
        assert!(merged.exceptions.raises(ErrorKind::Rule));
    }

    #[test]
    fn loads_boolean_exceptions_from_toml() {
        let ov = SettingsOverride::from_toml_str("exceptions = false").expect("should parse");

        assert_eq!(ov.exceptions, Some(ExceptionsOverride::All(false)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SettingsOverride::from_toml_str("stric = true");

        assert!(matches!(err, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn custom_empty_function() {
        let merged = Settings::default()
            .merged(&SettingsOverride::new().empty(|v| matches!(v, None | Some(Value::Int(0)))));

        assert!(merged.is_empty(Some(&Value::from(0))));
        assert!(!merged.is_empty(Some(&Value::Null)));
    }
}
