use crate::{
    model::ModelClass,
    schema::Schema,
    settings::{Settings, SettingsOverride},
};
use std::collections::BTreeMap;

///
/// ModelFactory
///
/// Creates model classes from a set of default settings it owns, and keeps
/// a by-name registry of what it created. Each class captures its own copy
/// of the defaults, so later changes never reach existing classes.
///

#[derive(Debug, Default)]
pub struct ModelFactory {
    defaults: Settings,
    registry: BTreeMap<String, ModelClass>,
}

impl ModelFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults(defaults: Settings) -> Self {
        Self {
            defaults,
            registry: BTreeMap::new(),
        }
    }

    /// Compile `schema` into a class named `name`.
    ///
    /// A class registered under the same name is replaced in the registry;
    /// existing handles to it stay valid.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
        overrides: &SettingsOverride,
    ) -> ModelClass {
        let name = name.into();
        let class = ModelClass::from_parts(name.clone(), schema, self.defaults.merged(overrides));

        if self.registry.insert(name, class.clone()).is_some() {
            tracing::debug!(model = class.name(), "model class replaced in registry");
        }

        class
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelClass> {
        self.registry.get(name)
    }

    #[must_use]
    pub const fn defaults(&self) -> &Settings {
        &self.defaults
    }

    pub const fn defaults_mut(&mut self) -> &mut Settings {
        &mut self.defaults
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }
}

/// Compile `schema` into a class using the baseline defaults.
pub fn create(name: impl Into<String>, schema: Schema, overrides: &SettingsOverride) -> ModelClass {
    ModelClass::from_parts(name.into(), schema, Settings::default().merged(overrides))
}

///
/// TESTS
///
