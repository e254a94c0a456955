//! Core runtime for SmartModel: schema-bound model instances whose every
//! read, write and delete runs through a hook and validation pipeline.
//!
//! A schema is compiled into a [`model::ModelClass`] once, with its
//! [`settings::Settings`] captured at that point. Instances are
//! [`model::Model`] handles; nested sub-schemas compile lazily into child
//! classes the first time a property needs one.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod hooks;
pub mod model;
pub mod nested;
pub mod predicate;
pub mod schema;
pub mod settings;
pub mod validate;
pub mod value;

mod intercept;

///
/// Prelude
///
/// Everything needed to declare a schema, create a class and work with
/// its instances.
///

pub mod prelude {
    pub use crate::{
        error::{ErrorCode, ErrorKind, ModelError},
        hooks::{DeleteEvent, DeleteFlow, GetEvent, Hooks, SetEvent},
        model::{Hydrated, Invalidation, Invalidations, Model, ModelClass, ModelFactory, create},
        schema::{DataDescriptor, PrimitiveKind, Schema, TypeConstraint},
        settings::{Settings, SettingsOverride},
        value::Value,
    };
}
