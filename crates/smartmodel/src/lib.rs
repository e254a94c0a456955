//! ## Crate layout
//! - `core`: values, schemas, settings, hooks, validation and the model
//!   runtime.
//! - `utils`: naming helpers shared by the runtime.
//!
//! Most callers only need the `prelude`: declare a [`prelude::Schema`],
//! turn it into a class with [`prelude::create`] or a
//! [`prelude::ModelFactory`], then construct and work with instances.

pub use smartmodel_core as core;
pub use smartmodel_utils as utils;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            error::{ErrorCode, ErrorKind, ModelError},
            hooks::{DeleteEvent, DeleteFlow, GetEvent, HookName, Hooks, SetEvent},
            model::{
                Hydrated, Invalidation, Invalidations, Model, ModelClass, ModelFactory,
                Subscription, create,
            },
            schema::{DataDescriptor, PrimitiveKind, Schema, TypeConstraint},
            settings::{ExceptionKinds, Exceptions, Settings, SettingsOverride},
            value::Value,
        },
    };
}
