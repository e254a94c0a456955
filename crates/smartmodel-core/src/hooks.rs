//! Lifecycle hooks run by the interception engine.
//!
//! Set-family and get-family hooks may return `Some(value)` to replace the
//! value flowing through the pipeline. `on_before_delete` can cancel a
//! delete outright, and `on_delete` only observes.

use crate::{model::Model, schema::Schema, value::Value};
use derive_more::Display;
use std::{fmt, rc::Rc};

pub type SetHook = Rc<dyn Fn(&SetEvent<'_>) -> Option<Value>>;
pub type GetHook = Rc<dyn Fn(&GetEvent<'_>) -> Option<Value>>;
pub type DeleteHook = Rc<dyn Fn(&DeleteEvent<'_>)>;
pub type BeforeDeleteHook = Rc<dyn Fn(&DeleteEvent<'_>) -> DeleteFlow>;

///
/// SetEvent
///
/// `value` is the working value at the point the hook runs. In the delete
/// pipeline `on_update` sees `value = None`.
///

pub struct SetEvent<'a> {
    pub model: &'a Model,
    pub property: &'a str,
    pub value: Option<&'a Value>,
    pub old: Option<&'a Value>,
    pub schema: &'a Schema,
}

///
/// GetEvent
///

pub struct GetEvent<'a> {
    pub model: &'a Model,
    pub property: &'a str,
    pub value: Option<&'a Value>,
    pub schema: &'a Schema,
}

///
/// DeleteEvent
///

pub struct DeleteEvent<'a> {
    pub model: &'a Model,
    pub property: &'a str,
    pub old: Option<&'a Value>,
    pub schema: &'a Schema,
}

///
/// DeleteFlow
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DeleteFlow {
    #[default]
    Proceed,
    Cancel,
}

///
/// HookName
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum HookName {
    #[display("$onBeforeSet")]
    BeforeSet,
    #[display("$onBeforeUpdate")]
    BeforeUpdate,
    #[display("$onSet")]
    Set,
    #[display("$onUpdate")]
    Update,
    #[display("$onBeforeGet")]
    BeforeGet,
    #[display("$onGet")]
    Get,
    #[display("$onBeforeDelete")]
    BeforeDelete,
    #[display("$onDelete")]
    Delete,
}

///
/// Hooks
///

#[derive(Clone, Default)]
pub struct Hooks {
    pub on_before_set: Option<SetHook>,
    pub on_before_update: Option<SetHook>,
    pub on_set: Option<SetHook>,
    pub on_update: Option<SetHook>,
    pub on_before_get: Option<GetHook>,
    pub on_get: Option<GetHook>,
    pub on_before_delete: Option<BeforeDeleteHook>,
    pub on_delete: Option<DeleteHook>,
}

impl Hooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_before_set(mut self, f: impl Fn(&SetEvent<'_>) -> Option<Value> + 'static) -> Self {
        self.on_before_set = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_before_update(
        mut self,
        f: impl Fn(&SetEvent<'_>) -> Option<Value> + 'static,
    ) -> Self {
        self.on_before_update = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_set(mut self, f: impl Fn(&SetEvent<'_>) -> Option<Value> + 'static) -> Self {
        self.on_set = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(&SetEvent<'_>) -> Option<Value> + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_before_get(mut self, f: impl Fn(&GetEvent<'_>) -> Option<Value> + 'static) -> Self {
        self.on_before_get = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_get(mut self, f: impl Fn(&GetEvent<'_>) -> Option<Value> + 'static) -> Self {
        self.on_get = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_before_delete(mut self, f: impl Fn(&DeleteEvent<'_>) -> DeleteFlow + 'static) -> Self {
        self.on_before_delete = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_delete(mut self, f: impl Fn(&DeleteEvent<'_>) + 'static) -> Self {
        self.on_delete = Some(Rc::new(f));
        self
    }

    /// Hooks set in `overrides` win; the rest are kept.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        fn pick<T: Clone>(over: Option<&T>, base: Option<&T>) -> Option<T> {
            over.or(base).cloned()
        }

        Self {
            on_before_set: pick(overrides.on_before_set.as_ref(), self.on_before_set.as_ref()),
            on_before_update: pick(
                overrides.on_before_update.as_ref(),
                self.on_before_update.as_ref(),
            ),
            on_set: pick(overrides.on_set.as_ref(), self.on_set.as_ref()),
            on_update: pick(overrides.on_update.as_ref(), self.on_update.as_ref()),
            on_before_get: pick(overrides.on_before_get.as_ref(), self.on_before_get.as_ref()),
            on_get: pick(overrides.on_get.as_ref(), self.on_get.as_ref()),
            on_before_delete: pick(
                overrides.on_before_delete.as_ref(),
                self.on_before_delete.as_ref(),
            ),
            on_delete: pick(overrides.on_delete.as_ref(), self.on_delete.as_ref()),
        }
    }

    /// Names of the hooks that are installed.
    #[must_use]
    pub fn installed(&self) -> Vec<HookName> {
        [
            (HookName::BeforeSet, self.on_before_set.is_some()),
            (HookName::BeforeUpdate, self.on_before_update.is_some()),
            (HookName::Set, self.on_set.is_some()),
            (HookName::Update, self.on_update.is_some()),
            (HookName::BeforeGet, self.on_before_get.is_some()),
            (HookName::Get, self.on_get.is_some()),
            (HookName::BeforeDelete, self.on_before_delete.is_some()),
            (HookName::Delete, self.on_delete.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.installed().iter().map(ToString::to_string))
            .finish()
    }
}

///
/// TESTS
///
