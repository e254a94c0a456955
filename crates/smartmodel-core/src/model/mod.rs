//! Model instances and classes.
//!
//! A [`ModelClass`] is a compiled schema plus the settings captured when it
//! was created. A [`Model`] is one live instance: a cheap handle whose
//! clones all refer to the same backing store.

mod class;
mod factory;
mod subscribe;

pub use class::{Hydrated, Invalidation, Invalidations, ModelClass};
pub use factory::{ModelFactory, create};
pub use subscribe::{Callback, Subscription};

use crate::{
    error::ModelError,
    intercept::{self, Store},
    value::Value,
};
use std::{
    cell::{RefCell, RefMut},
    fmt,
    rc::Rc,
};
use subscribe::Subscribers;

///
/// Model
///
/// Schema-bound instance. Every read and write of a property goes through
/// the interception engine; the store is never exposed directly.
///

#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

pub(crate) struct ModelInner {
    class: ModelClass,
    store: RefCell<Store>,
    subscribers: RefCell<Subscribers>,
}

impl Model {
    /// Fresh instance with every data key seeded absent.
    pub(crate) fn blank(class: ModelClass) -> Self {
        let store = Store::with_keys(class.schema().data_fields().map(|(key, _)| key));

        Self {
            inner: Rc::new(ModelInner {
                class,
                store: RefCell::new(store),
                subscribers: RefCell::new(Subscribers::default()),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Property access
    // ------------------------------------------------------------------

    /// Read a property through the get pipeline.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        intercept::get(self, property)
    }

    /// Write a property through the set pipeline.
    pub fn set(&self, property: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        intercept::set(self, property, Some(value.into()))
    }

    /// Write a property, where `None` assigns absence.
    pub fn assign(&self, property: &str, value: Option<Value>) -> Result<(), ModelError> {
        intercept::set(self, property, value)
    }

    /// Remove a property through the delete pipeline.
    pub fn delete(&self, property: &str) -> Result<(), ModelError> {
        intercept::delete(self, property)
    }

    /// Delete several properties in order, stopping at the first raised error.
    pub fn delete_many<I, S>(&self, properties: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for property in properties {
            self.delete(property.as_ref())?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------

    /// Assign each key of `data` in order. Keys not in `data` are untouched.
    pub fn patch(&self, data: impl Into<Value>) -> Result<(), ModelError> {
        let entries = self.object_entries(data.into())?;

        self.patch_entries(entries)
    }

    /// Replace the whole instance with `data`.
    ///
    /// Schema keys missing from `data` fall back to their default, or to
    /// absence. A key already holding a nested instance is replaced
    /// recursively through that instance's own `put` instead of being
    /// rebuilt. Undeclared keys missing from `data` are deleted.
    pub fn put(&self, data: impl Into<Value>) -> Result<(), ModelError> {
        let mut entries = self.object_entries(data.into())?;
        let class = self.class().clone();

        for (key, descriptor) in class.schema().data_fields() {
            let incoming = take_entry(&mut entries, key);
            let held = match self.stored(key) {
                Some(Value::Model(child)) => Some(child),
                _ => None,
            };

            match (incoming, held) {
                (Some(map @ Value::Map(_)), Some(child)) => child.put(map)?,
                (Some(value), _) => self.assign(key, Some(value))?,
                (None, Some(child)) => child.put(Value::empty_map())?,
                (None, None) => self.assign(key, descriptor.default.clone())?,
            }
        }

        for key in self.keys() {
            let undeclared = !class.schema().contains(&key);
            if undeclared && !entries.iter().any(|(k, _)| *k == key) {
                self.delete(&key)?;
            }
        }

        self.patch_entries(entries)
    }

    /// Same as [`Model::put`].
    pub fn post(&self, data: impl Into<Value>) -> Result<(), ModelError> {
        self.put(data)
    }

    pub(crate) fn patch_entries(&self, entries: Vec<(String, Value)>) -> Result<(), ModelError> {
        for (key, value) in entries {
            self.assign(&key, Some(value))?;
        }

        Ok(())
    }

    fn object_entries(&self, data: Value) -> Result<Vec<(String, Value)>, ModelError> {
        match data {
            Value::Map(entries) => Ok(entries),
            Value::Model(model) => self.object_entries(model.eject()),
            other => Err(ModelError::invalid_data(self.name(), other.kind())),
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Plain-data snapshot of the stored values.
    ///
    /// Nested instances are replaced by their own snapshots and absent
    /// slots are left out. No hooks or formats run.
    #[must_use]
    pub fn eject(&self) -> Value {
        let store = self.inner.store.borrow();

        Value::Map(
            store
                .entries()
                .map(|(key, value)| (key.to_string(), value.to_plain()))
                .collect(),
        )
    }

    /// Same as [`Model::eject`].
    #[must_use]
    pub fn get_snapshot(&self) -> Value {
        self.eject()
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Call `callback` after every committed update and every delete.
    ///
    /// It receives the property, the new value (`None` for a delete) and
    /// this instance.
    pub fn subscribe(
        &self,
        callback: impl Fn(&str, Option<&Value>, &Self) + 'static,
    ) -> Subscription {
        let id = self.inner.subscribers.borrow_mut().add(Rc::new(callback));
        tracing::trace!(model = self.name(), id, "subscriber added");

        Subscription::new(Rc::downgrade(&self.inner), id)
    }

    pub(crate) fn notify(&self, property: &str, value: Option<&Value>) {
        let callbacks = self.inner.subscribers.borrow().snapshot();

        for callback in callbacks {
            callback(property, value, self);
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Visible keys in insertion order, including absent ones.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.store.borrow().keys()
    }

    #[must_use]
    pub fn has(&self, property: &str) -> bool {
        self.inner.store.borrow().contains(property)
    }

    #[must_use]
    pub fn class(&self) -> &ModelClass {
        &self.inner.class
    }

    #[must_use]
    pub fn is_instance_of(&self, class: &ModelClass) -> bool {
        self.inner.class.ptr_eq(class)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.class.name()
    }

    /// Whether both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn stored(&self, property: &str) -> Option<Value> {
        self.inner.store.borrow().get(property).cloned()
    }

    pub(crate) fn store_mut(&self) -> RefMut<'_, Store> {
        self.inner.store.borrow_mut()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name())
            .field("data", &self.eject())
            .finish()
    }
}

fn take_entry(entries: &mut Vec<(String, Value)>, key: &str) -> Option<Value> {
    let index = entries.iter().position(|(k, _)| k == key)?;

    Some(entries.remove(index).1)
}
