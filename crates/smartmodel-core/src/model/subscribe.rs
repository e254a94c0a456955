use super::{Model, ModelInner};
use crate::value::Value;
use std::{
    fmt,
    rc::{Rc, Weak},
};

/// Change callback: `(property, new value, instance)`.
pub type Callback = Rc<dyn Fn(&str, Option<&Value>, &Model)>;

///
/// Subscribers
/// Per-instance callback list, in registration order.
///

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));

        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);

        self.entries.len() != before
    }

    /// Callbacks to run for one notification. Changes made while they run
    /// apply from the next notification on.
    pub(crate) fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}

///
/// Subscription
///
/// Token returned by [`Model::subscribe`]. Dropping it keeps the callback
/// registered; call [`Subscription::unsubscribe`] to remove it.
///

pub struct Subscription {
    model: Weak<ModelInner>,
    id: u64,
}

impl Subscription {
    pub(super) const fn new(model: Weak<ModelInner>, id: u64) -> Self {
        Self { model, id }
    }

    /// Remove the callback. Returns false if it was already gone or the
    /// instance no longer exists.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.model.upgrade() else {
            return false;
        };
        let removed = inner.subscribers.borrow_mut().remove(self.id);
        tracing::trace!(model = inner.class.name(), id = self.id, removed, "subscriber removed");

        removed
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}

///
/// TESTS
///
