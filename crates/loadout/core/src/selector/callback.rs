//! Single-subscriber callback slots.
//!
//! Each slot holds at most one callback. Registering a second one fails and
//! leaves the first in place; downstream code relies on "at most one".

use core::fmt;
use std::sync::{Arc, Mutex};

pub type Callback<E> = Box<dyn FnMut(&E) + Send>;

/// A slot for at most one callback receiving events of type `E`.
pub struct CallbackSlot<E> {
    callback: Option<Callback<E>>,
}

impl<E> CallbackSlot<E> {
    pub const fn new() -> Self {
        Self { callback: None }
    }

    /// Installs `callback` if the slot is empty. Returns `false`, leaving the
    /// existing callback untouched, when the slot is already taken.
    #[must_use]
    pub fn try_set<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&E) + Send + 'static,
    {
        if self.callback.is_some() {
            tracing::warn!("callback slot already occupied; registration ignored");
            return false;
        }
        self.callback = Some(Box::new(callback));
        true
    }

    /// Installs `callback`, dropping whatever the slot held.
    pub(crate) fn replace<F>(&mut self, callback: F)
    where
        F: FnMut(&E) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Empties the slot. Returns whether a callback was removed.
    pub fn clear(&mut self) -> bool {
        self.callback.take().is_some()
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn emit(&mut self, event: &E) {
        if let Some(callback) = self.callback.as_mut() {
            callback(event);
        }
    }
}

impl<E> Default for CallbackSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for CallbackSlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("set", &self.is_set())
            .finish()
    }
}

/// A callback slot shared between a group and the forwarding closures it
/// installs on its members.
pub(crate) type SharedSlot<E> = Arc<Mutex<CallbackSlot<E>>>;

pub(crate) fn emit_shared<E>(slot: &SharedSlot<E>, event: &E) {
    match slot.lock() {
        Ok(mut slot) => slot.emit(event),
        Err(_) => tracing::error!("member-changed relay poisoned; event dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn second_registration_fails() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut slot = CallbackSlot::<u32>::new();

        let first = hits.clone();
        assert!(slot.try_set(move |v| {
            first.fetch_add(*v, Ordering::SeqCst);
        }));
        assert!(!slot.try_set(|_| panic!("second callback must never run")));

        slot.emit(&5);
        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn clear_frees_the_slot() {
        let mut slot = CallbackSlot::<u32>::new();
        assert!(!slot.clear());
        assert!(slot.try_set(|_| {}));
        assert!(slot.clear());
        assert!(!slot.is_set());
        assert!(slot.try_set(|_| {}));
    }
}
