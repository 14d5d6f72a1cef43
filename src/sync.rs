//! A thread-safe handle to a [`GSet`].
//!
//! The element store and the pending delta live behind one lock, so a
//! concurrent [`add`](SharedGSet::add) either lands in the delta being
//! extracted or in the next one, never in both and never in neither.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::codec::{Codec, Element};
use crate::delta::Delta;
use crate::error::Result;
use crate::gset::GSet;

/// A [`GSet`] shared between threads.
///
/// Cloning the handle shares the same set.
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
/// use std::thread;
///
/// let set = SharedGSet::new();
/// let writer = set.clone();
/// thread::spawn(move || {
///     writer.add(String::from("from-thread"));
/// })
/// .join()
/// .unwrap();
///
/// assert!(set.has(&String::from("from-thread")));
/// assert_eq!(set.get_and_reset_delta(false).unwrap().added().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct SharedGSet<T> {
    inner: Arc<Mutex<GSet<T>>>,
}

impl<T> Clone for SharedGSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedGSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<GSet<T>> for SharedGSet<T> {
    fn from(set: GSet<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(set)),
        }
    }
}

impl<T> SharedGSet<T> {
    /// Create a handle to a new empty set.
    #[must_use]
    pub fn new() -> Self {
        GSet::new().into()
    }

    /// Number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drain the pending delta. See [`GSet::get_and_reset_delta`].
    pub fn get_and_reset_delta(&self, initial: bool) -> Option<Delta> {
        self.inner.lock().get_and_reset_delta(initial)
    }

    /// Run `f` with the set locked.
    pub fn with<R>(&self, f: impl FnOnce(&GSet<T>) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl<T: Element> SharedGSet<T> {
    /// Add an element. Returns `true` if it was new.
    pub fn add(&self, element: T) -> bool {
        self.inner.lock().insert(element)
    }

    /// Check if the set contains an element.
    #[must_use]
    pub fn has(&self, element: &T) -> bool {
        self.inner.lock().has(element)
    }

    /// Merge a delta received from another replica. See [`GSet::apply_delta`].
    pub fn apply_delta<C: Codec<T>>(&self, delta: &Delta, codec: &C) -> Result<()> {
        self.inner.lock().apply_delta(delta, codec)
    }
}

impl<T: Clone> SharedGSet<T> {
    /// Copy the current elements out, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().iter().cloned().collect()
    }
}
