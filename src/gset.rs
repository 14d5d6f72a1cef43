use core::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::any::Any;
use crate::codec::{Codec, Element};
use crate::comparable::Comparable;
use crate::crdt::{Crdt, ReplicatedCrdt};
use crate::delta::Delta;
use crate::error::{CodecError, GSetError, Result};

/// A grow-only set (G-Set) replicated by deltas.
///
/// Elements can be added but never removed. Membership is decided by each
/// element's [`Comparable`] key, and the first element seen for a key is the
/// one retained. Local additions are also recorded, by wire-form, in a pending
/// delta that [`get_and_reset_delta`](Self::get_and_reset_delta) drains.
/// Elements merged in from other replicas never enter the pending delta.
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
///
/// let mut a = GSet::new();
/// a.add(String::from("apple")).add(String::from("banana"));
///
/// let delta = a.get_and_reset_delta(false).unwrap();
///
/// let mut b = GSet::new();
/// b.apply_delta(&delta, &AnySupport).unwrap();
/// assert_eq!(b.len(), 2);
/// assert!(b.has(&String::from("banana")));
///
/// // b received the elements, it did not add them
/// assert!(b.get_and_reset_delta(false).is_none());
/// ```
#[derive(Clone)]
pub struct GSet<T> {
    elements: IndexMap<Comparable, T>,
    delta: IndexSet<Any>,
}

impl<T> GSet<T> {
    /// Create a new empty G-Set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: IndexMap::new(),
            delta: IndexSet::new(),
        }
    }

    /// Get the number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.values()
    }

    /// Call `f` on every element in insertion order.
    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.elements.values().for_each(f);
    }

    /// Iterate over the comparable keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Comparable> {
        self.elements.keys()
    }

    /// Look up the retained element for a key.
    #[must_use]
    pub fn get(&self, key: &Comparable) -> Option<&T> {
        self.elements.get(key)
    }

    /// Whether local additions are waiting to be shipped.
    #[must_use]
    pub fn has_pending_delta(&self) -> bool {
        !self.delta.is_empty()
    }

    /// Drain the pending delta.
    ///
    /// Returns `None` when nothing was added locally since the last call,
    /// unless `initial` is set: the first delta of a replica is always emitted,
    /// even empty, so peers learn the set exists.
    pub fn get_and_reset_delta(&mut self, initial: bool) -> Option<Delta> {
        if self.delta.is_empty() && !initial {
            return None;
        }
        let added: Vec<Any> = core::mem::take(&mut self.delta).into_iter().collect();
        tracing::debug!(added = added.len(), initial, "extracted GSet delta");
        Some(Delta::gset(added))
    }
}

impl<T: Element> GSet<T> {
    /// Check if the set contains an element.
    #[must_use]
    pub fn has(&self, element: &T) -> bool {
        self.elements.contains_key(&element.to_comparable())
    }

    /// Insert an element into the set.
    ///
    /// Returns `true` if the element was newly inserted.
    pub fn insert(&mut self, element: T) -> bool {
        let key = element.to_comparable();
        if self.elements.contains_key(&key) {
            return false;
        }
        self.delta.insert(element.to_any());
        self.elements.insert(key, element);
        true
    }

    /// Add an element, returning the set for chaining.
    ///
    /// Adding an element that is already present does nothing.
    pub fn add(&mut self, element: T) -> &mut Self {
        self.insert(element);
        self
    }

    /// Merge a delta received from another replica.
    ///
    /// Every wire-form is decoded before anything is inserted, so a delta that
    /// fails to decode leaves the set untouched. A GSet payload without an
    /// `added` list is accepted and ignored.
    ///
    /// # Errors
    ///
    /// [`GSetError::MalformedDelta`] if the delta has no GSet payload, and
    /// [`GSetError::Codec`] if an element cannot be decoded.
    pub fn apply_delta<C: Codec<T>>(&mut self, delta: &Delta, codec: &C) -> Result<()> {
        let Some(gset) = &delta.gset else {
            tracing::warn!(?delta, "delta has no GSet payload");
            return Err(GSetError::malformed(delta));
        };
        let Some(added) = &gset.added else {
            tracing::debug!("GSet delta with no items to add");
            return Ok(());
        };

        let decoded = added
            .iter()
            .map(|any| codec.deserialize(any))
            .collect::<Result<Vec<T>, CodecError>>()
            .map_err(|e| {
                tracing::warn!(error = %e, "rejecting GSet delta");
                GSetError::from(e)
            })?;

        let before = self.elements.len();
        for element in decoded {
            self.elements.entry(element.to_comparable()).or_insert(element);
        }
        tracing::debug!(
            received = added.len(),
            inserted = self.elements.len() - before,
            "applied GSet delta"
        );
        Ok(())
    }

    /// The full state as a delta, for seeding a new replica.
    ///
    /// The pending delta is left as it is.
    #[must_use]
    pub fn state(&self) -> Delta {
        Delta::gset(self.elements.values().map(Element::to_any).collect())
    }
}

impl<T> Default for GSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two sets are equal when they hold the same keys. Pending deltas are ignored.
impl<T> PartialEq for GSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self.elements.keys().all(|k| other.elements.contains_key(k))
    }
}

impl<T> Eq for GSet<T> {}

impl<T> fmt::Display for GSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GSet(")?;
        for (i, key) in self.elements.keys().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str(")")
    }
}

impl<T> fmt::Debug for GSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: Clone> Crdt for GSet<T> {
    fn merge(&mut self, other: &Self) {
        for (key, elem) in &other.elements {
            if !self.elements.contains_key(key) {
                self.elements.insert(key.clone(), elem.clone());
            }
        }
    }
}

impl<T: Element> ReplicatedCrdt for GSet<T> {
    type Element = T;

    fn get_and_reset_delta(&mut self, initial: bool) -> Option<Delta> {
        GSet::get_and_reset_delta(self, initial)
    }

    fn apply_delta<C: Codec<T>>(&mut self, delta: &Delta, codec: &C) -> Result<()> {
        GSet::apply_delta(self, delta, codec)
    }
}

impl<'a, T> IntoIterator for &'a GSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, Comparable, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}

impl<T> IntoIterator for GSet<T> {
    type Item = T;
    type IntoIter = indexmap::map::IntoValues<Comparable, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_values()
    }
}

impl<T: Element> FromIterator<T> for GSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Element> Extend<T> for GSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}
