use crate::codec::Codec;
use crate::delta::Delta;
use crate::error::Result;

/// Core trait that all CRDTs must implement.
///
/// A CRDT (Conflict-free Replicated Data Type) guarantees that concurrent
/// updates on different replicas will converge to the same state after merging,
/// without requiring coordination.
///
/// # Properties
///
/// All implementations must satisfy:
/// - **Commutativity:** `a.merge(b) == b.merge(a)`
/// - **Associativity:** `a.merge(b.merge(c)) == a.merge(b).merge(c)`
/// - **Idempotency:** `a.merge(a) == a`
pub trait Crdt {
    /// Merge another replica's state into this one.
    ///
    /// After merging, `self` contains the least upper bound of both states.
    /// This operation is commutative, associative, and idempotent.
    fn merge(&mut self, other: &Self);
}

/// Replication hooks a session layer uses to drive a delta-state CRDT.
///
/// Local mutations accumulate into a pending delta. The session periodically
/// drains it with [`get_and_reset_delta`](Self::get_and_reset_delta) and ships
/// the result; deltas received from peers go through
/// [`apply_delta`](Self::apply_delta) and are never re-emitted.
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
///
/// fn sync<R: ReplicatedCrdt>(from: &mut R, to: &mut R, codec: &impl Codec<R::Element>) {
///     if let Some(delta) = from.get_and_reset_delta(false) {
///         to.apply_delta(&delta, codec).unwrap();
///     }
/// }
///
/// let mut a = GSet::new();
/// a.add(String::from("x"));
/// let mut b = GSet::new();
/// sync(&mut a, &mut b, &AnySupport);
/// assert!(b.has(&String::from("x")));
/// ```
pub trait ReplicatedCrdt {
    /// The element type decoded from received deltas.
    type Element;

    /// Drain the pending delta.
    ///
    /// Returns `None` when nothing changed locally, unless `initial` is set,
    /// in which case a (possibly empty) delta is always produced.
    fn get_and_reset_delta(&mut self, initial: bool) -> Option<Delta>;

    /// Merge a delta received from another replica.
    fn apply_delta<C: Codec<Self::Element>>(&mut self, delta: &Delta, codec: &C) -> Result<()>;
}
