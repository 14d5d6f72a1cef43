//! # crdt-gset
//!
//! A grow-only set CRDT replicated by deltas.
//!
//! A CRDT (Conflict-free Replicated Data Type) is a data structure that can be
//! replicated across multiple devices and updated independently. When replicas
//! are merged, they are guaranteed to converge to the same state without
//! requiring coordination or consensus.
//!
//! A [`GSet`] only grows: elements are added, never removed, and merging is
//! set union. Instead of shipping its whole state, each replica ships a
//! [`Delta`] holding just the elements it added since its last delta.
//! Received deltas can be applied in any order, any number of times.
//!
//! ## Quick Start
//!
//! ```
//! use crdt_gset::prelude::*;
//!
//! let mut a = GSet::new();
//! a.add(String::from("a")).add(String::from("b"));
//!
//! let mut b = GSet::<String>::new();
//! if let Some(delta) = a.get_and_reset_delta(false) {
//!     b.apply_delta(&delta, &AnySupport).unwrap();
//! }
//! assert_eq!(b.len(), 2);
//! assert_eq!(b.to_string(), "GSet(a,b)");
//! ```
//!
//! ## Elements
//!
//! Anything implementing [`Element`] can be stored. Identity is decided by the
//! element's [`Comparable`] key, and elements travel as an [`Any`] wire-form.
//! Implementations are provided for `String`, `Vec<u8>`, `bool`, `i64`, `u64`,
//! the dynamically-typed [`Value`], and serde types wrapped in [`Record`].
//!
//! ## Features
//!
//! - `sync` (default): [`SharedGSet`], a lock-guarded handle for use across
//!   threads.

#![warn(missing_docs)]

mod any;
mod codec;
mod comparable;
mod crdt;
mod delta;
mod error;
mod gset;
#[cfg(feature = "sync")]
mod sync;
mod value;

pub mod prelude;

pub use any::{
    Any, BOOL_TYPE_URL, BYTES_TYPE_URL, INT64_TYPE_URL, PRIMITIVE_PREFIX, STRING_TYPE_URL,
    UINT64_TYPE_URL,
};
pub use codec::{AnySupport, Codec, Element, FromAny, Record, TypeUrl};
pub use comparable::Comparable;
pub use crdt::{Crdt, ReplicatedCrdt};
pub use delta::{Delta, GSetDelta};
pub use error::{CodecError, GSetError, Result};
pub use gset::GSet;
#[cfg(feature = "sync")]
pub use sync::SharedGSet;
pub use value::Value;
