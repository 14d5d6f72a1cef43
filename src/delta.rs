//! Delta messages exchanged between replicas.
//!
//! The serde shape is part of the replication protocol:
//!
//! ```text
//! { "gset": { "added": [ <Any>, ... ] } }
//! ```
//!
//! Absent fields are omitted rather than written as `null`, so the message
//! must travel in a self-describing format such as JSON.

use serde::{Deserialize, Serialize};

use crate::any::Any;

/// A delta routed to one replicated data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Payload for a grow-only set. A delta without it is malformed for a GSet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gset: Option<GSetDelta>,
}

/// The grow-only set part of a [`Delta`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GSetDelta {
    /// Wire-forms added since the previous delta, in insertion order.
    ///
    /// `Some(vec![])` is a real (possibly forced) delta; `None` carries nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<Vec<Any>>,
}

impl Delta {
    /// A GSet delta listing `added`.
    pub fn gset(added: Vec<Any>) -> Self {
        Self {
            gset: Some(GSetDelta { added: Some(added) }),
        }
    }

    /// The added wire-forms, if this is a GSet delta that carries any list.
    #[must_use]
    pub fn added(&self) -> Option<&[Any]> {
        self.gset.as_ref()?.added.as_deref()
    }
}
