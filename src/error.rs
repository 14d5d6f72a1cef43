//! Error types for delta replication and the element codec.

use thiserror::Error;

/// Result type for GSet replication operations.
pub type Result<T, E = GSetError> = core::result::Result<T, E>;

/// Errors raised while applying a delta to a [`GSet`](crate::GSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GSetError {
    /// The delta carries no `gset` payload, so it was routed to the wrong CRDT.
    #[error("cannot apply delta {delta} to GSet")]
    MalformedDelta {
        /// Debug rendering of the rejected delta.
        delta: String,
    },

    /// An element in the delta could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl GSetError {
    /// Create a malformed delta error from anything printable.
    pub fn malformed(delta: &impl core::fmt::Debug) -> Self {
        Self::MalformedDelta {
            delta: format!("{delta:?}"),
        }
    }
}

/// Errors raised when converting between elements and their wire-form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The wire-form names a type the target element cannot hold.
    #[error("unexpected type url `{found}`, expected `{expected}`")]
    UnexpectedTypeUrl {
        /// Type URL the decoder accepts.
        expected: String,
        /// Type URL found on the wire.
        found: String,
    },

    /// The payload bytes are not a valid encoding for the type URL.
    #[error("failed to decode `{type_url}` payload: {reason}")]
    Decode {
        /// Type URL of the offending wire-form.
        type_url: String,
        /// Underlying decoder message.
        reason: String,
    },

    /// A value could not be encoded into its canonical payload.
    #[error("failed to encode `{type_url}` payload: {reason}")]
    Encode {
        /// Type URL the value was being encoded as.
        type_url: String,
        /// Underlying encoder message.
        reason: String,
    },
}
