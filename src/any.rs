//! The wire-form of a replicated element.
//!
//! Every element travels as an [`Any`]: a type URL naming how the payload is
//! encoded plus the canonical payload bytes. Primitive values use the type
//! URLs below and a postcard-encoded payload; user records carry their own
//! type URL (see [`TypeUrl`](crate::TypeUrl)).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Prefix shared by all primitive type URLs.
pub const PRIMITIVE_PREFIX: &str = "p.crdt-gset/";

/// Type URL of a UTF-8 string element.
pub const STRING_TYPE_URL: &str = "p.crdt-gset/string";
/// Type URL of a raw byte string element.
pub const BYTES_TYPE_URL: &str = "p.crdt-gset/bytes";
/// Type URL of a boolean element.
pub const BOOL_TYPE_URL: &str = "p.crdt-gset/bool";
/// Type URL of a signed 64-bit integer element.
pub const INT64_TYPE_URL: &str = "p.crdt-gset/int64";
/// Type URL of an unsigned 64-bit integer element.
pub const UINT64_TYPE_URL: &str = "p.crdt-gset/uint64";

/// A typed, canonically encoded element.
///
/// Two replicas that encode equal elements produce byte-identical `Any`s,
/// which is what lets the delta accumulator deduplicate by wire-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Any {
    /// Identifies the payload's type and encoding.
    pub type_url: String,
    /// Canonical payload bytes.
    pub value: Vec<u8>,
}

impl Any {
    /// Wrap an already-encoded payload.
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// Whether this wire-form holds one of the built-in primitive types.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.type_url.starts_with(PRIMITIVE_PREFIX)
    }

    pub(crate) fn encode_primitive<V: Serialize + ?Sized>(type_url: &str, value: &V) -> Self {
        Self::new(type_url, postcard::to_allocvec(value).unwrap_or_default())
    }

    pub(crate) fn decode<V: DeserializeOwned>(&self, type_url: &str) -> Result<V, CodecError> {
        if self.type_url != type_url {
            return Err(CodecError::UnexpectedTypeUrl {
                expected: type_url.to_owned(),
                found: self.type_url.clone(),
            });
        }
        let decode_error = |reason: String| CodecError::Decode {
            type_url: self.type_url.clone(),
            reason,
        };
        let (value, rest) =
            postcard::take_from_bytes(&self.value).map_err(|e| decode_error(e.to_string()))?;
        if !rest.is_empty() {
            return Err(decode_error(format!("{} trailing bytes", rest.len())));
        }
        Ok(value)
    }
}
