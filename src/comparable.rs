use core::fmt;

use serde::{Deserialize, Serialize};

/// Content-derived identity of an element.
///
/// Membership in a [`GSet`](crate::GSet) is decided by this key alone, never by
/// the element type's own equality. Equal elements always produce equal keys,
/// and the key survives an encode/decode round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Comparable {
    /// A UTF-8 string.
    String(String),
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int64(i64),
    /// An unsigned integer.
    UInt64(u64),
    /// A non-primitive value, identified by its type and canonical bytes.
    Message {
        /// Type URL of the encoded value.
        type_url: String,
        /// Canonical payload bytes.
        value: Vec<u8>,
    },
}

impl fmt::Display for Comparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&hex::encode(b)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(n) => write!(f, "{n}"),
            Self::UInt64(n) => write!(f, "{n}"),
            Self::Message { type_url, value } => write!(f, "{type_url}:{}", hex::encode(value)),
        }
    }
}
