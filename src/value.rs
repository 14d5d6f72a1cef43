use core::fmt;

use crate::any::{
    Any, BOOL_TYPE_URL, BYTES_TYPE_URL, INT64_TYPE_URL, STRING_TYPE_URL, UINT64_TYPE_URL,
};
use crate::codec::{Element, FromAny};
use crate::comparable::Comparable;
use crate::error::CodecError;

/// A dynamically-typed element.
///
/// Useful when one set holds values of several types, or when a replica
/// relays elements whose concrete type it does not know. Primitive values
/// share their keys and wire-forms with the corresponding Rust types, so a
/// `GSet<Value>` and a `GSet<String>` replicate with each other.
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
///
/// let mut set = GSet::new();
/// set.add(Value::from("a")).add(Value::from(1i64)).add(Value::from(true));
/// assert_eq!(set.len(), 3);
/// assert!(set.has(&Value::from("a")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
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
    /// Any other encoded value, kept opaque.
    Message(Any),
}

impl Value {
    /// Decode a wire-form holding one of the built-in primitive types.
    ///
    /// Returns `None` for any other type URL.
    fn decode_primitive(any: &Any) -> Option<Result<Self, CodecError>> {
        let decoded = match any.type_url.as_str() {
            STRING_TYPE_URL => String::from_any(any).map(Self::String),
            BYTES_TYPE_URL => Vec::<u8>::from_any(any).map(Self::Bytes),
            BOOL_TYPE_URL => bool::from_any(any).map(Self::Bool),
            INT64_TYPE_URL => i64::from_any(any).map(Self::Int64),
            UINT64_TYPE_URL => u64::from_any(any).map(Self::UInt64),
            _ => return None,
        };
        Some(decoded)
    }
}

// A `Message` holding a decodable primitive is keyed and encoded as that
// primitive, so it cannot coexist with its typed twin in one set.
impl Element for Value {
    fn to_comparable(&self) -> Comparable {
        match self {
            Self::String(s) => s.to_comparable(),
            Self::Bytes(b) => b.to_comparable(),
            Self::Bool(b) => b.to_comparable(),
            Self::Int64(n) => n.to_comparable(),
            Self::UInt64(n) => n.to_comparable(),
            Self::Message(any) => match Self::decode_primitive(any) {
                Some(Ok(primitive)) => primitive.to_comparable(),
                _ => Comparable::Message {
                    type_url: any.type_url.clone(),
                    value: any.value.clone(),
                },
            },
        }
    }

    fn to_any(&self) -> Any {
        match self {
            Self::String(s) => s.to_any(),
            Self::Bytes(b) => b.to_any(),
            Self::Bool(b) => b.to_any(),
            Self::Int64(n) => n.to_any(),
            Self::UInt64(n) => n.to_any(),
            Self::Message(any) => match Self::decode_primitive(any) {
                Some(Ok(primitive)) => primitive.to_any(),
                _ => any.clone(),
            },
        }
    }
}

/// Primitive wire-forms decode into their typed variant. Everything else,
/// including a primitive type URL with an undecodable payload, stays opaque.
impl FromAny for Value {
    fn from_any(any: &Any) -> Result<Self, CodecError> {
        Ok(Self::from(any.clone()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_comparable(), f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::UInt64(n)
    }
}

impl From<Any> for Value {
    fn from(any: Any) -> Self {
        match Self::decode_primitive(&any) {
            Some(Ok(primitive)) => primitive,
            _ => Self::Message(any),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_keys_with_primitives() {
        assert_eq!(
            Value::from("a").to_comparable(),
            String::from("a").to_comparable()
        );
        assert_eq!(Value::from("a").to_any(), String::from("a").to_any());
        assert_eq!(Value::from(5u64).to_any(), 5u64.to_any());
    }

    #[test]
    fn decodes_primitive_wire_forms() {
        assert_eq!(
            Value::from_any(&String::from("x").to_any()).unwrap(),
            Value::from("x")
        );
        assert_eq!(Value::from_any(&(-1i64).to_any()).unwrap(), Value::from(-1i64));
        assert_eq!(Value::from_any(&true.to_any()).unwrap(), Value::from(true));
    }

    #[test]
    fn unknown_type_url_stays_opaque() {
        let any = Any::new("type.example.com/Thing", vec![9, 9]);
        let value = Value::from_any(&any).unwrap();
        assert_eq!(value, Value::Message(any.clone()));
        assert_eq!(value.to_any(), any);
    }

    #[test]
    fn bad_primitive_payload_stays_opaque() {
        let any = Any::new(BOOL_TYPE_URL, vec![7]);
        let value = Value::from_any(&any).unwrap();
        assert_eq!(value, Value::Message(any.clone()));
        assert_eq!(value.to_any(), any);
        assert_eq!(
            Value::from_any(&value.to_any()).unwrap().to_comparable(),
            value.to_comparable()
        );
    }

    #[test]
    fn primitive_message_is_keyed_as_primitive() {
        let wrapped = Value::Message(String::from("a").to_any());
        assert_eq!(wrapped.to_comparable(), Comparable::String("a".into()));
        assert_eq!(wrapped.to_any(), Value::from("a").to_any());

        let back = Value::from_any(&wrapped.to_any()).unwrap();
        assert_eq!(back.to_comparable(), wrapped.to_comparable());
    }

    #[test]
    fn from_any_normalizes_primitives() {
        assert_eq!(Value::from(7u64.to_any()), Value::from(7u64));
        let opaque = Any::new("type.example.com/Thing", vec![1]);
        assert_eq!(Value::from(opaque.clone()), Value::Message(opaque));
    }

    #[test]
    fn padded_primitive_payload_stays_opaque() {
        let padded = Any::new(STRING_TYPE_URL, vec![1, b'a', 0xff]);
        let value = Value::from(padded.clone());
        assert_eq!(value, Value::Message(padded));
        assert_ne!(value.to_comparable(), Value::from("a").to_comparable());
    }

    #[test]
    fn display_uses_key() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(vec![0xab]).to_string(), "ab");
    }
}
