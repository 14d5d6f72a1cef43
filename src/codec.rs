//! The element capability and the codec used to decode received deltas.
//!
//! A [`GSet`](crate::GSet) never looks inside its elements. It only needs two
//! things from them, provided by [`Element`]: a canonical wire-form to ship
//! and a [`Comparable`] key to deduplicate on. Going the other way, a
//! [`Codec`] turns a received wire-form back into an element.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::any::{
    Any, BOOL_TYPE_URL, BYTES_TYPE_URL, INT64_TYPE_URL, STRING_TYPE_URL, UINT64_TYPE_URL,
};
use crate::comparable::Comparable;
use crate::error::CodecError;

/// A value that can be stored in a replicated set.
///
/// Implementations must be deterministic: equal values yield equal keys and
/// byte-identical wire-forms.
pub trait Element {
    /// The content-derived identity of this value.
    fn to_comparable(&self) -> Comparable;

    /// The canonical wire-form of this value.
    ///
    /// Encoding cannot fail. Types whose encoding is fallible encode once up
    /// front, as [`Record`] does.
    fn to_any(&self) -> Any;
}

/// A value that can be reconstructed from its wire-form.
pub trait FromAny: Sized {
    /// Decode a value, failing if the wire-form holds another type.
    fn from_any(any: &Any) -> Result<Self, CodecError>;
}

/// Decodes wire-forms received from other replicas.
pub trait Codec<T> {
    /// Inverse of [`Element::to_any`].
    fn deserialize(&self, any: &Any) -> Result<T, CodecError>;
}

/// The default codec: decodes any element type that implements [`FromAny`].
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
///
/// let wire = String::from("apple").to_any();
/// let back: String = AnySupport.deserialize(&wire).unwrap();
/// assert_eq!(back, "apple");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnySupport;

impl<T: FromAny> Codec<T> for AnySupport {
    fn deserialize(&self, any: &Any) -> Result<T, CodecError> {
        T::from_any(any)
    }
}

macro_rules! primitive_element {
    ($ty:ty, $type_url:expr, $variant:ident) => {
        impl Element for $ty {
            fn to_comparable(&self) -> Comparable {
                Comparable::$variant(self.clone())
            }

            fn to_any(&self) -> Any {
                Any::encode_primitive($type_url, self)
            }
        }

        impl FromAny for $ty {
            fn from_any(any: &Any) -> Result<Self, CodecError> {
                any.decode($type_url)
            }
        }
    };
}

primitive_element!(String, STRING_TYPE_URL, String);
primitive_element!(Vec<u8>, BYTES_TYPE_URL, Bytes);
primitive_element!(bool, BOOL_TYPE_URL, Bool);
primitive_element!(i64, INT64_TYPE_URL, Int64);
primitive_element!(u64, UINT64_TYPE_URL, UInt64);

/// Names the type URL a [`Record`] is shipped under.
pub trait TypeUrl {
    /// Type URL written into every wire-form of this type.
    const TYPE_URL: &'static str;
}

/// A structured serde value usable as a set element.
///
/// The canonical payload is computed once at construction, so encoding the
/// record for a delta can never fail later on.
///
/// # Example
///
/// ```
/// use crdt_gset::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Tag {
///     name: String,
/// }
///
/// impl TypeUrl for Tag {
///     const TYPE_URL: &'static str = "type.example.com/Tag";
/// }
///
/// let mut tags = GSet::new();
/// tags.add(Record::new(Tag { name: "urgent".into() }).unwrap());
/// assert!(tags.has(&Record::new(Tag { name: "urgent".into() }).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct Record<T> {
    value: T,
    encoded: Vec<u8>,
}

impl<T: Serialize + TypeUrl> Record<T> {
    /// Encode `value` into its canonical payload.
    pub fn new(value: T) -> Result<Self, CodecError> {
        let encoded = postcard::to_allocvec(&value).map_err(|e| CodecError::Encode {
            type_url: T::TYPE_URL.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { value, encoded })
    }
}

impl<T> Record<T> {
    /// Borrow the wrapped value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Unwrap the record.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: TypeUrl> Element for Record<T> {
    fn to_comparable(&self) -> Comparable {
        Comparable::Message {
            type_url: T::TYPE_URL.to_owned(),
            value: self.encoded.clone(),
        }
    }

    fn to_any(&self) -> Any {
        Any::new(T::TYPE_URL, self.encoded.clone())
    }
}

impl<T: Serialize + DeserializeOwned + TypeUrl> FromAny for Record<T> {
    fn from_any(any: &Any) -> Result<Self, CodecError> {
        Self::new(any.decode(T::TYPE_URL)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl TypeUrl for Point {
        const TYPE_URL: &'static str = "type.example.com/Point";
    }

    fn round_trip<T: Element + FromAny>(value: &T) -> T {
        AnySupport.deserialize(&value.to_any()).unwrap()
    }

    #[test]
    fn primitive_keys_survive_round_trip() {
        let s = String::from("a");
        assert_eq!(round_trip(&s).to_comparable(), s.to_comparable());
        assert_eq!(round_trip(&-42i64).to_comparable(), Comparable::Int64(-42));
        assert_eq!(round_trip(&7u64).to_comparable(), Comparable::UInt64(7));
        assert_eq!(round_trip(&false).to_comparable(), Comparable::Bool(false));
        assert_eq!(
            round_trip(&vec![1u8, 2, 3]).to_comparable(),
            Comparable::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn record_key_survives_round_trip() {
        let p = Record::new(Point { x: 1, y: -2 }).unwrap();
        let back = round_trip(&p);
        assert_eq!(back.get(), p.get());
        assert_eq!(back.to_comparable(), p.to_comparable());
    }

    #[test]
    fn record_uses_its_type_url() {
        let p = Record::new(Point { x: 0, y: 0 }).unwrap();
        let any = p.to_any();
        assert_eq!(any.type_url, "type.example.com/Point");
        assert!(!any.is_primitive());
    }

    #[test]
    fn equal_records_share_a_key() {
        let a = Record::new(Point { x: 3, y: 4 }).unwrap();
        let b = Record::new(Point { x: 3, y: 4 }).unwrap();
        let c = Record::new(Point { x: 4, y: 3 }).unwrap();
        assert_eq!(a.to_comparable(), b.to_comparable());
        assert_ne!(a.to_comparable(), c.to_comparable());
    }

    #[test]
    fn decoding_wrong_type_fails() {
        let any = String::from("x").to_any();
        let result: Result<Record<Point>, _> = AnySupport.deserialize(&any);
        assert!(matches!(
            result,
            Err(CodecError::UnexpectedTypeUrl { .. })
        ));
    }
}
