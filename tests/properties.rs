//! Property tests: delta replication converges for arbitrary elements and
//! arbitrary delivery orders.

use crdt_gset::prelude::*;
use crdt_gset::{
    Any, CodecError, Comparable, BOOL_TYPE_URL, BYTES_TYPE_URL, INT64_TYPE_URL, STRING_TYPE_URL,
    UINT64_TYPE_URL,
};
use proptest::prelude::*;

fn round_trip_key<T: Element + FromAny>(value: &T) -> Result<Comparable, CodecError> {
    AnySupport
        .deserialize(&value.to_any())
        .map(|back: T| back.to_comparable())
}

fn replica(values: &[String]) -> GSet<String> {
    values.iter().cloned().collect()
}

proptest! {
    #[test]
    fn add_is_idempotent(values in prop::collection::vec("[a-z]{0,6}", 0..20)) {
        let mut once = GSet::new();
        let mut twice = GSet::new();
        for v in &values {
            once.add(v.clone());
            twice.add(v.clone()).add(v.clone());
        }
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(
            once.get_and_reset_delta(false),
            twice.get_and_reset_delta(false)
        );
    }

    #[test]
    fn delivery_order_does_not_matter(
        groups in prop::collection::vec(prop::collection::vec("[a-c]{1,3}", 0..8), 1..6),
        seed in any::<u64>(),
    ) {
        let deltas: Vec<Delta> = groups
            .iter()
            .filter_map(|g| replica(g).get_and_reset_delta(false))
            .collect();

        let mut forward = GSet::<String>::new();
        for d in &deltas {
            forward.apply_delta(d, &AnySupport).unwrap();
        }

        // deterministic shuffle with duplicates
        let mut shuffled = GSet::<String>::new();
        let n = deltas.len().max(1) as u64;
        for i in 0..(deltas.len() as u64 * 2) {
            let idx = (seed.wrapping_add(i.wrapping_mul(7919)) % n) as usize;
            if let Some(d) = deltas.get(idx) {
                shuffled.apply_delta(d, &AnySupport).unwrap();
            }
        }
        for d in deltas.iter().rev() {
            shuffled.apply_delta(d, &AnySupport).unwrap();
        }

        prop_assert_eq!(&forward, &shuffled);
        let expected: std::collections::BTreeSet<&String> = groups.iter().flatten().collect();
        prop_assert_eq!(forward.len(), expected.len());
        prop_assert!(shuffled.get_and_reset_delta(false).is_none());
    }

    #[test]
    fn comparable_key_survives_round_trip(
        n in any::<i64>(),
        u in any::<u64>(),
        s in ".*",
        b in any::<bool>(),
        bytes in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        prop_assert_eq!(round_trip_key(&Value::from(n)), Ok(Value::from(n).to_comparable()));
        prop_assert_eq!(round_trip_key(&s), Ok(s.to_comparable()));
        prop_assert_eq!(round_trip_key(&b), Ok(b.to_comparable()));
        prop_assert_eq!(round_trip_key(&u), Ok(u.to_comparable()));
        prop_assert_eq!(round_trip_key(&bytes), Ok(bytes.to_comparable()));
    }

    #[test]
    fn message_key_survives_round_trip(
        type_url in prop::sample::select(vec![
            STRING_TYPE_URL,
            BYTES_TYPE_URL,
            BOOL_TYPE_URL,
            INT64_TYPE_URL,
            UINT64_TYPE_URL,
            "p.crdt-gset/double",
            "type.example.com/Thing",
        ]),
        payload in prop::collection::vec(any::<u8>(), 0..12),
    ) {
        let value = Value::Message(Any::new(type_url, payload));
        prop_assert_eq!(round_trip_key(&value), Ok(value.to_comparable()));

        // the key alone decides what ships
        let mut set = GSet::new();
        set.add(value.clone()).add(Value::from(value.to_any()));
        prop_assert_eq!(set.len(), 1);
    }

    #[test]
    fn delta_lists_each_new_element_once(values in prop::collection::vec(any::<u64>(), 0..30)) {
        let mut set = GSet::new();
        for v in &values {
            set.add(*v);
        }
        let added = set
            .get_and_reset_delta(false)
            .map(|d| d.added().map(<[_]>::len).unwrap_or(0))
            .unwrap_or(0);
        prop_assert_eq!(added, set.len());
        prop_assert!(set.get_and_reset_delta(false).is_none());
    }
}
