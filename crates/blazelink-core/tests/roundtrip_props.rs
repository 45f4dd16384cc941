//! Property tests for the codec laws: decode(encode(v)) == v for arbitrary
//! value trees, and varint minimality.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::BytesMut;
use proptest::prelude::*;

use blazelink_core::cursor::Cursor;
use blazelink_core::{reader, varint, writer};
use blazelink_core::{Group, ListValue, MapKey, MapValue, Tdf, TdfMap, TdfValue};

// Boxed so the composed member strategies stay cloneable; the regex
// generator itself is not `Clone`.
fn label_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[A-Z][A-Z0-9]{0,3}")
        .unwrap()
        .boxed()
}

fn finite_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        Just(0.0f32),
        Just(1.5f32),
        Just(-3.25f32),
        (-1.0e6f32..1.0e6f32),
    ]
}

fn leaf_value() -> impl Strategy<Value = TdfValue> {
    prop_oneof![
        any::<u64>().prop_map(TdfValue::VarInt),
        "[ -~]{0,24}".prop_map(TdfValue::Text),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(TdfValue::Blob),
        proptest::collection::vec(any::<u64>(), 0..8).prop_map(TdfValue::VarIntList),
        (any::<u64>(), any::<u64>()).prop_map(|(a, b)| TdfValue::Pair(a, b)),
        (any::<u64>(), any::<u64>(), any::<u64>())
            .prop_map(|(a, b, c)| TdfValue::Triple(a, b, c)),
        finite_f32().prop_map(TdfValue::Float),
        Just(TdfValue::union_absent()),
        proptest::collection::vec(any::<u64>(), 0..8)
            .prop_map(|v| TdfValue::List(ListValue::VarInt(v))),
        proptest::collection::vec("[ -~]{0,12}", 0..4)
            .prop_map(|v| TdfValue::List(ListValue::Text(v))),
        proptest::collection::vec((any::<u64>(), any::<u64>(), any::<u64>()), 0..4)
            .prop_map(|v| TdfValue::List(ListValue::Triple(v))),
        proptest::collection::vec((any::<u64>(), any::<u64>()), 1..4).prop_map(|pairs| {
            TdfValue::Map(TdfMap::try_from_pairs(pairs).unwrap())
        }),
        proptest::collection::vec(("[ -~]{0,8}", "[ -~]{0,8}"), 1..4).prop_map(|pairs| {
            let pairs = pairs
                .into_iter()
                .map(|(k, v)| (MapKey::Text(k), MapValue::Text(v)));
            TdfValue::Map(TdfMap::try_from_pairs(pairs).unwrap())
        }),
    ]
}

fn tdf_strategy() -> impl Strategy<Value = Tdf> {
    let value = leaf_value().prop_recursive(3, 24, 4, |inner| {
        let member = (label_strategy(), inner.clone())
            .prop_map(|(label, value)| Tdf::new(label.as_str(), value));
        prop_oneof![
            (any::<bool>(), proptest::collection::vec(member.clone(), 0..4)).prop_map(
                |(alt_form, members)| TdfValue::Group(Group { alt_form, members })
            ),
            proptest::collection::vec(
                (any::<bool>(), proptest::collection::vec(member.clone(), 0..3)),
                0..3
            )
            .prop_map(|groups| {
                TdfValue::List(ListValue::Group(
                    groups
                        .into_iter()
                        .map(|(alt_form, members)| Group { alt_form, members })
                        .collect(),
                ))
            }),
            member.prop_map(TdfValue::union),
        ]
    });
    (label_strategy(), value).prop_map(|(label, value)| Tdf::new(label.as_str(), value))
}

proptest! {
    #[test]
    fn tdf_round_trip(tdf in tdf_strategy()) {
        let mut out = BytesMut::new();
        writer::write_tdf(&mut out, &tdf);

        let mut cursor = Cursor::new(&out);
        let decoded = reader::read_tdf(&mut cursor).unwrap();
        prop_assert_eq!(cursor.remaining(), 0);
        prop_assert_eq!(decoded, tdf);
    }

    #[test]
    fn body_round_trip(body in proptest::collection::vec(tdf_strategy(), 0..4)) {
        let mut out = BytesMut::new();
        writer::write_body(&mut out, &body);

        let mut cursor = Cursor::new(&out);
        prop_assert_eq!(reader::read_body(&mut cursor).unwrap(), body);
    }

    #[test]
    fn varint_round_trip(value in any::<u64>()) {
        let mut out = BytesMut::new();
        varint::write(&mut out, value);
        let mut cursor = Cursor::new(&out);
        prop_assert_eq!(varint::read(&mut cursor).unwrap(), value);
        prop_assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn varint_encoding_is_minimal(value in any::<u64>()) {
        let mut out = BytesMut::new();
        varint::write(&mut out, value);

        // Shortest valid length for this magnitude.
        let bits = 64 - value.leading_zeros().min(63) as usize;
        let expected = bits.div_ceil(7).max(1);
        prop_assert_eq!(out.len(), expected);

        // The terminal byte never encodes an empty group (except for 0).
        let last = out[out.len() - 1];
        prop_assert!(out.len() == 1 || last != 0);
    }

    #[test]
    fn varint_decode_rejects_padding(value in any::<u64>()) {
        // Re-encoding the value with a superfluous zero group must fail.
        let mut out = BytesMut::new();
        varint::write(&mut out, value);
        if out.len() < varint::MAX_BYTES {
            let len = out.len();
            out[len - 1] |= 0x80;
            out.extend_from_slice(&[0x00]);
            let mut cursor = Cursor::new(&out);
            prop_assert!(varint::read(&mut cursor).is_err());
        }
    }
}
