//! The TDF value model.
//!
//! A closed sum type, one variant per wire-type code, matched exhaustively
//! by the reader, writer, and dumper. Homogeneity rules the wire format
//! demands (lists of one element type, maps with fixed key/value types)
//! are either unrepresentable ([`ListValue`]) or validated at construction
//! ([`TdfMap`]), which is what lets the writer be infallible.

use crate::error::ValueError;
use crate::tag::{Label, WireType};

/// One labeled value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tdf {
    pub label: Label,
    pub value: TdfValue,
}

impl Tdf {
    pub fn new(label: impl Into<Label>, value: TdfValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Wire-type code this value is tagged with.
    pub fn wire_type(&self) -> WireType {
        self.value.wire_type()
    }
}

/// Looks up a member by label in a decoded body or group.
pub fn find<'a>(members: &'a [Tdf], label: impl Into<Label>) -> Option<&'a Tdf> {
    let label = label.into();
    members.iter().find(|t| t.label == label)
}

/// A group body: ordered members plus the alternate-form marker.
///
/// On the wire an alternate-form group starts with a marker byte of `2`
/// before its first member; the flag records that without producing a
/// member. Groups are terminated by a zero sentinel byte.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub alt_form: bool,
    pub members: Vec<Tdf>,
}

impl Group {
    pub fn new(members: Vec<Tdf>) -> Self {
        Self {
            alt_form: false,
            members,
        }
    }

    pub fn alternate(members: Vec<Tdf>) -> Self {
        Self {
            alt_form: true,
            members,
        }
    }

    pub fn find(&self, label: impl Into<Label>) -> Option<&Tdf> {
        find(&self.members, label)
    }
}

/// Tagged value payloads, variant = wire-type code.
#[derive(Debug, Clone, PartialEq)]
pub enum TdfValue {
    /// Varint-encoded unsigned 64-bit integer (`0x0`).
    VarInt(u64),
    /// Length-prefixed UTF-8 text (`0x1`).
    Text(String),
    /// Length-prefixed raw bytes (`0x2`).
    Blob(Vec<u8>),
    /// Recursive member sequence (`0x3`).
    Group(Group),
    /// Homogeneous element sequence (`0x4`).
    List(ListValue),
    /// Homogeneous key/value pairs (`0x5`).
    Map(TdfMap),
    /// Union: absent, or one nested tagged value (`0x6`).
    Union {
        /// Discriminant byte as seen on the wire. [`UNION_ABSENT`] means
        /// no payload; otherwise it names the nested value's wire type.
        discriminant: u8,
        value: Option<Box<Tdf>>,
    },
    /// Varint count followed by that many varints (`0x7`).
    VarIntList(Vec<u64>),
    /// Two varints (`0x8`).
    Pair(u64, u64),
    /// Three varints (`0x9`).
    Triple(u64, u64, u64),
    /// IEEE-754 binary32, big-endian (`0xA`).
    Float(f32),
}

/// Union discriminant marking an absent value. Encodes as exactly one byte.
pub const UNION_ABSENT: u8 = 0x7F;

impl TdfValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            TdfValue::VarInt(_) => WireType::VarInt,
            TdfValue::Text(_) => WireType::Text,
            TdfValue::Blob(_) => WireType::Blob,
            TdfValue::Group(_) => WireType::Group,
            TdfValue::List(_) => WireType::List,
            TdfValue::Map(_) => WireType::Map,
            TdfValue::Union { .. } => WireType::Union,
            TdfValue::VarIntList(_) => WireType::VarIntList,
            TdfValue::Pair(..) => WireType::Pair,
            TdfValue::Triple(..) => WireType::Triple,
            TdfValue::Float(_) => WireType::Float,
        }
    }

    /// An absent union.
    pub fn union_absent() -> Self {
        TdfValue::Union {
            discriminant: UNION_ABSENT,
            value: None,
        }
    }

    /// A present union wrapping `inner`; the discriminant is derived from
    /// the nested value's own wire type.
    pub fn union(inner: Tdf) -> Self {
        TdfValue::Union {
            discriminant: inner.wire_type().code(),
            value: Some(Box::new(inner)),
        }
    }

    pub fn as_var_int(&self) -> Option<u64> {
        match self {
            TdfValue::VarInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TdfValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            TdfValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            TdfValue::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            TdfValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&TdfMap> {
        match self {
            TdfValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// List payloads. The element type is recorded once on the wire; only
/// these four element types exist in the protocol, so a mixed list cannot
/// be represented, let alone encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ListValue {
    VarInt(Vec<u64>),
    Text(Vec<String>),
    Group(Vec<Group>),
    Triple(Vec<(u64, u64, u64)>),
}

impl ListValue {
    pub fn element_type(&self) -> WireType {
        match self {
            ListValue::VarInt(_) => WireType::VarInt,
            ListValue::Text(_) => WireType::Text,
            ListValue::Group(_) => WireType::Group,
            ListValue::Triple(_) => WireType::Triple,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListValue::VarInt(v) => v.len(),
            ListValue::Text(v) => v.len(),
            ListValue::Group(v) => v.len(),
            ListValue::Triple(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map keys: varint or text.
#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    VarInt(u64),
    Text(String),
}

impl MapKey {
    pub fn wire_type(&self) -> WireType {
        match self {
            MapKey::VarInt(_) => WireType::VarInt,
            MapKey::Text(_) => WireType::Text,
        }
    }
}

impl From<u64> for MapKey {
    fn from(v: u64) -> Self {
        MapKey::VarInt(v)
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        MapKey::Text(v.to_owned())
    }
}

/// Map values: varint, text, float, or group.
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue {
    VarInt(u64),
    Text(String),
    Float(f32),
    Group(Group),
}

impl MapValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            MapValue::VarInt(_) => WireType::VarInt,
            MapValue::Text(_) => WireType::Text,
            MapValue::Float(_) => WireType::Float,
            MapValue::Group(_) => WireType::Group,
        }
    }
}

impl From<u64> for MapValue {
    fn from(v: u64) -> Self {
        MapValue::VarInt(v)
    }
}

impl From<&str> for MapValue {
    fn from(v: &str) -> Self {
        MapValue::Text(v.to_owned())
    }
}

impl From<f32> for MapValue {
    fn from(v: f32) -> Self {
        MapValue::Float(v)
    }
}

impl From<Group> for MapValue {
    fn from(v: Group) -> Self {
        MapValue::Group(v)
    }
}

/// Ordered map with key/value types fixed for the whole structure.
///
/// Both types are written once on the wire, so every entry must match
/// them; `try_push`/`try_from_pairs` enforce that and the writer trusts
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct TdfMap {
    key_type: WireType,
    value_type: WireType,
    entries: Vec<(MapKey, MapValue)>,
}

impl TdfMap {
    /// An empty map with explicit key/value types.
    pub fn new(key_type: WireType, value_type: WireType) -> Result<Self, ValueError> {
        if !matches!(key_type, WireType::VarInt | WireType::Text) {
            return Err(ValueError::UnsupportedMapKey);
        }
        if !matches!(
            value_type,
            WireType::VarInt | WireType::Text | WireType::Float | WireType::Group
        ) {
            return Err(ValueError::UnsupportedMapValue);
        }
        Ok(Self {
            key_type,
            value_type,
            entries: Vec::new(),
        })
    }

    /// Builds a map from entries, inferring its types from the first.
    pub fn try_from_pairs<K, V>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ValueError>
    where
        K: Into<MapKey>,
        V: Into<MapValue>,
    {
        let mut iter = pairs.into_iter();
        let (first_k, first_v) = match iter.next() {
            Some((k, v)) => (k.into(), v.into()),
            None => return Err(ValueError::EmptyMap),
        };
        let mut map = TdfMap::new(first_k.wire_type(), first_v.wire_type())?;
        map.try_push(first_k, first_v)?;
        for (k, v) in iter {
            map.try_push(k, v)?;
        }
        Ok(map)
    }

    /// Appends one entry, rejecting type drift.
    pub fn try_push(
        &mut self,
        key: impl Into<MapKey>,
        value: impl Into<MapValue>,
    ) -> Result<(), ValueError> {
        let key = key.into();
        let value = value.into();
        if key.wire_type() != self.key_type {
            return Err(ValueError::MixedMapKeys);
        }
        if value.wire_type() != self.value_type {
            return Err(ValueError::MixedMapValues);
        }
        self.entries.push((key, value));
        Ok(())
    }

    /// Assembles a map whose entries are already known to match the
    /// declared types (the reader decodes them that way by construction).
    pub(crate) fn from_parts(
        key_type: WireType,
        value_type: WireType,
        entries: Vec<(MapKey, MapValue)>,
    ) -> Self {
        Self {
            key_type,
            value_type,
            entries,
        }
    }

    pub fn key_type(&self) -> WireType {
        self.key_type
    }

    pub fn value_type(&self) -> WireType {
        self.value_type
    }

    pub fn entries(&self) -> &[(MapKey, MapValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn map_rejects_mixed_keys() {
        let mut map = TdfMap::try_from_pairs([(1u64, "one")]).unwrap();
        assert_eq!(map.key_type(), WireType::VarInt);
        assert_eq!(map.value_type(), WireType::Text);
        assert_eq!(
            map.try_push("two", "2"),
            Err(ValueError::MixedMapKeys)
        );
        assert_eq!(
            map.try_push(2u64, MapValue::Float(2.0)),
            Err(ValueError::MixedMapValues)
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn map_rejects_unsupported_types() {
        assert_eq!(
            TdfMap::new(WireType::Float, WireType::Text),
            Err(ValueError::UnsupportedMapKey)
        );
        assert_eq!(
            TdfMap::new(WireType::Text, WireType::Blob),
            Err(ValueError::UnsupportedMapValue)
        );
        assert_eq!(
            TdfMap::try_from_pairs(Vec::<(u64, u64)>::new()),
            Err(ValueError::EmptyMap)
        );
    }

    #[test]
    fn union_discriminant_tracks_inner_type() {
        let v = TdfValue::union(Tdf::new("VALU", TdfValue::VarInt(5)));
        match v {
            TdfValue::Union {
                discriminant,
                value: Some(_),
            } => assert_eq!(discriminant, WireType::VarInt.code()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            TdfValue::union_absent(),
            TdfValue::Union {
                discriminant: UNION_ABSENT,
                value: None
            }
        );
    }

    #[test]
    fn find_matches_on_label() {
        let members = vec![
            Tdf::new("AAAA", TdfValue::VarInt(1)),
            Tdf::new("BBBB", TdfValue::VarInt(2)),
        ];
        assert_eq!(
            find(&members, "BBBB").map(|t| &t.value),
            Some(&TdfValue::VarInt(2))
        );
        assert!(find(&members, "CCCC").is_none());
    }
}
