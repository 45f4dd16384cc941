//! TDF encoding: the value model to bytes.
//!
//! Byte-for-byte mirror of [`crate::reader`]. Writers are infallible: the
//! value model cannot represent a heterogeneous list, and maps validate
//! their types at construction, so by the time a value reaches this module
//! there is nothing left to reject. Output goes to a caller-owned buffer
//! that is handed to the transport whole, never partially.

use bytes::BytesMut;

use crate::tag::{Label, WireType};
use crate::value::{Group, ListValue, MapKey, MapValue, Tdf, TdfMap, TdfValue, UNION_ABSENT};
use crate::varint;

/// Encodes a sequence of tagged values.
pub fn write_body(out: &mut BytesMut, values: &[Tdf]) {
    for tdf in values {
        write_tdf(out, tdf);
    }
}

/// Encodes one tagged value: 4-byte tag, then the variant payload.
pub fn write_tdf(out: &mut BytesMut, tdf: &Tdf) {
    write_tag(out, tdf.label, tdf.wire_type());
    write_value(out, &tdf.value);
}

fn write_tag(out: &mut BytesMut, label: Label, ty: WireType) {
    out.extend_from_slice(&label.raw());
    out.extend_from_slice(&[ty.code()]);
}

/// Encodes a payload without its tag.
pub fn write_value(out: &mut BytesMut, value: &TdfValue) {
    match value {
        TdfValue::VarInt(v) => varint::write(out, *v),
        TdfValue::Text(s) => write_text(out, s),
        TdfValue::Blob(b) => {
            varint::write(out, b.len() as u64);
            out.extend_from_slice(b);
        }
        TdfValue::Group(g) => write_group(out, g),
        TdfValue::List(l) => write_list(out, l),
        TdfValue::Map(m) => write_map(out, m),
        TdfValue::Union {
            discriminant,
            value,
        } => match value {
            Some(inner) => {
                out.extend_from_slice(&[*discriminant]);
                write_tdf(out, inner);
            }
            // Absent unions are exactly one byte, whatever the stored
            // discriminant claims.
            None => out.extend_from_slice(&[UNION_ABSENT]),
        },
        TdfValue::VarIntList(values) => {
            varint::write(out, values.len() as u64);
            for v in values {
                varint::write(out, *v);
            }
        }
        TdfValue::Pair(a, b) => {
            varint::write(out, *a);
            varint::write(out, *b);
        }
        TdfValue::Triple(a, b, c) => {
            varint::write(out, *a);
            varint::write(out, *b);
            varint::write(out, *c);
        }
        TdfValue::Float(f) => out.extend_from_slice(&f.to_bits().to_be_bytes()),
    }
}

/// Length prefix counts the trailing NUL the client expects.
fn write_text(out: &mut BytesMut, text: &str) {
    varint::write(out, text.len() as u64 + 1);
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(&[0x00]);
}

pub fn write_group(out: &mut BytesMut, group: &Group) {
    if group.alt_form {
        out.extend_from_slice(&[0x02]);
    }
    for member in &group.members {
        write_tdf(out, member);
    }
    out.extend_from_slice(&[0x00]);
}

fn write_list(out: &mut BytesMut, list: &ListValue) {
    out.extend_from_slice(&[list.element_type().code()]);
    varint::write(out, list.len() as u64);
    match list {
        ListValue::VarInt(values) => {
            for v in values {
                varint::write(out, *v);
            }
        }
        ListValue::Text(values) => {
            for s in values {
                write_text(out, s);
            }
        }
        ListValue::Group(values) => {
            for g in values {
                write_group(out, g);
            }
        }
        ListValue::Triple(values) => {
            for (a, b, c) in values {
                varint::write(out, *a);
                varint::write(out, *b);
                varint::write(out, *c);
            }
        }
    }
}

fn write_map(out: &mut BytesMut, map: &TdfMap) {
    out.extend_from_slice(&[map.key_type().code(), map.value_type().code()]);
    varint::write(out, map.len() as u64);
    for (key, value) in map.entries() {
        match key {
            MapKey::VarInt(v) => varint::write(out, *v),
            MapKey::Text(s) => write_text(out, s),
        }
        match value {
            MapValue::VarInt(v) => varint::write(out, *v),
            MapValue::Text(s) => write_text(out, s),
            MapValue::Float(f) => out.extend_from_slice(&f.to_bits().to_be_bytes()),
            MapValue::Group(g) => write_group(out, g),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::cursor::Cursor;
    use crate::reader;

    #[test]
    fn text_layout_includes_terminator() {
        let mut out = BytesMut::new();
        write_text(&mut out, "hi");
        assert_eq!(out.as_ref(), [0x03, b'h', b'i', 0x00]);

        let mut out = BytesMut::new();
        write_text(&mut out, "");
        assert_eq!(out.as_ref(), [0x01, 0x00]);
    }

    #[test]
    fn absent_union_is_one_byte() {
        let mut out = BytesMut::new();
        write_value(&mut out, &TdfValue::union_absent());
        assert_eq!(out.as_ref(), [UNION_ABSENT]);
    }

    #[test]
    fn alt_form_group_layout() {
        let group = Group::alternate(vec![Tdf::new("VALU", TdfValue::VarInt(1))]);
        let mut out = BytesMut::new();
        write_group(&mut out, &group);
        assert_eq!(out[0], 0x02);
        assert_eq!(out[out.len() - 1], 0x00);

        let mut cursor = Cursor::new(&out);
        assert_eq!(reader::read_group(&mut cursor).unwrap(), group);
    }
}
