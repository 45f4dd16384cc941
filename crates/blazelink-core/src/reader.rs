//! TDF decoding: bytes to the value model.
//!
//! Stateless recursive readers over a [`Cursor`]. Layout rules live here
//! and in [`crate::writer`]; the two must stay byte-for-byte symmetric
//! (round-trip is a hard invariant, covered by the property tests).

use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::tag::{Label, WireType};
use crate::value::{Group, ListValue, MapKey, MapValue, Tdf, TdfMap, TdfValue, UNION_ABSENT};
use crate::varint;

/// Byte that terminates a group's member loop.
const GROUP_SENTINEL: u8 = 0x00;
/// Marker byte flagging a group's alternate form.
const GROUP_ALT_MARKER: u8 = 0x02;

/// Decodes tagged values until the cursor is exhausted.
pub fn read_body(cursor: &mut Cursor<'_>) -> Result<Vec<Tdf>> {
    let mut out = Vec::new();
    while cursor.remaining() > 0 {
        out.push(read_tdf(cursor)?);
    }
    Ok(out)
}

/// Decodes one tagged value: 4-byte tag, then the variant payload.
pub fn read_tdf(cursor: &mut Cursor<'_>) -> Result<Tdf> {
    let (label, code) = read_tag(cursor)?;
    let ty = WireType::from_code(code).ok_or(DecodeError::UnknownWireType {
        code,
        last_label: Some(label),
    })?;
    let value = read_value(cursor, ty)?;
    Ok(Tdf { label, value })
}

/// Reads the 4-byte field tag: 3 packed label bytes + 1 type code.
fn read_tag(cursor: &mut Cursor<'_>) -> Result<(Label, u8)> {
    if cursor.remaining() < 4 {
        return Err(DecodeError::LabelDecodeFailure {
            available: cursor.remaining(),
        });
    }
    let bytes = cursor.read_slice(4)?;
    let label = Label::from_raw([bytes[0], bytes[1], bytes[2]]);
    Ok((label, bytes[3]))
}

/// Dispatches to the variant-specific reader.
pub fn read_value(cursor: &mut Cursor<'_>, ty: WireType) -> Result<TdfValue> {
    Ok(match ty {
        WireType::VarInt => TdfValue::VarInt(varint::read(cursor)?),
        WireType::Text => TdfValue::Text(read_text(cursor)?),
        WireType::Blob => TdfValue::Blob(read_blob(cursor)?),
        WireType::Group => TdfValue::Group(read_group(cursor)?),
        WireType::List => TdfValue::List(read_list(cursor)?),
        WireType::Map => TdfValue::Map(read_map(cursor)?),
        WireType::Union => read_union(cursor)?,
        WireType::VarIntList => TdfValue::VarIntList(read_var_int_list(cursor)?),
        WireType::Pair => TdfValue::Pair(varint::read(cursor)?, varint::read(cursor)?),
        WireType::Triple => TdfValue::Triple(
            varint::read(cursor)?,
            varint::read(cursor)?,
            varint::read(cursor)?,
        ),
        WireType::Float => TdfValue::Float(f32::from_bits(cursor.read_u32()?)),
    })
}

/// Length-prefixed UTF-8 with a trailing NUL counted by the prefix.
fn read_text(cursor: &mut Cursor<'_>) -> Result<String> {
    let len = varint::read_length(cursor)?;
    if len == 0 {
        return Ok(String::new());
    }
    let bytes = cursor.read_slice(len)?;
    // The terminator is consumed but its value is not enforced, matching
    // the client's reader.
    let text = std::str::from_utf8(&bytes[..len - 1]).map_err(|_| DecodeError::InvalidText)?;
    Ok(text.to_owned())
}

fn read_blob(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
    let len = varint::read_length(cursor)?;
    Ok(cursor.read_slice(len)?.to_vec())
}

/// Reads members until the zero sentinel. A marker byte of `2` before the
/// first member flips the alternate-form flag without producing a member.
/// Failures carry the members decoded so far and the failing label, so a
/// payload malformed deep inside a long group stays diagnosable.
pub fn read_group(cursor: &mut Cursor<'_>) -> Result<Group> {
    let mut group = Group::default();
    loop {
        let byte = match cursor.read_u8() {
            Ok(b) => b,
            Err(_) => return Err(DecodeError::GroupUnterminated),
        };
        if byte == GROUP_SENTINEL {
            return Ok(group);
        }
        if byte == GROUP_ALT_MARKER && group.members.is_empty() && !group.alt_form {
            group.alt_form = true;
            continue;
        }
        cursor.rewind(1);

        let (label, code) = read_tag(cursor)?;
        let member = WireType::from_code(code)
            .ok_or(DecodeError::UnknownWireType {
                code,
                last_label: Some(label),
            })
            .and_then(|ty| read_value(cursor, ty));
        match member {
            Ok(value) => group.members.push(Tdf { label, value }),
            Err(source) => {
                return Err(DecodeError::GroupMember {
                    label,
                    partial: group.members,
                    source: Box::new(source),
                })
            }
        }
    }
}

/// One sub-type byte, a count, then `count` elements of that sub-type.
fn read_list(cursor: &mut Cursor<'_>) -> Result<ListValue> {
    let code = cursor.read_u8()?;
    let count = varint::read_length(cursor)?;
    Ok(match WireType::from_code(code) {
        Some(WireType::VarInt) => {
            let mut out = Vec::with_capacity(count.min(MAX_PREALLOC));
            for _ in 0..count {
                out.push(varint::read(cursor)?);
            }
            ListValue::VarInt(out)
        }
        Some(WireType::Text) => {
            let mut out = Vec::with_capacity(count.min(MAX_PREALLOC));
            for _ in 0..count {
                out.push(read_text(cursor)?);
            }
            ListValue::Text(out)
        }
        Some(WireType::Group) => {
            let mut out = Vec::with_capacity(count.min(MAX_PREALLOC));
            for _ in 0..count {
                out.push(read_group(cursor)?);
            }
            ListValue::Group(out)
        }
        Some(WireType::Triple) => {
            let mut out = Vec::with_capacity(count.min(MAX_PREALLOC));
            for _ in 0..count {
                out.push((
                    varint::read(cursor)?,
                    varint::read(cursor)?,
                    varint::read(cursor)?,
                ));
            }
            ListValue::Triple(out)
        }
        _ => return Err(DecodeError::UnknownListSubtype { code }),
    })
}

/// Cap speculative preallocation: counts are attacker-controlled.
const MAX_PREALLOC: usize = 1024;

/// Key-type byte, value-type byte, count, then typed key/value pairs.
fn read_map(cursor: &mut Cursor<'_>) -> Result<TdfMap> {
    let key_code = cursor.read_u8()?;
    let key_type = match WireType::from_code(key_code) {
        Some(ty @ (WireType::VarInt | WireType::Text)) => ty,
        _ => return Err(DecodeError::UnknownMapSubtype { code: key_code }),
    };
    let value_code = cursor.read_u8()?;
    let value_type = match WireType::from_code(value_code) {
        Some(ty @ (WireType::VarInt | WireType::Text | WireType::Float | WireType::Group)) => ty,
        _ => return Err(DecodeError::UnknownMapSubtype { code: value_code }),
    };

    let count = varint::read_length(cursor)?;
    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let key = match key_type {
            WireType::Text => MapKey::Text(read_text(cursor)?),
            _ => MapKey::VarInt(varint::read(cursor)?),
        };
        let value = match value_type {
            WireType::VarInt => MapValue::VarInt(varint::read(cursor)?),
            WireType::Text => MapValue::Text(read_text(cursor)?),
            WireType::Float => MapValue::Float(f32::from_bits(cursor.read_u32()?)),
            _ => MapValue::Group(read_group(cursor)?),
        };
        entries.push((key, value));
    }
    Ok(TdfMap::from_parts(key_type, value_type, entries))
}

/// Discriminant byte: `0x7F` is absent (exactly one byte), anything else
/// must name a known wire type and is followed by one nested tagged value.
fn read_union(cursor: &mut Cursor<'_>) -> Result<TdfValue> {
    let discriminant = cursor.read_u8()?;
    if discriminant == UNION_ABSENT {
        return Ok(TdfValue::Union {
            discriminant,
            value: None,
        });
    }
    if WireType::from_code(discriminant).is_none() {
        return Err(DecodeError::InvalidUnionDiscriminant { discriminant });
    }
    let inner = read_tdf(cursor)?;
    Ok(TdfValue::Union {
        discriminant,
        value: Some(Box::new(inner)),
    })
}

fn read_var_int_list(cursor: &mut Cursor<'_>) -> Result<Vec<u64>> {
    let count = varint::read_length(cursor)?;
    let mut out = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        out.push(varint::read(cursor)?);
    }
    Ok(out)
}
