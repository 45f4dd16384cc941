//! Human-readable packet rendering for diagnostics.
//!
//! Renders a packet and its decoded TDF tree as builder-style pseudo-code,
//! close enough to the [`crate::builder`] API that a captured dump can be
//! replayed by hand. This is a pure projection over the owned value model:
//! the body is decoded once and the raw buffer is never re-read, so the
//! dumper cannot disturb any other traversal's cursor.

use std::fmt::Write as _;

use crate::error::Result;
use crate::packet::{MessageKind, Packet};
use crate::registry;
use crate::value::{Group, ListValue, MapKey, MapValue, Tdf, TdfValue};

/// Decodes the body and renders the whole packet.
pub fn render_packet(packet: &Packet) -> Result<String> {
    let body = packet.decode_body()?;
    Ok(render_decoded(packet, &body))
}

/// Renders a packet whose body was already decoded.
pub fn render_decoded(packet: &Packet, body: &[Tdf]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_header(&mut out, packet);
    for tdf in body {
        let _ = write_tdf(&mut out, 1, tdf);
        out.push('\n');
    }
    out.push('}');
    out
}

/// One-line summary of the addressing header, without the body.
pub fn describe(packet: &Packet) -> String {
    let kind = match packet.kind() {
        Some(MessageKind::Incoming) => "INCOMING",
        Some(MessageKind::Response) => "RESPONSE",
        Some(MessageKind::Unique) => "UNIQUE",
        Some(MessageKind::Error) => "ERROR",
        None => "UNKNOWN",
    };
    format!(
        "{}::{} kind={} id={:#x} error={:#x} body={}B",
        registry::component_name(packet.component),
        registry::command_name(packet.component, packet.command),
        kind,
        packet.id,
        packet.error,
        packet.body.len(),
    )
}

fn write_header(out: &mut String, packet: &Packet) -> std::fmt::Result {
    out.push_str("packet(");
    match (
        registry::lookup_component(packet.component),
        registry::lookup_command(packet.component, packet.command),
    ) {
        (Some(component), Some(command)) => write!(out, "{component}, {command}")?,
        _ => write!(out, "{:#x}, {:#x}", packet.component, packet.command)?,
    }
    write!(out, ", {:#x}, {:#x}", packet.qtype, packet.id)?;
    if packet.error != 0 {
        write!(out, ", {:#x}", packet.error)?;
    }
    out.push_str(") {\n");
    Ok(())
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn write_tdf(out: &mut String, level: usize, tdf: &Tdf) -> std::fmt::Result {
    indent(out, level);
    let label = tdf.label;
    match &tdf.value {
        TdfValue::VarInt(v) => write!(out, "number(\"{label}\", {v:#x})")?,
        TdfValue::Text(s) => write!(out, "text(\"{label}\", {s:?})")?,
        TdfValue::Blob(b) => write!(out, "blob(\"{label}\", {b:?})")?,
        TdfValue::Group(group) => {
            if group.alt_form {
                write!(out, "group(\"{label}\", alt) {{")?;
            } else {
                write!(out, "group(\"{label}\") {{")?;
            }
            out.push('\n');
            for member in &group.members {
                write_tdf(out, level + 1, member)?;
                out.push('\n');
            }
            indent(out, level);
            out.push('}');
        }
        TdfValue::List(list) => write_list(out, level, label, list)?,
        TdfValue::Map(map) => {
            writeln!(out, "map(\"{label}\", {{")?;
            for (key, value) in map.entries() {
                indent(out, level + 1);
                match key {
                    MapKey::VarInt(v) => write!(out, "{v:#x} => ")?,
                    MapKey::Text(s) => write!(out, "{s:?} => ")?,
                }
                match value {
                    MapValue::VarInt(v) => write!(out, "{v:#x}")?,
                    MapValue::Text(s) => write!(out, "{s:?}")?,
                    MapValue::Float(f) => write!(out, "{f}")?,
                    MapValue::Group(g) => write_inline_group(out, level + 1, g)?,
                }
                out.push_str(",\n");
            }
            indent(out, level);
            out.push_str("})");
        }
        TdfValue::Union {
            discriminant,
            value,
        } => match value {
            Some(inner) => {
                writeln!(out, "union(\"{label}\", {discriminant:#x},")?;
                write_tdf(out, level + 1, inner)?;
                out.push('\n');
                indent(out, level);
                out.push(')');
            }
            None => write!(out, "union(\"{label}\", absent)")?,
        },
        TdfValue::VarIntList(values) => {
            write!(out, "var_int_list(\"{label}\", [")?;
            write_hex_items(out, values.iter().copied())?;
            out.push_str("])");
        }
        TdfValue::Pair(a, b) => write!(out, "pair(\"{label}\", {a:#x}, {b:#x})")?,
        TdfValue::Triple(a, b, c) => {
            write!(out, "triple(\"{label}\", {a:#x}, {b:#x}, {c:#x})")?
        }
        TdfValue::Float(f) => write!(out, "float(\"{label}\", {f})")?,
    }
    Ok(())
}

fn write_list(
    out: &mut String,
    level: usize,
    label: crate::tag::Label,
    list: &ListValue,
) -> std::fmt::Result {
    match list {
        ListValue::VarInt(values) => {
            write!(out, "list(\"{label}\", [")?;
            write_hex_items(out, values.iter().copied())?;
            out.push_str("])");
        }
        ListValue::Text(values) => {
            write!(out, "list(\"{label}\", [")?;
            for (i, s) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "{s:?}")?;
            }
            out.push_str("])");
        }
        ListValue::Triple(values) => {
            write!(out, "list(\"{label}\", [")?;
            for (i, (a, b, c)) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "({a:#x}, {b:#x}, {c:#x})")?;
            }
            out.push_str("])");
        }
        ListValue::Group(values) => {
            writeln!(out, "list(\"{label}\", [")?;
            for group in values {
                indent(out, level + 1);
                write_inline_group(out, level + 1, group)?;
                out.push_str(",\n");
            }
            indent(out, level);
            out.push_str("])");
        }
    }
    Ok(())
}

fn write_inline_group(out: &mut String, level: usize, group: &Group) -> std::fmt::Result {
    if group.alt_form {
        out.push_str("group(alt) {\n");
    } else {
        out.push_str("group {\n");
    }
    for member in &group.members {
        write_tdf(out, level + 1, member)?;
        out.push('\n');
    }
    indent(out, level);
    out.push('}');
    Ok(())
}

fn write_hex_items(
    out: &mut String,
    items: impl IntoIterator<Item = u64>,
) -> std::fmt::Result {
    for (i, v) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write!(out, "{v:#x}")?;
    }
    Ok(())
}
