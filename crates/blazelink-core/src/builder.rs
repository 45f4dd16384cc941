//! Outbound body construction.
//!
//! Write-side mirror of the value model: handlers append labeled fields,
//! then finalize into an immutable [`Packet`]. Nothing is encoded until
//! the builder is consumed, so a half-built body can never leak to the
//! transport.

use bytes::{Bytes, BytesMut};

use crate::packet::Packet;
use crate::tag::Label;
use crate::value::{Group, ListValue, Tdf, TdfMap, TdfValue};
use crate::writer;

/// Accumulates labeled field appends for one packet body.
#[derive(Debug, Default)]
pub struct TdfBuilder {
    values: Vec<Tdf>,
}

impl TdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built value.
    pub fn value(mut self, label: impl Into<Label>, value: TdfValue) -> Self {
        self.values.push(Tdf::new(label, value));
        self
    }

    pub fn number(self, label: impl Into<Label>, value: impl Into<u64>) -> Self {
        self.value(label, TdfValue::VarInt(value.into()))
    }

    pub fn text(self, label: impl Into<Label>, value: impl Into<String>) -> Self {
        self.value(label, TdfValue::Text(value.into()))
    }

    pub fn blob(self, label: impl Into<Label>, value: impl Into<Vec<u8>>) -> Self {
        self.value(label, TdfValue::Blob(value.into()))
    }

    pub fn group(self, label: impl Into<Label>, members: Vec<Tdf>) -> Self {
        self.value(label, TdfValue::Group(Group::new(members)))
    }

    pub fn list(self, label: impl Into<Label>, list: ListValue) -> Self {
        self.value(label, TdfValue::List(list))
    }

    pub fn map(self, label: impl Into<Label>, map: TdfMap) -> Self {
        self.value(label, TdfValue::Map(map))
    }

    pub fn union(self, label: impl Into<Label>, inner: Tdf) -> Self {
        self.value(label, TdfValue::union(inner))
    }

    pub fn union_absent(self, label: impl Into<Label>) -> Self {
        self.value(label, TdfValue::union_absent())
    }

    pub fn var_int_list(self, label: impl Into<Label>, values: Vec<u64>) -> Self {
        self.value(label, TdfValue::VarIntList(values))
    }

    pub fn pair(self, label: impl Into<Label>, a: u64, b: u64) -> Self {
        self.value(label, TdfValue::Pair(a, b))
    }

    pub fn triple(self, label: impl Into<Label>, a: u64, b: u64, c: u64) -> Self {
        self.value(label, TdfValue::Triple(a, b, c))
    }

    pub fn float(self, label: impl Into<Label>, value: f32) -> Self {
        self.value(label, TdfValue::Float(value))
    }

    /// Encodes the accumulated fields into a body buffer.
    pub fn encode(self) -> Bytes {
        let mut out = BytesMut::new();
        writer::write_body(&mut out, &self.values);
        out.freeze()
    }

    /// Finalizes as a response to `request`.
    pub fn respond(self, request: &Packet) -> Packet {
        request.respond(self.encode())
    }

    /// Finalizes as an error response to `request` carrying `error`.
    pub fn respond_error(self, request: &Packet, error: u16) -> Packet {
        request.respond_error(error, self.encode())
    }

    /// Finalizes as a server-initiated notification.
    pub fn unique(self, component: u16, command: u16, id: u16) -> Packet {
        Packet::unique(component, command, id, self.encode())
    }
}
