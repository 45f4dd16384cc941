//! The packet envelope: addressing header plus a lazily-parsed body.

use bytes::Bytes;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::reader;
use crate::value::Tdf;

/// Message kinds carried in the top bits of the kind/flags field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MessageKind {
    /// Client-initiated request.
    Incoming = 0x0000,
    /// Reply to an incoming request.
    Response = 0x1000,
    /// Server-initiated notification, not answering anything.
    Unique = 0x2000,
    /// Error reply to an incoming request.
    Error = 0x3000,
}

impl MessageKind {
    /// Mask selecting the kind bits of the raw field.
    pub const MASK: u16 = 0xF000;

    /// Extracts the kind from a raw kind/flags field.
    pub const fn from_qtype(qtype: u16) -> Option<Self> {
        Some(match qtype & Self::MASK {
            0x0000 => MessageKind::Incoming,
            0x1000 => MessageKind::Response,
            0x2000 => MessageKind::Unique,
            0x3000 => MessageKind::Error,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u16 {
        self as u16
    }
}

/// Kind/flags bit signalling a 16-bit extended length after the header.
pub const QTYPE_EXT_LENGTH: u16 = 0x10;

/// Error code meaning success.
pub const NO_ERROR: u16 = 0;

/// One complete protocol message.
///
/// Immutable once constructed and transient: built per inbound frame or
/// per outbound send, then discarded. The body stays raw until a handler
/// asks for it ([`Packet::decode_body`]); a second traversal gets its own
/// cursor, the bytes are shared-read-only.
#[derive(Debug, Clone)]
pub struct Packet {
    pub component: u16,
    pub command: u16,
    pub error: u16,
    /// Raw kind/flags field as seen on (or destined for) the wire.
    pub qtype: u16,
    /// Sequence id tying responses to requests.
    pub id: u16,
    pub body: Bytes,
}

impl Packet {
    pub fn new(component: u16, command: u16, error: u16, qtype: u16, id: u16, body: Bytes) -> Self {
        Self {
            component,
            command,
            error,
            qtype,
            id,
            body,
        }
    }

    /// The message kind, if the kind bits are recognized.
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_qtype(self.qtype)
    }

    /// A successful response to this packet: same component, command, and
    /// sequence id.
    pub fn respond(&self, body: Bytes) -> Packet {
        Packet::new(
            self.component,
            self.command,
            NO_ERROR,
            MessageKind::Response.raw(),
            self.id,
            body,
        )
    }

    /// An error response to this packet carrying `error`.
    pub fn respond_error(&self, error: u16, body: Bytes) -> Packet {
        Packet::new(
            self.component,
            self.command,
            error,
            MessageKind::Error.raw(),
            self.id,
            body,
        )
    }

    /// A server-initiated notification. The sequence id is explicit and
    /// commonly zero.
    pub fn unique(component: u16, command: u16, id: u16, body: Bytes) -> Packet {
        Packet::new(
            component,
            command,
            NO_ERROR,
            MessageKind::Unique.raw(),
            id,
            body,
        )
    }

    /// Decodes the raw body into owned TDF values.
    pub fn decode_body(&self) -> Result<Vec<Tdf>> {
        let mut cursor = Cursor::new(&self.body);
        reader::read_body(&mut cursor)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn request() -> Packet {
        Packet::new(0x09, 0x28, 0, MessageKind::Incoming.raw(), 0x35, Bytes::new())
    }

    #[test]
    fn respond_derives_addressing() {
        let reply = request().respond(Bytes::from_static(b"\x00"));
        assert_eq!(reply.component, 0x09);
        assert_eq!(reply.command, 0x28);
        assert_eq!(reply.id, 0x35);
        assert_eq!(reply.error, NO_ERROR);
        assert_eq!(reply.kind(), Some(MessageKind::Response));
    }

    #[test]
    fn error_response_keeps_code() {
        let reply = request().respond_error(0x4004, Bytes::new());
        assert_eq!(reply.kind(), Some(MessageKind::Error));
        assert_eq!(reply.error, 0x4004);
    }

    #[test]
    fn unknown_kind_bits_are_not_misclassified() {
        let p = Packet::new(1, 1, 0, 0x4000, 0, Bytes::new());
        assert_eq!(p.kind(), None);
    }
}
