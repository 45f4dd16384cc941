//! Resumable packet framing over an append-only byte buffer.
//!
//! The transport appends whatever chunks it receives; `decode` extracts at
//! most one complete envelope per call. Insufficient data is never an
//! error here: the probe happens on a borrowed cursor and the buffer is
//! only consumed once a whole envelope is present, so a short read leaves
//! the buffer byte-identical and the next call simply resumes. No
//! bookkeeping survives between calls beyond "keep unconsumed bytes".

use bytes::{Bytes, BytesMut};

use crate::cursor::Cursor;
use crate::packet::{Packet, QTYPE_EXT_LENGTH};

/// Bytes of fixed header after the length field: component, command,
/// error, kind/flags, sequence id.
const FIXED_HEADER: usize = 10;

/// Per-connection frame extraction state.
///
/// One instance per connection, driven sequentially as bytes arrive; the
/// decoder itself holds no buffer, only counters for diagnostics.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    packets: u64,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes extracted so far on this connection.
    pub fn packets_decoded(&self) -> u64 {
        self.packets
    }

    /// Extracts the next complete envelope, or `None` if more bytes are
    /// needed. Call in a loop to drain the buffer after each append.
    pub fn decode(&mut self, buf: &mut BytesMut) -> Option<Packet> {
        let mut probe = Cursor::new(&buf[..]);

        let length = probe.read_u16().ok()? as usize;
        if probe.remaining() < length + FIXED_HEADER {
            // Not even the fixed header yet; leave the buffer untouched.
            return None;
        }

        let component = probe.read_u16().ok()?;
        let command = probe.read_u16().ok()?;
        let error = probe.read_u16().ok()?;
        let qtype = probe.read_u16().ok()?;
        let id = probe.read_u16().ok()?;

        let ext_length = if qtype & QTYPE_EXT_LENGTH != 0 {
            probe.read_u16().ok()? as usize
        } else {
            0
        };
        let content_length = length | (ext_length << 16);

        if probe.remaining() < content_length {
            return None;
        }

        let header_len = probe.position();
        let _ = buf.split_to(header_len);
        let body = buf.split_to(content_length).freeze();

        self.packets += 1;
        tracing::trace!(
            component,
            command,
            id,
            qtype,
            body_len = content_length,
            "decoded packet"
        );
        Some(Packet::new(component, command, error, qtype, id, body))
    }
}

/// Appends one encoded envelope: header, extended length when the body
/// exceeds the 16-bit range, then the body. All-or-nothing by
/// construction.
///
/// The ext-length bit always tracks whether the field is written. A
/// decoded packet may carry the bit with a small body (peers may set it
/// with an ext field of zero); emitting that raw bit without the field
/// would desynchronize the stream, so the bit is recomputed here.
pub fn encode_packet(out: &mut BytesMut, packet: &Packet) {
    let body_len = packet.body.len();
    let extended = body_len > 0xFFFF;
    let qtype = if extended {
        packet.qtype | QTYPE_EXT_LENGTH
    } else {
        packet.qtype & !QTYPE_EXT_LENGTH
    };

    out.extend_from_slice(&((body_len & 0xFFFF) as u16).to_be_bytes());
    out.extend_from_slice(&packet.component.to_be_bytes());
    out.extend_from_slice(&packet.command.to_be_bytes());
    out.extend_from_slice(&packet.error.to_be_bytes());
    out.extend_from_slice(&qtype.to_be_bytes());
    out.extend_from_slice(&packet.id.to_be_bytes());
    if extended {
        out.extend_from_slice(&((body_len >> 16) as u16).to_be_bytes());
    }
    out.extend_from_slice(&packet.body);
}

/// Convenience for tests and one-shot sends.
pub fn encode_to_bytes(packet: &Packet) -> Bytes {
    let mut out = BytesMut::with_capacity(14 + packet.body.len());
    encode_packet(&mut out, packet);
    out.freeze()
}
