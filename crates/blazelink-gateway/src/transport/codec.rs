//! Framed codec bridging the resumable frame decoder into tokio-util.
//!
//! Decode-once: the envelope is split off the connection buffer exactly
//! once here, before anything reaches the dispatcher. The body stays raw
//! until a handler asks for it.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use blazelink_core::frame::{self, FrameDecoder};
use blazelink_core::Packet;

use crate::error::GatewayError;

/// Per-connection codec state.
#[derive(Debug, Default)]
pub struct PacketCodec {
    decoder: FrameDecoder,
}

impl PacketCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = GatewayError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, Self::Error> {
        // Short reads are not errors: the frame decoder leaves `src`
        // untouched and we resume on the next fill.
        Ok(self.decoder.decode(src))
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = GatewayError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        frame::encode_packet(dst, &item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazelink_core::MessageKind;
    use bytes::Bytes;

    #[test]
    fn partial_header_yields_none() {
        let mut codec = PacketCodec::new();
        let mut buf = BytesMut::from(&[0x00u8, 0x00, 0x00][..]);
        let got = codec.decode(&mut buf).unwrap();
        assert!(got.is_none());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn encode_decode_round_trip() {
        let packet = Packet::new(
            0x09,
            0x02,
            0,
            MessageKind::Incoming.raw(),
            0x35,
            Bytes::from_static(b"\x40\xD2\x9B\x65\x2A"),
        );

        let mut codec = PacketCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(packet.clone(), &mut buf).unwrap();

        let got = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(got.component, packet.component);
        assert_eq!(got.command, packet.command);
        assert_eq!(got.id, packet.id);
        assert_eq!(got.body, packet.body);
        assert!(buf.is_empty());
    }
}
