//! Variable-length unsigned integer codec.
//!
//! 7 payload bits per byte, little-endian group order, high bit set on
//! every byte except the last. Encoding is minimal; decoding rejects
//! non-minimal or overlong forms so that `decode` accepts exactly the set
//! of sequences `encode` produces.

use bytes::BytesMut;

use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};

/// Longest legal encoding: 10 bytes cover the full 64-bit range.
pub const MAX_BYTES: usize = 10;

/// Appends the minimal encoding of `value`.
pub fn write(out: &mut BytesMut, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.extend_from_slice(&[byte]);
            return;
        }
        out.extend_from_slice(&[byte | 0x80]);
    }
}

/// Reads one varint, consuming bytes until the continuation bit clears.
pub fn read(cursor: &mut Cursor<'_>) -> Result<u64> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    for i in 0..MAX_BYTES {
        let byte = cursor.read_u8()?;
        let group = u64::from(byte & 0x7F);

        // The 10th byte may only carry the top bit of a 64-bit value.
        if shift == 63 && group > 1 {
            return Err(DecodeError::MalformedVarint);
        }
        value |= group << shift;

        if byte & 0x80 == 0 {
            // A zero terminal group after continuation bytes is a
            // non-minimal encoding of a smaller value.
            if byte == 0 && i > 0 {
                return Err(DecodeError::MalformedVarint);
            }
            return Ok(value);
        }
        shift += 7;
    }
    Err(DecodeError::MalformedVarint)
}

/// Reads a varint and narrows it to a usize-sized count.
pub fn read_length(cursor: &mut Cursor<'_>) -> Result<usize> {
    let v = read(cursor)?;
    usize::try_from(v).map_err(|_| DecodeError::MalformedVarint)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn enc(v: u64) -> Vec<u8> {
        let mut out = BytesMut::new();
        write(&mut out, v);
        out.to_vec()
    }

    fn dec(bytes: &[u8]) -> Result<u64> {
        read(&mut Cursor::new(bytes))
    }

    #[test]
    fn known_encodings() {
        assert_eq!(enc(0), [0x00]);
        assert_eq!(enc(1), [0x01]);
        assert_eq!(enc(127), [0x7F]);
        assert_eq!(enc(128), [0x80, 0x01]);
        assert_eq!(enc(300), [0xAC, 0x02]);
        assert_eq!(enc(u64::MAX).len(), MAX_BYTES);
        assert_eq!(
            enc(u64::MAX),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
    }

    #[test]
    fn round_trip_boundaries() {
        for v in [
            0,
            1,
            0x7F,
            0x80,
            0x3FFF,
            0x4000,
            u64::from(u32::MAX),
            u64::MAX - 1,
            u64::MAX,
        ] {
            assert_eq!(dec(&enc(v)).unwrap(), v, "value {v}");
        }
    }

    #[test]
    fn rejects_non_minimal() {
        // 0x80 0x00 is a two-byte zero.
        assert_eq!(dec(&[0x80, 0x00]), Err(DecodeError::MalformedVarint));
        assert_eq!(dec(&[0xFF, 0x00]), Err(DecodeError::MalformedVarint));
    }

    #[test]
    fn rejects_overlong_and_overflow() {
        // Eleven continuation bytes.
        assert_eq!(dec(&[0x80; 11]), Err(DecodeError::MalformedVarint));
        // 10 bytes but the final group overflows 64 bits.
        assert_eq!(
            dec(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02]),
            Err(DecodeError::MalformedVarint)
        );
    }

    #[test]
    fn truncated_mid_varint() {
        assert!(dec(&[0x80]).unwrap_err().is_truncated());
        assert!(dec(&[]).unwrap_err().is_truncated());
    }
}
