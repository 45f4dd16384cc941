//! Field tags: packed labels and wire-type codes.
//!
//! Every TDF value is preceded by a 4-byte tag: 3 bytes of packed label
//! followed by 1 wire-type byte. The label packs four characters at six
//! bits each, big-endian. [`Label`] stores the packed bytes exactly as
//! they appeared on the wire; the character form is a projection used by
//! the builder API and diagnostics, so a label round-trips bit-exactly
//! even if it uses a packing we would not produce ourselves.

use std::fmt;

/// A packed 4-character field label (3 bytes on the wire).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label([u8; 3]);

impl Label {
    /// Wraps raw wire bytes without reinterpretation.
    pub const fn from_raw(raw: [u8; 3]) -> Self {
        Self(raw)
    }

    /// The packed wire bytes.
    pub const fn raw(self) -> [u8; 3] {
        self.0
    }

    /// Packs up to four characters. Characters beyond the fourth are
    /// dropped; missing characters pack as zero groups.
    pub fn new(text: &str) -> Self {
        let mut packed: u32 = 0;
        for (i, byte) in text.bytes().take(4).enumerate() {
            let group = u32::from(byte & 0x3F);
            packed |= group << (18 - 6 * i);
        }
        Self([
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        ])
    }

    /// Unpacks the character projection. Zero groups are padding; groups
    /// below `0x20` restore their high bits (`A`..`Z`, `_`), the rest
    /// (digits, space) are literal.
    pub fn text(self) -> String {
        let packed = (u32::from(self.0[0]) << 16) | (u32::from(self.0[1]) << 8) | u32::from(self.0[2]);
        let mut out = String::with_capacity(4);
        for i in 0..4 {
            let group = ((packed >> (18 - 6 * i)) & 0x3F) as u8;
            if group == 0 {
                continue;
            }
            let ch = if group < 0x20 { group | 0x40 } else { group };
            out.push(char::from(ch));
        }
        out
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::new(text)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.text())
    }
}

/// Wire-type codes of the TDF value variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    VarInt = 0x0,
    Text = 0x1,
    Blob = 0x2,
    Group = 0x3,
    List = 0x4,
    Map = 0x5,
    Union = 0x6,
    VarIntList = 0x7,
    Pair = 0x8,
    Triple = 0x9,
    Float = 0xA,
}

impl WireType {
    /// Maps a raw code to a known wire type.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x0 => WireType::VarInt,
            0x1 => WireType::Text,
            0x2 => WireType::Blob,
            0x3 => WireType::Group,
            0x4 => WireType::List,
            0x5 => WireType::Map,
            0x6 => WireType::Union,
            0x7 => WireType::VarIntList,
            0x8 => WireType::Pair,
            0x9 => WireType::Triple,
            0xA => WireType::Float,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn packs_uppercase_labels() {
        // T=0x14 E=0x05 S=0x13 T=0x14 -> 0x5054D4 packed big-endian.
        let label = Label::new("TEST");
        assert_eq!(label.raw(), [0x50, 0x54, 0xD4]);
        assert_eq!(label.text(), "TEST");
    }

    #[test]
    fn short_labels_pad_with_zero_groups() {
        let label = Label::new("ID");
        assert_eq!(label.text(), "ID");
        assert_eq!(Label::from_raw(label.raw()), label);
    }

    #[test]
    fn digits_and_underscore_survive() {
        for text in ["SID2", "A_B", "P0RT", "X"] {
            assert_eq!(Label::new(text).text(), text, "label {text}");
        }
    }

    #[test]
    fn raw_bytes_are_preserved_verbatim() {
        // An arbitrary packing we would never generate still round-trips.
        let label = Label::from_raw([0x01, 0x02, 0x03]);
        assert_eq!(label.raw(), [0x01, 0x02, 0x03]);
    }

    #[test]
    fn wire_type_codes_are_total_over_the_known_set() {
        for code in 0x0..=0xA {
            let ty = WireType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert_eq!(WireType::from_code(0xB), None);
        assert_eq!(WireType::from_code(0x7F), None);
    }
}
