//! Shared error types for the protocol core.

use thiserror::Error;

use crate::tag::Label;
use crate::value::Tdf;

/// Shared result type for decode paths.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decode failure kinds.
///
/// `Truncated` is special: during frame extraction it is a resumption
/// signal ("feed me more bytes"), recovered locally by rewinding the
/// buffer, and never surfaced to callers. Everywhere else it is a hard
/// failure for the envelope being decoded. All other kinds abort decoding
/// of the current envelope only; the connection-level caller decides what
/// to do with the connection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Ran out of bytes mid-value.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// Varint longer than 10 bytes, non-minimal, or overflowing 64 bits.
    #[error("malformed varint")]
    MalformedVarint,

    /// Tag carried a wire-type code outside the known set.
    #[error("unknown wire type {code:#04x} (last good label: {last_label:?})")]
    UnknownWireType {
        code: u8,
        /// Label of the last value decoded before the failure, if any.
        last_label: Option<Label>,
    },

    /// List declared an element type the protocol does not allow in lists.
    #[error("unknown list subtype {code:#04x}")]
    UnknownListSubtype { code: u8 },

    /// Map declared a key or value type the protocol does not allow in
    /// maps. The code may name a perfectly valid wire type, just not one
    /// usable in map position.
    #[error("unknown map subtype {code:#04x}")]
    UnknownMapSubtype { code: u8 },

    /// Union discriminant was neither the absent sentinel nor a known type.
    #[error("invalid union discriminant {discriminant:#04x}")]
    InvalidUnionDiscriminant { discriminant: u8 },

    /// Input ended inside the 4-byte field tag.
    #[error("label decode failure: {available} bytes left at tag boundary")]
    LabelDecodeFailure { available: usize },

    /// Input ended before a group's zero sentinel.
    #[error("group not terminated before end of input")]
    GroupUnterminated,

    /// A group member failed to decode. Carries the failing member's label
    /// and every member decoded before it, for diagnosing payloads that are
    /// malformed deep inside an otherwise long body.
    #[error("group member {label} failed after {} decoded members: {source}", partial.len())]
    GroupMember {
        label: Label,
        partial: Vec<Tdf>,
        #[source]
        source: Box<DecodeError>,
    },

    /// Text payload was not valid UTF-8.
    #[error("text payload is not valid utf-8")]
    InvalidText,
}

impl DecodeError {
    /// `true` if this is the "need more bytes" resumption signal.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }

    /// Walks nested group-member context to the root cause.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::GroupMember { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Encode-side contract violations.
///
/// These are programmer errors (e.g. a map handed mixed key types) caught
/// at value construction, so the writer itself is infallible and can never
/// emit partial bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("map keys must all be the same type")]
    MixedMapKeys,
    #[error("map values must all be the same type")]
    MixedMapValues,
    #[error("type is not usable as a map key")]
    UnsupportedMapKey,
    #[error("type is not usable as a map value")]
    UnsupportedMapValue,
    #[error("map needs at least one entry to infer its types")]
    EmptyMap,
}
