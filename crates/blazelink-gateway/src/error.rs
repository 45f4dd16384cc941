//! Gateway-level error type.

use thiserror::Error;

/// Shared result type for gateway code.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Unified error for transport, dispatch, and config paths.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A body failed to decode. The connection-level caller decides
    /// whether to drop the connection or skip the message.
    #[error("decode: {0}")]
    Decode(#[from] blazelink_core::DecodeError),

    /// A handler produced a structurally invalid value, e.g. a map with
    /// mixed entry types.
    #[error("value: {0}")]
    Value(#[from] blazelink_core::ValueError),

    #[error("config: {0}")]
    Config(String),
}
