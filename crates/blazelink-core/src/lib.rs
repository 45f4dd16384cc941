//! blazelink core: the Blaze/TDF wire protocol, transport-free.
//!
//! This crate owns the parts of the protocol with real correctness risk:
//! varint and TDF value encoding/decoding, resumable packet framing, the
//! packet envelope, and the diagnostics renderer. It carries no transport
//! or runtime dependencies so the gateway, tooling, and tests can all
//! reuse it. The encoding must stay bit-exact with an external,
//! unmodifiable game client.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed or truncated input surfaces as [`DecodeError`]/[`Result`],
//! never as a crash or an out-of-bounds read.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod builder;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod frame;
pub mod packet;
pub mod reader;
pub mod registry;
pub mod tag;
pub mod value;
pub mod varint;
pub mod writer;

pub use builder::TdfBuilder;
pub use cursor::Cursor;
pub use error::{DecodeError, Result, ValueError};
pub use frame::FrameDecoder;
pub use packet::{MessageKind, Packet};
pub use tag::{Label, WireType};
pub use value::{find, Group, ListValue, MapKey, MapValue, Tdf, TdfMap, TdfValue, UNION_ABSENT};
