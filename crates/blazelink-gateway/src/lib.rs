//! blazelink gateway library entry.
//!
//! This crate wires the TCP transport, dispatcher, session context, and
//! built-in services around the protocol core into a runnable server. It
//! is intended to be consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod services;
pub mod session;
pub mod transport;

pub use error::{GatewayError, Result};
