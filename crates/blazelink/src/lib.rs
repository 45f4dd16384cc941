//! Top-level facade crate for blazelink.
//!
//! Re-exports the protocol core and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use blazelink_core::*;
}

pub mod gateway {
    pub use blazelink_gateway::*;
}
