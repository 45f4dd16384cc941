//! Per-connection session context handed to command handlers.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic session id source, shared by all listeners.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one client connection.
///
/// Decode and dispatch are strictly sequential within a session; this
/// context is read-only from a handler's point of view.
#[derive(Debug, Clone)]
pub struct SessionCtx {
    pub id: u64,
    pub addr: SocketAddr,
}

impl SessionCtx {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            addr,
        }
    }
}
