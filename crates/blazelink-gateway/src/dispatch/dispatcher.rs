use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use blazelink_core::registry;
use blazelink_core::Packet;

use crate::error::Result;
use crate::session::SessionCtx;

/// Generic error code for handler failures.
pub const SYSTEM_ERROR: u16 = 0x4001;

/// One remote procedure: a single (component, command) pair.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn component(&self) -> u16;
    fn command(&self) -> u16;
    async fn handle(&self, ctx: &SessionCtx, request: &Packet) -> Result<Packet>;
}

/// Registry and dispatcher for command handlers.
///
/// Unknown commands get an empty `RESPONSE` rather than silence: the
/// client blocks on its sequence id, and an empty reply keeps it moving
/// on protocol messages this server does not implement yet.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<(u16, u16), Arc<dyn CommandHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, handler: Arc<dyn CommandHandler>) {
        self.handlers
            .insert((handler.component(), handler.command()), handler);
    }

    pub fn registered(&self) -> Vec<(u16, u16)> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    /// Routes one inbound packet to its handler and returns the reply to
    /// write back.
    pub async fn dispatch(&self, ctx: &SessionCtx, request: &Packet) -> Packet {
        let key = (request.component, request.command);
        let handler = match self.handlers.get(&key) {
            Some(entry) => entry.value().clone(),
            None => {
                tracing::debug!(
                    session = ctx.id,
                    component = registry::component_name(request.component),
                    command = registry::command_name(request.component, request.command),
                    "no handler, sending empty response"
                );
                return request.respond(Bytes::new());
            }
        };

        match handler.handle(ctx, request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    session = ctx.id,
                    component = registry::component_name(request.component),
                    command = registry::command_name(request.component, request.command),
                    error = %e,
                    "handler failed"
                );
                request.respond_error(SYSTEM_ERROR, Bytes::new())
            }
        }
    }
}
