//! TCP transport: accept loop and per-connection session task.
//!
//! Each connection gets its own task, its own codec state, and a tracing
//! span carrying the session id. Decode and dispatch are strictly
//! sequential per connection; replies go out in request order.

pub mod codec;

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use tracing::Instrument;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::session::SessionCtx;

use codec::PacketCodec;

/// Accepts connections forever, spawning one session task each.
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        let ctx = SessionCtx::new(addr);
        let dispatcher = dispatcher.clone();

        let span = tracing::info_span!("session", id = ctx.id, %addr);
        tokio::spawn(
            async move {
                tracing::debug!("connected");
                match run_session(stream, ctx, dispatcher).await {
                    Ok(()) => tracing::debug!("disconnected"),
                    Err(e) => tracing::warn!(error = %e, "session ended with error"),
                }
            }
            .instrument(span),
        );
    }
}

async fn run_session(
    stream: TcpStream,
    ctx: SessionCtx,
    dispatcher: Arc<Dispatcher>,
) -> Result<()> {
    let mut framed = Framed::new(stream, PacketCodec::new());

    while let Some(next) = framed.next().await {
        let request = next?;
        let reply = dispatcher.dispatch(&ctx, &request).await;
        framed.send(reply).await?;
    }

    Ok(())
}
