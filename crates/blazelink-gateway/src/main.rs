//! blazelink gateway binary.
//!
//! Boot order: tracing, config, handler registration, then the two
//! listeners (redirector first, main second). The redirector is the port
//! clients hard-code; it answers with the main listener's address.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use blazelink_gateway::{config, dispatch::Dispatcher, services, transport};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("blazelink.yaml").expect("config load failed");

    let dispatcher = Arc::new(Dispatcher::new());
    services::register_all(&dispatcher, &cfg);

    let redirector_addr = format!("0.0.0.0:{}", cfg.ports.redirector);
    let main_addr = format!("0.0.0.0:{}", cfg.ports.main);

    let redirector = TcpListener::bind(&redirector_addr)
        .await
        .expect("failed to bind redirector port");
    let main_listener = TcpListener::bind(&main_addr)
        .await
        .expect("failed to bind main port");

    tracing::info!(
        redirector = %redirector_addr,
        main = %main_addr,
        external_host = %cfg.external_host,
        handlers = dispatcher.registered().len(),
        "blazelink-gateway starting"
    );

    let redirector_dispatcher = dispatcher.clone();
    tokio::spawn(async move {
        if let Err(e) = transport::serve(redirector, redirector_dispatcher).await {
            tracing::error!(error = %e, "redirector listener failed");
        }
    });

    transport::serve(main_listener, dispatcher)
        .await
        .expect("main listener failed");
}
