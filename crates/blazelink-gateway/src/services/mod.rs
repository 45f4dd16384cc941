//! Built-in command handlers.

pub mod redirector;
pub mod util;

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;

/// Registers every built-in handler on `dispatcher`.
pub fn register_all(dispatcher: &Dispatcher, config: &GatewayConfig) {
    dispatcher.register(Arc::new(util::Ping));
    dispatcher.register(Arc::new(util::PreAuth));
    dispatcher.register(Arc::new(util::PostAuth::from_config(config)));
    dispatcher.register(Arc::new(redirector::GetServerInstance::from_config(config)));
}
