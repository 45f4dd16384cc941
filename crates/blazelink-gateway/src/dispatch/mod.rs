//! Command dispatch: (component, command) to handler.

mod dispatcher;

pub use dispatcher::{CommandHandler, Dispatcher, SYSTEM_ERROR};
