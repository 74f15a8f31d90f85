//! Debug logging hook.

use std::fmt;

/// Leveled logger injected into the client for debug mode.
///
/// In debug mode the client logs the request URL before sending and the
/// response status, headers and body after receipt.
pub trait Logger: fmt::Debug + Send + Sync {
    /// Log at debug level.
    fn debug(&self, message: &str);
    /// Log at info level.
    fn info(&self, message: &str);
    /// Log at error level.
    fn error(&self, message: &str);
}

/// Logger that forwards to `tracing` under the `bybit_api::debug` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "bybit_api::debug", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "bybit_api::debug", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "bybit_api::debug", "{}", message);
    }
}
