//! Notifier implementations.

use crate::ports::Notifier;

/// Notifier that emits `tracing` error events.
///
/// The default sink when no UI is attached; front ends supply their own
/// implementation (e.g., the CLI writes to stderr).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "shopcart::notify", "{message}");
    }
}
