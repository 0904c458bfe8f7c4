//! Notifier that writes to the log.

use tracing::warn;

use rocketshoes_core::Notifier;

/// Sends every user-facing message to `tracing` at warn level.
///
/// Useful for headless embedding where nobody reads a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "rocketshoes::notify", "{}", message);
    }
}
