use rocketshoes_core::Notifier;

/// Prints user-facing messages to stderr, keeping stdout for the cart JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("✖ {}", message);
    }
}
