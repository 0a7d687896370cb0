//! Notification channel -- how threshold crossings and failures reach the
//! instructor.
//!
//! Announcement sets are played in **reverse** declared order with a fixed
//! gap between messages. That ordering is inherited behavior the product
//! owner wants kept as-is, so it is preserved exactly and pinned by tests.

use std::time::Duration;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

/// Host-UI seam for user-visible messages.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

/// Prints severity-tagged lines to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("[{}] {message}", severity.label());
    }
}

/// Show a message set through the notifier, last-declared message first,
/// waiting `gap` after each one.
pub async fn announce<N: Notifier>(
    notifier: &N,
    severity: Severity,
    messages: &[String],
    gap: Duration,
) {
    for message in messages.iter().rev() {
        notifier.notify(severity, message);
        tokio::time::sleep(gap).await;
    }
}
