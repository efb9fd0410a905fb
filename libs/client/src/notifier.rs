//! Transient notifications for mutating operations

use tracing::{info, warn};

/// Sink for short success and failure messages shown to the user
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that writes to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(notification = "error", "{}", message);
    }
}
