//! User-facing notifications ("toasts").
//!
//! Controllers report outcomes through [`Notifier`]; they never wait on it
//! and never learn whether the message was shown.

use tracing::{info, warn};

/// Sink for success and error notifications.
pub trait Notifier: Send + Sync {
    /// Reports a successful operation.
    fn success(&self, title: &str, description: Option<&str>);

    /// Reports a failed operation.
    fn error(&self, title: &str, description: Option<&str>);
}

/// Notifier that writes every notification to the `tracing` log.
///
/// Useful for headless runs and as a default when no UI is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, title: &str, description: Option<&str>) {
        info!(title, description = description.unwrap_or(""), "notification");
    }

    fn error(&self, title: &str, description: Option<&str>) {
        warn!(title, description = description.unwrap_or(""), "notification");
    }
}
