// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Reports a prep or daemon failure to whatever is watching the terminal.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Desktop notification via `notify-rust`.
///
/// On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings) to
/// send notifications via the Notification Center. The first notification
/// triggers `ensure_application_set()`, which runs an AppleScript to look up
/// a bundle identifier; in a long-lived watcher without Automation
/// permissions that AppleScript blocks forever. The bundle identifier is
/// pre-set at construction time to bypass the lookup entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // notify_rust::Notification::show() is synchronous on macOS; run it
        // on the blocking pool so it can't stall the watch loop.
        tokio::task::spawn_blocking(move || {
            tracing::info!(%title, %message, "sending desktop notification");
            match notify_rust::Notification::new().summary(&title).body(&message).show() {
                Ok(_) => tracing::debug!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}

/// Rings the terminal bell (`BEL`, 0x07) on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct BellNotifier;

#[async_trait]
impl Notifier for BellNotifier {
    async fn notify(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        use tokio::io::AsyncWriteExt;
        tokio::io::stdout()
            .write_all(b"\x07")
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

/// Fans a notification out to every notifier in the set.
#[derive(Default)]
pub struct NotifierSet {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

#[async_trait]
impl Notifier for NotifierSet {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(title, message).await {
                tracing::warn!(error = %e, "notifier failed");
            }
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{NotifyError, Notifier};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct NotifyCall {
        pub title: String,
        pub message: String,
    }

    /// Records every call instead of sending anything, for tests.
    #[derive(Clone, Default)]
    pub struct FakeNotifier {
        calls: Arc<Mutex<Vec<NotifyCall>>>,
    }

    impl FakeNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<NotifyCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            self.calls.lock().push(NotifyCall { title: title.to_string(), message: message.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifier, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
