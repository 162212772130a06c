//! Transient notification banner that dismisses itself.
//!
//! A [`Notification`] owns a timer task. When the delay elapses the
//! dismissal callback runs once; dropping the notification first aborts
//! the timer so the callback never runs after teardown.

use std::fmt;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

/// Delay before a notification dismisses itself
pub const DISMISS_AFTER: Duration = Duration::from_millis(4000);

/// Severity of a notification, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Info => "ℹ",
        }
    }
}

/// A message on screen with a pending auto-dismiss.
///
/// Must be created inside a tokio runtime.
pub struct Notification {
    id: Uuid,
    message: String,
    kind: NotificationKind,
    duration: Duration,
    timer: Option<JoinHandle<()>>,
}

impl Notification {
    /// Show `message` and call `on_close` after [`DISMISS_AFTER`]
    pub fn show<F>(message: impl Into<String>, kind: NotificationKind, on_close: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::show_for(message, kind, DISMISS_AFTER, on_close)
    }

    /// Show `message` and call `on_close` after `duration`
    pub fn show_for<F>(
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Duration,
        on_close: F,
    ) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let mut notification = Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            duration,
            timer: None,
        };
        notification.arm(on_close);
        notification
    }

    /// Replace the dismissal callback.
    ///
    /// The previous callback is dropped without running and the delay
    /// starts over.
    pub fn set_on_close<F>(&mut self, on_close: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.arm(on_close);
    }

    fn arm<F>(&mut self, on_close: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + self.duration;
        let id = self.id;

        self.timer = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            tracing::debug!("Notification {} dismissed", id);
            on_close();
        }));
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Whether the dismissal callback has not run yet
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Notification {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .finish()
    }
}
