//! Notifier: where success and error messages are surfaced.

use crate::config::{ClientConfig, ToastPosition};
use crate::store::{Notice, NoticeLevel};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Fire-and-forget message sink
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);

    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => self.notify_success(&notice.message),
            NoticeLevel::Error => self.notify_error(&notice.message),
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify_success(&self, message: &str) {
        (**self).notify_success(message)
    }

    fn notify_error(&self, message: &str) {
        (**self).notify_error(message)
    }
}

/// Writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!("✅ {}", message);
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!("❌ {}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: NoticeLevel,
    pub message: String,
    pub shown_at: Instant,
}

/// Auto-dismissing toast stack, newest last.
///
/// Cheap to clone; clones share the same stack.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
    position: ToastPosition,
}

impl ToastQueue {
    pub fn new(ttl: Duration, position: ToastPosition) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl,
            position,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.toast_duration(), config.toast_position)
    }

    pub fn position(&self) -> ToastPosition {
        self.position
    }

    fn push(&self, level: NoticeLevel, message: &str) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.push(Toast {
            level,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Toasts still on screen at `now`; expired ones are dropped
    pub fn visible_at(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| now.saturating_duration_since(t.shown_at) < self.ttl);
        toasts.clone()
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.visible_at(Instant::now())
    }
}

impl Notifier for ToastQueue {
    fn notify_success(&self, message: &str) {
        tracing::info!("{}", message);
        self.push(NoticeLevel::Success, message);
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!("{}", message);
        self.push(NoticeLevel::Error, message);
    }
}
