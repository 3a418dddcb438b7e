//! Transient user notifications ("toasts").
//!
//! Screens and dialogs never surface errors any other way: every failed
//! fetch or mutation becomes an error toast, every successful mutation a
//! success toast.

use tracing::{info, warn};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this is an error toast.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}

/// Sink for toasts.
pub trait Notifier {
    /// Show `toast` to the user.
    fn notify(&mut self, toast: Toast);
}

/// Notifier that records toasts in order and mirrors them to tracing.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Vec<Toast>,
}

impl ToastLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts recorded so far.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Most recent toast.
    #[must_use]
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Whether any error toast was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.toasts.iter().any(Toast::is_error)
    }

    /// Remove and return all recorded toasts.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}

impl Notifier for ToastLog {
    fn notify(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => info!(message = %toast.message, "toast"),
            ToastLevel::Error => warn!(message = %toast.message, "toast"),
        }
        self.toasts.push(toast);
    }
}
