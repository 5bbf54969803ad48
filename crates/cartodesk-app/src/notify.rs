use std::collections::VecDeque;
use tracing::{error, info, warn};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// A fire-and-forget notification for the front-end to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// One-way notification sink. The core pushes, the renderer drains;
/// there is no return value and no retry.
pub struct Notifier {
    queue: VecDeque<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.queue.push_back(Toast {
            level: ToastLevel::Info,
            message,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.queue.push_back(Toast {
            level: ToastLevel::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.queue.push_back(Toast {
            level: ToastLevel::Error,
            message,
        });
    }

    /// Take all pending toasts, oldest first
    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
