//! User-facing advisory notices (limit reached, tab not closable, ...).
//!
//! Notices are fire-and-forget: nothing in the engine depends on them being
//! delivered.

use std::cell::RefCell;
use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Info,
    Warn,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoticeKind::Info => "info",
            NoticeKind::Warn => "warn",
            NoticeKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// A single delivered notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Sink for advisory notices.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Routes notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Info => log::info!("{}", message),
            NoticeKind::Warn => log::warn!("{}", message),
            NoticeKind::Error => log::error!("{}", message),
        }
    }
}

/// Collects notices so a UI can show them as toasts.
#[derive(Debug, Default)]
pub struct NoticeBuffer {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every buffered notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl Notifier for NoticeBuffer {
    fn notify(&self, kind: NoticeKind, message: &str) {
        log::debug!("notice [{}]: {}", kind, message);
        self.notices.borrow_mut().push(Notice {
            kind,
            message: message.to_string(),
        });
    }
}
