//! Viewport port and responsive breakpoints.
//!
//! The engine never reads window geometry itself. Hosts implement
//! [`ViewportPort`]; a [`BreakpointTracker`] debounces raw resize reports and
//! reports breakpoint transitions once the size has settled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;

/// Quiet window before a resize is acted on.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Callback invoked with the new viewport width.
pub type ResizeCallback = Box<dyn FnMut(f32)>;

/// Window environment as seen by the console.
pub trait ViewportPort {
    /// Current viewport width in logical pixels.
    fn width(&self) -> f32;

    fn set_dark_mode(&mut self, dark: bool);

    /// Registers a callback for width changes.
    fn on_resize(&mut self, callback: ResizeCallback);
}

/// Layout breakpoint derived from width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
    Wide,
}

impl Breakpoint {
    /// `< 768` mobile, `768..=1023` tablet, `1024..=1439` desktop, wide above.
    pub fn from_width(width: f32) -> Self {
        if width < 768.0 {
            Breakpoint::Mobile
        } else if width < 1024.0 {
            Breakpoint::Tablet
        } else if width < 1440.0 {
            Breakpoint::Desktop
        } else {
            Breakpoint::Wide
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Breakpoint::Mobile
    }

    /// Whether the sidebar should start collapsed.
    pub fn collapses_sidebar(self) -> bool {
        matches!(self, Breakpoint::Mobile | Breakpoint::Tablet)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
            Breakpoint::Wide => "wide",
        };
        f.write_str(name)
    }
}

/// A settled breakpoint change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointChange {
    pub from: Breakpoint,
    pub to: Breakpoint,
}

/// Debounced breakpoint tracking.
#[derive(Debug, Clone)]
pub struct BreakpointTracker {
    current: Breakpoint,
    width: f32,
    pending_width: Option<f32>,
    debouncer: Debouncer,
}

impl BreakpointTracker {
    pub fn new(initial_width: f32) -> Self {
        Self {
            current: Breakpoint::from_width(initial_width),
            width: initial_width,
            pending_width: None,
            debouncer: Debouncer::new(RESIZE_DEBOUNCE),
        }
    }

    pub fn current(&self) -> Breakpoint {
        self.current
    }

    /// Last settled width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Records a raw resize. Only the last one in a burst is applied.
    pub fn resize(&mut self, width: f32, now: Instant) {
        self.pending_width = Some(width);
        self.debouncer.trigger(now);
    }

    /// Applies a settled resize.
    ///
    /// # Returns
    /// The transition, if the breakpoint changed.
    pub fn poll(&mut self, now: Instant) -> Option<BreakpointChange> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let width = self.pending_width.take()?;
        self.width = width;
        let next = Breakpoint::from_width(width);
        if next == self.current {
            return None;
        }
        let change = BreakpointChange {
            from: self.current,
            to: next,
        };
        log::debug!("breakpoint {} -> {}", change.from, change.to);
        self.current = next;
        Some(change)
    }
}
