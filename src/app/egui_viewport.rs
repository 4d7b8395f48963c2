//! [`ViewportPort`] backed by the egui context.

use eframe::egui;
use rconsole::viewport::{ResizeCallback, ViewportPort};

/// Window width and dark-mode bridge between egui and the console engine.
///
/// egui has no resize callback of its own, so [`EguiViewport::observe`] is
/// called once per frame and fans out width changes to the registered
/// callbacks.
pub struct EguiViewport {
    width: f32,
    dark: Option<bool>,
    theme_dirty: bool,
    callbacks: Vec<ResizeCallback>,
}

impl EguiViewport {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            dark: None,
            theme_dirty: false,
            callbacks: Vec::new(),
        }
    }

    /// Picks up the frame's width and pushes a pending dark-mode change.
    pub fn observe(&mut self, ctx: &egui::Context) {
        let width = ctx.content_rect().width();
        if (width - self.width).abs() >= 1.0 {
            self.width = width;
            for callback in &mut self.callbacks {
                callback(width);
            }
        }

        if self.theme_dirty {
            self.theme_dirty = false;
            let theme = if self.dark == Some(true) {
                egui::Theme::Dark
            } else {
                egui::Theme::Light
            };
            ctx.set_theme(theme);
        }
    }
}

impl ViewportPort for EguiViewport {
    fn width(&self) -> f32 {
        self.width
    }

    fn set_dark_mode(&mut self, dark: bool) {
        if self.dark != Some(dark) {
            self.dark = Some(dark);
            self.theme_dirty = true;
        }
    }

    fn on_resize(&mut self, callback: ResizeCallback) {
        self.callbacks.push(callback);
    }
}

impl std::fmt::Debug for EguiViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiViewport")
            .field("width", &self.width)
            .field("dark", &self.dark)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dark_mode_marks_dirty_once() {
        let mut viewport = EguiViewport::new(1280.0);
        viewport.set_dark_mode(true);
        assert!(viewport.theme_dirty);
        viewport.theme_dirty = false;
        viewport.set_dark_mode(true);
        assert!(!viewport.theme_dirty);
    }

    #[test]
    fn test_callbacks_registered() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut viewport = EguiViewport::new(1280.0);
        let sink = Rc::clone(&seen);
        viewport.on_resize(Box::new(move |w| sink.borrow_mut().push(w)));
        for callback in &mut viewport.callbacks {
            callback(800.0);
        }
        assert_eq!(*seen.borrow(), vec![800.0]);
    }
}
