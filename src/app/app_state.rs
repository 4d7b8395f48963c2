//! Centralized application state for the console GUI.
//!
//! The engine-side state lives in [`AppContext`]; this struct adds what only
//! the window needs: open pages, the viewport bridge, layout and toasts.

use rconsole::{
    AppContext, Breakpoint, BreakpointTracker, JsonFileStorage, KeyValueStorage, MemoryStorage, Notice, NoticeBuffer,
    TabOptions, ThemeManager, ThemePreference, ViewportPort,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use super::egui_viewport::EguiViewport;
use super::page_view::PageView;

/// Environment variable overriding the state file location.
pub const STORE_ENV: &str = "RCONSOLE_STORE";

/// UI layout preferences, persisted through eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    pub sidebar_collapsed: bool,
    pub sidebar_width: f32,
    pub show_column_panel: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            sidebar_collapsed: false,
            sidebar_width: 200.0,
            show_column_panel: false,
        }
    }
}

/// A notice on screen since `shown_at`.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Main application state.
pub struct AppState {
    // ===== Engine =====
    /// Storage, tab controller and theme preference
    pub context: AppContext,

    /// Notices raised by the engine, drained into `toasts` every frame
    pub notices: Rc<NoticeBuffer>,

    // ===== Pages =====
    /// Open demo pages keyed by route path
    pub pages: BTreeMap<String, PageView>,

    /// Tabs being refreshed and when the refresh started
    pub refreshing: Vec<(String, Instant)>,

    // ===== Window =====
    pub viewport: EguiViewport,
    pub breakpoints: BreakpointTracker,
    /// Widths reported by the viewport since the last frame
    pub resizes: Rc<RefCell<Vec<f32>>>,
    pub layout: LayoutState,

    // ===== Feedback =====
    pub toasts: Vec<Toast>,
    /// Name of the last table event, for the status bar
    pub last_event: Option<String>,
    pub store_label: String,
}

impl AppState {
    /// Builds the state around the file store (or memory when the file store
    /// cannot be opened).
    pub fn new(preference: ThemePreference, layout: LayoutState, width: f32) -> Self {
        let (storage, store_label) = open_storage();
        let notices = Rc::new(NoticeBuffer::new());
        let options = TabOptions {
            home_icon: "🏠".to_string(),
            ..TabOptions::default()
        };
        let mut context = AppContext::new(storage, notices.clone(), options);
        *context.theme_mut() = ThemeManager::with_preference(preference);

        let mut viewport = EguiViewport::new(width);
        let resizes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&resizes);
        viewport.on_resize(Box::new(move |w| sink.borrow_mut().push(w)));

        let breakpoints = BreakpointTracker::new(viewport.width());
        let mut layout = layout;
        if breakpoints.current().collapses_sidebar() {
            layout.sidebar_collapsed = true;
        }

        Self {
            context,
            notices,
            pages: BTreeMap::new(),
            refreshing: Vec::new(),
            viewport,
            breakpoints,
            resizes,
            layout,
            toasts: Vec::new(),
            last_event: None,
            store_label,
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoints.current()
    }

    /// Path of the active tab, `/` when none is active.
    pub fn active_path(&self) -> String {
        self.context
            .tabs()
            .manager()
            .active_tab()
            .map(|t| t.path.clone())
            .unwrap_or_else(|| "/".to_string())
    }

    pub fn active_page(&self) -> Option<&PageView> {
        self.pages.get(&self.active_path())
    }

    pub fn active_page_mut(&mut self) -> Option<&mut PageView> {
        let path = self.active_path();
        self.pages.get_mut(&path)
    }
}

fn open_storage() -> (Box<dyn KeyValueStorage>, String) {
    let opened = match std::env::var_os(STORE_ENV) {
        Some(path) => JsonFileStorage::open(PathBuf::from(path)),
        None => JsonFileStorage::open_default(),
    };
    match opened {
        Ok(storage) => {
            let label = storage.path().display().to_string();
            log::info!("state store: {}", label);
            (Box::new(storage), label)
        }
        Err(e) => {
            log::error!("cannot open state store, keeping state in memory: {:#}", e);
            (Box::new(MemoryStorage::new()), "in-memory".to_string())
        }
    }
}
