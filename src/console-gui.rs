//! Admin console GUI application
//!
//! Interactive demo of the console engine built with egui:
//! - Tab strip with a pinned home tab, close variants and refresh
//! - Data tables with sticky frozen columns, resizing, sorting and paging
//! - Per-table layout persistence with export, import and reset
//! - Theme preference (dark mode and primary palette) kept across runs
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Demo pages, columns and rows
//! - `utils/` - Formatting helpers
//! - `ui/` - UI panel rendering
//! - `rendering/` - Text fitting for painted cells

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::time::{Duration, Instant};

mod app;
mod io;
mod rendering;
mod ui;
mod utils;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Environment variable selecting debug logging.
const LOG_ENV: &str = "RCONSOLE_LOG";
const INITIAL_WIDTH: f32 = 1280.0;
/// Repaint cadence while saves, clicks or toasts are waiting on time.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Main application entry point that initializes and launches the console GUI.
fn main() -> eframe::Result {
    let level = match std::env::var(LOG_ENV).as_deref() {
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("logger already initialized: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WIDTH, 800.0])
            .with_title("Admin Console"),
        ..Default::default()
    };

    eframe::run_native(
        "Admin Console",
        options,
        Box::new(|cc| Ok(Box::new(ConsoleApp::new(cc)))),
    )
}

/// The console application.
///
/// Most work is delegated to coordinators:
/// - `ApplicationCoordinator` handles navigation, table actions and housekeeping
/// - `ThemeCoordinator` applies the theme preference
/// - `SettingsCoordinator` persists preferences through eframe storage
/// - `PanelManager` handles UI panel layout and rendering
struct ConsoleApp {
    /// Centralized application state
    state: AppState,
}

impl ConsoleApp {
    /// Creates the application with preferences loaded from persistent storage.
    fn new(cc: &eframe::CreationContext) -> Self {
        let (preference, layout) = SettingsCoordinator::load_preferences(cc.storage);
        let mut state = AppState::new(preference, layout, INITIAL_WIDTH);
        ApplicationCoordinator::start(&mut state);
        Self { state }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, now: Instant) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::ToggleSidebar => {
                state.layout.sidebar_collapsed = !state.layout.sidebar_collapsed;
            }
            PanelInteraction::ToggleColumnPanel => {
                state.layout.show_column_panel = !state.layout.show_column_panel;
            }
            PanelInteraction::ExportLayout(path) => {
                let outcome = ApplicationCoordinator::export_layout(state, &path);
                ApplicationCoordinator::report(state, outcome, "Layout exported");
            }
            PanelInteraction::ImportLayout(path) => {
                let outcome = ApplicationCoordinator::import_layout(state, &path);
                ApplicationCoordinator::report(state, outcome, "Layout imported");
            }
            PanelInteraction::ResetLayout => {
                ApplicationCoordinator::reset_layout(state, now);
                ApplicationCoordinator::report(state, Ok(()), "Layout reset to defaults");
            }
            PanelInteraction::Navigate(route) => ApplicationCoordinator::navigate(state, &route),
            PanelInteraction::Tab(action) => ApplicationCoordinator::handle_tab_action(state, action, now),
            PanelInteraction::Table(action) => ApplicationCoordinator::handle_table_action(state, action, now),
        }
    }
}

impl eframe::App for ConsoleApp {
    /// Called periodically and at shutdown - saves preferences and flushes
    /// pending table layouts and the tab session.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_preferences(storage, &self.state);
        ApplicationCoordinator::shutdown(&mut self.state);
    }

    /// Main update loop:
    /// 1. Apply theme
    /// 2. Advance time-driven state (debounced saves, clicks, resizes, toasts)
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ThemeCoordinator::apply_current_theme(ctx, &mut self.state);

        let now = Instant::now();
        if ApplicationCoordinator::tick(&mut self.state, ctx, now) {
            ctx.request_repaint_after(TICK_INTERVAL);
        }

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction, now);
        }
    }
}
