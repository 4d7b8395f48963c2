//! Panel orchestration and layout management.
//!
//! Lays out header, status bar, sidebar, column panel and the central tab
//! area, and funnels every interaction back to the caller.

use rconsole::RouteLocation;
use std::path::PathBuf;

use crate::app::{AppState, TabAction, TableAction};
use crate::io::demo_data::ROLE_DETAIL_PATH;
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::{column_panel, data_table, detail_view, sidebar, status_bar, tab_bar, toasts};

/// Result of panel interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    ToggleSidebar,
    ToggleColumnPanel,
    ExportLayout(PathBuf),
    ImportLayout(PathBuf),
    ResetLayout,
    /// A sidebar entry was picked
    Navigate(RouteLocation),
    Tab(TabAction),
    Table(TableAction),
}

impl From<HeaderInteraction> for PanelInteraction {
    fn from(interaction: HeaderInteraction) -> Self {
        match interaction {
            HeaderInteraction::ToggleSidebar => PanelInteraction::ToggleSidebar,
            HeaderInteraction::ToggleColumnPanel => PanelInteraction::ToggleColumnPanel,
            HeaderInteraction::ExportLayout(path) => PanelInteraction::ExportLayout(path),
            HeaderInteraction::ImportLayout(path) => PanelInteraction::ImportLayout(path),
            HeaderInteraction::ResetLayout => PanelInteraction::ResetLayout,
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();
        let colors = state.context.theme().current_theme().colors;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(interaction) = header::render_header(ui, state) {
                interactions.push(interaction.into());
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        if !state.layout.sidebar_collapsed {
            let frame = egui::Frame::default()
                .inner_margin(egui::Margin::same(6))
                .fill(colors.panel_background);
            let response = egui::SidePanel::left("sidebar")
                .default_width(state.layout.sidebar_width)
                .resizable(true)
                .frame(frame)
                .show(ctx, |ui| sidebar::render_sidebar(ui, state));
            state.layout.sidebar_width = response.response.rect.width();
            if let Some(route) = response.inner {
                interactions.push(PanelInteraction::Navigate(route));
            }
        }

        if state.layout.show_column_panel {
            if let Some(view) = state.active_page() {
                egui::SidePanel::right("column_panel")
                    .default_width(300.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        let actions = column_panel::render_column_panel(ui, view, &colors);
                        interactions.extend(actions.into_iter().map(PanelInteraction::Table));
                    });
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(action) = tab_bar::render_tab_bar(ui, state) {
                interactions.push(PanelInteraction::Tab(action));
            }
            ui.separator();

            if state.active_path() == ROLE_DETAIL_PATH {
                detail_view::render_detail_view(ui, state, &colors);
            } else if let Some(view) = state.active_page_mut() {
                let actions = data_table::render_data_table(ui, view, &colors);
                interactions.extend(actions.into_iter().map(PanelInteraction::Table));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Pick a page from the sidebar");
                });
            }
        });

        toasts::render_toasts(ctx, &state.toasts, &colors);
        interactions
    }
}
