//! Header panel UI rendering
//!
//! Handles the top bar with the sidebar toggle, layout file controls and the
//! theme selectors.

use eframe::egui;
use rconsole::Primary;
use std::path::PathBuf;

use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    ToggleSidebar,
    ToggleColumnPanel,
    /// User picked a file to export the active table layout to
    ExportLayout(PathBuf),
    /// User picked a layout file to import
    ImportLayout(PathBuf),
    ResetLayout,
}

fn layout_dialog() -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new().add_filter("Table Layout", &["json"]);
    if let Ok(cwd) = std::env::current_dir() {
        dialog = dialog.set_directory(cwd);
    }
    dialog
}

/// Renders the application header
///
/// Theme changes are applied to the state directly; everything touching
/// storage or files is returned to the caller.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let has_table = state.active_page().is_some();

    ui.horizontal(|ui| {
        let toggle_label = if state.layout.sidebar_collapsed { "☰" } else { "⏴" };
        if ui.button(toggle_label).on_hover_text("Toggle sidebar").clicked() {
            interaction = Some(HeaderInteraction::ToggleSidebar);
        }

        ui.heading("Admin Console");
        ui.separator();

        ui.add_enabled_ui(has_table, |ui| {
            if ui.button("⬇ Export Layout").clicked() {
                if let Some(path) = layout_dialog().set_file_name("table-layout.json").save_file() {
                    interaction = Some(HeaderInteraction::ExportLayout(path));
                }
            }

            if ui.button("⬆ Import Layout").clicked() {
                if let Some(path) = layout_dialog().pick_file() {
                    interaction = Some(HeaderInteraction::ImportLayout(path));
                }
            }

            if ui.button("⟲ Reset Layout").clicked() {
                interaction = Some(HeaderInteraction::ResetLayout);
            }

            let columns_label = if state.layout.show_column_panel { "▣ Columns" } else { "▢ Columns" };
            if ui.button(columns_label).clicked() {
                interaction = Some(HeaderInteraction::ToggleColumnPanel);
            }
        });

        // Push theme selectors to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme = state.context.theme_mut();

            let mut dark = theme.is_dark();
            if ui.checkbox(&mut dark, "🌙 Dark").changed() {
                theme.set_dark(dark);
                ui.ctx().request_repaint();
            }

            let mut primary = theme.preference().primary;
            egui::ComboBox::from_id_salt("primary_selector")
                .selected_text(primary.name())
                .show_ui(ui, |ui| {
                    for candidate in Primary::ALL {
                        ui.selectable_value(&mut primary, candidate, candidate.name());
                    }
                });
            if primary != theme.preference().primary {
                theme.set_primary(primary);
                ui.ctx().request_repaint();
            }

            ui.label("Palette:");
        });
    });

    interaction
}
