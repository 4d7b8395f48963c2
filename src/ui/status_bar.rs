//! Status bar UI rendering
//!
//! Handles the bottom status bar: memory, tabs, layout breakpoint and the
//! persistence state of the active table.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::utils::{format_count, format_memory_mb, format_saved_at, get_current_memory_mb};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let colors = state.context.theme().current_theme().colors;
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let manager = state.context.tabs().manager();
        ui.label(format!(
            "Tabs: {} / {}",
            manager.tabs_count(),
            manager.options().max_tabs
        ));
        ui.label(RichText::new("|").strong());
        ui.label(format!("Layout: {}", state.breakpoint()));

        if let Some(view) = state.active_page() {
            ui.label(RichText::new("|").strong());
            ui.label(format!("Rows: {}", format_count(view.rows.len())));
            ui.label(RichText::new("|").strong());
            let saved = format_saved_at(view.table.persistence().last_saved_at());
            if view.table.has_pending_save() {
                ui.label(RichText::new(format!("{} (pending)", saved)).color(colors.orange));
            } else {
                ui.label(saved);
            }
        }

        if let Some(event) = &state.last_event {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!("Last event: {}", event)).color(colors.text_dim));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&state.store_label).weak().small());
        });
    });
}
