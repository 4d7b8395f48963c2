//! Role detail view, opened by double-clicking a role row.

use eframe::egui;
use egui::{RichText, ScrollArea};
use rconsole::ThemeColors;
use serde_json::Value;

use crate::app::AppState;

/// Path of the page holding the role rows.
const ROLES_PATH: &str = "/system/role";

fn find_role<'a>(state: &'a AppState, id: &str) -> Option<&'a Value> {
    state
        .pages
        .get(ROLES_PATH)?
        .rows
        .iter()
        .find(|row| row.get("id").map(Value::to_string).as_deref() == Some(id))
}

/// Renders the role named by the active tab's `id` parameter.
pub fn render_detail_view(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) {
    let manager = state.context.tabs().manager();
    let Some(id) = manager.active_tab().and_then(|tab| tab.params.get("id")) else {
        ui.colored_label(colors.text_dim, "(no role selected)");
        return;
    };
    let Some(role) = find_role(state, id) else {
        ui.colored_label(colors.red, format!("Role {} not found", id));
        return;
    };

    ui.label(RichText::new(format!("Role #{}", id)).strong().size(18.0));
    ui.separator();

    ScrollArea::vertical()
        .id_salt("role_detail_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("role_detail_grid")
                .num_columns(2)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    if let Some(fields) = role.as_object() {
                        for (field, value) in fields {
                            ui.label(RichText::new(field).color(colors.text_dim));
                            let text = match value {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            };
                            ui.label(RichText::new(text).color(colors.text));
                            ui.end_row();
                        }
                    }
                });
        });
}
