//! Tab bar rendering.
//!
//! One button per open tab with a close cross on closable tabs and a
//! context menu offering the close variants.

use eframe::egui;
use egui::{Color32, RichText};
use rconsole::tabs::DEFAULT_TITLE_LENGTH;
use rconsole::TabItem;

use crate::app::{AppState, TabAction};

/// Renders the tab strip.
///
/// # Returns
/// The tab operation the user asked for, if any.
pub fn render_tab_bar(ui: &mut egui::Ui, state: &AppState) -> Option<TabAction> {
    let mut action = None;
    let manager = state.context.tabs().manager();
    let active_key = manager.active_key();
    let colors = state.context.theme().current_theme().colors;

    egui::ScrollArea::horizontal()
        .id_salt("tab_strip")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for tab in manager.tabs() {
                    let is_active = active_key == Some(tab.key.as_str());
                    if let Some(a) = render_tab(ui, tab, is_active, &colors) {
                        action = Some(a);
                    }
                    ui.add_space(2.0);
                }
            });
        });

    action
}

fn render_tab(
    ui: &mut egui::Ui,
    tab: &TabItem,
    is_active: bool,
    colors: &rconsole::ThemeColors,
) -> Option<TabAction> {
    let mut action = None;

    let fill = if is_active { colors.selection } else { Color32::TRANSPARENT };
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, colors.border))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if tab.loading {
                    ui.spinner();
                }

                let text = match &tab.icon {
                    Some(icon) => format!("{} {}", icon, tab.display_title(DEFAULT_TITLE_LENGTH)),
                    None => tab.display_title(DEFAULT_TITLE_LENGTH),
                };
                let title = if tab.error {
                    RichText::new(text).color(colors.red)
                } else if is_active {
                    RichText::new(text).color(colors.text_strong).strong()
                } else {
                    RichText::new(text).color(colors.text)
                };

                let response = ui
                    .add(egui::Label::new(title).sense(egui::Sense::click()))
                    .on_hover_text(tab.title.as_str());
                if response.clicked() {
                    action = Some(TabAction::Activate(tab.key.clone()));
                }
                if response.middle_clicked() && tab.closable {
                    action = Some(TabAction::Close(tab.key.clone()));
                }

                response.context_menu(|ui| {
                    if ui.button("⟳ Refresh").clicked() {
                        action = Some(TabAction::Refresh(tab.key.clone()));
                        ui.close();
                    }
                    ui.separator();
                    if ui.add_enabled(tab.closable, egui::Button::new("Close")).clicked() {
                        action = Some(TabAction::Close(tab.key.clone()));
                        ui.close();
                    }
                    if ui.button("Close Others").clicked() {
                        action = Some(TabAction::CloseOthers(tab.key.clone()));
                        ui.close();
                    }
                    if ui.button("Close Left").clicked() {
                        action = Some(TabAction::CloseLeft(tab.key.clone()));
                        ui.close();
                    }
                    if ui.button("Close Right").clicked() {
                        action = Some(TabAction::CloseRight(tab.key.clone()));
                        ui.close();
                    }
                    if ui.button("Close All").clicked() {
                        action = Some(TabAction::CloseAll);
                        ui.close();
                    }
                });

                if tab.closable && ui.small_button("✕").clicked() {
                    action = Some(TabAction::Close(tab.key.clone()));
                }
            });
        });

    action
}
