//! Column settings panel.
//!
//! Lists the top-level columns of the active table with visibility, freeze
//! side and order controls. Group children are shown indented.

use eframe::egui;
use egui::{RichText, ScrollArea};
use rconsole::{Column, FreezeDirection, FrozenSide, TableColumn, ThemeColors};
use serde_json::Value;

use crate::app::{PageView, TableAction};

fn side_name(side: Option<FrozenSide>) -> &'static str {
    match side {
        None => "None",
        Some(FrozenSide::Left) => "Left",
        Some(FrozenSide::Right) => "Right",
    }
}

/// Keys of every frozen leaf, groups included.
fn frozen_keys(columns: &[TableColumn<Value>]) -> Vec<String> {
    let mut keys = Vec::new();
    for column in columns {
        match column {
            TableColumn::Leaf(leaf) if leaf.frozen => keys.extend(leaf.key.clone()),
            TableColumn::Leaf(_) => {}
            TableColumn::Group(group) => keys.extend(frozen_keys(&group.children)),
        }
    }
    keys
}

/// Renders the panel for the active page.
///
/// # Returns
/// The column changes the user asked for.
pub fn render_column_panel(ui: &mut egui::Ui, view: &PageView, colors: &ThemeColors) -> Vec<TableAction> {
    let mut actions = Vec::new();
    let columns = view.table.columns();

    ui.heading("Columns");
    ui.label(RichText::new(view.page.title).color(colors.text_dim));
    ui.separator();

    ScrollArea::vertical()
        .id_salt("column_panel_scroll")
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 40.0).max(0.0))
        .show(ui, |ui| {
            let last = columns.len().saturating_sub(1);
            for (index, column) in columns.iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.add_enabled(index > 0, egui::Button::new("⬆").small()).clicked() {
                        actions.push(TableAction::MoveColumn {
                            from: index,
                            to: index - 1,
                        });
                    }
                    if ui.add_enabled(index < last, egui::Button::new("⬇").small()).clicked() {
                        actions.push(TableAction::MoveColumn {
                            from: index,
                            to: index + 1,
                        });
                    }
                    match column {
                        TableColumn::Leaf(leaf) => render_leaf(ui, leaf, &mut actions),
                        TableColumn::Group(_) => {
                            ui.label(RichText::new(column.label()).strong().color(colors.text_strong));
                        }
                    }
                });
                if let TableColumn::Group(group) = column {
                    ui.indent(("column_group", index), |ui| {
                        for child in &group.children {
                            if let TableColumn::Leaf(leaf) = child {
                                ui.horizontal(|ui| render_leaf(ui, leaf, &mut actions));
                            }
                        }
                    });
                }
            }
        });

    ui.separator();
    let frozen = frozen_keys(columns);
    if ui
        .add_enabled(!frozen.is_empty(), egui::Button::new("Unfreeze all"))
        .clicked()
    {
        actions.push(TableAction::FreezeMany {
            keys: frozen,
            direction: FreezeDirection::None,
        });
    }

    actions
}

fn render_leaf(ui: &mut egui::Ui, leaf: &Column<Value>, actions: &mut Vec<TableAction>) {
    let Some(key) = leaf.key.clone() else {
        ui.label(leaf.label());
        return;
    };

    let mut visible = leaf.is_visible();
    if ui.checkbox(&mut visible, leaf.label()).changed() {
        actions.push(TableAction::SetVisible {
            key: key.clone(),
            visible,
        });
    }

    let current = leaf.frozen_side();
    let mut picked = current;
    egui::ComboBox::from_id_salt(("freeze_side", &key))
        .width(64.0)
        .selected_text(side_name(current))
        .show_ui(ui, |ui| {
            for side in [None, Some(FrozenSide::Left), Some(FrozenSide::Right)] {
                ui.selectable_value(&mut picked, side, side_name(side));
            }
        });
    if picked != current {
        let direction = match picked {
            None => FreezeDirection::None,
            Some(FrozenSide::Left) => FreezeDirection::Left,
            Some(FrozenSide::Right) => FreezeDirection::Right,
        };
        actions.push(TableAction::Freeze {
            key: key.clone(),
            direction: Some(direction),
        });
    }

    let pin = if leaf.frozen { "📌" } else { "📍" };
    if ui.small_button(pin).on_hover_text("Toggle frozen").clicked() {
        actions.push(TableAction::Freeze { key, direction: None });
    }
}
