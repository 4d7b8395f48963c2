//! Data table rendering.
//!
//! Cells are painted directly. Normal columns scroll with the content while
//! frozen columns stay pinned: left-frozen ones to the visible left edge,
//! right-frozen ones to the visible right edge, each shifted by its sticky
//! offset from `compute_offset` over the visible column tree.

use eframe::egui;
use egui::{Color32, RichText};
use rconsole::columns::{compute_offset, partition_by_frozen, render_cell, update_by_key};
use rconsole::table::{Pagination, RowRef, TableSize};
use rconsole::{Column, TableColumn, ThemeColors, Width};
use serde_json::Value;
use std::collections::HashMap;

use crate::app::{display_tree, PageView, ResizeDrag, TableAction};
use crate::rendering::text_utils::{fit_text, Overflow};
use crate::ui::table_header::{self, HeaderCell, TableHeaderInteraction, HEADER_HEIGHT};

/// Sticky column holding the selection box and the expander.
const GUTTER_WIDTH: f32 = 52.0;
const EXPANDED_HEIGHT: f32 = 26.0;
const FOOTER_HEIGHT: f32 = 34.0;
const SHADOW_WIDTH: f32 = 6.0;

pub const STYLES: [&str; 3] = ["compact", "normal", "comfortable"];
const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// A column with its screen position for this frame.
struct Placed<'a> {
    column: &'a Column<Value>,
    x: f32,
    width: f32,
    frozen: bool,
}

/// Where the frozen regions end, for edge shadows.
struct FrozenEdges {
    left: Option<f32>,
    right: Option<f32>,
}

fn row_height(view: &PageView) -> f32 {
    let state = view.table.state();
    if let Some(height) = state.table_settings.row_height {
        return height;
    }
    match state.table_settings.size {
        Some(TableSize::Small) => 24.0,
        Some(TableSize::Large) => 38.0,
        _ => match state.selected_style.as_str() {
            "compact" => 24.0,
            "comfortable" => 38.0,
            _ => 30.0,
        },
    }
}

fn group_labels(tree: &[TableColumn<Value>]) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for column in tree {
        if let TableColumn::Group(group) = column {
            let header = column.label().to_string();
            for child in &group.children {
                if let Some(key) = child.key() {
                    labels.insert(key.to_string(), header.clone());
                }
            }
        }
    }
    labels
}

/// Screen positions of every visible column.
///
/// Normal columns follow the content origin. Left-frozen columns sit at
/// `max(origin, visible left) + gutter + offset`; right-frozen ones at
/// `min(content end, visible right) - offset - width`, so neither leaves its
/// natural position when the table is narrower than the view.
fn place_columns<'a>(
    tree: &'a [TableColumn<Value>],
    origin_x: f32,
    clip: egui::Rect,
) -> (Vec<Placed<'a>>, f32, FrozenEdges) {
    let parts = partition_by_frozen(tree);
    let total = |cols: &[&Column<Value>]| cols.iter().map(|c| c.pixel_width()).sum::<f32>();
    let left_total = total(&parts.left_frozen);
    let normal_total = total(&parts.normal);
    let right_total = total(&parts.right_frozen);
    let content_width = GUTTER_WIDTH + left_total + normal_total + right_total;

    let mut placed = Vec::with_capacity(parts.len());

    let mut x = origin_x + GUTTER_WIDTH + left_total;
    for &column in &parts.normal {
        let width = column.pixel_width();
        placed.push(Placed {
            column,
            x,
            width,
            frozen: false,
        });
        x += width;
    }

    let left_edge = origin_x.max(clip.left()) + GUTTER_WIDTH;
    for &column in &parts.left_frozen {
        let offset = compute_offset(tree, column.key.as_deref().unwrap_or_default());
        placed.push(Placed {
            column,
            x: left_edge + offset,
            width: column.pixel_width(),
            frozen: true,
        });
    }

    let right_edge = (origin_x + content_width).min(clip.right());
    for &column in &parts.right_frozen {
        let offset = compute_offset(tree, column.key.as_deref().unwrap_or_default());
        let width = column.pixel_width();
        placed.push(Placed {
            column,
            x: right_edge - offset - width,
            width,
            frozen: true,
        });
    }

    let edges = FrozenEdges {
        left: (left_total > 0.0).then_some(left_edge + left_total),
        right: (right_total > 0.0).then_some(right_edge - right_total),
    };
    (placed, content_width, edges)
}

/// Renders toolbar, table and paginator of a page.
///
/// # Returns
/// Everything the user did, in order.
pub fn render_data_table(ui: &mut egui::Ui, view: &mut PageView, colors: &ThemeColors) -> Vec<TableAction> {
    let mut actions = Vec::new();
    render_toolbar(ui, view, &mut actions);
    ui.separator();

    let mut tree = display_tree(view.table.columns());
    if let Some(drag) = &view.resize {
        let width = drag.width;
        tree = update_by_key(&tree, &drag.key, &|c: &mut Column<Value>| c.width = Some(Width::Px(width)));
    }
    let groups = group_labels(&tree);
    let (page_rows, total) = view.page_rows();
    let ids: Vec<Value> = page_rows.iter().map(|&i| view.row_id(i)).collect();
    let row_h = row_height(view);
    let state = view.table.state();
    let rows = &view.rows;
    let mut header_event = None;

    let font_id = egui::FontId::proportional(14.0);
    let detail_font = egui::FontId::monospace(12.0);

    let output = egui::ScrollArea::horizontal()
        .id_salt(("table_h", view.page.path))
        .auto_shrink([false, false])
        .max_height((ui.available_height() - FOOTER_HEIGHT).max(HEADER_HEIGHT))
        .show(ui, |ui| {
            let origin = ui.cursor().min;
            let clip = ui.clip_rect();
            let (placed, content_width, edges) = place_columns(&tree, origin.x, clip);
            let row_width = content_width.max(ui.available_width());
            let gutter_x = origin.x.max(clip.left());

            // ===== Header =====
            let (header_rect, _) = ui.allocate_exact_size(egui::vec2(row_width, HEADER_HEIGHT), egui::Sense::hover());
            let cells: Vec<HeaderCell> = placed
                .iter()
                .map(|p| {
                    let key = p.column.key.clone().unwrap_or_default();
                    let label = match groups.get(&key) {
                        Some(group) => format!("{} › {}", group, p.column.label()),
                        None => p.column.label().to_string(),
                    };
                    HeaderCell {
                        sort_field: p
                            .column
                            .sortable
                            .then(|| p.column.field.clone().unwrap_or_else(|| key.clone())),
                        key,
                        label,
                        x: p.x,
                        width: p.width,
                        min_width: p.column.min_width.as_ref().and_then(Width::to_px).unwrap_or(40.0),
                        max_width: p.column.max_width.as_ref().and_then(Width::to_px),
                        frozen: p.frozen,
                    }
                })
                .collect();
            header_event = table_header::render_table_header(ui, header_rect.top(), &cells, &state.sorting, colors);

            let gutter_header = egui::Rect::from_min_size(
                egui::pos2(gutter_x, header_rect.top()),
                egui::vec2(GUTTER_WIDTH, HEADER_HEIGHT),
            );
            let all_selected = !ids.is_empty() && ids.iter().all(|id| state.selection.contains(id));
            ui.painter().rect_filled(gutter_header, 0.0, colors.frozen_background);
            let select_all = ui.put(
                gutter_header,
                egui::Label::new(if all_selected { "☑" } else { "☐" }).sense(egui::Sense::click()),
            );
            if select_all.clicked() {
                actions.push(if all_selected {
                    TableAction::ClearSelection
                } else {
                    TableAction::SelectPage(ids.clone())
                });
            }

            // ===== Body =====
            egui::ScrollArea::vertical()
                .id_salt(("table_v", view.page.path))
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (position, (&index, id)) in page_rows.iter().zip(&ids).enumerate() {
                        let row = &rows[index];
                        let expanded = state.expanded_rows.contains(id);
                        let selected = state.selection.contains(id);
                        let height = row_h + if expanded { EXPANDED_HEIGHT } else { 0.0 };

                        let (rect, mut response) =
                            ui.allocate_exact_size(egui::vec2(row_width, height), egui::Sense::click());
                        if !ui.is_rect_visible(rect) {
                            continue;
                        }
                        let clip = ui.clip_rect();
                        let painter = ui.painter().with_clip_rect(clip);

                        let fill = if selected {
                            colors.selection
                        } else if response.hovered() {
                            colors.hover
                        } else if state.table_settings.striped_rows && position % 2 == 1 {
                            colors.stripe
                        } else {
                            Color32::TRANSPARENT
                        };
                        painter.rect_filled(rect, 0.0, fill);

                        let mut tooltip = None;
                        for p in &placed {
                            let cell = egui::Rect::from_min_size(
                                egui::pos2(p.x, rect.top()),
                                egui::vec2(p.width, row_h),
                            );
                            if p.frozen {
                                painter.rect_filled(cell, 0.0, colors.frozen_background);
                                painter.rect_filled(cell, 0.0, fill);
                            }
                            let text = render_cell(p.column, row, index);
                            let overflow = if p.column.ellipsis {
                                Overflow::Ellipsis
                            } else {
                                Overflow::Clip
                            };
                            let fitted = fit_text(&text, p.width, overflow, &font_id, &painter);
                            if fitted.truncated && ui.rect_contains_pointer(cell) {
                                tooltip = Some(text.clone());
                            }
                            let color = if p.column.disabled.evaluate(row, index) {
                                colors.text_dim
                            } else {
                                colors.text
                            };
                            painter.with_clip_rect(cell.intersect(clip)).text(
                                cell.left_center() + egui::vec2(4.0, 0.0),
                                egui::Align2::LEFT_CENTER,
                                &fitted.text,
                                font_id.clone(),
                                color,
                            );
                        }

                        // Frozen region edges
                        let stroke = egui::Stroke::new(1.0, colors.border);
                        for edge in [edges.left, edges.right].into_iter().flatten() {
                            painter.line_segment(
                                [egui::pos2(edge, rect.top()), egui::pos2(edge, rect.top() + row_h)],
                                stroke,
                            );
                        }
                        if state.table_settings.show_shadow {
                            let shade = colors.border.gamma_multiply(0.35);
                            if let Some(edge) = edges.left {
                                let shadow = egui::Rect::from_min_size(
                                    egui::pos2(edge, rect.top()),
                                    egui::vec2(SHADOW_WIDTH, row_h),
                                );
                                painter.rect_filled(shadow, 0.0, shade);
                            }
                            if let Some(edge) = edges.right {
                                let shadow = egui::Rect::from_min_size(
                                    egui::pos2(edge - SHADOW_WIDTH, rect.top()),
                                    egui::vec2(SHADOW_WIDTH, row_h),
                                );
                                painter.rect_filled(shadow, 0.0, shade);
                            }
                        }

                        // Sticky gutter with selection box and expander
                        let gutter = egui::Rect::from_min_size(
                            egui::pos2(gutter_x, rect.top()),
                            egui::vec2(GUTTER_WIDTH, row_h),
                        );
                        painter.rect_filled(gutter, 0.0, colors.frozen_background);
                        painter.rect_filled(gutter, 0.0, fill);
                        let (select_rect, expand_rect) = gutter.split_left_right_at_fraction(0.5);
                        let select = ui.put(
                            select_rect,
                            egui::Label::new(if selected { "☑" } else { "☐" }).sense(egui::Sense::click()),
                        );
                        if select.clicked() {
                            actions.push(TableAction::ToggleSelected(id.clone()));
                        }
                        let expand = ui.put(
                            expand_rect,
                            egui::Label::new(if expanded { "▾" } else { "▸" }).sense(egui::Sense::click()),
                        );
                        if expand.clicked() {
                            actions.push(TableAction::ToggleExpanded(id.clone()));
                        }

                        if expanded {
                            painter.text(
                                egui::pos2(gutter.right() + 4.0, rect.top() + row_h + EXPANDED_HEIGHT / 2.0),
                                egui::Align2::LEFT_CENTER,
                                row.to_string(),
                                detail_font.clone(),
                                colors.text_dim,
                            );
                        }

                        if state.table_settings.show_row_divider {
                            painter.line_segment([rect.left_bottom(), rect.right_bottom()], stroke);
                        }

                        if let Some(text) = tooltip {
                            response = response.on_hover_text(text);
                        }
                        let row_ref = RowRef {
                            id: id.clone(),
                            index,
                        };
                        if response.double_clicked() {
                            actions.push(TableAction::RowDoubleClicked(row_ref));
                        } else if response.clicked() {
                            actions.push(TableAction::RowClicked(row_ref));
                        }
                    }

                    if ids.is_empty() {
                        ui.add_space(12.0);
                        ui.label(RichText::new("No matching rows").color(colors.text_dim));
                    }
                });
        });

    if state.table_settings.show_border {
        ui.painter().rect_stroke(
            output.inner_rect,
            0.0,
            egui::Stroke::new(1.0, colors.border),
            egui::StrokeKind::Inside,
        );
    }

    let pagination = state.pagination;
    match header_event {
        Some(TableHeaderInteraction::SortRequested(field)) => actions.push(TableAction::Sort(field)),
        Some(TableHeaderInteraction::Resizing { key, width }) => view.resize = Some(ResizeDrag { key, width }),
        Some(TableHeaderInteraction::ResizeEnded { key, width }) => {
            view.resize = None;
            actions.push(TableAction::ResizeEnded { key, width });
        }
        None => {}
    }

    ui.separator();
    render_footer(ui, pagination, total, &mut actions);
    actions
}

fn render_toolbar(ui: &mut egui::Ui, view: &mut PageView, actions: &mut Vec<TableAction>) {
    let state = view.table.state();
    ui.horizontal(|ui| {
        ui.label("🔍");
        let search = ui.add(
            egui::TextEdit::singleline(&mut view.filter_text)
                .hint_text("Search")
                .desired_width(180.0),
        );
        if search.changed() {
            actions.push(TableAction::Search(view.filter_text.clone()));
        }

        ui.separator();
        let mut style = state.selected_style.clone();
        egui::ComboBox::from_id_salt("table_style")
            .selected_text(style.as_str())
            .show_ui(ui, |ui| {
                for candidate in STYLES {
                    ui.selectable_value(&mut style, candidate.to_string(), candidate);
                }
            });
        if style != state.selected_style {
            actions.push(TableAction::SetStyle(style));
        }

        let mut settings = state.table_settings.clone();
        ui.checkbox(&mut settings.striped_rows, "Striped");
        ui.checkbox(&mut settings.show_row_divider, "Dividers");
        ui.checkbox(&mut settings.show_border, "Border");
        ui.checkbox(&mut settings.show_shadow, "Shadow");
        if settings != state.table_settings {
            actions.push(TableAction::SetSettings(settings));
        }

        ui.separator();
        if ui.button("⟳").on_hover_text("Refresh").clicked() {
            actions.push(TableAction::Refresh);
        }

        if !state.selection.is_empty() {
            ui.label(format!("{} selected", state.selection.len()));
            if ui.small_button("Clear").clicked() {
                actions.push(TableAction::ClearSelection);
            }
        }
    });
}

fn render_footer(ui: &mut egui::Ui, pagination: Pagination, total: usize, actions: &mut Vec<TableAction>) {
    let pages = pagination.page_count(total).max(1);
    let last = pages - 1;
    ui.horizontal(|ui| {
        if ui.add_enabled(pagination.page > 0, egui::Button::new("«")).clicked() {
            actions.push(TableAction::GoToPage(0));
        }
        if ui.add_enabled(pagination.page > 0, egui::Button::new("‹")).clicked() {
            actions.push(TableAction::GoToPage(pagination.page - 1));
        }
        ui.label(format!("Page {} of {}", pagination.page.min(last) + 1, pages));
        if ui.add_enabled(pagination.page < last, egui::Button::new("›")).clicked() {
            actions.push(TableAction::GoToPage(pagination.page + 1));
        }
        if ui.add_enabled(pagination.page < last, egui::Button::new("»")).clicked() {
            actions.push(TableAction::GoToPage(last));
        }

        ui.separator();
        let mut rows = pagination.rows;
        egui::ComboBox::from_id_salt("rows_per_page")
            .selected_text(format!("{} / page", rows))
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    ui.selectable_value(&mut rows, size, format!("{} / page", size));
                }
            });
        if rows != pagination.rows {
            actions.push(TableAction::RowsPerPage(rows));
        }

        ui.label(format!("{} rows", total));
    });
}
