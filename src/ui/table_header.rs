//! Table header component rendering
//!
//! Paints the header row of a data table with sort indicators and resize
//! handles. Cell positions are computed by the caller so frozen columns can
//! stay pinned while the body scrolls.

use eframe::egui;
use egui::Color32;
use rconsole::table::{SortOrder, SortState};
use rconsole::ThemeColors;

use crate::rendering::text_utils::{fit_text, Overflow};

pub const HEADER_HEIGHT: f32 = 28.0;
const HANDLE_WIDTH: f32 = 8.0;

/// One header cell in screen coordinates.
#[derive(Debug, Clone)]
pub struct HeaderCell {
    pub key: String,
    /// Field sorted on when the header is clicked.
    pub sort_field: Option<String>,
    pub label: String,
    pub x: f32,
    pub width: f32,
    pub min_width: f32,
    pub max_width: Option<f32>,
    pub frozen: bool,
}

/// Result of header interactions
#[derive(Debug, Clone, PartialEq)]
pub enum TableHeaderInteraction {
    SortRequested(String),
    /// A resize handle is being dragged; `width` is the live width
    Resizing { key: String, width: f32 },
    ResizeEnded { key: String, width: f32 },
}

fn sort_marker(sorting: &SortState, field: &str) -> &'static str {
    match (sorting.sort_field.as_deref(), sorting.sort_order) {
        (Some(f), Some(SortOrder::Asc)) if f == field => " ▲",
        (Some(f), Some(SortOrder::Desc)) if f == field => " ▼",
        _ => " ⇅",
    }
}

/// Renders the header row
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `top` - Screen y of the header row
/// * `cells` - Cells in paint order; frozen cells last so they cover scrolled ones
/// * `sorting` - Active sort, for the indicators
/// * `colors` - Palette of the current theme
pub fn render_table_header(
    ui: &mut egui::Ui,
    top: f32,
    cells: &[HeaderCell],
    sorting: &SortState,
    colors: &ThemeColors,
) -> Option<TableHeaderInteraction> {
    let mut interaction = None;
    let font_id = egui::FontId::proportional(14.0);
    let painter = ui.painter().with_clip_rect(ui.clip_rect());

    for cell in cells {
        let rect = egui::Rect::from_min_size(egui::pos2(cell.x, top), egui::vec2(cell.width, HEADER_HEIGHT));
        let fill = if cell.frozen {
            colors.frozen_background
        } else {
            colors.panel_background
        };
        painter.rect_filled(rect, 0.0, fill);
        painter.line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            egui::Stroke::new(1.0, colors.border),
        );

        let mut label = cell.label.clone();
        if let Some(field) = &cell.sort_field {
            label.push_str(sort_marker(sorting, field));

            let id = ui.id().with(("header_sort", &cell.key));
            let response = ui.interact(rect.shrink2(egui::vec2(HANDLE_WIDTH, 0.0)), id, egui::Sense::click());
            if response.clicked() {
                interaction = Some(TableHeaderInteraction::SortRequested(field.clone()));
            }
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }

        let fitted = fit_text(&label, cell.width, Overflow::Ellipsis, &font_id, &painter);
        painter.text(
            rect.left_center() + egui::vec2(4.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &fitted.text,
            font_id.clone(),
            colors.text_strong,
        );

        // Column resize handle
        let handle_rect = egui::Rect::from_center_size(
            egui::pos2(rect.right(), rect.center().y),
            egui::vec2(HANDLE_WIDTH, HEADER_HEIGHT),
        );
        let handle_id = ui.id().with(("header_resize", &cell.key));
        let handle_response = ui.interact(handle_rect, handle_id, egui::Sense::drag());

        if handle_response.dragged() {
            let mut width = (cell.width + handle_response.drag_delta().x).max(cell.min_width);
            if let Some(max) = cell.max_width {
                width = width.min(max);
            }
            interaction = Some(TableHeaderInteraction::Resizing {
                key: cell.key.clone(),
                width,
            });
        }
        if handle_response.drag_stopped() {
            interaction = Some(TableHeaderInteraction::ResizeEnded {
                key: cell.key.clone(),
                width: cell.width,
            });
        }

        // Visual feedback
        let handle_color = if handle_response.hovered() || handle_response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            colors.primary
        } else {
            Color32::TRANSPARENT
        };
        painter.rect_filled(handle_rect.shrink(2.0), 0.0, handle_color);
    }

    interaction
}
