//! Text fitting for painter-drawn cells.

use eframe::egui;

/// Horizontal padding kept inside every cell (4.0 on each side).
pub const CELL_PADDING: f32 = 8.0;

/// How text that does not fit is shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Cut and end with `...`.
    Ellipsis,
    /// Cut at the last character that fits.
    Clip,
}

/// Text shortened to a width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedText {
    pub text: String,
    pub truncated: bool,
}

fn text_width(text: &str, font_id: &egui::FontId, painter: &egui::Painter) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Longest prefix (in chars) of `text` no wider than `limit`.
fn fitting_prefix(text: &str, limit: f32, font_id: &egui::FontId, painter: &egui::Painter) -> usize {
    let mut low = 0;
    let mut high = text.chars().count();
    while low < high {
        let mid = (low + high).div_ceil(2);
        let prefix: String = text.chars().take(mid).collect();
        if text_width(&prefix, font_id, painter) <= limit {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

/// Shortens `text` to fit a cell of `cell_width`.
///
/// # Arguments
/// * `text` - The cell text
/// * `cell_width` - Width of the cell, padding included
/// * `overflow` - How to shorten text that does not fit
/// * `font_id` - Font used for measuring
/// * `painter` - Painter for text measurement
pub fn fit_text(
    text: &str,
    cell_width: f32,
    overflow: Overflow,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> FittedText {
    let limit = cell_width - CELL_PADDING;
    if limit <= 0.0 {
        return FittedText {
            text: String::new(),
            truncated: !text.is_empty(),
        };
    }
    if text_width(text, font_id, painter) <= limit {
        return FittedText {
            text: text.to_string(),
            truncated: false,
        };
    }

    let (suffix, limit) = match overflow {
        Overflow::Clip => ("", limit),
        Overflow::Ellipsis => ("...", limit - text_width("...", font_id, painter)),
    };
    if limit <= 0.0 {
        return FittedText {
            text: String::new(),
            truncated: true,
        };
    }

    let kept = fitting_prefix(text, limit, font_id, painter);
    let mut shortened: String = text.chars().take(kept).collect();
    shortened.push_str(suffix);
    FittedText {
        text: shortened,
        truncated: true,
    }
}
