//! Toast overlay for engine notices.

use eframe::egui;
use rconsole::{NoticeKind, ThemeColors};

use crate::app::Toast;

/// Stacks the live toasts in the bottom-right corner.
pub fn render_toasts(ctx: &egui::Context, toasts: &[Toast], colors: &ThemeColors) {
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -36.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in toasts {
                let accent = match toast.notice.kind {
                    NoticeKind::Info => colors.primary,
                    NoticeKind::Warn => colors.orange,
                    NoticeKind::Error => colors.red,
                };
                egui::Frame::NONE
                    .fill(colors.panel_background)
                    .stroke(egui::Stroke::new(1.0, accent))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        ui.colored_label(accent, &toast.notice.message);
                    });
                ui.add_space(4.0);
            }
        });
}
