//! Sidebar with the demo routes.

use eframe::egui;
use egui::RichText;
use rconsole::RouteLocation;

use crate::app::AppState;
use crate::io::demo_data::PAGES;

/// Renders the route list.
///
/// # Returns
/// The route the user picked, if any.
pub fn render_sidebar(ui: &mut egui::Ui, state: &AppState) -> Option<RouteLocation> {
    let mut picked = None;
    let active_path = state.active_path();

    ui.label(RichText::new("Navigation").strong());
    ui.separator();

    for page in PAGES.iter() {
        let selected = active_path == page.path;
        let label = format!("{}  {}", page.icon, page.title);
        if ui.selectable_label(selected, label).clicked() {
            picked = Some(page.route());
        }
    }

    ui.add_space(12.0);
    ui.label(RichText::new(format!("Layout: {}", state.breakpoint())).weak().small());

    picked
}
