//! Applies the theme preference to the egui context.

use super::app_state::AppState;

/// Coordinates theme application.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Applies the current theme to the egui context.
    ///
    /// Called every frame. The dark-mode flag goes to the viewport bridge,
    /// which hands it to egui on its next observe; the palette goes onto the
    /// matching base visuals right away.
    pub fn apply_current_theme(ctx: &egui::Context, state: &mut AppState) {
        let manager = state.context.theme();
        manager.sync_viewport(&mut state.viewport);

        let theme = manager.current_theme();
        let mut visuals = if manager.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        manager.apply_theme(&theme, &mut visuals);
        ctx.set_visuals(visuals);
    }
}
