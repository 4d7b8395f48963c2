//! Application-level modules for the console GUI.
//!
//! This module contains the application coordinator and centralized state management.

mod app_state;
mod application_coordinator;
mod egui_viewport;
mod page_view;
mod settings_coordinator;
mod theme_coordinator;

pub use app_state::{AppState, Toast};
pub use application_coordinator::{ApplicationCoordinator, TabAction, TableAction};
pub use page_view::{display_tree, PageView, ResizeDrag};
pub use settings_coordinator::SettingsCoordinator;
pub use theme_coordinator::ThemeCoordinator;
