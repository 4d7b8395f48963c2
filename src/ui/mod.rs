//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the console:
//! - Header panel (sidebar toggle, layout files, theme selectors)
//! - Sidebar (page routes)
//! - Tab bar (open pages with close variants)
//! - Data table with sticky frozen columns and its header component
//! - Column panel (visibility, freeze side, order)
//! - Role detail view, toasts and the status bar
//! - Panel manager (panel orchestration and layout)

pub mod column_panel;
pub mod data_table;
pub mod detail_view;
pub mod header;
pub mod panel_manager;
pub mod sidebar;
pub mod status_bar;
pub mod tab_bar;
pub mod table_header;
pub mod toasts;
