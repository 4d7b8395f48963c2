//! Application-level coordination and workflow management.
//!
//! Turns panel interactions into engine calls: navigation through the tab
//! controller, table edits through each page's controller, layout file
//! import and export, and the per-frame tick that flushes debounced saves.

use anyhow::{bail, Context, Result};
use rconsole::table::{Pagination, RowRef, SortOrder, SortState, TableEvent, TableSettings};
use rconsole::{FreezeDirection, NavigationRequest, NoticeKind, RouteLocation};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use super::app_state::{AppState, Toast};
use super::page_view::{PageView, GLOBAL_FILTER};
use crate::io::demo_data::{self, PageKind, ROLE_DETAIL_PATH};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Simulated reload time of a refreshed tab.
pub const REFRESH_DURATION: Duration = Duration::from_millis(400);

/// Tab bar interactions.
#[derive(Debug, Clone, PartialEq)]
pub enum TabAction {
    Activate(String),
    Close(String),
    CloseOthers(String),
    CloseLeft(String),
    CloseRight(String),
    CloseAll,
    Refresh(String),
}

/// Table and column panel interactions on the active page.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    RowClicked(RowRef),
    RowDoubleClicked(RowRef),
    ToggleSelected(Value),
    SelectPage(Vec<Value>),
    ClearSelection,
    ToggleExpanded(Value),
    Sort(String),
    GoToPage(usize),
    RowsPerPage(usize),
    Search(String),
    ResizeEnded { key: String, width: f32 },
    Freeze { key: String, direction: Option<FreezeDirection> },
    FreezeMany { keys: Vec<String>, direction: FreezeDirection },
    SetVisible { key: String, visible: bool },
    MoveColumn { from: usize, to: usize },
    SetStyle(String),
    SetSettings(TableSettings),
    Refresh,
}

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Restores the tab session and opens the active page.
    pub fn start(state: &mut AppState) {
        state.context.init();
        Self::ensure_active_page(state);
    }

    /// Persists everything still pending. Called when eframe saves.
    pub fn shutdown(state: &mut AppState) {
        let storage = state.context.storage_mut();
        for view in state.pages.values_mut() {
            if view.table.has_pending_save() {
                view.table.save_now(storage);
            }
        }
        state.context.save_session();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Runs the route guard for `route` and shows its page.
    pub fn navigate(state: &mut AppState, route: &RouteLocation) {
        if state.context.tabs_mut().on_route_change(route) {
            Self::follow(state, None);
        }
    }

    /// Applies a navigation request returned by a tab operation.
    fn follow(state: &mut AppState, request: Option<NavigationRequest>) {
        if let Some(request) = request {
            log::debug!("navigate to {}", request.path);
        }
        Self::ensure_active_page(state);
        state.context.save_session();
    }

    fn ensure_active_page(state: &mut AppState) {
        let mut path = state.active_path();
        if path == ROLE_DETAIL_PATH {
            path = "/system/role".to_string();
        }
        if state.pages.contains_key(&path) {
            return;
        }
        if let Some(page) = demo_data::page(&path) {
            let view = PageView::open(page, state.context.storage_mut());
            state.pages.insert(path, view);
        }
    }

    pub fn handle_tab_action(state: &mut AppState, action: TabAction, now: Instant) {
        let tabs = state.context.tabs_mut();
        let request = match action {
            TabAction::Activate(key) => tabs.activate(&key),
            TabAction::Close(key) => tabs.close(&key),
            TabAction::CloseOthers(key) => tabs.close_others(&key),
            TabAction::CloseLeft(key) => tabs.close_left(&key),
            TabAction::CloseRight(key) => tabs.close_right(&key),
            TabAction::CloseAll => tabs.close_all(),
            TabAction::Refresh(key) => {
                if tabs.refresh(&key) {
                    state.refreshing.push((key, now));
                }
                return;
            }
        };
        Self::follow(state, request);
    }

    // ========================================================================
    // Tables
    // ========================================================================

    pub fn handle_table_action(state: &mut AppState, action: TableAction, now: Instant) {
        let Some(view) = state.active_page_mut() else {
            return;
        };
        let table = &mut view.table;
        match action {
            TableAction::RowClicked(row) => table.row_click(row, now),
            TableAction::RowDoubleClicked(row) => table.row_double_click(row),
            TableAction::ToggleSelected(id) => table.toggle_row(&id, now),
            TableAction::SelectPage(ids) => table.select_all(ids, now),
            TableAction::ClearSelection => table.clear_selection(now),
            TableAction::ToggleExpanded(id) => table.toggle_row_expansion(&id, now),
            TableAction::Sort(field) => {
                let next = next_sort(&table.state().sorting, &field);
                table.set_sorting(next, now);
            }
            TableAction::GoToPage(page) => {
                let mut pagination = table.state().pagination;
                pagination.go_to(page);
                table.set_pagination(pagination, now);
            }
            TableAction::RowsPerPage(rows) => {
                table.set_pagination(
                    Pagination {
                        first: 0,
                        rows,
                        page: 0,
                    },
                    now,
                );
            }
            TableAction::Search(text) => {
                let mut filters = table.state().filters.clone();
                if text.is_empty() {
                    filters.remove(GLOBAL_FILTER);
                } else {
                    filters.insert(GLOBAL_FILTER.to_string(), Value::String(text));
                }
                table.set_filters(filters, now);
                if table.state().pagination.page != 0 {
                    let mut pagination = table.state().pagination;
                    pagination.go_to(0);
                    table.set_pagination(pagination, now);
                }
            }
            TableAction::ResizeEnded { key, width } => table.resize_column(&key, width, now),
            TableAction::Freeze { key, direction } => table.toggle_frozen(&key, direction, now),
            TableAction::FreezeMany { keys, direction } => {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                table.batch_set_frozen(&keys, direction, now);
            }
            TableAction::SetVisible { key, visible } => table.set_column_visible(&key, visible, now),
            TableAction::MoveColumn { from, to } => table.reorder_columns(from, to, now),
            TableAction::SetStyle(style) => table.set_selected_style(style, now),
            TableAction::SetSettings(settings) => table.set_table_settings(settings, now),
            TableAction::Refresh => table.refresh(),
        }
    }

    /// Per-frame housekeeping.
    ///
    /// # Returns
    /// `true` while something is waiting on time (a debounced save, a click
    /// window, a resize, a refresh or a toast), so the caller keeps repainting.
    pub fn tick(state: &mut AppState, ctx: &egui::Context, now: Instant) -> bool {
        state.viewport.observe(ctx);
        let widths: Vec<f32> = state.resizes.borrow_mut().drain(..).collect();
        let mut waiting = !widths.is_empty();
        for width in widths {
            state.breakpoints.resize(width, now);
        }
        if let Some(change) = state.breakpoints.poll(now) {
            log::info!("layout breakpoint {} -> {}", change.from, change.to);
            state.layout.sidebar_collapsed = change.to.collapses_sidebar();
        }

        Self::finish_refreshes(state, now);
        waiting |= !state.refreshing.is_empty();

        let mut routes = Vec::new();
        let storage = state.context.storage_mut();
        for (path, view) in state.pages.iter_mut() {
            view.table.tick(now, storage);
            for event in view.table.take_persistence_events() {
                log::debug!("{}: {}", path, event.name());
            }
            for event in view.table.take_events() {
                log::debug!("{}: {}", path, event.name());
                if let TableEvent::RowDblClick(row) = &event {
                    match view.page.kind {
                        PageKind::Roles => {
                            let name = view
                                .rows
                                .get(row.index)
                                .and_then(|r| r.get("name"))
                                .and_then(Value::as_str)
                                .unwrap_or_default();
                            routes.push(demo_data::role_detail_route(&row.id.to_string(), name));
                        }
                        _ => view.table.toggle_row_expansion(&row.id, now),
                    }
                }
                state.last_event = Some(event.name().to_string());
            }
            waiting |= view.table.has_pending_save();
        }
        for route in routes {
            Self::navigate(state, &route);
        }

        for notice in state.notices.drain() {
            state.toasts.push(Toast { notice, shown_at: now });
        }
        state.toasts.retain(|t| now.duration_since(t.shown_at) < TOAST_LIFETIME);
        waiting || !state.toasts.is_empty()
    }

    fn finish_refreshes(state: &mut AppState, now: Instant) {
        let (done, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut state.refreshing)
            .into_iter()
            .partition(|(_, started)| now.duration_since(*started) >= REFRESH_DURATION);
        state.refreshing = pending;

        for (key, _) in done {
            let manager = state.context.tabs_mut().manager_mut();
            manager.set_tab_loading(&key, false);
            let Some(path) = manager.get(&key).map(|t| t.path.clone()) else {
                continue;
            };
            if let Some(view) = state.pages.get_mut(&path) {
                view.rows = demo_data::rows_for(view.page, demo_data::DEMO_SEED);
                view.table.refresh();
            }
        }
    }

    // ========================================================================
    // Layout files
    // ========================================================================

    /// Writes the active page's saved layout to `path`.
    pub fn export_layout(state: &mut AppState, path: &Path) -> Result<()> {
        let page_path = state.active_path();
        let Some(view) = state.pages.get_mut(&page_path) else {
            bail!("the active tab has no table layout");
        };
        let storage = state.context.storage_mut();
        if !view.table.save_now(storage) {
            bail!("the layout of {} could not be saved", page_path);
        }
        let json = view.table.export_state(storage);
        if json == "null" {
            bail!("no saved layout for {}", page_path);
        }
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("exported layout of {} to {}", page_path, path.display());
        Ok(())
    }

    /// Replaces the active page's layout with the one in `path`.
    pub fn import_layout(state: &mut AppState, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let page_path = state.active_path();
        let Some(view) = state.pages.get_mut(&page_path) else {
            bail!("the active tab has no table layout");
        };
        if !view.table.import_state(state.context.storage_mut(), &json) {
            bail!("{} is not a table layout", path.display());
        }
        view.filter_text = view
            .table
            .state()
            .filters
            .get(GLOBAL_FILTER)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        log::info!("imported layout for {} from {}", page_path, path.display());
        Ok(())
    }

    /// Forgets the active page's saved layout and restores its defaults.
    pub fn reset_layout(state: &mut AppState, now: Instant) {
        let page_path = state.active_path();
        let Some(view) = state.pages.get_mut(&page_path) else {
            return;
        };
        view.table.reset_to_default(state.context.storage_mut());
        view.table.set_columns(demo_data::columns_for(view.page.kind), now);
        view.filter_text.clear();
        view.resize = None;
    }

    /// Reports the outcome of a file operation as a toast.
    pub fn report(state: &AppState, outcome: Result<()>, success: &str) {
        let notifier = state.context.notifier();
        match outcome {
            Ok(()) => notifier.notify(NoticeKind::Info, success),
            Err(e) => {
                log::error!("{:#}", e);
                notifier.notify(NoticeKind::Error, &format!("{:#}", e));
            }
        }
    }
}

/// Header click cycle: ascending, descending, unsorted.
fn next_sort(current: &SortState, field: &str) -> SortState {
    if current.sort_field.as_deref() != Some(field) {
        return SortState::by(field, SortOrder::Asc);
    }
    match current.sort_order {
        Some(SortOrder::Asc) => SortState::by(field, SortOrder::Desc),
        _ => SortState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle() {
        let asc = next_sort(&SortState::default(), "name");
        assert_eq!(asc, SortState::by("name", SortOrder::Asc));
        let desc = next_sort(&asc, "name");
        assert_eq!(desc, SortState::by("name", SortOrder::Desc));
        assert!(next_sort(&desc, "name").is_empty());
        assert_eq!(next_sort(&desc, "id"), SortState::by("id", SortOrder::Asc));
    }
}
