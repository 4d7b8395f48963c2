//! Live table state with watched mutations.
//!
//! Every setter that changes a persisted sub-state schedules a debounced
//! save; [`TableController::tick`] is called once per frame to flush a due
//! save and resolve pending row clicks.

use serde_json::Value;
use std::time::Instant;

use crate::columns::{
    batch_set_frozen, partition_by_frozen, reorder, toggle_frozen, update_by_key, ColumnNormalizer,
    FreezeDirection, PartitionedColumns, TableColumn, Width,
};
use crate::storage::KeyValueStorage;

use super::events::{toggle_member, ClickResolver, RowRef, TableEvent};
use super::persistence::{PersistOptions, PersistenceEvent, TablePersistence};
use super::settings::{FilterState, Pagination, SortState, TableSettings, TableViewState};

/// Owns one table's view state, its persistence and its event outbox.
#[derive(Debug)]
pub struct TableController<T> {
    state: TableViewState<T>,
    persistence: TablePersistence,
    normalizer: ColumnNormalizer<T>,
    clicks: ClickResolver<RowRef>,
    events: Vec<TableEvent>,
}

impl<T> TableController<T> {
    pub fn new(columns: Vec<TableColumn<T>>, options: PersistOptions) -> Self {
        Self {
            state: TableViewState::new(columns),
            persistence: TablePersistence::new(options),
            normalizer: ColumnNormalizer::new(),
            clicks: ClickResolver::default(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &TableViewState<T> {
        &self.state
    }

    pub fn persistence(&self) -> &TablePersistence {
        &self.persistence
    }

    pub fn columns(&self) -> &[TableColumn<T>] {
        &self.state.columns
    }

    /// Enabled columns, groups kept, through the cached normalizer.
    pub fn normalized_columns(&mut self) -> Vec<TableColumn<T>> {
        self.normalizer.normalize(&self.state.columns)
    }

    pub fn partitioned(&self) -> PartitionedColumns<'_, T> {
        partition_by_frozen(&self.state.columns)
    }

    fn watch(&mut self, watched: bool, now: Instant) {
        if watched {
            self.persistence.schedule_save(now);
        }
    }

    fn columns_changed(&mut self, columns: Vec<TableColumn<T>>, now: Instant) {
        self.state.columns = columns;
        let watched = self.persistence.options().columns;
        self.watch(watched, now);
    }

    // ========================================================================
    // Columns
    // ========================================================================

    pub fn set_columns(&mut self, columns: Vec<TableColumn<T>>, now: Instant) {
        self.columns_changed(columns, now);
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize, now: Instant) {
        let columns = reorder(&self.state.columns, from, to);
        self.columns_changed(columns, now);
        self.events.push(TableEvent::ColumnReorder { from, to });
    }

    pub fn toggle_frozen(&mut self, key: &str, direction: Option<FreezeDirection>, now: Instant) {
        let columns = toggle_frozen(&self.state.columns, key, direction);
        self.columns_changed(columns, now);
    }

    pub fn batch_set_frozen(&mut self, keys: &[&str], direction: FreezeDirection, now: Instant) {
        let columns = batch_set_frozen(&self.state.columns, keys, direction);
        self.columns_changed(columns, now);
    }

    pub fn set_column_visible(&mut self, key: &str, visible: bool, now: Instant) {
        let columns = update_by_key(&self.state.columns, key, &|col| col.visible = Some(visible));
        self.columns_changed(columns, now);
    }

    /// Finishes a column resize, storing the width in pixels.
    pub fn resize_column(&mut self, key: &str, width: f32, now: Instant) {
        let width = width.max(0.0).round();
        let columns = update_by_key(&self.state.columns, key, &|col| col.width = Some(Width::Px(width)));
        self.columns_changed(columns, now);
        self.events.push(TableEvent::ColumnResizeEnd {
            key: key.to_string(),
            width,
        });
    }

    // ========================================================================
    // Display, paging, sorting, filtering
    // ========================================================================

    pub fn set_selected_style(&mut self, style: impl Into<String>, now: Instant) {
        self.state.selected_style = style.into();
        self.watch(true, now);
    }

    pub fn set_table_settings(&mut self, settings: TableSettings, now: Instant) {
        self.state.table_settings = settings;
        self.watch(true, now);
    }

    pub fn set_pagination(&mut self, pagination: Pagination, now: Instant) {
        self.state.pagination = pagination;
        let watched = self.persistence.options().pagination;
        self.watch(watched, now);
        self.events.push(TableEvent::Page(pagination));
    }

    pub fn set_sorting(&mut self, sorting: SortState, now: Instant) {
        self.state.sorting = sorting.clone();
        let watched = self.persistence.options().sorting;
        self.watch(watched, now);
        self.events.push(TableEvent::Sort(sorting));
    }

    pub fn set_filters(&mut self, filters: FilterState, now: Instant) {
        self.state.filters = filters.clone();
        let watched = self.persistence.options().filters;
        self.watch(watched, now);
        self.events.push(TableEvent::Filter(filters));
    }

    // ========================================================================
    // Selection and expansion
    // ========================================================================

    fn selection_changed(&mut self, now: Instant) {
        let watched = self.persistence.options().selection;
        self.watch(watched, now);
        self.events
            .push(TableEvent::SelectionChange(self.state.selection.clone()));
    }

    pub fn toggle_row(&mut self, id: &Value, now: Instant) {
        toggle_member(&mut self.state.selection, id);
        self.selection_changed(now);
    }

    pub fn select_all(&mut self, ids: Vec<Value>, now: Instant) {
        self.state.selection = ids;
        self.selection_changed(now);
    }

    pub fn clear_selection(&mut self, now: Instant) {
        self.state.selection.clear();
        self.selection_changed(now);
    }

    pub fn is_selected(&self, id: &Value) -> bool {
        self.state.selection.contains(id)
    }

    fn expansion_changed(&mut self, now: Instant) {
        let watched = self.persistence.options().expansion;
        self.watch(watched, now);
    }

    pub fn expand_row(&mut self, id: &Value, now: Instant) {
        if !self.state.expanded_rows.contains(id) {
            self.state.expanded_rows.push(id.clone());
        }
        self.expansion_changed(now);
        self.events.push(TableEvent::RowExpand(id.clone()));
    }

    pub fn collapse_row(&mut self, id: &Value, now: Instant) {
        self.state.expanded_rows.retain(|v| v != id);
        self.expansion_changed(now);
        self.events.push(TableEvent::RowCollapse(id.clone()));
    }

    pub fn toggle_row_expansion(&mut self, id: &Value, now: Instant) {
        toggle_member(&mut self.state.expanded_rows, id);
        self.expansion_changed(now);
    }

    pub fn expand_all(&mut self, ids: Vec<Value>, now: Instant) {
        self.state.expanded_rows = ids;
        self.expansion_changed(now);
    }

    pub fn collapse_all(&mut self, now: Instant) {
        self.state.expanded_rows.clear();
        self.expansion_changed(now);
    }

    pub fn is_expanded(&self, id: &Value) -> bool {
        self.state.expanded_rows.contains(id)
    }

    // ========================================================================
    // Row clicks and pass-through events
    // ========================================================================

    pub fn row_click(&mut self, row: RowRef, now: Instant) {
        self.clicks.click(row, now);
    }

    pub fn row_double_click(&mut self, row: RowRef) {
        self.clicks.double_click(row);
    }

    pub fn cell_edit_complete(&mut self, row: RowRef, field: impl Into<String>, value: Value) {
        self.events.push(TableEvent::CellEditComplete {
            row,
            field: field.into(),
            value,
        });
    }

    pub fn cell_edit_cancel(&mut self, row: RowRef, field: impl Into<String>) {
        self.events.push(TableEvent::CellEditCancel {
            row,
            field: field.into(),
        });
    }

    pub fn refresh(&mut self) {
        self.events.push(TableEvent::Refresh);
    }

    /// Drains interaction events, oldest first.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_persistence_events(&mut self) -> Vec<PersistenceEvent> {
        self.persistence.take_events()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Per-frame update: resolves row clicks and flushes a due save.
    ///
    /// # Returns
    /// `true` if state was written to storage.
    pub fn tick(&mut self, now: Instant, storage: &mut dyn KeyValueStorage) -> bool {
        for outcome in self.clicks.poll(now) {
            self.events.push(outcome.into());
        }
        self.persistence.flush_due(now, storage, &self.state)
    }

    pub fn has_pending_save(&self) -> bool {
        self.persistence.has_pending_save()
    }

    pub fn restore(&mut self, storage: &mut dyn KeyValueStorage) -> bool {
        self.persistence.restore_state(storage, &mut self.state)
    }

    pub fn save_now(&mut self, storage: &mut dyn KeyValueStorage) -> bool {
        self.persistence.save_state(storage, &self.state)
    }

    pub fn clear_saved(&mut self, storage: &mut dyn KeyValueStorage) {
        self.persistence.clear_state(storage);
    }

    pub fn has_saved_state(&self, storage: &dyn KeyValueStorage) -> bool {
        self.persistence.has_saved_state(storage)
    }

    /// Clears the saved record and resets everything but the columns.
    pub fn reset_to_default(&mut self, storage: &mut dyn KeyValueStorage) {
        self.persistence.reset_to_default(storage, &mut self.state);
    }

    pub fn export_state(&self, storage: &dyn KeyValueStorage) -> String {
        self.persistence.export_state(storage)
    }

    pub fn import_state(&mut self, storage: &mut dyn KeyValueStorage, json: &str) -> bool {
        self.persistence.import_state(storage, &mut self.state, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{compute_offset, Column, FrozenSide};
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::time::Duration;

    type Row = Value;

    fn controller(options: PersistOptions) -> TableController<Row> {
        TableController::new(
            vec![
                Column::new("id").width(60.0).into(),
                Column::new("name").width(140.0).into(),
                Column::new("email").width(200.0).into(),
            ],
            options,
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_of_mutations_writes_once() {
        let mut storage = MemoryStorage::new();
        let mut table = controller(PersistOptions::everything("users"));
        let start = Instant::now();

        table.resize_column("name", 180.0, start);
        table.toggle_frozen("id", Some(FreezeDirection::Left), start + ms(50));
        table.set_pagination(
            Pagination {
                first: 20,
                rows: 10,
                page: 2,
            },
            start + ms(100),
        );

        assert!(!table.tick(start + ms(399), &mut storage));
        assert!(table.tick(start + ms(400), &mut storage));
        assert!(!table.has_pending_save());

        let saves = table.take_persistence_events();
        assert_eq!(saves.len(), 1);
        match &saves[0] {
            PersistenceEvent::StateSave(record) => {
                assert_eq!(record.pagination.map(|p| p.page), Some(2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unwatched_sub_state_does_not_schedule() {
        let mut table = controller(PersistOptions::enabled("users"));
        table.set_pagination(Pagination::default(), Instant::now());
        table.toggle_row(&json!(1), Instant::now());
        assert!(!table.has_pending_save());

        table.set_selected_style("compact", Instant::now());
        assert!(table.has_pending_save());
    }

    #[test]
    fn test_restore_does_not_schedule_save() {
        let mut storage = MemoryStorage::new();
        let mut first = controller(PersistOptions::everything("users"));
        first.toggle_frozen("email", Some(FreezeDirection::Right), Instant::now());
        assert!(first.save_now(&mut storage));

        let mut second = controller(PersistOptions::everything("users"));
        assert!(second.restore(&mut storage));
        assert!(!second.has_pending_save());
        assert!(!second.tick(Instant::now() + ms(1000), &mut storage));
        let email = second.columns()[2].as_leaf().unwrap();
        assert_eq!(email.frozen_side(), Some(FrozenSide::Right));
    }

    #[test]
    fn test_frozen_offsets_follow_controller_state() {
        let mut table = controller(PersistOptions::default());
        let now = Instant::now();
        table.batch_set_frozen(&["id", "name"], FreezeDirection::Left, now);
        assert_eq!(compute_offset(table.columns(), "name"), 60.0);
        assert_eq!(table.partitioned().left_frozen.len(), 2);
    }

    #[test]
    fn test_selection_and_expansion_bookkeeping() {
        let mut table = controller(PersistOptions::default());
        let now = Instant::now();

        table.toggle_row(&json!(1), now);
        table.toggle_row(&json!(2), now);
        table.toggle_row(&json!(1), now);
        assert!(table.is_selected(&json!(2)));
        assert!(!table.is_selected(&json!(1)));

        table.expand_row(&json!(5), now);
        table.expand_row(&json!(5), now);
        assert_eq!(table.state().expanded_rows, vec![json!(5)]);
        table.collapse_row(&json!(5), now);
        assert!(!table.is_expanded(&json!(5)));

        let names: Vec<_> = table.take_events().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "selection-change",
                "selection-change",
                "selection-change",
                "row-expand",
                "row-expand",
                "row-collapse"
            ]
        );
    }

    #[test]
    fn test_row_clicks_resolve_on_tick() {
        let mut storage = MemoryStorage::new();
        let mut table = controller(PersistOptions::default());
        let start = Instant::now();
        let row = RowRef { id: json!(9), index: 0 };

        table.row_click(row.clone(), start);
        table.row_click(row.clone(), start + ms(150));
        table.tick(start + ms(600), &mut storage);
        assert_eq!(table.take_events(), vec![TableEvent::RowDblClick(row.clone())]);

        table.row_click(row.clone(), start + ms(1000));
        table.tick(start + ms(1100), &mut storage);
        assert!(table.take_events().is_empty());
        table.tick(start + ms(1300), &mut storage);
        assert_eq!(table.take_events(), vec![TableEvent::RowClick(row)]);
    }

    #[test]
    fn test_normalized_columns_reflect_visibility_edits() {
        let mut table = controller(PersistOptions::default());
        assert_eq!(table.normalized_columns().len(), 3);
        table.set_column_visible("email", false, Instant::now());
        let normalized = table.normalized_columns();
        assert_eq!(normalized[2].as_leaf().unwrap().visible, Some(false));
    }
}
