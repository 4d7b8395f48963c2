//! Table state persistence.
//!
//! A [`TablePersistence`] snapshots the enabled parts of a
//! [`TableViewState`] into one storage slot and merges a saved snapshot back
//! onto live state. Every failure (storage I/O, corrupt JSON) is logged and
//! absorbed; callers only ever see `bool` / `Option` results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

use crate::columns::{FrozenSide, TableColumn, Width};
use crate::debounce::Debouncer;
use crate::storage::{save_json, try_load_json, KeyValueStorage};

use super::settings::{FilterState, Pagination, SortState, TableViewState};

/// Version tag written into every record.
pub const STATE_VERSION: &str = "1.0.0";

/// Storage slot used when the caller supplies none.
pub const DEFAULT_STORAGE_KEY: &str = "custom-table-state";

/// Saved records older than this are discarded on restore.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Quiet window before a watched mutation is written.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Per-table persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    pub enabled: bool,
    pub storage_key: String,
    pub columns: bool,
    pub pagination: bool,
    pub sorting: bool,
    pub filters: bool,
    pub selection: bool,
    pub expansion: bool,
    pub max_age: Duration,
    pub debounce: Duration,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            columns: true,
            pagination: false,
            sorting: false,
            filters: false,
            selection: false,
            expansion: false,
            max_age: DEFAULT_MAX_AGE,
            debounce: SAVE_DEBOUNCE,
        }
    }
}

impl PersistOptions {
    /// Persistence switched on under `storage_key` with default sub-state toggles.
    pub fn enabled(storage_key: impl Into<String>) -> Self {
        Self {
            enabled: true,
            storage_key: storage_key.into(),
            ..Self::default()
        }
    }

    /// Persistence switched on for every sub-state.
    pub fn everything(storage_key: impl Into<String>) -> Self {
        Self {
            pagination: true,
            sorting: true,
            filters: true,
            selection: true,
            expansion: true,
            ..Self::enabled(storage_key)
        }
    }
}

/// Serializable subset of a column. Callbacks and display flags are not kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_frozen: Option<FrozenSide>,
}

impl PersistedColumn {
    pub fn from_column<T>(column: &TableColumn<T>) -> Self {
        match column {
            TableColumn::Leaf(col) => Self {
                key: col.key.clone(),
                field: col.field.clone(),
                header: col.header.clone(),
                visible: col.visible,
                frozen: Some(col.frozen),
                width: col.width.clone(),
                sortable: Some(col.sortable),
                order: col.order,
                align_frozen: col.frozen_side(),
            },
            TableColumn::Group(group) => Self {
                key: group.key.clone(),
                header: group.header.clone(),
                order: group.order,
                ..Self::default()
            },
        }
    }

    /// Matches a live column by key, or failing that by field.
    fn matches<T>(&self, column: &TableColumn<T>) -> bool {
        let key_match = self.key.is_some() && column.key() == self.key.as_deref();
        let field_match = self.field.is_some() && column.field() == self.field.as_deref();
        key_match || field_match
    }

    fn apply_to<T>(&self, column: &mut TableColumn<T>) {
        match column {
            TableColumn::Leaf(col) => {
                let frozen = self.frozen.unwrap_or(false);
                col.visible = self.visible;
                col.width = self.width.clone();
                col.order = self.order;
                col.align_frozen = if frozen {
                    self.align_frozen.or(col.align_frozen)
                } else {
                    None
                };
                col.frozen = frozen;
            }
            TableColumn::Group(group) => group.order = self.order,
        }
    }
}

/// The stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedTableState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<PersistedColumn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_settings: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_rows: Option<Vec<Value>>,
    /// Milliseconds since the Unix epoch. A record without one never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PersistedTableState {
    pub fn is_expired(&self, now_ms: i64, max_age: Duration) -> bool {
        match self.timestamp {
            Some(ts) => now_ms.saturating_sub(ts) > max_age.as_millis() as i64,
            None => false,
        }
    }
}

/// Notifications emitted after a save or a completed restore.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceEvent {
    StateSave(PersistedTableState),
    StateRestore(PersistedTableState),
}

impl PersistenceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PersistenceEvent::StateSave(_) => "state-save",
            PersistenceEvent::StateRestore(_) => "state-restore",
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Saves and restores one table's state.
#[derive(Debug)]
pub struct TablePersistence {
    options: PersistOptions,
    debouncer: Debouncer,
    events: Vec<PersistenceEvent>,
    last_saved_at: Option<i64>,
}

impl TablePersistence {
    pub fn new(options: PersistOptions) -> Self {
        let debouncer = Debouncer::new(options.debounce);
        Self {
            options,
            debouncer,
            events: Vec::new(),
            last_saved_at: None,
        }
    }

    pub fn options(&self) -> &PersistOptions {
        &self.options
    }

    pub fn storage_key(&self) -> &str {
        &self.options.storage_key
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Timestamp of the last successful write.
    pub fn last_saved_at(&self) -> Option<i64> {
        self.last_saved_at
    }

    // ========================================================================
    // Debounced auto-save
    // ========================================================================

    /// Records a watched mutation. Ignored while disabled.
    pub fn schedule_save(&mut self, now: Instant) {
        if !self.options.enabled {
            return;
        }
        self.debouncer.trigger(now);
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Writes the state if the debounce window has elapsed.
    ///
    /// # Returns
    /// `true` if a record was written.
    pub fn flush_due<T>(
        &mut self,
        now: Instant,
        storage: &mut dyn KeyValueStorage,
        state: &TableViewState<T>,
    ) -> bool {
        if self.debouncer.poll(now) {
            self.save_state(storage, state)
        } else {
            false
        }
    }

    // ========================================================================
    // Save / restore
    // ========================================================================

    /// Builds the record for `state` without writing it.
    pub fn snapshot<T>(&self, state: &TableViewState<T>, now_ms: i64) -> PersistedTableState {
        let opts = &self.options;
        let settings = match serde_json::to_value(&state.table_settings) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        };
        PersistedTableState {
            columns: opts
                .columns
                .then(|| state.columns.iter().map(PersistedColumn::from_column).collect()),
            selected_style: (!state.selected_style.is_empty()).then(|| state.selected_style.clone()),
            table_settings: settings,
            pagination: opts.pagination.then_some(state.pagination),
            sorting: opts.sorting.then(|| state.sorting.clone()),
            filters: opts.filters.then(|| state.filters.clone()),
            selection: opts.selection.then(|| state.selection.clone()),
            expanded_rows: opts.expansion.then(|| state.expanded_rows.clone()),
            timestamp: Some(now_ms),
            version: Some(STATE_VERSION.to_string()),
        }
    }

    /// Writes the enabled sub-states now.
    ///
    /// # Returns
    /// `true` if a record was written; `false` when disabled or
    /// the storage refused the write.
    pub fn save_state<T>(&mut self, storage: &mut dyn KeyValueStorage, state: &TableViewState<T>) -> bool {
        self.save_state_at(storage, state, now_millis())
    }

    pub fn save_state_at<T>(
        &mut self,
        storage: &mut dyn KeyValueStorage,
        state: &TableViewState<T>,
        now_ms: i64,
    ) -> bool {
        if !self.options.enabled {
            return false;
        }
        let record = self.snapshot(state, now_ms);
        match save_json(storage, &self.options.storage_key, &record) {
            Ok(()) => {
                log::debug!("saved table state '{}'", self.options.storage_key);
                self.last_saved_at = Some(now_ms);
                self.events.push(PersistenceEvent::StateSave(record));
                true
            }
            Err(e) => {
                log::warn!("failed to save table state '{}': {:#}", self.options.storage_key, e);
                false
            }
        }
    }

    /// Merges the saved record onto `state`.
    ///
    /// Applying the record writes `state` directly and never schedules a save.
    /// Both directions take `&mut self`, so a save cannot run mid-restore.
    ///
    /// # Returns
    /// `true` if a record was applied.
    pub fn restore_state<T>(&mut self, storage: &mut dyn KeyValueStorage, state: &mut TableViewState<T>) -> bool {
        self.restore_state_at(storage, state, now_millis())
    }

    pub fn restore_state_at<T>(
        &mut self,
        storage: &mut dyn KeyValueStorage,
        state: &mut TableViewState<T>,
        now_ms: i64,
    ) -> bool {
        if !self.options.enabled {
            return false;
        }
        let Some(record) = self.get_saved_state(storage) else {
            return false;
        };
        if record.is_expired(now_ms, self.options.max_age) {
            log::debug!("discarding expired table state '{}'", self.options.storage_key);
            self.clear_state(storage);
            return false;
        }

        let opts = &self.options;
        if opts.columns {
            if let Some(saved) = &record.columns {
                if let Some(columns) = merge_columns(&state.columns, saved) {
                    state.columns = columns;
                }
            }
        }
        if let Some(style) = record.selected_style.as_ref().filter(|s| !s.is_empty()) {
            state.selected_style = style.clone();
        }
        if let Some(settings) = &record.table_settings {
            state.table_settings.merge_from(settings);
        }
        if opts.pagination {
            if let Some(pagination) = record.pagination {
                state.pagination = pagination;
            }
        }
        if opts.sorting {
            if let Some(sorting) = &record.sorting {
                state.sorting = sorting.clone();
            }
        }
        if opts.filters {
            if let Some(filters) = &record.filters {
                state.filters = filters.clone();
            }
        }
        if opts.selection {
            if let Some(selection) = &record.selection {
                state.selection = selection.clone();
            }
        }
        if opts.expansion {
            if let Some(expanded) = &record.expanded_rows {
                state.expanded_rows = expanded.clone();
            }
        }

        log::debug!("restored table state '{}'", self.options.storage_key);
        self.events.push(PersistenceEvent::StateRestore(record));
        true
    }

    // ========================================================================
    // Slot management
    // ========================================================================

    /// Removes the saved record.
    pub fn clear_state(&mut self, storage: &mut dyn KeyValueStorage) {
        if let Err(e) = storage.remove(&self.options.storage_key) {
            log::warn!("failed to clear table state '{}': {:#}", self.options.storage_key, e);
        }
    }

    /// Reads the saved record; `None` when absent or corrupt.
    pub fn get_saved_state(&self, storage: &dyn KeyValueStorage) -> Option<PersistedTableState> {
        try_load_json(storage, &self.options.storage_key)
    }

    pub fn has_saved_state(&self, storage: &dyn KeyValueStorage) -> bool {
        self.get_saved_state(storage).is_some()
    }

    /// Clears the slot and resets every sub-state except the columns. A
    /// pending auto-save is dropped so the cleared slot stays empty.
    pub fn reset_to_default<T>(&mut self, storage: &mut dyn KeyValueStorage, state: &mut TableViewState<T>) {
        self.clear_state(storage);
        state.reset_to_default();
        self.debouncer.cancel();
    }

    /// Pretty JSON of the saved record, `null` when there is none.
    pub fn export_state(&self, storage: &dyn KeyValueStorage) -> String {
        let record = self.get_saved_state(storage);
        serde_json::to_string_pretty(&record).unwrap_or_else(|_| "null".to_string())
    }

    /// Validates `json` as a record, writes it to the slot, then restores it.
    ///
    /// # Returns
    /// `true` if the record was written.
    pub fn import_state<T>(
        &mut self,
        storage: &mut dyn KeyValueStorage,
        state: &mut TableViewState<T>,
        json: &str,
    ) -> bool {
        let record: PersistedTableState = match serde_json::from_str(json) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("rejecting imported table state: {}", e);
                return false;
            }
        };
        if let Err(e) = save_json(storage, &self.options.storage_key, &record) {
            log::warn!("failed to store imported table state: {:#}", e);
            return false;
        }
        self.restore_state(storage, state);
        true
    }

    /// Drains pending save/restore notifications.
    pub fn take_events(&mut self) -> Vec<PersistenceEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Applies saved column attributes onto matching live columns, in saved
/// order. Saved entries with no live match are dropped; live columns the
/// snapshot does not mention are appended after the matched ones.
///
/// # Returns
/// `None` when nothing matched, leaving the live columns as they are.
fn merge_columns<T>(live: &[TableColumn<T>], saved: &[PersistedColumn]) -> Option<Vec<TableColumn<T>>> {
    let mut pool: Vec<Option<TableColumn<T>>> = live.iter().cloned().map(Some).collect();
    let mut restored = Vec::with_capacity(live.len());

    for saved_col in saved {
        let slot = pool
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|col| saved_col.matches(col)));
        if let Some(mut col) = slot.and_then(Option::take) {
            saved_col.apply_to(&mut col);
            restored.push(col);
        }
    }

    if restored.is_empty() {
        return None;
    }
    restored.extend(pool.into_iter().flatten());
    Some(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{Column, ColumnGroup};
    use crate::storage::{MemoryStorage, QuotaExceededStorage};
    use crate::table::settings::{SortOrder, TableSettings};
    use serde_json::json;

    type Row = Value;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn columns() -> Vec<TableColumn<Row>> {
        vec![
            Column::new("id").width(60.0).order(0).into(),
            Column::new("name").header("Name").width("160px").order(1).into(),
            Column::new("email").order(2).into(),
        ]
    }

    fn state() -> TableViewState<Row> {
        TableViewState::new(columns())
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::default());
        assert!(!persistence.save_state_at(&mut storage, &state(), NOW));
        assert!(storage.is_empty());

        persistence.schedule_save(Instant::now());
        assert!(!persistence.has_pending_save());
    }

    #[test]
    fn test_round_trip_every_sub_state() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::everything("users"));

        let mut saved = state();
        saved.selected_style = "compact".into();
        saved.table_settings.striped_rows = false;
        saved.pagination.go_to(2);
        saved.sorting = SortState::by("name", SortOrder::Desc);
        saved.filters.insert("name".into(), json!({"value": "ada"}));
        saved.selection = vec![json!(3), json!(7)];
        saved.expanded_rows = vec![json!(3)];
        if let TableColumn::Leaf(col) = &mut saved.columns[1] {
            col.frozen = true;
            col.align_frozen = Some(FrozenSide::Right);
            col.visible = Some(false);
        }
        assert!(persistence.save_state_at(&mut storage, &saved, NOW));

        let mut live = state();
        assert!(persistence.restore_state_at(&mut storage, &mut live, NOW + DAY_MS));
        assert_eq!(live.selected_style, "compact");
        assert_eq!(live.table_settings, saved.table_settings);
        assert_eq!(live.pagination, saved.pagination);
        assert_eq!(live.sorting, saved.sorting);
        assert_eq!(live.filters, saved.filters);
        assert_eq!(live.selection, saved.selection);
        assert_eq!(live.expanded_rows, saved.expanded_rows);

        let name = live.columns[1].as_leaf().unwrap();
        assert!(name.frozen);
        assert_eq!(name.frozen_side(), Some(FrozenSide::Right));
        assert_eq!(name.visible, Some(false));
        assert_eq!(name.header.as_deref(), Some("Name"));
    }

    #[test]
    fn test_disabled_sub_states_are_not_written() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        persistence.save_state_at(&mut storage, &state(), NOW);

        let record = persistence.get_saved_state(&storage).unwrap();
        assert!(record.columns.is_some());
        assert!(record.table_settings.is_some());
        assert!(record.pagination.is_none());
        assert!(record.selection.is_none());
        assert_eq!(record.version.as_deref(), Some(STATE_VERSION));
        assert_eq!(record.timestamp, Some(NOW));
    }

    #[test]
    fn test_expired_record_is_cleared_without_apply() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::everything("t"));
        let mut saved = state();
        saved.pagination.go_to(4);
        persistence.save_state_at(&mut storage, &saved, NOW);

        let mut live = state();
        assert!(!persistence.restore_state_at(&mut storage, &mut live, NOW + 31 * DAY_MS));
        assert_eq!(live.pagination, Pagination::default());
        assert!(!persistence.has_saved_state(&storage));
    }

    #[test]
    fn test_record_without_timestamp_never_expires() {
        let mut storage = MemoryStorage::new();
        storage
            .set("t", json!({"selectedStyle": "dense"}).to_string())
            .unwrap();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        let mut live = state();
        assert!(persistence.restore_state_at(&mut storage, &mut live, i64::MAX));
        assert_eq!(live.selected_style, "dense");
    }

    #[test]
    fn test_corrupt_record_restores_nothing() {
        let mut storage = MemoryStorage::new();
        storage.set("t", "{oops".to_string()).unwrap();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        let mut live = state();
        assert!(!persistence.restore_state_at(&mut storage, &mut live, NOW));
        assert_eq!(live.selected_style, "normal");
        assert!(persistence.take_events().is_empty());
    }

    #[test]
    fn test_column_merge_rules() {
        let saved = vec![
            PersistedColumn {
                field: Some("email".into()),
                order: Some(0),
                ..PersistedColumn::default()
            },
            PersistedColumn {
                key: Some("gone".into()),
                order: Some(1),
                ..PersistedColumn::default()
            },
            PersistedColumn {
                key: Some("id".into()),
                order: Some(2),
                width: Some(Width::Px(90.0)),
                ..PersistedColumn::default()
            },
        ];
        let merged = merge_columns(&columns(), &saved).unwrap();
        let keys: Vec<_> = merged.iter().map(|c| c.key().unwrap()).collect();
        assert_eq!(keys, vec!["email", "id", "name"]);
        assert_eq!(merged[1].as_leaf().unwrap().pixel_width(), 90.0);
        // Unmatched live columns keep their attributes
        assert_eq!(merged[2].order(), Some(1));

        let nothing = vec![PersistedColumn {
            key: Some("gone".into()),
            ..PersistedColumn::default()
        }];
        assert!(merge_columns(&columns(), &nothing).is_none());
    }

    #[test]
    fn test_group_persists_order_only() {
        let group: TableColumn<Row> = ColumnGroup::new("audit", vec![Column::new("created").into()])
            .header("Audit")
            .into();
        let persisted = PersistedColumn::from_column(&group);
        assert_eq!(persisted.key.as_deref(), Some("audit"));
        assert!(persisted.frozen.is_none());
        assert!(persisted.field.is_none());
    }

    #[test]
    fn test_events_are_emitted() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        persistence.save_state_at(&mut storage, &state(), NOW);
        let mut live = state();
        persistence.restore_state_at(&mut storage, &mut live, NOW);

        let names: Vec<_> = persistence.take_events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["state-save", "state-restore"]);
        assert!(persistence.take_events().is_empty());
    }

    #[test]
    fn test_storage_failure_is_absorbed() {
        let mut storage = QuotaExceededStorage::default();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        assert!(!persistence.save_state_at(&mut storage, &state(), NOW));
        assert_eq!(persistence.last_saved_at(), None);
        persistence.clear_state(&mut storage);
    }

    #[test]
    fn test_debounced_save_coalesces() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        let mut live = state();
        let start = Instant::now();

        persistence.schedule_save(start);
        live.selected_style = "first".into();
        persistence.schedule_save(start + Duration::from_millis(200));
        live.selected_style = "last".into();

        assert!(!persistence.flush_due(start + Duration::from_millis(400), &mut storage, &live));
        assert!(persistence.flush_due(start + Duration::from_millis(500), &mut storage, &live));
        assert!(!persistence.flush_due(start + Duration::from_millis(900), &mut storage, &live));

        let record = persistence.get_saved_state(&storage).unwrap();
        assert_eq!(record.selected_style.as_deref(), Some("last"));
    }

    #[test]
    fn test_reset_clears_slot_and_pending_save() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::everything("t"));
        let mut live = state();
        live.pagination.go_to(3);
        persistence.save_state_at(&mut storage, &live, NOW);
        persistence.schedule_save(Instant::now());

        persistence.reset_to_default(&mut storage, &mut live);
        assert!(!persistence.has_saved_state(&storage));
        assert!(!persistence.has_pending_save());
        assert_eq!(live.pagination, Pagination::default());
        assert_eq!(live.table_settings, TableSettings::default());
        assert_eq!(live.columns.len(), 3);
    }

    #[test]
    fn test_export_and_import() {
        let mut storage = MemoryStorage::new();
        let mut persistence = TablePersistence::new(PersistOptions::enabled("t"));
        assert_eq!(persistence.export_state(&storage), "null");

        let mut live = state();
        assert!(!persistence.import_state(&mut storage, &mut live, "not json"));
        assert!(!persistence.import_state(&mut storage, &mut live, "[1,2]"));

        let imported = json!({"selectedStyle": "bordered", "version": "1.0.0"}).to_string();
        assert!(persistence.import_state(&mut storage, &mut live, &imported));
        assert_eq!(live.selected_style, "bordered");
        assert!(persistence.export_state(&storage).contains("\"selectedStyle\": \"bordered\""));
    }
}
