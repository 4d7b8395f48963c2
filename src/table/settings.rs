//! Live table view state: display settings, pagination, sorting, filters,
//! selection and expanded rows, next to the column list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::columns::TableColumn;

/// Density of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSize {
    Small,
    Default,
    Large,
}

/// Display toggles for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableSettings {
    pub show_row_divider: bool,
    pub striped_rows: bool,
    pub show_shadow: bool,
    pub show_border: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<TableSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<f32>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            show_row_divider: true,
            striped_rows: true,
            show_shadow: false,
            show_border: true,
            size: None,
            row_height: None,
        }
    }
}

impl TableSettings {
    /// Overlays the keys present in `saved` onto `self`. Keys missing from
    /// `saved` keep their current value; a result that no longer fits the
    /// settings shape leaves `self` untouched and returns `false`.
    pub fn merge_from(&mut self, saved: &Map<String, Value>) -> bool {
        let mut merged = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            _ => return false,
        };
        for (key, value) in saved {
            merged.insert(key.clone(), value.clone());
        }
        match serde_json::from_value(Value::Object(merged)) {
            Ok(settings) => {
                *self = settings;
                true
            }
            Err(e) => {
                log::warn!("ignoring incompatible saved table settings: {}", e);
                false
            }
        }
    }
}

/// Paginator position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Index of the first row on the page.
    pub first: usize,
    /// Rows per page.
    pub rows: usize,
    pub page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            first: 0,
            rows: 10,
            page: 0,
        }
    }
}

impl Pagination {
    /// Moves to `page`, keeping `first` consistent.
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
        self.first = page * self.rows;
    }

    pub fn page_count(&self, total_rows: usize) -> usize {
        if self.rows == 0 {
            return 0;
        }
        total_rows.div_ceil(self.rows)
    }
}

/// Sort direction, serialized as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> i8 {
        match order {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Asc),
            -1 => Ok(SortOrder::Desc),
            other => Err(format!("invalid sort order {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMeta {
    pub field: String,
    pub order: SortOrder,
}

/// Active sort: single field, or multi-sort metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub multi_sort_meta: Vec<SortMeta>,
}

impl SortState {
    pub fn by(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort_field: Some(field.into()),
            sort_order: Some(order),
            multi_sort_meta: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sort_field.is_none() && self.multi_sort_meta.is_empty()
    }
}

/// Column filters keyed by field.
pub type FilterState = Map<String, Value>;

/// Default visual style name.
pub const DEFAULT_STYLE: &str = "normal";

/// Everything a table shows besides the rows themselves.
#[derive(Debug)]
pub struct TableViewState<T> {
    pub columns: Vec<TableColumn<T>>,
    pub selected_style: String,
    pub table_settings: TableSettings,
    pub pagination: Pagination,
    pub sorting: SortState,
    pub filters: FilterState,
    /// Selected row identities.
    pub selection: Vec<Value>,
    /// Expanded row identities.
    pub expanded_rows: Vec<Value>,
}

impl<T> Clone for TableViewState<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            selected_style: self.selected_style.clone(),
            table_settings: self.table_settings.clone(),
            pagination: self.pagination,
            sorting: self.sorting.clone(),
            filters: self.filters.clone(),
            selection: self.selection.clone(),
            expanded_rows: self.expanded_rows.clone(),
        }
    }
}

impl<T> TableViewState<T> {
    pub fn new(columns: Vec<TableColumn<T>>) -> Self {
        Self {
            columns,
            selected_style: DEFAULT_STYLE.to_string(),
            table_settings: TableSettings::default(),
            pagination: Pagination::default(),
            sorting: SortState::default(),
            filters: FilterState::new(),
            selection: Vec::new(),
            expanded_rows: Vec::new(),
        }
    }

    /// Resets every sub-state except the columns to its default.
    pub fn reset_to_default(&mut self) {
        self.selected_style = DEFAULT_STYLE.to_string();
        self.table_settings = TableSettings::default();
        self.pagination = Pagination::default();
        self.sorting = SortState::default();
        self.filters.clear();
        self.selection.clear();
        self.expanded_rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_merge_keeps_unsaved_keys() {
        let mut settings = TableSettings {
            show_shadow: true,
            ..TableSettings::default()
        };
        let saved = json!({"stripedRows": false}).as_object().cloned().unwrap();
        assert!(settings.merge_from(&saved));
        assert!(!settings.striped_rows);
        assert!(settings.show_shadow);
    }

    #[test]
    fn test_settings_merge_rejects_wrong_types() {
        let mut settings = TableSettings::default();
        let saved = json!({"stripedRows": "yes"}).as_object().cloned().unwrap();
        assert!(!settings.merge_from(&saved));
        assert_eq!(settings, TableSettings::default());
    }

    #[test]
    fn test_sort_order_wire_format() {
        let sort = SortState::by("name", SortOrder::Desc);
        let json = serde_json::to_value(&sort).unwrap();
        assert_eq!(json, json!({"sortField": "name", "sortOrder": -1}));
        let back: SortState = serde_json::from_value(json).unwrap();
        assert_eq!(back, sort);
        assert!(serde_json::from_value::<SortOrder>(json!(0)).is_err());
    }

    #[test]
    fn test_pagination_helpers() {
        let mut pagination = Pagination::default();
        pagination.go_to(3);
        assert_eq!(pagination.first, 30);
        assert_eq!(pagination.page_count(31), 4);
        assert_eq!(pagination.page_count(0), 0);
    }

    #[test]
    fn test_reset_to_default() {
        let mut state: TableViewState<()> = TableViewState::new(Vec::new());
        state.selected_style = "compact".into();
        state.pagination.go_to(2);
        state.selection.push(json!(1));
        state.filters.insert("name".into(), json!("x"));
        state.reset_to_default();
        assert_eq!(state.selected_style, DEFAULT_STYLE);
        assert_eq!(state.pagination, Pagination::default());
        assert!(state.selection.is_empty());
        assert!(state.filters.is_empty());
    }
}
