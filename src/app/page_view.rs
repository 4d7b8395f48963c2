//! Per-page table state and the row pipeline (filter, sort, paginate).

use rconsole::columns::{column_text, flatten};
use rconsole::table::{SortOrder, TableViewState};
use rconsole::{KeyValueStorage, PersistOptions, RowAccess, TableColumn, TableController};
use serde_json::Value;
use std::cmp::Ordering;

use crate::io::demo_data::{self, DemoPage};

/// Filter key holding the toolbar's free-text search.
pub const GLOBAL_FILTER: &str = "global";

/// A column being dragged wider or narrower.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub key: String,
    pub width: f32,
}

/// One demo page: its rows and the controller owning the table layout.
#[derive(Debug)]
pub struct PageView {
    pub page: &'static DemoPage,
    pub table: TableController<Value>,
    pub rows: Vec<Value>,
    /// Text buffer of the search box.
    pub filter_text: String,
    pub resize: Option<ResizeDrag>,
}

impl PageView {
    /// Builds the page and restores its saved layout.
    pub fn open(page: &'static DemoPage, storage: &mut dyn KeyValueStorage) -> Self {
        let columns = demo_data::columns_for(page.kind);
        let mut table = TableController::new(columns, PersistOptions::everything(page.table_key()));
        if table.restore(storage) {
            log::info!("restored table layout for {}", page.path);
        }
        let filter_text = table
            .state()
            .filters
            .get(GLOBAL_FILTER)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            page,
            table,
            rows: demo_data::rows_for(page, demo_data::DEMO_SEED),
            filter_text,
            resize: None,
        }
    }

    /// Indices into `rows` for the current page, after filter and sort.
    pub fn page_rows(&self) -> (Vec<usize>, usize) {
        let matching = visible_rows(&self.rows, self.table.state());
        let total = matching.len();
        let pagination = self.table.state().pagination;
        let rows = matching
            .into_iter()
            .skip(pagination.first)
            .take(pagination.rows.max(1))
            .collect();
        (rows, total)
    }

    /// Identity of row `index`.
    pub fn row_id(&self, index: usize) -> Value {
        self.rows
            .get(index)
            .and_then(|row| row.get("id"))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Copy of `columns` without hidden leaves, with leaf orders renumbered in
/// tree order so groups keep their children together.
pub fn display_tree<T>(columns: &[TableColumn<T>]) -> Vec<TableColumn<T>> {
    let mut next = 0;
    prune_hidden(columns, &mut next)
}

fn prune_hidden<T>(columns: &[TableColumn<T>], next: &mut i64) -> Vec<TableColumn<T>> {
    let mut ordered: Vec<&TableColumn<T>> = columns.iter().collect();
    ordered.sort_by_key(|c| c.order().unwrap_or(0));

    let mut out = Vec::new();
    for column in ordered {
        match column {
            TableColumn::Leaf(leaf) => {
                if !leaf.is_visible() {
                    continue;
                }
                let mut leaf = leaf.clone();
                leaf.order = Some(*next);
                *next += 1;
                out.push(TableColumn::Leaf(leaf));
            }
            TableColumn::Group(group) => {
                let mut group = group.clone();
                group.children = prune_hidden(&group.children, next);
                if !group.children.is_empty() {
                    out.push(TableColumn::Group(group));
                }
            }
        }
    }
    out
}

/// Row indices matching the search filter, in sort order.
pub fn visible_rows<T: RowAccess>(rows: &[T], state: &TableViewState<T>) -> Vec<usize> {
    let needle = state
        .filters
        .get(GLOBAL_FILTER)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    let leaves = flatten(&state.columns);

    let mut indices: Vec<usize> = (0..rows.len())
        .filter(|&i| match &needle {
            Some(needle) => leaves
                .iter()
                .any(|c| column_text(c, &rows[i], i).to_lowercase().contains(needle)),
            None => true,
        })
        .collect();

    if let (Some(field), Some(order)) = (&state.sorting.sort_field, state.sorting.sort_order) {
        indices.sort_by(|&a, &b| {
            let ordering = compare_values(rows[a].field_text(field), rows[b].field_text(field));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
    indices
}

/// Numbers compare numerically, everything else as text; missing values first.
fn compare_values(a: Option<String>, b: Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.cmp(&b),
        },
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconsole::table::SortState;
    use rconsole::{partition_by_frozen, Column, ColumnGroup, MemoryStorage};
    use serde_json::json;

    fn state(columns: Vec<TableColumn<Value>>) -> TableViewState<Value> {
        TableViewState::new(columns)
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "beta", "users": 10}),
            json!({"id": 2, "name": "alpha", "users": 9}),
            json!({"id": 3, "name": "gamma", "users": 100}),
        ]
    }

    #[test]
    fn test_sort_is_numeric_when_possible() {
        let mut state = state(vec![Column::new("name").into(), Column::new("users").into()]);
        state.sorting = SortState::by("users", SortOrder::Desc);
        assert_eq!(visible_rows(&rows(), &state), vec![2, 0, 1]);

        state.sorting = SortState::by("name", SortOrder::Asc);
        assert_eq!(visible_rows(&rows(), &state), vec![1, 0, 2]);
    }

    #[test]
    fn test_global_filter_searches_cell_text() {
        let mut state = state(vec![Column::new("name").into()]);
        state.filters.insert(GLOBAL_FILTER.to_string(), json!("MM"));
        assert_eq!(visible_rows(&rows(), &state), vec![2]);
    }

    #[test]
    fn test_display_tree_drops_hidden_and_keeps_groups_together() {
        let mut hidden: Column<Value> = Column::new("b").order(1);
        hidden.visible = Some(false);
        let mut group: TableColumn<Value> =
            ColumnGroup::new("g", vec![Column::new("g1").into(), Column::new("g2").into()]).into();
        group.set_order(2);
        let columns: Vec<TableColumn<Value>> = vec![
            Column::new("a").order(0).into(),
            hidden.into(),
            group,
            Column::new("c").order(3).into(),
        ];

        let tree = display_tree(&columns);
        let keys: Vec<_> = partition_by_frozen(&tree)
            .normal
            .iter()
            .filter_map(|c| c.key.clone())
            .collect();
        assert_eq!(keys, vec!["a", "g1", "g2", "c"]);
    }

    #[test]
    fn test_open_paginates() {
        let mut storage = MemoryStorage::new();
        let page = demo_data::page("/system/dictionary").unwrap();
        let view = PageView::open(page, &mut storage);
        let (rows, total) = view.page_rows();
        assert_eq!(total, page.row_count);
        assert_eq!(rows.len(), 10);
        assert_eq!(view.row_id(rows[0]), json!(1));
    }
}
