//! Column tree operations: lookup, flattening, reordering, freezing and
//! sticky-offset computation.
//!
//! Mutating operations never touch their input; they return an updated copy
//! so that cached derived views keyed on column content stay valid.

use super::model::{CellText, Column, FreezeDirection, FrozenSide, RowAccess, TableColumn};

/// Depth-first search by `key`. Only keys are compared, never fields.
pub fn find_by_key<'a, T>(columns: &'a [TableColumn<T>], key: &str) -> Option<&'a TableColumn<T>> {
    for column in columns {
        if column.key() == Some(key) {
            return Some(column);
        }
        if let TableColumn::Group(group) = column {
            if let Some(found) = find_by_key(&group.children, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Leaves in depth-first order, skipping disabled ones. Groups are never
/// emitted themselves.
pub fn flatten<T>(columns: &[TableColumn<T>]) -> Vec<&Column<T>> {
    let mut out = Vec::new();
    collect_leaves(columns, &mut out);
    out
}

fn collect_leaves<'a, T>(columns: &'a [TableColumn<T>], out: &mut Vec<&'a Column<T>>) {
    for column in columns {
        match column {
            TableColumn::Group(group) => collect_leaves(&group.children, out),
            TableColumn::Leaf(leaf) => {
                if !leaf.disabled.snapshot() {
                    out.push(leaf);
                }
            }
        }
    }
}

/// Moves the element at `from` so it lands at `to` in the post-removal array,
/// then renumbers every `order` to its new 0-based position.
///
/// An out-of-range `from` moves nothing; `to` is clamped to the end.
pub fn reorder<T>(columns: &[TableColumn<T>], from: usize, to: usize) -> Vec<TableColumn<T>> {
    let mut reordered = columns.to_vec();
    if from < reordered.len() {
        let moved = reordered.remove(from);
        let to = to.min(reordered.len());
        reordered.insert(to, moved);
    }
    for (index, column) in reordered.iter_mut().enumerate() {
        column.set_order(index as i64);
    }
    reordered
}

/// Changes the frozen state of the column with `key` (searched recursively).
///
/// With an explicit direction, `None` unfreezes and clears the side while
/// `Left`/`Right` pin to that side. Without one, the frozen flag flips:
/// freezing keeps a previously chosen side (default left), unfreezing clears
/// the side just like an explicit `None`.
pub fn toggle_frozen<T>(
    columns: &[TableColumn<T>],
    key: &str,
    direction: Option<FreezeDirection>,
) -> Vec<TableColumn<T>> {
    map_leaves_by_key(columns, &|k| k == key, &|column| match direction {
        Some(direction) => apply_direction(column, direction),
        None => {
            if column.frozen {
                column.frozen = false;
                column.align_frozen = None;
            } else {
                column.frozen = true;
                column.align_frozen = Some(column.align_frozen.unwrap_or(FrozenSide::Left));
            }
        }
    })
}

/// Applies an explicit direction to every column whose key is in `keys`.
pub fn batch_set_frozen<T>(
    columns: &[TableColumn<T>],
    keys: &[&str],
    direction: FreezeDirection,
) -> Vec<TableColumn<T>> {
    map_leaves_by_key(columns, &|k| keys.contains(&k), &|column| apply_direction(column, direction))
}

/// Applies `update` to the leaf with `key` (searched recursively).
pub fn update_by_key<T>(
    columns: &[TableColumn<T>],
    key: &str,
    update: &dyn Fn(&mut Column<T>),
) -> Vec<TableColumn<T>> {
    map_leaves_by_key(columns, &|k| k == key, update)
}

fn apply_direction<T>(column: &mut Column<T>, direction: FreezeDirection) {
    match direction {
        FreezeDirection::None => {
            column.frozen = false;
            column.align_frozen = None;
        }
        FreezeDirection::Left => {
            column.frozen = true;
            column.align_frozen = Some(FrozenSide::Left);
        }
        FreezeDirection::Right => {
            column.frozen = true;
            column.align_frozen = Some(FrozenSide::Right);
        }
    }
}

fn map_leaves_by_key<T>(
    columns: &[TableColumn<T>],
    matches: &dyn Fn(&str) -> bool,
    update: &dyn Fn(&mut Column<T>),
) -> Vec<TableColumn<T>> {
    columns
        .iter()
        .map(|column| match column {
            TableColumn::Leaf(leaf) => {
                let mut leaf = leaf.clone();
                if leaf.key.as_deref().is_some_and(matches) {
                    update(&mut leaf);
                }
                TableColumn::Leaf(leaf)
            }
            TableColumn::Group(group) => {
                let mut group = group.clone();
                group.children = map_leaves_by_key(&group.children, matches, update);
                TableColumn::Group(group)
            }
        })
        .collect()
}

/// Enabled leaves bucketed by frozen side, each bucket sorted by `order`.
#[derive(Debug)]
pub struct PartitionedColumns<'a, T> {
    pub left_frozen: Vec<&'a Column<T>>,
    pub normal: Vec<&'a Column<T>>,
    pub right_frozen: Vec<&'a Column<T>>,
}

impl<'a, T> PartitionedColumns<'a, T> {
    /// `left_frozen`, then `normal`, then `right_frozen`.
    pub fn all(&self) -> Vec<&'a Column<T>> {
        self.left_frozen
            .iter()
            .chain(&self.normal)
            .chain(&self.right_frozen)
            .copied()
            .collect()
    }

    /// Every frozen column, sorted by `order`.
    pub fn frozen(&self) -> Vec<&'a Column<T>> {
        let mut frozen: Vec<&Column<T>> = self.left_frozen.iter().chain(&self.right_frozen).copied().collect();
        frozen.sort_by_key(|c| c.order.unwrap_or(0));
        frozen
    }

    pub fn len(&self) -> usize {
        self.left_frozen.len() + self.normal.len() + self.right_frozen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits the enabled leaves into left-frozen, normal and right-frozen
/// buckets. Sorting is stable and a missing `order` counts as 0.
pub fn partition_by_frozen<T>(columns: &[TableColumn<T>]) -> PartitionedColumns<'_, T> {
    let mut partitioned = PartitionedColumns {
        left_frozen: Vec::new(),
        normal: Vec::new(),
        right_frozen: Vec::new(),
    };

    for column in flatten(columns) {
        match column.frozen_side() {
            Some(FrozenSide::Left) => partitioned.left_frozen.push(column),
            Some(FrozenSide::Right) => partitioned.right_frozen.push(column),
            None => partitioned.normal.push(column),
        }
    }

    for bucket in [
        &mut partitioned.left_frozen,
        &mut partitioned.normal,
        &mut partitioned.right_frozen,
    ] {
        bucket.sort_by_key(|c| c.order.unwrap_or(0));
    }
    partitioned
}

/// Sticky offset in pixels for the frozen column `key`.
///
/// Left-frozen columns offset by the widths of the left-frozen columns before
/// them; right-frozen columns by the widths of the right-frozen columns after
/// them. Unfrozen or unknown columns get 0.
pub fn compute_offset<T>(columns: &[TableColumn<T>], key: &str) -> f32 {
    let partitioned = partition_by_frozen(columns);
    let is_key = |c: &&Column<T>| c.key.as_deref() == Some(key);

    if let Some(index) = partitioned.left_frozen.iter().position(is_key) {
        return partitioned.left_frozen[..index].iter().map(|c| c.pixel_width()).sum();
    }
    if let Some(index) = partitioned.right_frozen.iter().position(is_key) {
        return partitioned.right_frozen[index + 1..].iter().map(|c| c.pixel_width()).sum();
    }
    0.0
}

/// Display text of a cell: the column's `text` wins, otherwise the row value
/// at `field` (or `key`), empty when absent.
pub fn column_text<T: RowAccess>(column: &Column<T>, row: &T, index: usize) -> String {
    match &column.text {
        Some(CellText::Computed(f)) => return f(row, index),
        Some(CellText::Literal(text)) => return text.clone(),
        None => {}
    }
    column
        .field
        .as_deref()
        .or(column.key.as_deref())
        .and_then(|path| row.field_text(path))
        .unwrap_or_default()
}

/// Rendered cell content: the `render` callback if set, else [`column_text`].
pub fn render_cell<T: RowAccess>(column: &Column<T>, row: &T, index: usize) -> String {
    match &column.render {
        Some(render) => render(row, index),
        None => column_text(column, row, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::model::{ColumnGroup, Disabled};
    use serde_json::json;

    type Row = serde_json::Value;

    fn leaf(key: &str) -> TableColumn<Row> {
        Column::new(key).into()
    }

    fn keys(columns: &[&Column<Row>]) -> Vec<String> {
        columns.iter().map(|c| c.key.clone().unwrap_or_default()).collect()
    }

    fn scenario() -> Vec<TableColumn<Row>> {
        vec![
            Column::new("a").order(0).into(),
            Column::new("b").order(1).width(100.0).frozen(FrozenSide::Left).into(),
            Column::new("c").order(2).width(50.0).frozen(FrozenSide::Left).into(),
        ]
    }

    #[test]
    fn test_find_by_key_recurses_into_groups() {
        let columns = vec![
            leaf("id"),
            ColumnGroup::new("person", vec![leaf("name"), leaf("email")]).into(),
        ];
        assert_eq!(find_by_key(&columns, "email").and_then(|c| c.key()), Some("email"));
        assert!(find_by_key(&columns, "person").unwrap().is_group());
        assert!(find_by_key(&columns, "missing").is_none());
    }

    #[test]
    fn test_find_by_key_ignores_field() {
        let columns: Vec<TableColumn<Row>> = vec![Column::new("k").field("f").into()];
        assert!(find_by_key(&columns, "f").is_none());
    }

    #[test]
    fn test_flatten_skips_groups_and_disabled() {
        let columns: Vec<TableColumn<Row>> = vec![
            leaf("a"),
            ColumnGroup::new(
                "g",
                vec![leaf("b"), Column::new("hidden").disabled(Disabled::Static(true)).into()],
            )
            .into(),
            leaf("c"),
        ];
        assert_eq!(keys(&flatten(&columns)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reorder_uses_post_removal_index() {
        let columns = vec![leaf("a"), leaf("b"), leaf("c"), leaf("d")];
        let reordered = reorder(&columns, 0, 2);
        let order: Vec<_> = reordered.iter().map(|c| c.key().unwrap()).collect();
        assert_eq!(order, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_reorder_renumbers_every_order() {
        let columns = vec![
            Column::new("a").order(7).into(),
            Column::new("b").order(3).into(),
            leaf("c"),
        ];
        for from in 0..3 {
            for to in 0..3 {
                let reordered = reorder(&columns, from, to);
                for (index, column) in reordered.iter().enumerate() {
                    assert_eq!(column.order(), Some(index as i64));
                }
            }
        }
    }

    #[test]
    fn test_reorder_out_of_range() {
        let columns = vec![leaf("a"), leaf("b")];
        let unchanged = reorder(&columns, 5, 0);
        assert_eq!(unchanged[0].key(), Some("a"));

        let appended = reorder(&columns, 0, 99);
        assert_eq!(appended[1].key(), Some("a"));
    }

    #[test]
    fn test_toggle_frozen_explicit_directions() {
        let columns = vec![leaf("a")];
        let right = toggle_frozen(&columns, "a", Some(FreezeDirection::Right));
        let col = right[0].as_leaf().unwrap();
        assert!(col.frozen);
        assert_eq!(col.align_frozen, Some(FrozenSide::Right));

        let none = toggle_frozen(&right, "a", Some(FreezeDirection::None));
        let col = none[0].as_leaf().unwrap();
        assert!(!col.frozen);
        assert_eq!(col.align_frozen, None);
    }

    #[test]
    fn test_toggle_frozen_implicit_flip() {
        let mut column: Column<Row> = Column::new("a");
        column.align_frozen = Some(FrozenSide::Right);
        let columns = vec![TableColumn::Leaf(column)];

        let on = toggle_frozen(&columns, "a", None);
        let col = on[0].as_leaf().unwrap();
        assert!(col.frozen);
        assert_eq!(col.align_frozen, Some(FrozenSide::Right));

        let off = toggle_frozen(&on, "a", None);
        let col = off[0].as_leaf().unwrap();
        assert!(!col.frozen);
        assert_eq!(col.align_frozen, None);

        let default_side = toggle_frozen(&off, "a", None);
        assert_eq!(default_side[0].as_leaf().unwrap().align_frozen, Some(FrozenSide::Left));
    }

    #[test]
    fn test_toggle_frozen_leaves_input_untouched() {
        let columns = vec![leaf("a")];
        let _ = toggle_frozen(&columns, "a", None);
        assert!(!columns[0].as_leaf().unwrap().frozen);
    }

    #[test]
    fn test_toggle_frozen_inside_group() {
        let columns: Vec<TableColumn<Row>> = vec![ColumnGroup::new("g", vec![leaf("x")]).into()];
        let toggled = toggle_frozen(&columns, "x", Some(FreezeDirection::Left));
        let flat = flatten(&toggled);
        assert!(flat[0].frozen);
    }

    #[test]
    fn test_batch_set_frozen() {
        let columns = vec![leaf("a"), leaf("b"), leaf("c")];
        let updated = batch_set_frozen(&columns, &["a", "c"], FreezeDirection::Right);
        let partitioned = partition_by_frozen(&updated);
        assert_eq!(keys(&partitioned.right_frozen), vec!["a", "c"]);
        assert_eq!(keys(&partitioned.normal), vec!["b"]);
    }

    #[test]
    fn test_partition_sorts_and_covers_flatten() {
        let columns: Vec<TableColumn<Row>> = vec![
            Column::new("r2").order(9).frozen(FrozenSide::Right).into(),
            Column::new("n2").order(5).into(),
            Column::new("l1").order(4).frozen(FrozenSide::Left).into(),
            Column::new("r1").order(1).frozen(FrozenSide::Right).into(),
            Column::new("n1").into(),
            Column::new("off").disabled(Disabled::Static(true)).frozen(FrozenSide::Left).into(),
        ];
        let partitioned = partition_by_frozen(&columns);
        assert_eq!(keys(&partitioned.left_frozen), vec!["l1"]);
        assert_eq!(keys(&partitioned.normal), vec!["n1", "n2"]);
        assert_eq!(keys(&partitioned.right_frozen), vec!["r1", "r2"]);
        assert_eq!(keys(&partitioned.all()), vec!["l1", "n1", "n2", "r1", "r2"]);

        let mut from_all = keys(&partitioned.all());
        let mut from_flatten = keys(&flatten(&columns));
        from_all.sort();
        from_flatten.sort();
        assert_eq!(from_all, from_flatten);
    }

    #[test]
    fn test_compute_offset_scenario() {
        let columns = scenario();
        assert_eq!(compute_offset(&columns, "c"), 100.0);
        assert_eq!(compute_offset(&columns, "b"), 0.0);
        assert_eq!(compute_offset(&columns, "a"), 0.0);
        assert_eq!(compute_offset(&columns, "nope"), 0.0);
    }

    #[test]
    fn test_compute_offset_right_side() {
        let columns: Vec<TableColumn<Row>> = vec![
            Column::new("x").order(0).width(30.0).frozen(FrozenSide::Right).into(),
            Column::new("y").order(1).width("40px").frozen(FrozenSide::Right).into(),
            Column::new("z").order(2).min_width(25.0).frozen(FrozenSide::Right).into(),
        ];
        assert_eq!(compute_offset(&columns, "x"), 65.0);
        assert_eq!(compute_offset(&columns, "y"), 25.0);
        assert_eq!(compute_offset(&columns, "z"), 0.0);
    }

    #[test]
    fn test_column_text_sources() {
        let row = json!({"name": "menu", "meta": {"icon": "pi-home"}});

        let by_field: Column<Row> = Column::new("icon").field("meta.icon");
        assert_eq!(column_text(&by_field, &row, 0), "pi-home");

        let by_fn: Column<Row> = Column::new("name").text_fn(|row: &Row, i| format!("{}#{}", row["name"].as_str().unwrap_or(""), i));
        assert_eq!(column_text(&by_fn, &row, 3), "menu#3");

        let mut literal: Column<Row> = Column::new("x");
        literal.text = Some(CellText::Literal("fixed".to_string()));
        assert_eq!(column_text(&literal, &row, 0), "fixed");

        let missing: Column<Row> = Column::new("absent");
        assert_eq!(column_text(&missing, &row, 0), "");
    }

    #[test]
    fn test_render_cell_prefers_render() {
        let row = json!({"status": 1});
        let column: Column<Row> = Column::new("status").render_fn(|row: &Row, _| {
            if row["status"] == json!(1) { "enabled".into() } else { "disabled".into() }
        });
        assert_eq!(render_cell(&column, &row, 0), "enabled");
    }
}
