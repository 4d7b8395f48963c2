use anyhow::Result;
use rconsole::columns::{flatten, Disabled};
use rconsole::table::persistence::SAVE_DEBOUNCE;
use rconsole::table::{RowRef, TableEvent, DOUBLE_CLICK_WINDOW};
use rconsole::{
    compute_offset, partition_by_frozen, reorder, AppContext, Column, ColumnGroup, FreezeDirection, FrozenSide,
    JsonFileStorage, KeyValueStorage, MemoryStorage, NoticeBuffer, NoticeKind, PersistOptions, RouteLocation,
    TableColumn, TableController, TablePersistence, TableViewState, TabOptions, Width,
};
use serde_json::{json, Value};
use std::rc::Rc;
use std::time::{Duration, Instant};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn user_columns() -> Vec<TableColumn<Value>> {
    vec![
        Column::new("id").field("id").width(80.0).order(0).frozen(FrozenSide::Left).into(),
        Column::new("name").field("name").width(120.0).order(1).into(),
        Column::new("email").field("email").width(200.0).order(2).into(),
    ]
}

fn leaf<'a>(columns: &'a [TableColumn<Value>], key: &str) -> &'a Column<Value> {
    flatten(columns)
        .into_iter()
        .find(|c| c.key.as_deref() == Some(key))
        .unwrap()
}

fn context(storage: Box<dyn KeyValueStorage>) -> (AppContext, Rc<NoticeBuffer>) {
    let notices = Rc::new(NoticeBuffer::new());
    let ctx = AppContext::new(storage, notices.clone(), TabOptions::default());
    (ctx, notices)
}

#[test]
fn test_table_layout_survives_reopening_the_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("state.json");
    let t0 = Instant::now();

    {
        let mut storage = JsonFileStorage::open(&path)?;
        let mut table = TableController::new(user_columns(), PersistOptions::enabled("users-table"));
        table.resize_column("name", 180.0, t0);
        table.toggle_frozen("email", Some(FreezeDirection::Right), t0);

        // Debounced: nothing is written before the quiet period ends
        assert!(!table.tick(t0 + Duration::from_millis(100), &mut storage));
        assert!(table.has_pending_save());
        assert!(table.tick(t0 + SAVE_DEBOUNCE, &mut storage));
        assert!(!table.has_pending_save());
    }

    let mut storage = JsonFileStorage::open(&path)?;
    let mut table = TableController::new(user_columns(), PersistOptions::enabled("users-table"));
    assert!(table.restore(&mut storage));

    let columns = table.columns();
    assert_eq!(leaf(columns, "name").width, Some(Width::Px(180.0)));
    assert_eq!(leaf(columns, "email").frozen_side(), Some(FrozenSide::Right));
    assert_eq!(leaf(columns, "id").frozen_side(), Some(FrozenSide::Left));
    Ok(())
}

#[test]
fn test_saved_state_expires_after_thirty_days() {
    let mut storage = MemoryStorage::new();
    let mut persistence = TablePersistence::new(PersistOptions::enabled("k"));
    let mut state = TableViewState::new(user_columns());
    state.selected_style = "compact".to_string();
    assert!(persistence.save_state_at(&mut storage, &state, 0));

    let mut fresh = TableViewState::new(user_columns());
    assert!(persistence.restore_state_at(&mut storage, &mut fresh, 29 * DAY_MS));
    assert_eq!(fresh.selected_style, "compact");

    let mut stale = TableViewState::new(user_columns());
    assert!(!persistence.restore_state_at(&mut storage, &mut stale, 31 * DAY_MS));
    assert_eq!(stale.selected_style, "normal");
    assert!(storage.get("k").unwrap().is_none());
}

#[test]
fn test_reset_drops_pending_save() {
    let mut storage = MemoryStorage::new();
    let t0 = Instant::now();
    let mut table = TableController::new(user_columns(), PersistOptions::enabled("k"));
    table.set_selected_style("comfortable", t0);
    assert!(table.save_now(&mut storage));

    table.set_selected_style("compact", t0);
    table.reset_to_default(&mut storage);
    assert!(!table.tick(t0 + SAVE_DEBOUNCE * 2, &mut storage));
    assert!(!table.has_saved_state(&storage));
    assert_eq!(table.state().selected_style, "normal");
}

#[test]
fn test_single_and_double_clicks_are_told_apart() {
    let mut storage = MemoryStorage::new();
    let t0 = Instant::now();
    let mut table = TableController::new(user_columns(), PersistOptions::default());
    let row = RowRef { id: json!(7), index: 0 };

    table.row_click(row.clone(), t0);
    table.tick(t0 + Duration::from_millis(50), &mut storage);
    assert!(table.take_events().is_empty());
    table.row_click(row.clone(), t0 + Duration::from_millis(120));
    table.tick(t0 + Duration::from_millis(130), &mut storage);
    assert_eq!(table.take_events(), vec![TableEvent::RowDblClick(row.clone())]);

    let later = t0 + Duration::from_secs(2);
    table.row_click(row.clone(), later);
    table.tick(later + DOUBLE_CLICK_WINDOW, &mut storage);
    assert_eq!(table.take_events(), vec![TableEvent::RowClick(row)]);
}

#[test]
fn test_sticky_offsets_per_side() {
    let columns: Vec<TableColumn<Value>> = vec![
        Column::new("a").width(100.0).order(0).frozen(FrozenSide::Left).into(),
        Column::new("b").width(50.0).order(1).frozen(FrozenSide::Left).into(),
        Column::new("c").width(80.0).order(2).into(),
        Column::new("d").width(60.0).order(3).frozen(FrozenSide::Right).into(),
        Column::new("e").width(40.0).order(4).frozen(FrozenSide::Right).into(),
    ];
    assert_eq!(compute_offset(&columns, "a"), 0.0);
    assert_eq!(compute_offset(&columns, "b"), 100.0);
    assert_eq!(compute_offset(&columns, "c"), 0.0);
    assert_eq!(compute_offset(&columns, "d"), 40.0);
    assert_eq!(compute_offset(&columns, "e"), 0.0);
    assert_eq!(compute_offset(&columns, "missing"), 0.0);
}

#[test]
fn test_partition_matches_flatten_without_disabled() {
    let columns: Vec<TableColumn<Value>> = vec![
        Column::new("id").order(0).frozen(FrozenSide::Left).into(),
        ColumnGroup::new(
            "contact",
            vec![
                Column::new("phone").order(0).into(),
                Column::new("fax").order(1).disabled(Disabled::Static(true)).into(),
            ],
        )
        .into(),
        Column::new("ops").order(2).frozen(FrozenSide::Right).into(),
    ];
    let flat: Vec<&str> = flatten(&columns).iter().filter_map(|c| c.key.as_deref()).collect();
    assert_eq!(flat, vec!["id", "phone", "ops"]);

    let parts = partition_by_frozen(&columns);
    assert_eq!(parts.len(), flat.len());
    assert_eq!(parts.left_frozen[0].key.as_deref(), Some("id"));
    assert_eq!(parts.normal[0].key.as_deref(), Some("phone"));
    assert_eq!(parts.right_frozen[0].key.as_deref(), Some("ops"));
}

#[test]
fn test_reorder_renumbers_orders() {
    let moved = reorder(&user_columns(), 2, 0);
    let keys: Vec<&str> = moved.iter().filter_map(TableColumn::key).collect();
    assert_eq!(keys, vec!["email", "id", "name"]);
    let orders: Vec<Option<i64>> = moved.iter().map(TableColumn::order).collect();
    assert_eq!(orders, vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn test_tab_close_rules() {
    let (mut ctx, notices) = context(Box::new(MemoryStorage::new()));
    ctx.init();
    let tabs = ctx.tabs_mut();
    for path in ["/a", "/b", "/c"] {
        assert!(tabs.on_route_change(&RouteLocation::new(path).title(path)));
    }
    assert_eq!(tabs.manager().tabs_count(), 4);

    // Opening an existing route only re-activates it
    assert!(tabs.on_route_change(&RouteLocation::new("/a")));
    assert_eq!(tabs.manager().tabs_count(), 4);
    assert_eq!(tabs.manager().active_key(), Some("/a"));

    // Closing the active tab activates the one sliding into its slot
    tabs.activate("/b");
    let request = tabs.close("/b").unwrap();
    assert_eq!(request.path, "/c");
    // Closing the last tab while active falls back to the new last one
    let request = tabs.close("/c").unwrap();
    assert_eq!(request.path, "/a");

    // The home tab stays put
    assert!(tabs.close("/").is_none());
    let warned = notices.drain();
    assert!(warned.iter().any(|n| n.kind == NoticeKind::Warn));

    let request = tabs.close_all().unwrap();
    assert_eq!(request.path, "/");
    assert_eq!(tabs.manager().tabs_count(), 1);
    assert!(tabs.manager().tabs()[0].is_home);
}

#[test]
fn test_tab_session_round_trip_through_file_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("state.json");

    {
        let (mut ctx, _) = context(Box::new(JsonFileStorage::open(&path)?));
        ctx.init();
        ctx.tabs_mut()
            .on_route_change(&RouteLocation::new("/system/role").name("Role").title("Roles"));
        ctx.tabs_mut()
            .on_route_change(&RouteLocation::new("/system/role/detail").title("Role: admin").param("id", "1"));
        ctx.dispose();
    }

    let (mut ctx, _) = context(Box::new(JsonFileStorage::open(&path)?));
    ctx.init();
    let manager = ctx.tabs().manager();
    let keys: Vec<&str> = manager.tabs().iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, vec!["/", "/system/role", "/system/role/detail?id=1"]);
    assert_eq!(manager.active_key(), Some("/system/role/detail?id=1"));
    assert_eq!(manager.active_tab().map(|t| t.title.as_str()), Some("Role: admin"));
    Ok(())
}

#[test]
fn test_tab_limit_notifies() {
    let notices = Rc::new(NoticeBuffer::new());
    let options = TabOptions {
        max_tabs: 2,
        ..TabOptions::default()
    };
    let mut ctx = AppContext::new(Box::new(MemoryStorage::new()), notices.clone(), options);
    ctx.init();
    assert!(ctx.tabs_mut().on_route_change(&RouteLocation::new("/a")));
    assert!(!ctx.tabs_mut().on_route_change(&RouteLocation::new("/b")));
    assert_eq!(ctx.tabs().manager().tabs_count(), 2);
    assert_eq!(notices.drain().len(), 1);
}
