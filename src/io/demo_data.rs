//! Demo pages for the console GUI.
//!
//! Each page is a route with a column set and deterministically generated
//! rows, so a restarted console shows the same data its persisted layouts
//! were saved against.

use chrono::{Duration as ChronoDuration, NaiveDate};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rconsole::{Column, ColumnGroup, FrozenSide, RouteLocation, TableColumn};
use serde_json::{json, Value};

/// Seed shared by every page; rows differ per page through the row count and
/// generator.
pub const DEMO_SEED: u64 = 42;

/// Route that shows a single role.
pub const ROLE_DETAIL_PATH: &str = "/system/role/detail";

/// Kind of content a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Activity,
    Menus,
    Roles,
    Dictionary,
}

/// A sidebar entry.
#[derive(Debug, Clone)]
pub struct DemoPage {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub kind: PageKind,
    pub row_count: usize,
}

impl DemoPage {
    pub fn route(&self) -> RouteLocation {
        RouteLocation::new(self.path)
            .name(self.name)
            .title(self.title)
            .icon(self.icon)
    }

    /// Storage key of this page's table layout.
    pub fn table_key(&self) -> String {
        format!("custom-table-state-{}", self.name.to_lowercase())
    }
}

pub static PAGES: Lazy<Vec<DemoPage>> = Lazy::new(|| {
    vec![
        DemoPage {
            path: "/",
            name: "Dashboard",
            title: "Home",
            icon: "🏠",
            kind: PageKind::Activity,
            row_count: 64,
        },
        DemoPage {
            path: "/system/menu",
            name: "Menu",
            title: "Menu Management",
            icon: "☰",
            kind: PageKind::Menus,
            row_count: 36,
        },
        DemoPage {
            path: "/system/role",
            name: "Role",
            title: "Role Management",
            icon: "👥",
            kind: PageKind::Roles,
            row_count: 24,
        },
        DemoPage {
            path: "/system/dictionary",
            name: "Dictionary",
            title: "Data Dictionary",
            icon: "📖",
            kind: PageKind::Dictionary,
            row_count: 120,
        },
    ]
});

pub fn page(path: &str) -> Option<&'static DemoPage> {
    PAGES.iter().find(|p| p.path == path)
}

/// Route of the detail view for role `id`.
pub fn role_detail_route(id: &str, name: &str) -> RouteLocation {
    RouteLocation::new(ROLE_DETAIL_PATH)
        .name("RoleDetail")
        .title(format!("Role: {}", name))
        .icon("👤")
        .param("id", id)
}

// ============================================================================
// Columns
// ============================================================================

fn status_text(row: &Value, _index: usize) -> String {
    match row.get("status").and_then(Value::as_i64) {
        Some(1) => "Enabled".to_string(),
        _ => "Disabled".to_string(),
    }
}

fn leaf(key: &str, header: &str, width: f32) -> Column<Value> {
    Column::new(key).field(key).header(header).width(width).min_width(60.0)
}

pub fn columns_for(kind: PageKind) -> Vec<TableColumn<Value>> {
    let columns: Vec<TableColumn<Value>> = match kind {
        PageKind::Activity => vec![
            leaf("id", "ID", 70.0).sortable(true).frozen(FrozenSide::Left).into(),
            leaf("user", "User", 120.0).sortable(true).into(),
            leaf("action", "Action", 140.0).into(),
            leaf("module", "Module", 140.0).sortable(true).into(),
            leaf("ip", "IP Address", 140.0).into(),
            leaf("time", "Time", 160.0).sortable(true).into(),
            leaf("result", "Result", 90.0).frozen(FrozenSide::Right).into(),
        ],
        PageKind::Menus => vec![
            leaf("id", "ID", 70.0).sortable(true).frozen(FrozenSide::Left).into(),
            leaf("name", "Name", 160.0).sortable(true).frozen(FrozenSide::Left).into(),
            leaf("path", "Route", 200.0).ellipsis(true).into(),
            leaf("icon", "Icon", 110.0).into(),
            leaf("sort", "Sort", 80.0).sortable(true).into(),
            leaf("type", "Type", 100.0).into(),
            leaf("status", "Status", 100.0).text_fn(status_text).into(),
            leaf("createdAt", "Created", 160.0).sortable(true).into(),
            Column::new("operation")
                .header("Actions")
                .width(130.0)
                .frozen(FrozenSide::Right)
                .render_fn(|_, _| "Edit · Delete".to_string())
                .into(),
        ],
        PageKind::Roles => vec![
            leaf("id", "ID", 70.0).sortable(true).frozen(FrozenSide::Left).into(),
            leaf("code", "Code", 130.0).sortable(true).into(),
            leaf("name", "Name", 150.0).sortable(true).into(),
            leaf("users", "Users", 90.0).sortable(true).into(),
            leaf("dataScope", "Data Scope", 150.0).into(),
            leaf("status", "Status", 100.0).text_fn(status_text).into(),
            leaf("remark", "Remark", 220.0).ellipsis(true).into(),
            leaf("createdAt", "Created", 160.0).sortable(true).into(),
        ],
        PageKind::Dictionary => vec![
            leaf("id", "ID", 70.0).sortable(true).frozen(FrozenSide::Left).into(),
            leaf("type", "Type", 140.0).sortable(true).into(),
            ColumnGroup::new(
                "item",
                vec![
                    leaf("item.label", "Label", 140.0).into(),
                    leaf("item.value", "Value", 120.0).into(),
                ],
            )
            .header("Item")
            .into(),
            leaf("sort", "Sort", 80.0).sortable(true).into(),
            leaf("status", "Status", 100.0).text_fn(status_text).into(),
            leaf("remark", "Remark", 220.0).ellipsis(true).into(),
        ],
    };
    columns
        .into_iter()
        .enumerate()
        .map(|(index, mut column)| {
            column.set_order(index as i64);
            column
        })
        .collect()
}

// ============================================================================
// Rows
// ============================================================================

const USERS: &[&str] = &["admin", "ada", "grace", "linus", "margaret", "ken", "barbara"];
const ACTIONS: &[&str] = &["Sign in", "Sign out", "Create", "Update", "Delete", "Export"];
const MODULES: &[&str] = &["Users", "Roles", "Menus", "Dictionary", "Settings", "Reports"];
const MENU_NAMES: &[&str] = &["System", "Users", "Roles", "Menus", "Logs", "Jobs", "Reports", "Settings"];
const MENU_ICONS: &[&str] = &["pi pi-cog", "pi pi-user", "pi pi-users", "pi pi-bars", "pi pi-list", "pi pi-clock"];
const SCOPES: &[&str] = &["All data", "Own department", "Own department and below", "Self only"];
const DICT_TYPES: &[&str] = &["sys_user_sex", "sys_normal_disable", "sys_job_status", "sys_notice_type", "sys_yes_no"];

fn pick(rng: &mut StdRng, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn timestamp(rng: &mut StdRng) -> String {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();
    let at = base + ChronoDuration::minutes(rng.gen_range(0..60 * 24 * 240));
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Generates the rows of a page. The same `seed` always yields the same rows.
pub fn rows_for(page: &DemoPage, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed ^ page.row_count as u64);
    (1..=page.row_count)
        .map(|id| match page.kind {
            PageKind::Activity => json!({
                "id": id,
                "user": pick(&mut rng, USERS),
                "action": pick(&mut rng, ACTIONS),
                "module": pick(&mut rng, MODULES),
                "ip": format!("10.0.{}.{}", rng.gen_range(0..16), rng.gen_range(1..255)),
                "time": timestamp(&mut rng),
                "result": if rng.gen_bool(0.9) { "Success" } else { "Failed" },
            }),
            PageKind::Menus => {
                let name = pick(&mut rng, MENU_NAMES);
                json!({
                    "id": id,
                    "name": format!("{} {}", name, id),
                    "path": format!("/system/{}/{}", name.to_lowercase(), id),
                    "icon": pick(&mut rng, MENU_ICONS),
                    "sort": rng.gen_range(0..100),
                    "type": if id % 3 == 0 { "Button" } else { "Menu" },
                    "status": i64::from(rng.gen_bool(0.85)),
                    "createdAt": timestamp(&mut rng),
                })
            }
            PageKind::Roles => json!({
                "id": id,
                "code": format!("ROLE_{:03}", id),
                "name": format!("Role {}", id),
                "users": rng.gen_range(0..250),
                "dataScope": pick(&mut rng, SCOPES),
                "status": i64::from(rng.gen_bool(0.8)),
                "remark": format!("Assigned to the {} team", pick(&mut rng, MODULES).to_lowercase()),
                "createdAt": timestamp(&mut rng),
            }),
            PageKind::Dictionary => {
                let value = rng.gen_range(0..10);
                json!({
                    "id": id,
                    "type": pick(&mut rng, DICT_TYPES),
                    "item": { "label": format!("Option {}", value), "value": value.to_string() },
                    "sort": rng.gen_range(0..20),
                    "status": i64::from(rng.gen_bool(0.9)),
                    "remark": "",
                })
            }
        })
        .collect()
}
