//! Column model types.
//!
//! A table is described by an ordered list of [`TableColumn`]s, each either a
//! leaf [`Column`] or a [`ColumnGroup`] holding child columns. Columns are
//! generic over the row type `T` because the disabled predicate and the cell
//! text callbacks receive rows.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Predicate over a row and its index.
pub type RowPredicate<T> = Rc<dyn Fn(&T, usize) -> bool>;

/// Produces cell content for a row and its index.
pub type CellFormatter<T> = Rc<dyn Fn(&T, usize) -> String>;

/// Disabled state of a column.
///
/// `Computed` depends on a row and can only be evaluated while rendering a
/// row; without a row it counts as enabled. `Bound` is a shared flag owned by
/// the host which may change between evaluations.
pub enum Disabled<T> {
    Static(bool),
    Computed(RowPredicate<T>),
    Bound(Rc<Cell<bool>>),
}

impl<T> Disabled<T> {
    /// Evaluates without row context.
    pub fn snapshot(&self) -> bool {
        match self {
            Disabled::Static(disabled) => *disabled,
            Disabled::Computed(_) => false,
            Disabled::Bound(flag) => flag.get(),
        }
    }

    /// Evaluates for a specific row.
    pub fn evaluate(&self, row: &T, index: usize) -> bool {
        match self {
            Disabled::Static(disabled) => *disabled,
            Disabled::Computed(predicate) => predicate(row, index),
            Disabled::Bound(flag) => flag.get(),
        }
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self {
            Disabled::Static(disabled) => {
                0u8.hash(state);
                disabled.hash(state);
            }
            Disabled::Computed(predicate) => {
                1u8.hash(state);
                (Rc::as_ptr(predicate) as *const () as usize).hash(state);
            }
            Disabled::Bound(flag) => {
                2u8.hash(state);
                flag.get().hash(state);
            }
        }
    }
}

impl<T> Default for Disabled<T> {
    fn default() -> Self {
        Disabled::Static(false)
    }
}

impl<T> Clone for Disabled<T> {
    fn clone(&self) -> Self {
        match self {
            Disabled::Static(disabled) => Disabled::Static(*disabled),
            Disabled::Computed(predicate) => Disabled::Computed(Rc::clone(predicate)),
            Disabled::Bound(flag) => Disabled::Bound(Rc::clone(flag)),
        }
    }
}

impl<T> fmt::Debug for Disabled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disabled::Static(disabled) => f.debug_tuple("Static").field(disabled).finish(),
            Disabled::Computed(_) => f.write_str("Computed(..)"),
            Disabled::Bound(flag) => f.debug_tuple("Bound").field(&flag.get()).finish(),
        }
    }
}

/// Cell text source: a fixed literal or a per-row callback.
pub enum CellText<T> {
    Literal(String),
    Computed(CellFormatter<T>),
}

impl<T> Clone for CellText<T> {
    fn clone(&self) -> Self {
        match self {
            CellText::Literal(text) => CellText::Literal(text.clone()),
            CellText::Computed(formatter) => CellText::Computed(Rc::clone(formatter)),
        }
    }
}

impl<T> fmt::Debug for CellText<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellText::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            CellText::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Side a frozen column sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrozenSide {
    Left,
    Right,
}

/// Explicit freeze request: unfreeze, or pin to a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreezeDirection {
    None,
    Left,
    Right,
}

/// Column width: pixels or a CSS length string such as `"120px"` or `"10rem"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Width {
    Px(f32),
    Css(String),
}

impl Width {
    /// Pixel value. CSS strings contribute their leading integer (`"120px"` is
    /// 120, `"12.5rem"` is 12); strings without one yield `None`.
    pub fn to_px(&self) -> Option<f32> {
        match self {
            Width::Px(px) => Some(px.trunc()),
            Width::Css(css) => parse_leading_int(css).map(|v| v as f32),
        }
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self {
            Width::Px(px) => {
                0u8.hash(state);
                px.to_bits().hash(state);
            }
            Width::Css(css) => {
                1u8.hash(state);
                css.hash(state);
            }
        }
    }
}

impl From<f32> for Width {
    fn from(px: f32) -> Self {
        Width::Px(px)
    }
}

impl From<&str> for Width {
    fn from(css: &str) -> Self {
        Width::Css(css.to_string())
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Read access to row values by (possibly dotted) field path.
pub trait RowAccess {
    /// Display text of the value at `path`, `None` when absent or null.
    fn field_text(&self, path: &str) -> Option<String>;
}

impl RowAccess for serde_json::Value {
    fn field_text(&self, path: &str) -> Option<String> {
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match current {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl RowAccess for BTreeMap<String, String> {
    fn field_text(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

/// A leaf column.
pub struct Column<T> {
    pub key: Option<String>,
    /// Row field, possibly a dotted path.
    pub field: Option<String>,
    pub header: Option<String>,
    pub title: Option<String>,
    pub width: Option<Width>,
    pub min_width: Option<Width>,
    pub max_width: Option<Width>,
    pub sortable: bool,
    pub disabled: Disabled<T>,
    pub frozen: bool,
    pub align_frozen: Option<FrozenSide>,
    pub order: Option<i64>,
    pub visible: Option<bool>,
    pub ellipsis: bool,
    pub show_tooltip: bool,
    pub text: Option<CellText<T>>,
    pub render: Option<CellFormatter<T>>,
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self {
            key: None,
            field: None,
            header: None,
            title: None,
            width: None,
            min_width: None,
            max_width: None,
            sortable: false,
            disabled: Disabled::default(),
            frozen: false,
            align_frozen: None,
            order: None,
            visible: None,
            ellipsis: false,
            show_tooltip: false,
            text: None,
            render: None,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            field: self.field.clone(),
            header: self.header.clone(),
            title: self.title.clone(),
            width: self.width.clone(),
            min_width: self.min_width.clone(),
            max_width: self.max_width.clone(),
            sortable: self.sortable,
            disabled: self.disabled.clone(),
            frozen: self.frozen,
            align_frozen: self.align_frozen,
            order: self.order,
            visible: self.visible,
            ellipsis: self.ellipsis,
            show_tooltip: self.show_tooltip,
            text: self.text.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("field", &self.field)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("disabled", &self.disabled)
            .field("frozen", &self.frozen)
            .field("align_frozen", &self.align_frozen)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    /// Creates a column whose key doubles as its field.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            field: Some(key.clone()),
            key: Some(key),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn width(mut self, width: impl Into<Width>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn min_width(mut self, width: impl Into<Width>) -> Self {
        self.min_width = Some(width.into());
        self
    }

    pub fn max_width(mut self, width: impl Into<Width>) -> Self {
        self.max_width = Some(width.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn disabled(mut self, disabled: Disabled<T>) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn frozen(mut self, side: FrozenSide) -> Self {
        self.frozen = true;
        self.align_frozen = Some(side);
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn ellipsis(mut self, ellipsis: bool) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    pub fn text_fn(mut self, f: impl Fn(&T, usize) -> String + 'static) -> Self {
        self.text = Some(CellText::Computed(Rc::new(f)));
        self
    }

    pub fn render_fn(mut self, f: impl Fn(&T, usize) -> String + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    /// Header text, falling back to title, key and field.
    pub fn label(&self) -> &str {
        self.header
            .as_deref()
            .or(self.title.as_deref())
            .or(self.key.as_deref())
            .or(self.field.as_deref())
            .unwrap_or("")
    }

    /// Side the column is pinned to. Always `None` for unfrozen columns; a
    /// frozen column without an explicit side sticks left.
    pub fn frozen_side(&self) -> Option<FrozenSide> {
        if self.frozen {
            Some(self.align_frozen.unwrap_or(FrozenSide::Left))
        } else {
            None
        }
    }

    /// Width in pixels: `width`, else `min_width`, else 0.
    pub fn pixel_width(&self) -> f32 {
        self.width
            .as_ref()
            .and_then(Width::to_px)
            .or_else(|| self.min_width.as_ref().and_then(Width::to_px))
            .unwrap_or(0.0)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.field.hash(state);
        self.header.hash(state);
        self.title.hash(state);
        for width in [&self.width, &self.min_width, &self.max_width] {
            match width {
                Some(w) => w.hash_into(state),
                None => 0xffu8.hash(state),
            }
        }
        self.sortable.hash(state);
        self.disabled.hash_into(state);
        self.frozen.hash(state);
        self.align_frozen.hash(state);
        self.order.hash(state);
        self.visible.hash(state);
        self.ellipsis.hash(state);
        self.show_tooltip.hash(state);
        match &self.text {
            Some(CellText::Literal(text)) => text.hash(state),
            Some(CellText::Computed(f)) => (Rc::as_ptr(f) as *const () as usize).hash(state),
            None => 0u8.hash(state),
        }
        if let Some(render) = &self.render {
            (Rc::as_ptr(render) as *const () as usize).hash(state);
        }
    }
}

/// A header spanning several child columns.
pub struct ColumnGroup<T> {
    pub key: Option<String>,
    pub header: Option<String>,
    pub order: Option<i64>,
    pub children: Vec<TableColumn<T>>,
}

impl<T> Clone for ColumnGroup<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            order: self.order,
            children: self.children.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnGroup")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("order", &self.order)
            .field("children", &self.children)
            .finish()
    }
}

impl<T> ColumnGroup<T> {
    pub fn new(key: impl Into<String>, children: Vec<TableColumn<T>>) -> Self {
        Self {
            key: Some(key.into()),
            header: None,
            order: None,
            children,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// A node of the column tree.
pub enum TableColumn<T> {
    Leaf(Column<T>),
    Group(ColumnGroup<T>),
}

impl<T> Clone for TableColumn<T> {
    fn clone(&self) -> Self {
        match self {
            TableColumn::Leaf(column) => TableColumn::Leaf(column.clone()),
            TableColumn::Group(group) => TableColumn::Group(group.clone()),
        }
    }
}

impl<T> fmt::Debug for TableColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableColumn::Leaf(column) => column.fmt(f),
            TableColumn::Group(group) => group.fmt(f),
        }
    }
}

impl<T> From<Column<T>> for TableColumn<T> {
    fn from(column: Column<T>) -> Self {
        TableColumn::Leaf(column)
    }
}

impl<T> From<ColumnGroup<T>> for TableColumn<T> {
    fn from(group: ColumnGroup<T>) -> Self {
        TableColumn::Group(group)
    }
}

impl<T> TableColumn<T> {
    pub fn key(&self) -> Option<&str> {
        match self {
            TableColumn::Leaf(column) => column.key.as_deref(),
            TableColumn::Group(group) => group.key.as_deref(),
        }
    }

    /// Row field of a leaf; groups have none.
    pub fn field(&self) -> Option<&str> {
        match self {
            TableColumn::Leaf(column) => column.field.as_deref(),
            TableColumn::Group(_) => None,
        }
    }

    pub fn order(&self) -> Option<i64> {
        match self {
            TableColumn::Leaf(column) => column.order,
            TableColumn::Group(group) => group.order,
        }
    }

    pub fn set_order(&mut self, order: i64) {
        match self {
            TableColumn::Leaf(column) => column.order = Some(order),
            TableColumn::Group(group) => group.order = Some(order),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TableColumn::Leaf(column) => column.label(),
            TableColumn::Group(group) => group
                .header
                .as_deref()
                .or(group.key.as_deref())
                .unwrap_or(""),
        }
    }

    pub fn as_leaf(&self) -> Option<&Column<T>> {
        match self {
            TableColumn::Leaf(column) => Some(column),
            TableColumn::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TableColumn::Group(_))
    }

    /// Disabled without row context. Groups are never disabled themselves.
    pub fn is_disabled(&self) -> bool {
        match self {
            TableColumn::Leaf(column) => column.disabled.snapshot(),
            TableColumn::Group(_) => false,
        }
    }

    /// Content hash covering every attribute that affects derived views.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash_into(&mut hasher);
        hasher.finish()
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self {
            TableColumn::Leaf(column) => {
                0u8.hash(state);
                column.hash_into(state);
            }
            TableColumn::Group(group) => {
                1u8.hash(state);
                group.key.hash(state);
                group.header.hash(state);
                group.order.hash(state);
                group.children.len().hash(state);
                for child in &group.children {
                    child.hash_into(state);
                }
            }
        }
    }
}
