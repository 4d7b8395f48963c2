//! Table interaction events.
//!
//! Row clicks go through a [`ClickResolver`] which tells single clicks from
//! double clicks using a fixed window: a click starts a pending single
//! click, and a second click inside the window cancels it and becomes a
//! double click instead. Everything else is recorded as a [`TableEvent`] in
//! an outbox the host drains each frame.

use serde_json::Value;
use std::time::{Duration, Instant};

use super::settings::{FilterState, Pagination, SortState};

/// Two clicks closer than this form a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// A resolved row click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome<R> {
    Single(R),
    Double(R),
}

#[derive(Debug, Clone)]
struct PendingClick<R> {
    row: R,
    at: Instant,
}

/// Poll-driven single/double click disambiguation.
#[derive(Debug, Clone)]
pub struct ClickResolver<R> {
    window: Duration,
    pending: Option<PendingClick<R>>,
    resolved: Vec<ClickOutcome<R>>,
}

impl<R> Default for ClickResolver<R> {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

impl<R> ClickResolver<R> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            resolved: Vec::new(),
        }
    }

    /// Registers a click on `row` at `now`.
    pub fn click(&mut self, row: R, now: Instant) {
        match self.pending.take() {
            Some(pending) if now.duration_since(pending.at) < self.window => {
                self.resolved.push(ClickOutcome::Double(row));
            }
            Some(expired) => {
                self.resolved.push(ClickOutcome::Single(expired.row));
                self.pending = Some(PendingClick { row, at: now });
            }
            None => self.pending = Some(PendingClick { row, at: now }),
        }
    }

    /// Registers a native double click; any pending single click is dropped.
    pub fn double_click(&mut self, row: R) {
        self.pending = None;
        self.resolved.push(ClickOutcome::Double(row));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves a pending click whose window has elapsed and drains every
    /// resolved outcome, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<ClickOutcome<R>> {
        if let Some(pending) = self.pending.take() {
            if now.duration_since(pending.at) >= self.window {
                self.resolved.push(ClickOutcome::Single(pending.row));
            } else {
                self.pending = Some(pending);
            }
        }
        std::mem::take(&mut self.resolved)
    }
}

/// A clicked row: its identity and position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRef {
    pub id: Value,
    pub index: usize,
}

/// Events a table reports to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    RowClick(RowRef),
    RowDblClick(RowRef),
    SelectionChange(Vec<Value>),
    RowExpand(Value),
    RowCollapse(Value),
    Page(Pagination),
    Sort(SortState),
    Filter(FilterState),
    ColumnReorder { from: usize, to: usize },
    ColumnResizeEnd { key: String, width: f32 },
    CellEditComplete { row: RowRef, field: String, value: Value },
    CellEditCancel { row: RowRef, field: String },
    Refresh,
}

impl TableEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::RowClick(_) => "row-click",
            TableEvent::RowDblClick(_) => "row-dblclick",
            TableEvent::SelectionChange(_) => "selection-change",
            TableEvent::RowExpand(_) => "row-expand",
            TableEvent::RowCollapse(_) => "row-collapse",
            TableEvent::Page(_) => "page",
            TableEvent::Sort(_) => "sort",
            TableEvent::Filter(_) => "filter",
            TableEvent::ColumnReorder { .. } => "column-reorder",
            TableEvent::ColumnResizeEnd { .. } => "column-resize-end",
            TableEvent::CellEditComplete { .. } => "cell-edit-complete",
            TableEvent::CellEditCancel { .. } => "cell-edit-cancel",
            TableEvent::Refresh => "refresh",
        }
    }
}

impl From<ClickOutcome<RowRef>> for TableEvent {
    fn from(outcome: ClickOutcome<RowRef>) -> Self {
        match outcome {
            ClickOutcome::Single(row) => TableEvent::RowClick(row),
            ClickOutcome::Double(row) => TableEvent::RowDblClick(row),
        }
    }
}

/// Adds `id` if absent, removes it otherwise.
///
/// # Returns
/// `true` if `id` is a member afterwards.
pub fn toggle_member(ids: &mut Vec<Value>, id: &Value) -> bool {
    match ids.iter().position(|v| v == id) {
        Some(pos) => {
            ids.remove(pos);
            false
        }
        None => {
            ids.push(id.clone());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_two_quick_clicks_make_one_double() {
        let start = Instant::now();
        let mut resolver = ClickResolver::default();
        resolver.click("r1", start);
        resolver.click("r1", start + ms(120));

        let outcomes = resolver.poll(start + ms(1000));
        assert_eq!(outcomes, vec![ClickOutcome::Double("r1")]);
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_single_click_fires_after_window() {
        let start = Instant::now();
        let mut resolver = ClickResolver::default();
        resolver.click("r1", start);

        assert!(resolver.poll(start + ms(299)).is_empty());
        assert_eq!(resolver.poll(start + ms(300)), vec![ClickOutcome::Single("r1")]);
        assert!(resolver.poll(start + ms(900)).is_empty());
    }

    #[test]
    fn test_late_second_click_is_two_singles() {
        let start = Instant::now();
        let mut resolver = ClickResolver::default();
        resolver.click("a", start);
        // Host missed a poll; the first click still resolves as single
        resolver.click("b", start + ms(450));
        assert_eq!(resolver.poll(start + ms(500)), vec![ClickOutcome::Single("a")]);
        assert_eq!(resolver.poll(start + ms(800)), vec![ClickOutcome::Single("b")]);
    }

    #[test]
    fn test_triple_click_is_double_then_single() {
        let start = Instant::now();
        let mut resolver = ClickResolver::default();
        resolver.click(1, start);
        resolver.click(1, start + ms(100));
        resolver.click(1, start + ms(200));
        assert_eq!(resolver.poll(start + ms(250)), vec![ClickOutcome::Double(1)]);
        assert_eq!(resolver.poll(start + ms(500)), vec![ClickOutcome::Single(1)]);
    }

    #[test]
    fn test_native_double_click_cancels_pending() {
        let start = Instant::now();
        let mut resolver = ClickResolver::default();
        resolver.click(7, start);
        resolver.double_click(7);
        assert_eq!(resolver.poll(start + ms(1000)), vec![ClickOutcome::Double(7)]);
    }

    #[test]
    fn test_toggle_member() {
        let mut ids = vec![json!(1)];
        assert!(toggle_member(&mut ids, &json!(2)));
        assert!(!toggle_member(&mut ids, &json!(1)));
        assert_eq!(ids, vec![json!(2)]);
    }

    #[test]
    fn test_event_names() {
        let row = RowRef { id: json!(1), index: 0 };
        assert_eq!(TableEvent::from(ClickOutcome::Double(row.clone())).name(), "row-dblclick");
        assert_eq!(TableEvent::from(ClickOutcome::Single(row)).name(), "row-click");
        assert_eq!(TableEvent::ColumnReorder { from: 0, to: 2 }.name(), "column-reorder");
    }
}
