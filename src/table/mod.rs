//! Table view state, persistence and interaction events.

pub mod controller;
pub mod events;
pub mod persistence;
pub mod settings;

pub use controller::TableController;
pub use events::{ClickOutcome, ClickResolver, RowRef, TableEvent, DOUBLE_CLICK_WINDOW};
pub use persistence::{
    PersistOptions, PersistedColumn, PersistedTableState, PersistenceEvent, TablePersistence, DEFAULT_STORAGE_KEY,
    STATE_VERSION,
};
pub use settings::{
    FilterState, Pagination, SortMeta, SortOrder, SortState, TableSettings, TableSize, TableViewState, DEFAULT_STYLE,
};
