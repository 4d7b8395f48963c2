pub mod columns;
pub mod context;
pub mod debounce;
pub mod notify;
pub mod storage;
pub mod table;
pub mod tabs;
pub mod theme;
pub mod viewport;

// Export column model engine
pub use columns::{
    batch_set_frozen, compute_offset, find_by_key, flatten, normalize, partition_by_frozen, reorder,
    toggle_frozen, Column, ColumnGroup, ColumnNormalizer, Disabled, FreezeDirection, FrozenSide,
    PartitionedColumns, RowAccess, TableColumn, Width,
};

// Export table state and persistence
pub use table::{
    ClickResolver, Pagination, PersistOptions, PersistedTableState, SortState, TableController, TableEvent,
    TablePersistence, TableSettings, TableViewState,
};

// Export tab session manager
pub use tabs::{
    generate_key, NavigationRequest, RouteLocation, TabController, TabItem, TabManager, TabOptions,
};

// Export ports and context
pub use context::AppContext;
pub use notify::{LogNotifier, Notice, NoticeBuffer, NoticeKind, Notifier};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use viewport::{Breakpoint, BreakpointTracker, ViewportPort};

// Export theme support
pub use theme::{adjust_brightness, hex_to_color32, with_alpha, Primary, Theme, ThemeColors, ThemeManager, ThemePreference};
