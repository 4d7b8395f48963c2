//! Column model engine.
//!
//! - Model types (leaf columns, groups, widths, disabled predicates)
//! - Normalization with a content-keyed cache
//! - Tree operations (lookup, flatten, reorder, freeze, partition, offsets)

pub mod model;
pub mod normalize;
pub mod ops;

pub use model::{
    CellFormatter, CellText, Column, ColumnGroup, Disabled, FreezeDirection, FrozenSide, RowAccess,
    RowPredicate, TableColumn, Width,
};
pub use normalize::{normalize, ColumnNormalizer};
pub use ops::{
    batch_set_frozen, column_text, compute_offset, find_by_key, flatten, partition_by_frozen, render_cell,
    reorder, toggle_frozen, update_by_key, PartitionedColumns,
};
