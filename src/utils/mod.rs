//! Utility modules for the console GUI.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_count, format_memory_mb, format_saved_at, get_current_memory_mb};
