//! Low-level rendering helpers for painter-drawn tables.

pub mod text_utils;
