//! Demo data backing the console pages.

pub mod demo_data;
