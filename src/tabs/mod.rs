//! Tab session manager.
//!
//! - Canonical keys derived from path, params and query
//! - The ordered tab collection with close variants and active-tab repair
//! - Session persistence
//! - A controller that turns route changes into tab operations

pub mod controller;
pub mod item;
pub mod key;
pub mod manager;
pub mod store;

pub use controller::TabController;
pub use item::{
    NavigationRequest, RouteLocation, RouteMeta, RouteParams, TabItem, TabOptions, TabPatch, DEFAULT_MAX_TABS,
    DEFAULT_TITLE_LENGTH, UNTITLED,
};
pub use key::generate_key;
pub use manager::TabManager;
pub use store::{clear_session, restore_session, save_session, TabSession};
