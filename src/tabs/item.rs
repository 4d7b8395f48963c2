//! Tab items, route locations and tab configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::key::generate_key;

/// Route params or query, ordered by name.
pub type RouteParams = BTreeMap<String, String>;

/// Title used when a route carries neither a title nor a name.
pub const UNTITLED: &str = "Unnamed page";

/// Default cap on open tabs.
pub const DEFAULT_MAX_TABS: usize = 100;

/// Default width of a tab label, in characters.
pub const DEFAULT_TITLE_LENGTH: usize = 12;

/// Route metadata relevant to tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub icon: Option<String>,
    /// `Some(false)` makes the tab permanent.
    pub closable: Option<bool>,
    /// Routes that never get a tab.
    pub hide_in_tabs: bool,
}

/// A resolved navigation target as reported by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocation {
    pub path: String,
    pub name: Option<String>,
    pub params: RouteParams,
    pub query: RouteParams,
    pub meta: RouteMeta,
}

impl RouteLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.meta.icon = Some(icon.into());
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.meta.closable = Some(closable);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.hide_in_tabs = true;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Canonical tab key of this location.
    pub fn key(&self) -> String {
        generate_key(&self.path, &self.params, &self.query)
    }
}

/// Where the host router should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub params: RouteParams,
    pub query: RouteParams,
}

/// One open tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabItem {
    pub key: String,
    pub title: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub closable: bool,
    pub is_home: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: RouteParams,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: RouteParams,
    pub loading: bool,
    pub error: bool,
}

impl TabItem {
    /// Builds a tab for `route`. Title falls back from meta title to route
    /// name to [`UNTITLED`]; home tabs are never closable.
    pub fn from_route(route: &RouteLocation, is_home: bool) -> Self {
        let title = route
            .meta
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| route.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| UNTITLED.to_string());
        Self {
            key: route.key(),
            title,
            path: route.path.clone(),
            icon: route.meta.icon.clone(),
            closable: !is_home && route.meta.closable != Some(false),
            is_home,
            params: route.params.clone(),
            query: route.query.clone(),
            loading: false,
            error: false,
        }
    }

    /// A tab needs a key, a title and a path.
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.title.is_empty() && !self.path.is_empty()
    }

    /// Title shortened to `max_len` characters, ending in `...` when cut.
    pub fn display_title(&self, max_len: usize) -> String {
        if self.title.chars().count() <= max_len {
            return self.title.clone();
        }
        let kept: String = self.title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }

    pub fn navigation(&self) -> NavigationRequest {
        NavigationRequest {
            path: self.path.clone(),
            params: self.params.clone(),
            query: self.query.clone(),
        }
    }
}

/// Partial update applied by [`TabManager::update_tab`](super::TabManager::update_tab).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub closable: Option<bool>,
    pub loading: Option<bool>,
    pub error: Option<bool>,
}

impl TabPatch {
    pub(crate) fn apply(&self, tab: &mut TabItem) {
        if let Some(title) = &self.title {
            tab.title = title.clone();
        }
        if let Some(icon) = &self.icon {
            tab.icon = Some(icon.clone());
        }
        if let Some(closable) = self.closable {
            tab.closable = closable && !tab.is_home;
        }
        if let Some(loading) = self.loading {
            tab.loading = loading;
        }
        if let Some(error) = self.error {
            tab.error = error;
        }
    }
}

/// Tab session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOptions {
    pub max_tabs: usize,
    /// Paths whose tab is the home tab.
    pub home_paths: Vec<String>,
    pub home_title: String,
    pub home_icon: String,
    /// Route name that never gets a tab.
    pub login_route: String,
    /// Storage slot of the saved session; see [`TabOptions::storage_key_for`].
    pub storage_key: String,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            max_tabs: DEFAULT_MAX_TABS,
            home_paths: vec!["/".to_string(), "/dashboard".to_string(), "/home".to_string()],
            home_title: "Home".to_string(),
            home_icon: "pi pi-home".to_string(),
            login_route: "Login".to_string(),
            storage_key: "app_tabs".to_string(),
        }
    }
}

impl TabOptions {
    pub fn is_home_path(&self, path: &str) -> bool {
        self.home_paths.iter().any(|p| p == path)
    }

    /// `app_tabs`, or `app_tabs_<user>` for a signed-in user.
    pub fn storage_key_for(&self, user: Option<&str>) -> String {
        match user.filter(|u| !u.is_empty()) {
            Some(user) => format!("{}_{}", self.storage_key, user),
            None => self.storage_key.clone(),
        }
    }
}
