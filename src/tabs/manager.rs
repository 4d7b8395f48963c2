//! The ordered tab collection and its active tab.
//!
//! Keys are unique. The active key is `None` only when the collection is
//! empty, or after a restore found nothing to activate. At most one tab is
//! the home tab, and it is never closable.

use super::item::{RouteLocation, RouteParams, TabItem, TabOptions, TabPatch};
use super::key::generate_key;

#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: Vec<TabItem>,
    active_key: Option<String>,
    options: TabOptions,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(TabOptions::default())
    }
}

impl TabManager {
    pub fn new(options: TabOptions) -> Self {
        Self {
            tabs: Vec::new(),
            active_key: None,
            options,
        }
    }

    pub fn options(&self) -> &TabOptions {
        &self.options
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    pub fn active_tab(&self) -> Option<&TabItem> {
        self.active_key.as_deref().and_then(|key| self.get(key))
    }

    pub fn tabs_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn can_add_tab(&self) -> bool {
        self.tabs.len() < self.options.max_tabs
    }

    pub fn get(&self, key: &str) -> Option<&TabItem> {
        self.tabs.iter().find(|t| t.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key == key)
    }

    pub fn home_tab(&self) -> Option<&TabItem> {
        self.tabs.iter().find(|t| t.is_home)
    }

    /// Tabs strictly before `key`; empty when `key` is unknown.
    pub fn left_of(&self, key: &str) -> &[TabItem] {
        match self.position(key) {
            Some(index) => &self.tabs[..index],
            None => &[],
        }
    }

    /// Tabs strictly after `key`; empty when `key` is unknown.
    pub fn right_of(&self, key: &str) -> &[TabItem] {
        match self.position(key) {
            Some(index) => &self.tabs[index + 1..],
            None => &[],
        }
    }

    pub fn others(&self, key: &str) -> Vec<&TabItem> {
        self.tabs.iter().filter(|t| t.key != key).collect()
    }

    pub fn closable_tabs(&self) -> Vec<&TabItem> {
        self.tabs.iter().filter(|t| t.closable).collect()
    }

    pub fn has_closable_tabs(&self) -> bool {
        self.tabs.iter().any(|t| t.closable)
    }

    /// Tab to activate if `key` went away: the right neighbour, else the
    /// left one. Unknown keys yield the first tab; a single tab yields `None`.
    pub fn next_active_tab(&self, key: &str) -> Option<&TabItem> {
        if self.tabs.len() <= 1 {
            return None;
        }
        match self.position(key) {
            None => self.tabs.first(),
            Some(index) if index + 1 < self.tabs.len() => self.tabs.get(index + 1),
            Some(index) => index.checked_sub(1).and_then(|i| self.tabs.get(i)),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Opens (or re-activates) the tab for `route`.
    ///
    /// # Returns
    /// `false` only when a new tab would exceed `max_tabs`.
    pub fn add_tab(&mut self, route: &RouteLocation) -> bool {
        let key = route.key();
        if self.contains(&key) {
            self.active_key = Some(key);
            return true;
        }
        if !self.can_add_tab() {
            log::warn!("tab limit of {} reached, not opening {}", self.options.max_tabs, key);
            return false;
        }

        let is_home = self.options.is_home_path(&route.path) && self.home_tab().is_none();
        let tab = TabItem::from_route(route, is_home);
        log::debug!("opening tab {}", tab.key);
        self.tabs.push(tab);
        self.active_key = Some(key);
        true
    }

    /// Closes the tab with `key`.
    ///
    /// If it was active, the tab that slides into its slot becomes active;
    /// when it was last, the new last tab does.
    pub fn remove_tab(&mut self, key: &str) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        if !self.tabs[index].closable {
            log::warn!("tab {} is not closable", key);
            return false;
        }

        self.tabs.remove(index);
        if self.active_key.as_deref() == Some(key) {
            let next = index.min(self.tabs.len().saturating_sub(1));
            self.active_key = self.tabs.get(next).map(|t| t.key.clone());
        }
        true
    }

    /// Activates `key` if present.
    pub fn set_active(&mut self, key: &str) -> bool {
        if self.contains(key) {
            self.active_key = Some(key.to_string());
            true
        } else {
            false
        }
    }

    /// Keeps `key` and the home tab, then activates `key`.
    pub fn close_others(&mut self, key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.tabs.retain(|t| t.key == key || t.is_home);
        self.active_key = Some(key.to_string());
        true
    }

    /// Keeps only the home tab and activates it.
    pub fn close_all(&mut self) {
        self.tabs.retain(|t| t.is_home);
        self.active_key = self.home_tab().map(|t| t.key.clone());
    }

    /// Drops every non-home tab before `key`.
    pub fn close_left(&mut self, key: &str) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let mut position = 0;
        self.tabs.retain(|t| {
            let keep = position >= index || t.is_home;
            position += 1;
            keep
        });
        self.repair_active(key);
        true
    }

    /// Drops every non-home tab after `key`.
    pub fn close_right(&mut self, key: &str) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let mut position = 0;
        self.tabs.retain(|t| {
            let keep = position <= index || t.is_home;
            position += 1;
            keep
        });
        self.repair_active(key);
        true
    }

    /// Points the active key at `fallback` when the active tab was closed.
    fn repair_active(&mut self, fallback: &str) {
        let active_alive = self.active_key.as_deref().is_some_and(|k| self.contains(k));
        if !active_alive {
            self.active_key = Some(fallback.to_string());
        }
    }

    pub fn update_tab(&mut self, key: &str, patch: &TabPatch) -> bool {
        match self.tabs.iter_mut().find(|t| t.key == key) {
            Some(tab) => {
                patch.apply(tab);
                true
            }
            None => false,
        }
    }

    pub fn set_tab_loading(&mut self, key: &str, loading: bool) -> bool {
        self.update_tab(
            key,
            &TabPatch {
                loading: Some(loading),
                ..TabPatch::default()
            },
        )
    }

    pub fn set_tab_error(&mut self, key: &str, error: bool) -> bool {
        self.update_tab(
            key,
            &TabPatch {
                error: Some(error),
                ..TabPatch::default()
            },
        )
    }

    /// Key of the home tab: the generated key of `/`.
    pub fn home_key() -> String {
        generate_key("/", &RouteParams::new(), &RouteParams::new())
    }

    /// Inserts the home tab at the front unless one exists, and activates it
    /// when nothing is active.
    pub fn init_home_tab(&mut self) {
        if self.home_tab().is_none() {
            let home = TabItem {
                key: Self::home_key(),
                title: self.options.home_title.clone(),
                path: "/".to_string(),
                icon: Some(self.options.home_icon.clone()),
                closable: false,
                is_home: true,
                ..TabItem::default()
            };
            self.tabs.insert(0, home);
        }
        if self.active_tab().is_none() {
            self.active_key = self.home_tab().map(|t| t.key.clone());
        }
    }

    pub fn reset_tabs(&mut self) {
        self.tabs.clear();
        self.active_key = None;
    }

    /// Replaces the collection wholesale. Used by session restore, which
    /// has already validated `tabs`.
    pub(crate) fn replace(&mut self, tabs: Vec<TabItem>, active_key: Option<String>) {
        self.tabs = tabs;
        self.active_key = active_key;
    }
}
