//! Tab session persistence.
//!
//! The session is stored as `{tabs, activeTabKey, timestamp}` under the tab
//! storage key. Restoring validates each tab on its own, so one corrupt
//! entry does not lose the rest of the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::storage::{save_json, try_load_json, KeyValueStorage};

use super::item::TabItem;
use super::manager::TabManager;

/// Stored shape of a tab session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabSession {
    pub tabs: Vec<TabItem>,
    pub active_tab_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Session as read from storage, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTabSession {
    tabs: Vec<Value>,
    active_tab_key: Option<String>,
}

impl TabSession {
    pub fn capture(manager: &TabManager, now_ms: i64) -> Self {
        Self {
            tabs: manager.tabs().to_vec(),
            active_tab_key: manager.active_key().unwrap_or_default().to_string(),
            timestamp: Some(now_ms),
        }
    }
}

/// Writes the session to `key`.
pub fn save_session(manager: &TabManager, storage: &mut dyn KeyValueStorage, key: &str) -> bool {
    let session = TabSession::capture(manager, chrono::Utc::now().timestamp_millis());
    match save_json(storage, key, &session) {
        Ok(()) => {
            log::debug!("saved {} tabs to '{}'", session.tabs.len(), key);
            true
        }
        Err(e) => {
            log::warn!("failed to save tab session '{}': {:#}", key, e);
            false
        }
    }
}

/// Replaces the manager's tabs with the session stored under `key`.
///
/// Invalid or duplicate tabs are dropped, transient loading/error flags are
/// cleared, at most one home tab survives and the list is cut to
/// `max_tabs` (one less when no home tab survives, leaving its slot free).
/// A stale active key falls back to the home tab, then to the first tab.
///
/// # Returns
/// `true` if at least one tab was restored; otherwise the manager is left
/// untouched.
pub fn restore_session(manager: &mut TabManager, storage: &dyn KeyValueStorage, key: &str) -> bool {
    let Some(raw) = try_load_json::<RawTabSession>(storage, key) else {
        return false;
    };

    let mut seen = HashSet::new();
    let mut home_seen = false;
    let mut tabs = Vec::new();
    for value in raw.tabs {
        let mut tab: TabItem = match serde_json::from_value(value) {
            Ok(tab) => tab,
            Err(e) => {
                log::warn!("dropping unreadable tab in '{}': {}", key, e);
                continue;
            }
        };
        if !tab.is_valid() || !seen.insert(tab.key.clone()) {
            continue;
        }
        tab.loading = false;
        tab.error = false;
        if tab.is_home {
            if home_seen {
                tab.is_home = false;
            } else {
                home_seen = true;
                tab.closable = false;
            }
        }
        tabs.push(tab);
    }
    let max_tabs = manager.options().max_tabs;
    tabs.truncate(max_tabs);
    // Leave room for the home tab that init_home_tab inserts afterwards
    if !tabs.iter().any(|t| t.is_home) {
        tabs.truncate(max_tabs.saturating_sub(1));
    }

    if tabs.is_empty() {
        return false;
    }

    let active = raw
        .active_tab_key
        .filter(|k| tabs.iter().any(|t| &t.key == k))
        .or_else(|| tabs.iter().find(|t| t.is_home).map(|t| t.key.clone()))
        .or_else(|| tabs.first().map(|t| t.key.clone()));

    log::debug!("restored {} tabs from '{}'", tabs.len(), key);
    manager.replace(tabs, active);
    true
}

/// Removes the stored session.
pub fn clear_session(storage: &mut dyn KeyValueStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        log::warn!("failed to clear tab session '{}': {:#}", key, e);
    }
}
