//! Window preference persistence.
//!
//! Theme and layout preferences live in eframe's own storage as JSON
//! strings, separate from the console state store the engine writes to.

use rconsole::ThemePreference;
use serde::{Deserialize, Serialize};

use super::app_state::{AppState, LayoutState};

pub const THEME_KEY: &str = "theme_preference";
pub const LAYOUT_KEY: &str = "console_layout";

/// Coordinates preference persistence over eframe storage.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting with a fallback for missing or malformed values.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    /// * `default` - The value to use if loading fails
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|s| s.get_string(key)) else {
            return default;
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("ignoring malformed setting '{}': {}", key, e);
                default
            }
        }
    }

    /// Serializes and stores a setting.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => log::warn!("cannot serialize setting '{}': {}", key, e),
        }
    }

    /// Theme and layout preferences saved by the previous run.
    pub fn load_preferences(storage: Option<&dyn eframe::Storage>) -> (ThemePreference, LayoutState) {
        (
            Self::load_setting_or(storage, THEME_KEY, ThemePreference::default()),
            Self::load_setting_or(storage, LAYOUT_KEY, LayoutState::default()),
        )
    }

    pub fn save_preferences(storage: &mut dyn eframe::Storage, state: &AppState) {
        Self::save_setting(storage, THEME_KEY, &state.context.theme().preference());
        Self::save_setting(storage, LAYOUT_KEY, &state.layout);
        storage.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use rconsole::Primary;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_theme_preference_round_trip() {
        let mut storage = MockStorage::new();
        let pref = ThemePreference {
            dark_theme: true,
            primary: Primary::Violet,
        };
        SettingsCoordinator::save_setting(&mut storage, THEME_KEY, &pref);

        let (loaded, layout) = SettingsCoordinator::load_preferences(Some(&storage));
        assert_eq!(loaded, pref);
        assert_eq!(layout, LayoutState::default());
    }

    #[test]
    fn test_malformed_setting_falls_back() {
        let mut storage = MockStorage::new();
        storage.set_string(LAYOUT_KEY, "{not json".to_string());
        let layout = SettingsCoordinator::load_setting_or(Some(&storage), LAYOUT_KEY, LayoutState::default());
        assert_eq!(layout, LayoutState::default());
    }

    #[test]
    fn test_no_storage_uses_default() {
        let (pref, _) = SettingsCoordinator::load_preferences(None);
        assert_eq!(pref, ThemePreference::default());
    }
}
