//! Application context.
//!
//! One [`AppContext`] per running console owns the storage, the notifier,
//! the tab controller and the theme preference. Consumers get it passed in;
//! nothing lives in module-level state.

use std::rc::Rc;

use crate::notify::Notifier;
use crate::storage::KeyValueStorage;
use crate::tabs::{TabController, TabManager, TabOptions};
use crate::theme::ThemeManager;

pub struct AppContext {
    storage: Box<dyn KeyValueStorage>,
    notifier: Rc<dyn Notifier>,
    tabs: TabController,
    theme: ThemeManager,
    user: Option<String>,
    initialized: bool,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("tabs", &self.tabs)
            .field("theme", &self.theme)
            .field("user", &self.user)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn new(storage: Box<dyn KeyValueStorage>, notifier: Rc<dyn Notifier>, options: TabOptions) -> Self {
        let tabs = TabController::new(TabManager::new(options), Rc::clone(&notifier));
        Self {
            storage,
            notifier,
            tabs,
            theme: ThemeManager::new(),
            user: None,
            initialized: false,
        }
    }

    /// Scopes the tab session to `user`.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Restores the tab session and ensures the home tab. Runs once; later
    /// calls do nothing until [`dispose`](Self::dispose).
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let restored = self.tabs.restore_session(&*self.storage, self.user.as_deref());
        self.tabs.manager_mut().init_home_tab();
        log::info!(
            "console context ready ({} tabs, session {})",
            self.tabs.manager().tabs_count(),
            if restored { "restored" } else { "new" }
        );
        self.initialized = true;
    }

    /// Persists the tab session. Does nothing unless initialized.
    pub fn dispose(&mut self) {
        if !self.initialized {
            return;
        }
        self.tabs.save_session(&mut *self.storage, self.user.as_deref());
        self.initialized = false;
        log::info!("console context disposed");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        &*self.storage
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStorage {
        &mut *self.storage
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(&self.notifier)
    }

    pub fn tabs(&self) -> &TabController {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabController {
        &mut self.tabs
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeManager {
        &mut self.theme
    }

    /// Saves the tab session now, e.g. after a tab operation.
    pub fn save_session(&mut self) -> bool {
        self.tabs.save_session(&mut *self.storage, self.user.as_deref())
    }
}
