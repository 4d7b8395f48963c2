//! Tab operations as the UI drives them: route changes come in, navigation
//! requests and advisory notices go out.

use std::rc::Rc;

use crate::notify::{NoticeKind, Notifier};
use crate::storage::KeyValueStorage;

use super::item::{NavigationRequest, RouteLocation, TabItem};
use super::manager::TabManager;
use super::store;

pub struct TabController {
    manager: TabManager,
    notifier: Rc<dyn Notifier>,
}

impl std::fmt::Debug for TabController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabController")
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl TabController {
    pub fn new(manager: TabManager, notifier: Rc<dyn Notifier>) -> Self {
        Self { manager, notifier }
    }

    pub fn manager(&self) -> &TabManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut TabManager {
        &mut self.manager
    }

    fn active_navigation(&self) -> Option<NavigationRequest> {
        self.manager.active_tab().map(TabItem::navigation)
    }

    /// Route guard: runs on every navigation.
    ///
    /// The login route and hidden routes never get a tab. Otherwise the home
    /// tab is ensured and the route's tab opened or re-activated.
    ///
    /// # Returns
    /// `true` if the route now has the active tab.
    pub fn on_route_change(&mut self, route: &RouteLocation) -> bool {
        if route.name.as_deref() == Some(self.manager.options().login_route.as_str()) {
            return false;
        }
        self.manager.init_home_tab();
        if route.meta.hide_in_tabs {
            return false;
        }
        self.open(route)
    }

    /// Opens the tab for `route`, telling the user when the limit is hit.
    pub fn open(&mut self, route: &RouteLocation) -> bool {
        let added = self.manager.add_tab(route);
        if !added {
            let message = format!(
                "Cannot open more tabs: the limit of {} has been reached",
                self.manager.options().max_tabs
            );
            self.notifier.notify(NoticeKind::Warn, &message);
        }
        added
    }

    /// Activates `key` and returns where to navigate.
    pub fn activate(&mut self, key: &str) -> Option<NavigationRequest> {
        if !self.manager.set_active(key) {
            self.notifier.notify(NoticeKind::Error, "Tab does not exist");
            return None;
        }
        self.active_navigation()
    }

    /// Closes `key`. On success returns the navigation to the tab that is
    /// active afterwards.
    pub fn close(&mut self, key: &str) -> Option<NavigationRequest> {
        let Some(tab) = self.manager.get(key) else {
            self.notifier.notify(NoticeKind::Error, "Tab does not exist");
            return None;
        };
        if !tab.closable {
            self.notifier.notify(NoticeKind::Warn, "This tab cannot be closed");
            return None;
        }
        if self.manager.remove_tab(key) {
            self.active_navigation()
        } else {
            None
        }
    }

    pub fn close_others(&mut self, key: &str) -> Option<NavigationRequest> {
        if self.manager.close_others(key) {
            self.active_navigation()
        } else {
            None
        }
    }

    pub fn close_all(&mut self) -> Option<NavigationRequest> {
        self.manager.close_all();
        self.active_navigation()
    }

    /// Navigation is only returned when the active tab changed.
    pub fn close_left(&mut self, key: &str) -> Option<NavigationRequest> {
        let before = self.manager.active_key().map(str::to_string);
        if !self.manager.close_left(key) {
            return None;
        }
        self.navigation_if_changed(before)
    }

    /// Navigation is only returned when the active tab changed.
    pub fn close_right(&mut self, key: &str) -> Option<NavigationRequest> {
        let before = self.manager.active_key().map(str::to_string);
        if !self.manager.close_right(key) {
            return None;
        }
        self.navigation_if_changed(before)
    }

    fn navigation_if_changed(&self, before: Option<String>) -> Option<NavigationRequest> {
        if self.manager.active_key() == before.as_deref() {
            None
        } else {
            self.active_navigation()
        }
    }

    /// Marks `key` as reloading; the host clears the flag when done.
    pub fn refresh(&mut self, key: &str) -> bool {
        self.manager.set_tab_error(key, false);
        self.manager.set_tab_loading(key, true)
    }

    pub fn save_session(&self, storage: &mut dyn KeyValueStorage, user: Option<&str>) -> bool {
        let key = self.manager.options().storage_key_for(user);
        store::save_session(&self.manager, storage, &key)
    }

    pub fn restore_session(&mut self, storage: &dyn KeyValueStorage, user: Option<&str>) -> bool {
        let key = self.manager.options().storage_key_for(user);
        store::restore_session(&mut self.manager, storage, &key)
    }

    pub fn clear_session(&mut self, storage: &mut dyn KeyValueStorage, user: Option<&str>) {
        let key = self.manager.options().storage_key_for(user);
        store::clear_session(storage, &key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeBuffer;
    use crate::tabs::item::TabOptions;

    fn controller(max_tabs: usize) -> (TabController, Rc<NoticeBuffer>) {
        let notices = Rc::new(NoticeBuffer::new());
        let manager = TabManager::new(TabOptions {
            max_tabs,
            ..TabOptions::default()
        });
        (TabController::new(manager, notices.clone()), notices)
    }

    #[test]
    fn test_login_route_is_ignored() {
        let (mut tabs, _) = controller(10);
        assert!(!tabs.on_route_change(&RouteLocation::new("/login").name("Login")));
        assert!(tabs.manager().tabs().is_empty());
    }

    #[test]
    fn test_route_change_ensures_home() {
        let (mut tabs, _) = controller(10);
        assert!(tabs.on_route_change(&RouteLocation::new("/menu").title("Menus")));
        let keys: Vec<_> = tabs.manager().tabs().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["/", "/menu"]);
        assert_eq!(tabs.manager().active_key(), Some("/menu"));

        assert!(!tabs.on_route_change(&RouteLocation::new("/secret").hidden()));
        assert_eq!(tabs.manager().tabs_count(), 2);
    }

    #[test]
    fn test_limit_notice() {
        let (mut tabs, notices) = controller(2);
        tabs.on_route_change(&RouteLocation::new("/a"));
        assert!(!tabs.on_route_change(&RouteLocation::new("/b")));
        let delivered = notices.drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NoticeKind::Warn);
    }

    #[test]
    fn test_close_home_is_refused_with_notice() {
        let (mut tabs, notices) = controller(10);
        tabs.on_route_change(&RouteLocation::new("/a"));
        assert_eq!(tabs.close("/"), None);
        assert_eq!(tabs.close("/nope"), None);
        assert_eq!(notices.len(), 2);
        assert_eq!(tabs.manager().tabs_count(), 2);
    }

    #[test]
    fn test_close_returns_navigation_to_new_active() {
        let (mut tabs, _) = controller(10);
        tabs.on_route_change(&RouteLocation::new("/a"));
        tabs.on_route_change(&RouteLocation::new("/b").param("id", "4"));
        tabs.activate("/a");

        let nav = tabs.close("/a").unwrap();
        assert_eq!(nav.path, "/b");
        assert_eq!(nav.params.get("id").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_close_left_navigates_only_on_change() {
        let (mut tabs, _) = controller(10);
        for path in ["/a", "/b", "/c"] {
            tabs.on_route_change(&RouteLocation::new(path));
        }
        // Active is /c, which survives
        assert_eq!(tabs.close_left("/b"), None);
        tabs.activate("/b");
        let nav = tabs.close_right("/").unwrap();
        assert_eq!(nav.path, "/");
    }

    #[test]
    fn test_refresh_sets_loading() {
        let (mut tabs, _) = controller(10);
        tabs.on_route_change(&RouteLocation::new("/a"));
        tabs.manager_mut().set_tab_error("/a", true);
        assert!(tabs.refresh("/a"));
        let tab = tabs.manager().get("/a").unwrap();
        assert!(tab.loading && !tab.error);
    }
}
