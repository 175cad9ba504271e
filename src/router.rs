use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::Element;

use crate::dom;
use crate::view::Mountable;

/// Fallback key consulted when no exact match exists.
const NOT_FOUND_PATH: &str = "/404";

/// A path-to-view binding: the page title shown while the route is active,
/// and the factory constructing a fresh view for every visit.
pub struct Route {
    pub title: String,
    pub create: Box<dyn Fn() -> Box<dyn Mountable>>,
}

impl Route {
    pub fn new<F>(title: impl Into<String>, create: F) -> Self
    where
        F: 'static + Fn() -> Box<dyn Mountable>,
    {
        Self {
            title: title.into(),
            create: Box::new(create),
        }
    }
}

/// Exact-path route table. Owned by the application bootstrap; the router
/// only reads it.
pub type RouteMap = HashMap<String, Route>;

/// Invoked with the raw path after every successful render, so collaborators
/// (eg the navbar) can sync their active state.
pub type RouteChangeFn = Box<dyn Fn(&str)>;

/// Exact string match against the table, falling back to the `/404` entry.
fn resolve<'r>(routes: &'r RouteMap, path: &str) -> Option<&'r Route> {
    routes.get(path).or_else(|| routes.get(NOT_FOUND_PATH))
}

/// Keeps exactly one view mounted into a single outlet element, synchronized
/// with the browser's navigable path.
pub struct Router {
    outlet: Element,
    routes: RouteMap,
    app_title: String,
    on_route_change: Option<RouteChangeFn>,

    /// The currently mounted view, if any. Replaced on every navigation.
    current: RefCell<Option<Box<dyn Mountable>>>,

    /// The live `popstate` subscription between `start` and `stop`.
    pop_listener: RefCell<Option<Closure<dyn FnMut()>>>,

    /// Weak self-reference handed to the `popstate` closure, placed here
    /// once the shared handle exists.
    self_ref: RefCell<Weak<Router>>,
}

impl Router {
    pub fn new(
        outlet: Element,
        routes: RouteMap,
        app_title: impl Into<String>,
        on_route_change: Option<RouteChangeFn>,
    ) -> Rc<Self> {
        let router = Rc::new(Self {
            outlet,
            routes,
            app_title: app_title.into(),
            on_route_change,
            current: RefCell::new(None),
            pop_listener: RefCell::new(None),
            self_ref: RefCell::new(Weak::new()),
        });

        *router.self_ref.borrow_mut() = Rc::downgrade(&router);

        router
    }

    /// Subscribe to history navigation and render the current path.
    pub fn start(&self) {
        let listener = Closure::<dyn FnMut()>::new({
            let router = self.self_ref.borrow().clone();

            move || {
                if let Some(router) = router.upgrade() {
                    router.render_current();
                }
            }
        });

        dom::window()
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .expect("popstate listener to attach");
        *self.pop_listener.borrow_mut() = Some(listener);

        self.render_current();
    }

    /// Unsubscribe from history navigation and destroy the current view.
    pub fn stop(&self) {
        if let Some(listener) = self.pop_listener.borrow_mut().take() {
            let _ = dom::window()
                .remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
        }

        if let Some(current) = self.current.borrow_mut().take() {
            current.destroy();
        }
    }

    /// Push a history entry for `path` (when it differs from the current
    /// one) and render. Navigating to the active path still re-renders, so
    /// clicking a nav link for the current page refreshes the view.
    pub fn navigate(&self, path: &str) {
        let window = dom::window();
        let current_path = window.location().pathname().unwrap_or_default();

        if current_path != path {
            window
                .history()
                .expect("history to be available")
                .push_state_with_url(&JsValue::NULL, "", Some(path))
                .expect("history entry to push");
        }

        self.render_current();
    }

    /// Resolve the current path and swap the mounted view: destroy the
    /// previous one, clear the outlet, construct and mount the replacement.
    fn render_current(&self) {
        let path = dom::window()
            .location()
            .pathname()
            .ok()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| "/".to_string());

        let Some(route) = resolve(&self.routes, &path) else {
            // No match and no fallback: clear the outlet and carry on.
            if let Some(previous) = self.current.borrow_mut().take() {
                previous.destroy();
            }
            dom::replace_children(&self.outlet, None);
            return;
        };

        dom::document().set_title(&format!("{} - {}", self.app_title, route.title));

        if let Some(previous) = self.current.borrow_mut().take() {
            previous.destroy();
        }
        dom::replace_children(&self.outlet, None);

        let view = (route.create)();
        view.mount(&self.outlet);
        *self.current.borrow_mut() = Some(view);

        if let Some(on_route_change) = &self.on_route_change {
            on_route_change(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use web_sys::Element;

    use super::{resolve, Route, RouteMap};
    use crate::view::Mountable;

    struct Inert;

    impl Mountable for Inert {
        fn mount(&self, _parent: &Element) {}
        fn destroy(&self) {}
    }

    fn table() -> RouteMap {
        HashMap::from([
            (
                "/".to_string(),
                Route::new("Home", || Box::new(Inert) as Box<dyn Mountable>),
            ),
            (
                "/cart".to_string(),
                Route::new("Cart", || Box::new(Inert) as Box<dyn Mountable>),
            ),
            (
                "/404".to_string(),
                Route::new("Not found", || Box::new(Inert) as Box<dyn Mountable>),
            ),
        ])
    }

    #[test]
    fn exact_match_wins() {
        let routes = table();
        assert_eq!(resolve(&routes, "/cart").unwrap().title, "Cart");
    }

    #[test]
    fn unknown_paths_fall_back_to_not_found() {
        let routes = table();
        assert_eq!(resolve(&routes, "/nope").unwrap().title, "Not found");
    }

    #[test]
    fn no_fallback_means_no_route() {
        let mut routes = table();
        routes.remove("/404");
        assert!(resolve(&routes, "/nope").is_none());
    }
}
