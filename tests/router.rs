#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use nocturne::dom;
use nocturne::router::{Route, RouteMap, Router};
use nocturne::template::Template;
use nocturne::view::{Mountable, View, ViewCore, ViewOptions};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

/// Page view that reports its destruction.
struct Page {
    core: ViewCore,
    destroyed: Rc<Cell<bool>>,
}

impl Page {
    fn new(class: &str, destroyed: Rc<Cell<bool>>) -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("section", ViewOptions::new().class(class)),
            destroyed,
        })
    }
}

impl View for Page {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().markup("<h1>page</h1>")
    }

    fn on_mount(self: Rc<Self>) {
        let destroyed = Rc::clone(&self.destroyed);
        self.core().cleanup().add(move || destroyed.set(true));
    }
}

struct PageProbe {
    constructions: Rc<Cell<u32>>,
    last_destroyed: Rc<Cell<bool>>,
}

/// Route whose factory counts constructions and exposes the destruction flag
/// of the most recently constructed view.
fn probed_route(title: &str, class: &'static str) -> (Route, PageProbe) {
    let constructions = Rc::new(Cell::new(0));
    let last_destroyed = Rc::new(Cell::new(false));

    let route = Route::new(title, {
        let constructions = Rc::clone(&constructions);
        let last_destroyed = Rc::clone(&last_destroyed);

        move || {
            constructions.set(constructions.get() + 1);
            last_destroyed.set(false);
            Box::new(Page::new(class, Rc::clone(&last_destroyed))) as Box<dyn Mountable>
        }
    });

    (
        route,
        PageProbe {
            constructions,
            last_destroyed,
        },
    )
}

fn outlet() -> Element {
    dom::document().create_element("div").unwrap()
}

#[wasm_bindgen_test]
fn unmatched_paths_fall_back_to_the_not_found_route() {
    let (home, _) = probed_route("Home", "page-home");
    let (cart, _) = probed_route("Cart", "page-cart");
    let (not_found, not_found_probe) = probed_route("Not found", "page-not-found");

    let routes: RouteMap = HashMap::from([
        ("/".to_string(), home),
        ("/cart".to_string(), cart),
        ("/404".to_string(), not_found),
    ]);

    let outlet = outlet();
    let router = Router::new(outlet.clone(), routes, "Test App", None);

    router.navigate("/nope");

    assert_eq!(not_found_probe.constructions.get(), 1);
    assert_eq!(outlet.child_element_count(), 1);
    assert!(outlet
        .first_element_child()
        .unwrap()
        .class_list()
        .contains("page-not-found"));
    assert_eq!(dom::document().title(), "Test App - Not found");
}

#[wasm_bindgen_test]
fn navigating_to_the_active_path_forces_a_fresh_mount() {
    let (cart, cart_probe) = probed_route("Cart", "page-cart");
    let routes: RouteMap = HashMap::from([("/cart".to_string(), cart)]);

    let outlet = outlet();
    let router = Router::new(outlet.clone(), routes, "Test App", None);

    router.navigate("/cart");
    assert_eq!(cart_probe.constructions.get(), 1);

    router.navigate("/cart");
    assert_eq!(cart_probe.constructions.get(), 2);
    assert_eq!(outlet.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn navigation_destroys_the_previous_view() {
    let (home, home_probe) = probed_route("Home", "page-home");
    let (cart, _) = probed_route("Cart", "page-cart");

    let routes: RouteMap = HashMap::from([
        ("/".to_string(), home),
        ("/cart".to_string(), cart),
    ]);

    let outlet = outlet();
    let router = Router::new(outlet.clone(), routes, "Test App", None);

    router.navigate("/");
    assert!(!home_probe.last_destroyed.get());

    router.navigate("/cart");
    assert!(home_probe.last_destroyed.get());
    assert!(outlet
        .first_element_child()
        .unwrap()
        .class_list()
        .contains("page-cart"));
}

#[wasm_bindgen_test]
fn no_match_and_no_fallback_clears_the_outlet() {
    let (home, home_probe) = probed_route("Home", "page-home");
    let routes: RouteMap = HashMap::from([("/".to_string(), home)]);

    let outlet = outlet();
    let router = Router::new(outlet.clone(), routes, "Test App", None);

    router.navigate("/");
    assert_eq!(home_probe.constructions.get(), 1);

    router.navigate("/nope");
    assert_eq!(outlet.child_element_count(), 0);
    assert!(home_probe.last_destroyed.get());
}

#[wasm_bindgen_test]
fn route_change_callback_receives_the_raw_path() {
    let (not_found, _) = probed_route("Not found", "page-not-found");
    let routes: RouteMap = HashMap::from([("/404".to_string(), not_found)]);

    let seen = Rc::new(Cell::new(false));
    let outlet = outlet();
    let router = Router::new(
        outlet,
        routes,
        "Test App",
        Some(Box::new({
            let seen = Rc::clone(&seen);
            move |path: &str| {
                // The raw path, not the `/404` fallback key.
                assert_eq!(path, "/missing");
                seen.set(true);
            }
        })),
    );

    router.navigate("/missing");
    assert!(seen.get());
}

#[wasm_bindgen_test]
fn stop_destroys_the_current_view() {
    let (home, home_probe) = probed_route("Home", "page-home");
    let routes: RouteMap = HashMap::from([("/".to_string(), home)]);

    let outlet = outlet();
    let router = Router::new(outlet, routes, "Test App", None);

    router.start();
    router.navigate("/");
    router.stop();

    assert!(home_probe.last_destroyed.get());
}
