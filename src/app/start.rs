use std::rc::Rc;

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use super::routes::routes;
use crate::components::Navbar;
use crate::content;
use crate::dom;
use crate::lazy_media::LazyMedia;
use crate::router::Router;
use crate::view::Mountable;

/// Wire the chrome, router, and link interception into the `#app` root.
/// A missing root is a deployment error and aborts setup.
pub fn start() -> Result<(), JsValue> {
    let document = dom::document();
    let app: HtmlElement = document
        .query_selector("#app")?
        .ok_or_else(|| JsValue::from_str("app root not found"))?
        .dyn_into()?;

    let navbar = Navbar::new();
    navbar.mount(&app);

    let outlet: Element = document.create_element("main")?;
    outlet.set_class_name("page");
    app.append_child(&outlet)?;

    let lazy_media = Rc::new(LazyMedia::new());
    // The navbar's gear cards carry deferred backgrounds.
    lazy_media.scan(None);

    let router = Router::new(
        outlet.clone(),
        routes(),
        content::APP_TITLE,
        Some(Box::new({
            let navbar = Rc::clone(&navbar);
            let lazy_media = Rc::clone(&lazy_media);
            let outlet = outlet.clone();

            move |path: &str| {
                navbar.set_current_path(path);
                lazy_media.scan(Some(&outlet));
            }
        })),
    );

    intercept_links(&app, &router);

    router.start();

    Ok(())
}

/// Turn plain left-clicks on in-app links into router navigations instead of
/// full page loads. Modified clicks, external targets, and protocol-relative
/// URLs keep their default behavior.
fn intercept_links(app: &HtmlElement, router: &Rc<Router>) {
    let listener = Closure::<dyn FnMut(Event)>::new({
        let router = Rc::clone(router);

        move |event: Event| {
            let Some(link) = internal_link(&event) else {
                return;
            };
            let Some(href) = link.get_attribute("href") else {
                return;
            };

            event.prevent_default();
            router.navigate(&href);
        }
    });

    app.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .expect("click listener to attach");

    // The app shell lives for the whole page; hand the closure to the JS GC.
    listener.forget();
}

fn is_plain_left_click(event: &MouseEvent) -> bool {
    event.button() == 0
        && !event.meta_key()
        && !event.ctrl_key()
        && !event.shift_key()
        && !event.alt_key()
}

/// Paths within this app: absolute, but not protocol-relative.
fn is_internal_href(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// The `<a>` this click should route through, if any.
fn internal_link(event: &Event) -> Option<Element> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    if !is_plain_left_click(mouse) {
        return None;
    }

    let target = event.target()?.dyn_into::<Element>().ok()?;
    let link = target.closest("a[href]").ok()??;

    if matches!(link.get_attribute("target"), Some(target) if !target.is_empty() && target != "_self")
    {
        return None;
    }

    if !is_internal_href(&link.get_attribute("href")?) {
        return None;
    }

    Some(link)
}
