use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Element, Event, FocusEvent, Url};
use wasm_bindgen_futures::spawn_local;

use crate::components::{Button, ButtonConfig, ButtonVariant, MediaCard, MediaCardConfig, TextAnchor};
use crate::content;
use crate::dom;
use crate::template::{Template, Value};
use crate::view::{View, ViewCore, ViewExt, ViewOptions};

const SCROLL_THRESHOLD_PX: f64 = 12.0;
const MIN_SCROLL_DELTA_PX: f64 = 6.0;
const MENU_CLOSE_DELAY_MS: i32 = 100;
const ACTIVE_PAGE_LINK_SELECTOR: &str = ".nav-menu-trigger, .nav-link, .nav-mega-link";

/// Identifier for one of the mega menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuName {
    Umbra,
    Aurora,
    Gear,
}

impl MenuName {
    fn as_str(self) -> &'static str {
        match self {
            MenuName::Umbra => "umbra",
            MenuName::Aurora => "aurora",
            MenuName::Gear => "gear",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "umbra" => Some(MenuName::Umbra),
            "aurora" => Some(MenuName::Aurora),
            "gear" => Some(MenuName::Gear),
            _ => None,
        }
    }
}

struct PrimaryNavItem {
    menu: MenuName,
    label: &'static str,
    href: &'static str,
}

const PRIMARY_NAV_ITEMS: [PrimaryNavItem; 3] = [
    PrimaryNavItem {
        menu: MenuName::Umbra,
        label: "UMBRA",
        href: "/umbra",
    },
    PrimaryNavItem {
        menu: MenuName::Aurora,
        label: "AURORA",
        href: "/aurora",
    },
    PrimaryNavItem {
        menu: MenuName::Gear,
        label: "GEAR",
        href: "/gear",
    },
];

struct SecondaryNavItem {
    label: &'static str,
    href: &'static str,
    variant: ButtonVariant,
    class_name: Option<&'static str>,
}

const SECONDARY_NAV_ITEMS: [SecondaryNavItem; 2] = [
    SecondaryNavItem {
        label: "Demo Drive",
        href: "/demo",
        variant: ButtonVariant::Cta,
        class_name: Some("nav-link-demo-drive"),
    },
    SecondaryNavItem {
        label: "Sign In",
        href: "/signin",
        variant: ButtonVariant::Text,
        class_name: None,
    },
];

/// Showcase panel for one car model.
struct ModelPanel {
    menu: MenuName,
    title: &'static str,
    href: &'static str,
    image: &'static str,
    starting_price: &'static str,
}

const MODEL_PANELS: [ModelPanel; 2] = [
    ModelPanel {
        menu: MenuName::Umbra,
        title: "Umbra",
        href: "/umbra",
        image: "/assets/umbra/umbra_transparent.webp",
        starting_price: "$82,990",
    },
    ModelPanel {
        menu: MenuName::Aurora,
        title: "Aurora",
        href: "/aurora",
        image: content::PLACEHOLDER_IMAGE,
        starting_price: "$45,000",
    },
];

fn gear_cards() -> Vec<MediaCardConfig> {
    vec![
        MediaCardConfig {
            label: "Autonomous".to_string(),
            href: "/gear/autonomous".to_string(),
            class_name: Some("nav-gear-card-autonomous".to_string()),
            background_image: content::PLACEHOLDER_IMAGE.to_string(),
            defer_background_load: true,
            background_position: Some("right 20% center".to_string()),
            text_anchor: TextAnchor::TopCenter,
            text_size: Some("3rem".to_string()),
            text_weight: Some("bold".to_string()),
            with_overlay: false,
            ..Default::default()
        },
        MediaCardConfig {
            label: "Services".to_string(),
            href: "/gear/services".to_string(),
            class_name: Some("nav-gear-card-services".to_string()),
            background_image: content::PLACEHOLDER_IMAGE.to_string(),
            defer_background_load: true,
            background_position: Some("left 20% center".to_string()),
            text_weight: Some("bold".to_string()),
            with_overlay: false,
            ..Default::default()
        },
        MediaCardConfig {
            label: "Chargers".to_string(),
            href: "/gear/chargers".to_string(),
            class_name: Some("nav-gear-card-chargers".to_string()),
            background_image: content::PLACEHOLDER_IMAGE.to_string(),
            defer_background_load: true,
            text_weight: Some("bold".to_string()),
            with_overlay: false,
            ..Default::default()
        },
    ]
}

/// Scroll- and menu-derived UI state. Mutated only through the transition
/// methods on [`Navbar`], each of which re-derives the dependent DOM flags.
struct NavState {
    scrolled: bool,
    hidden: bool,
    last_scroll_y: f64,
    active_menu: Option<MenuName>,
    current_path: String,
    close_timer: Option<i32>,
}

/// Global top navigation: scroll-aware shell styling with hide/show
/// behavior, hover/focus driven mega menus with delayed close, and
/// active-link highlighting synced from the router.
pub struct Navbar {
    core: ViewCore,
    state: RefCell<NavState>,
}

impl Navbar {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("nav", ViewOptions::new().class("nav-shell")),
            state: RefCell::new(NavState {
                scrolled: false,
                hidden: false,
                last_scroll_y: 0.0,
                active_menu: None,
                current_path: String::new(),
                close_timer: None,
            }),
        })
    }

    /// Record the routed path and re-derive per-link active markers.
    pub fn set_current_path(&self, path: &str) {
        let normalized = to_internal_path(path).unwrap_or_else(|| "/".to_string());

        {
            let mut state = self.state.borrow_mut();
            if state.current_path == normalized {
                return;
            }
            state.current_path = normalized;
        }

        self.sync_active_page_links();
    }

    fn handle_scroll(&self) {
        self.sync_scrolled_state();
        self.sync_visibility_state();
    }

    /// Toggle the `is-scrolled` shell class after crossing the threshold.
    fn sync_scrolled_state(&self) {
        let scrolled = scroll_y() > SCROLL_THRESHOLD_PX;

        {
            let mut state = self.state.borrow_mut();
            if state.scrolled == scrolled {
                return;
            }
            state.scrolled = scrolled;
        }

        self.core
            .element()
            .class_list()
            .toggle_with_force("is-scrolled", scrolled)
            .expect("scrolled class to toggle");
    }

    /// Hide while scrolling down, reveal while scrolling up.
    fn sync_visibility_state(&self) {
        let current = scroll_y();
        let delta = {
            let mut state = self.state.borrow_mut();
            let delta = current - state.last_scroll_y;
            state.last_scroll_y = current;
            delta
        };

        // Near the top of the page the shell is always visible.
        if current <= SCROLL_THRESHOLD_PX {
            self.set_hidden(false);
            return;
        }

        // Ignore micro movements to avoid flicker.
        if delta.abs() < MIN_SCROLL_DELTA_PX {
            return;
        }

        self.set_hidden(delta > 0.0);
    }

    fn set_hidden(&self, hidden: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.hidden == hidden {
                return;
            }
            state.hidden = hidden;
        }

        self.core
            .element()
            .class_list()
            .toggle_with_force("is-hidden", hidden)
            .expect("hidden class to toggle");
    }

    /// Reflect the active menu into both state and the root's
    /// `data-active-menu` attribute; CSS shows the matching panel.
    fn set_active_menu(&self, menu: Option<MenuName>) {
        {
            let mut state = self.state.borrow_mut();
            if state.active_menu == menu {
                return;
            }
            state.active_menu = menu;
        }

        match menu {
            Some(menu) => self
                .core
                .element()
                .set_attribute("data-active-menu", menu.as_str())
                .expect("active menu attribute to set"),
            None => {
                let _ = self.core.element().remove_attribute("data-active-menu");
            }
        }
    }

    fn clear_active_menu(&self) {
        self.cancel_menu_close();
        self.set_active_menu(None);
    }

    /// Delay closing so the pointer can travel into the open panel without
    /// the panel disappearing underneath it.
    fn schedule_menu_close(this: &Rc<Self>) {
        this.cancel_menu_close();

        let callback = Closure::once_into_js({
            let nav = Rc::downgrade(this);
            move || {
                if let Some(nav) = nav.upgrade() {
                    nav.state.borrow_mut().close_timer = None;
                    nav.set_active_menu(None);
                }
            }
        });

        let id = dom::window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                MENU_CLOSE_DELAY_MS,
            )
            .expect("close timer to schedule");

        this.state.borrow_mut().close_timer = Some(id);
    }

    fn cancel_menu_close(&self) {
        if let Some(id) = self.state.borrow_mut().close_timer.take() {
            dom::window().clear_timeout_with_handle(id);
        }
    }

    /// Hovering a trigger opens its panel, hovering inside the open panel
    /// keeps it alive, hovering any other nav zone starts the delayed close.
    fn handle_pointer_over(this: &Rc<Self>, event: Event) {
        let Some(target) = target_element(&event) else {
            return;
        };

        if let Ok(Some(trigger)) = target.closest(".nav-item[data-menu]") {
            let Some(menu) = trigger
                .get_attribute("data-menu")
                .as_deref()
                .and_then(MenuName::parse)
            else {
                return;
            };

            this.cancel_menu_close();
            this.set_active_menu(Some(menu));
            return;
        }

        if matches!(target.closest(".nav-mega-stack"), Ok(Some(_))) {
            this.cancel_menu_close();
            return;
        }

        Self::schedule_menu_close(this);
    }

    /// Keyboard path: focusing a trigger opens the same panel as hover.
    fn handle_focus_in(&self, event: Event) {
        let Some(target) = target_element(&event) else {
            return;
        };
        let Ok(Some(trigger)) = target.closest(".nav-item[data-menu]") else {
            return;
        };
        let Some(menu) = trigger
            .get_attribute("data-menu")
            .as_deref()
            .and_then(MenuName::parse)
        else {
            return;
        };

        self.cancel_menu_close();
        self.set_active_menu(Some(menu));
    }

    /// Clicks inside a panel close it only when they land on an actionable
    /// link, not on empty panel space.
    fn handle_menu_click(&self, event: Event) {
        let Some(target) = target_element(&event) else {
            return;
        };
        if !matches!(target.closest(".nav-mega"), Ok(Some(_))) {
            return;
        }
        if !matches!(target.closest("a[href]"), Ok(Some(_))) {
            return;
        }

        self.clear_active_menu();
    }

    /// Close only once focus has truly left the whole nav. The decision is
    /// deferred one microtask so `document.activeElement` already points at
    /// the newly focused node.
    fn handle_focus_out(this: &Rc<Self>, event: Event) {
        if let Some(related) = event
            .dyn_ref::<FocusEvent>()
            .and_then(FocusEvent::related_target)
            .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        {
            if this.core.element().contains(Some(&related)) {
                return;
            }
        }

        let nav = Rc::downgrade(this);
        spawn_local(async move {
            let Some(nav) = nav.upgrade() else { return };

            if let Some(active) = nav.core.document().active_element() {
                if nav.core.element().contains(Some(active.as_ref())) {
                    return;
                }
            }

            // A click on non-focusable panel space moves focus to <body>;
            // keep the panel open while the pointer is still over the nav.
            if nav.core.element().matches(":hover").unwrap_or(false) {
                return;
            }

            nav.clear_active_menu();
        });
    }

    fn sync_active_page_links(&self) {
        let current_path = self.state.borrow().current_path.clone();
        let links = self
            .core
            .element()
            .query_selector_all(ACTIVE_PAGE_LINK_SELECTOR)
            .expect("link selector to parse");

        for index in 0..links.length() {
            let Some(link) = links
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(link_path) = link
                .get_attribute("href")
                .as_deref()
                .and_then(to_internal_path)
            else {
                continue;
            };

            let active = is_path_active(&current_path, &link_path);
            link.class_list()
                .toggle_with_force("is-active-page", active)
                .expect("active class to toggle");

            if active {
                link.set_attribute("aria-current", "page")
                    .expect("aria-current to set");
            } else {
                let _ = link.remove_attribute("aria-current");
            }
        }
    }

    fn model_panel(&self, panel: &ModelPanel) -> Value {
        Value::Node(
            self.tpl(
                Template::new()
                    .markup(format!(
                        "<section class=\"nav-mega\" data-menu=\"{}\" aria-label=\"",
                        panel.menu.as_str()
                    ))
                    .value(panel.title)
                    .markup(" menu\"><div class=\"nav-mega-links\"><p class=\"nav-mega-title\">")
                    .text(panel.title)
                    .markup("</p><ul class=\"nav-mega-list\"><li><a class=\"nav-mega-link\" href=\"")
                    .value(panel.href)
                    .markup("/explore\">Explore</a></li><li><a class=\"nav-mega-link\" href=\"")
                    .value(panel.href)
                    .markup("/buy\">Buy</a></li><li><a class=\"nav-mega-link\" href=\"")
                    .value(panel.href)
                    .markup("/demo\">Demo Drive</a></li></ul></div><a class=\"nav-mega-media\" href=\"")
                    .value(panel.href)
                    .markup("\"><img class=\"nav-mega-image\" src=\"")
                    .value(panel.image)
                    .markup("\" alt=\"")
                    .value(panel.title)
                    .markup(" showcase\" loading=\"lazy\"><div class=\"nav-mega-overlay\" aria-hidden=\"true\"><span class=\"nav-mega-overlay-model\"><span class=\"nav-mega-overlay-model-label\">MODEL</span><span class=\"nav-mega-overlay-model-name\">")
                    .text(panel.title.to_uppercase())
                    .markup("</span></span><span class=\"nav-mega-overlay-price\"><span class=\"nav-mega-overlay-price-label\">Starting at</span><span class=\"nav-mega-overlay-price-value\">")
                    .text(panel.starting_price)
                    .markup("</span></span></div></a></section>"),
            ),
        )
    }
}

impl View for Navbar {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    /// Markup structure: `nav-grid` is the top row (primary triggers,
    /// centered logo, utility links); `nav-mega-stack` holds every mega
    /// panel, with CSS showing the one matching `data-active-menu`.
    fn render(&self) -> Template {
        let primary_items: Vec<Value> = PRIMARY_NAV_ITEMS
            .iter()
            .map(|item| {
                Value::Node(
                    self.tpl(
                        Template::new()
                            .markup(format!(
                                "<li class=\"nav-item\" data-menu=\"{}\">",
                                item.menu.as_str()
                            ))
                            .child(Button::new(ButtonConfig {
                                label: item.label.to_string(),
                                href: item.href.to_string(),
                                variant: ButtonVariant::Text,
                                class_name: Some("nav-menu-trigger".to_string()),
                            }))
                            .markup("</li>"),
                    ),
                )
            })
            .collect();

        let secondary_items: Vec<Value> = SECONDARY_NAV_ITEMS
            .iter()
            .map(|item| {
                Value::Node(
                    self.tpl(
                        Template::new()
                            .markup("<li>")
                            .child(Button::new(ButtonConfig {
                                label: item.label.to_string(),
                                href: item.href.to_string(),
                                variant: item.variant,
                                class_name: item.class_name.map(str::to_string),
                            }))
                            .markup("</li>"),
                    ),
                )
            })
            .collect();

        let model_panels: Vec<Value> = MODEL_PANELS
            .iter()
            .map(|panel| self.model_panel(panel))
            .collect();

        let gear_card_views: Vec<Value> = gear_cards()
            .into_iter()
            .map(|config| Value::Embed(Box::new(MediaCard::new(config))))
            .collect();

        Template::new()
            .markup("<div class=\"nav-inner\"><ul class=\"nav-grid\"><li><ul class=\"nav-links nav-links-primary\">")
            .value(primary_items)
            .markup("</ul></li><li><a class=\"nav-logo\" href=\"/\" aria-label=\"")
            .value(content::APP_TITLE)
            .markup(" home\"><img class=\"nav-logo-image\" src=\"/assets/nav/logo.svg\" alt=\"")
            .value(content::APP_TITLE)
            .markup("\"></a></li><li><ul class=\"nav-links nav-links-end\">")
            .value(secondary_items)
            .markup("</ul></li></ul><div class=\"nav-mega-stack\">")
            .value(model_panels)
            .markup("<section class=\"nav-mega\" data-menu=\"gear\" aria-label=\"Gear menu\"><div class=\"nav-mega-links\"><p class=\"nav-mega-title\">Gear</p><ul class=\"nav-mega-list\"><li><a class=\"nav-mega-link\" href=\"/gear/all\">All</a></li><li><a class=\"nav-mega-link\" href=\"/gear/wheels\">Wheels</a></li><li><a class=\"nav-mega-link\" href=\"/gear/chargers\">Chargers</a></li><li><a class=\"nav-mega-link\" href=\"/gear/services\">Services</a></li></ul></div><div class=\"nav-gear-grid\" aria-label=\"Featured gear cards\">")
            .value(gear_card_views)
            .markup("</div></section></div></div>")
    }

    fn on_mount(self: Rc<Self>) {
        // Sync initial scroll state so the first paint matches the current
        // position.
        self.state.borrow_mut().last_scroll_y = scroll_y();
        self.sync_scrolled_state();

        let cleanup = self.core.cleanup();
        let window = dom::window();
        let element = self.core.element();

        let mut scroll_options = AddEventListenerOptions::new();
        scroll_options.passive(true);
        cleanup.on_with_options(&window, "scroll", &scroll_options, {
            let nav = Rc::downgrade(&self);
            move |_| {
                if let Some(nav) = nav.upgrade() {
                    nav.handle_scroll();
                }
            }
        });

        cleanup.on(element, "pointerover", {
            let nav = Rc::downgrade(&self);
            move |event| {
                if let Some(nav) = nav.upgrade() {
                    Self::handle_pointer_over(&nav, event);
                }
            }
        });

        cleanup.on(element, "focusin", {
            let nav = Rc::downgrade(&self);
            move |event| {
                if let Some(nav) = nav.upgrade() {
                    nav.handle_focus_in(event);
                }
            }
        });

        cleanup.on(element, "click", {
            let nav = Rc::downgrade(&self);
            move |event| {
                if let Some(nav) = nav.upgrade() {
                    nav.handle_menu_click(event);
                }
            }
        });

        cleanup.on(element, "pointerleave", {
            let nav = Rc::downgrade(&self);
            move |_| {
                if let Some(nav) = nav.upgrade() {
                    Self::schedule_menu_close(&nav);
                }
            }
        });

        cleanup.on(element, "focusout", {
            let nav = Rc::downgrade(&self);
            move |event| {
                if let Some(nav) = nav.upgrade() {
                    Self::handle_focus_out(&nav, event);
                }
            }
        });

        // Mark the link matching the initial URL.
        let initial_path = window.location().pathname().unwrap_or_default();
        self.set_current_path(&initial_path);

        // A pending close timer must not outlive the view.
        cleanup.add({
            let nav = Rc::downgrade(&self);
            move || {
                if let Some(nav) = nav.upgrade() {
                    nav.cancel_menu_close();
                }
            }
        });
    }
}

fn scroll_y() -> f64 {
    dom::window().scroll_y().unwrap_or(0.0)
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Resolve `href` to a normalized in-app path, or `None` for external links.
fn to_internal_path(href: &str) -> Option<String> {
    if href.is_empty() {
        return None;
    }

    let origin = dom::window().location().origin().unwrap_or_default();
    match Url::new_with_base(href, &origin) {
        Ok(url) => {
            if url.origin() != origin {
                return None;
            }
            Some(normalize_path(&url.pathname()))
        }
        Err(_) => {
            let path_only = href.split(['?', '#']).next().unwrap_or("/");
            Some(normalize_path(path_only))
        }
    }
}

/// Leading slash on, trailing slash off, bare root stays `/`.
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let with_slash = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if with_slash == "/" {
        return with_slash;
    }

    match with_slash.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => with_slash,
    }
}

/// A link is active for its own path and for any descendant path.
fn is_path_active(current_path: &str, link_path: &str) -> bool {
    if link_path == "/" {
        return current_path == "/";
    }

    current_path == link_path || current_path.starts_with(&format!("{link_path}/"))
}

#[cfg(test)]
mod tests {
    use super::{is_path_active, normalize_path, MenuName};

    #[test]
    fn paths_normalize_to_leading_slash_no_trailing_slash() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("umbra"), "/umbra");
        assert_eq!(normalize_path("/umbra/"), "/umbra");
        assert_eq!(normalize_path("/umbra/buy"), "/umbra/buy");
    }

    #[test]
    fn root_link_is_only_active_on_root() {
        assert!(is_path_active("/", "/"));
        assert!(!is_path_active("/umbra", "/"));
    }

    #[test]
    fn section_links_match_their_subtree() {
        assert!(is_path_active("/gear", "/gear"));
        assert!(is_path_active("/gear/wheels", "/gear"));
        assert!(!is_path_active("/gearbox", "/gear"));
    }

    #[test]
    fn menu_names_round_trip() {
        for menu in [MenuName::Umbra, MenuName::Aurora, MenuName::Gear] {
            assert_eq!(MenuName::parse(menu.as_str()), Some(menu));
        }
        assert_eq!(MenuName::parse("roadster"), None);
    }
}
