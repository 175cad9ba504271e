use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Response};

use crate::components::GooglePayButton;
use crate::content;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewExt, ViewOptions};

/// Payload served by the cart endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    pub car_name: String,
    pub price: f64,
    pub specs: String,
}

/// Substituted whenever the cart endpoint cannot be reached or decoded.
fn fallback_cart() -> CartData {
    CartData {
        car_name: "Nocturne Umbra GT".to_string(),
        price: 79_990.0,
        specs: "Dual-motor AWD • 620 hp".to_string(),
    }
}

/// Checkout page. Shows a loading state while the cart request is in
/// flight, then the selected car with its Google Pay button.
pub struct CartPage {
    core: ViewCore,
    data: RefCell<Option<CartData>>,
}

impl CartPage {
    pub fn new() -> Rc<Self> {
        let page = Rc::new(Self {
            core: ViewCore::new("div", ViewOptions::new().class("cart-page")),
            data: RefCell::new(None),
        });

        Self::load(&page);

        page
    }

    /// Fire the cart request. The continuation holds a weak reference and
    /// re-checks liveness after the await, so a response arriving after the
    /// user navigated away is dropped instead of rendered into a detached
    /// tree.
    fn load(page: &Rc<Self>) {
        let this = Rc::downgrade(page);

        spawn_local(async move {
            let data = match fetch_cart().await {
                Ok(data) => data,
                Err(err) => {
                    console::error_2(&"Failed to load cart:".into(), &err);
                    fallback_cart()
                }
            };

            let Some(page) = this.upgrade() else { return };
            if !page.core.is_alive() {
                return;
            }

            *page.data.borrow_mut() = Some(data);
            page.rerender();
        });
    }
}

impl View for CartPage {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        let Some(data) = self.data.borrow().clone() else {
            return Template::new()
                .markup("<div class=\"loading-screen\"><span class=\"brand-tag\">")
                .text(content::APP_TITLE)
                .markup("</span><p>Fetching your selection...</p></div>");
        };

        let mut words = data.car_name.split(' ');
        let make = words.next().unwrap_or_default().to_string();
        let model = words.collect::<Vec<_>>().join(" ");

        Template::new()
            .markup("<div class=\"cart-wrapper\"><header class=\"cart-header\"><span class=\"brand-tag\">")
            .text(content::APP_TITLE)
            .markup(" EXCLUSIVE</span><h1>Your Selection</h1></header><section class=\"cart-content\"><div class=\"product-preview\"><div class=\"product-info\"><small>Automotive Icon</small><h2>")
            .text(make)
            .markup(" <br><span>")
            .text(model)
            .markup("</span></h2><p class=\"specs\">")
            .text(data.specs.as_str())
            .markup("</p></div><div class=\"product-price\"><span class=\"currency\">$</span><span class=\"amount\">")
            .text(format_price(data.price))
            .markup("</span></div></div><div class=\"checkout-footer\"><div class=\"guarantee\"><svg width=\"16\" height=\"16\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><path d=\"M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z\"/></svg> Secure Encrypted Checkout</div><div class=\"pay-button-wrapper\">")
            .child(GooglePayButton::new(format!("{:.2}", data.price)))
            .markup("</div></div></section></div>")
    }
}

async fn fetch_cart() -> Result<CartData, JsValue> {
    let response = JsFuture::from(crate::dom::window().fetch_with_str(content::CART_ENDPOINT)).await?;
    let response: Response = response.dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "cart endpoint answered {}",
            response.status()
        )));
    }

    let body = JsFuture::from(response.text()?).await?;
    let body = body
        .as_string()
        .ok_or_else(|| JsValue::from_str("cart body is not text"))?;

    serde_json::from_str(&body)
        .map_err(|err| JsValue::from_str(&format!("cart payload did not decode: {err}")))
}

/// `84995` -> `"84,995.00"`, the grouped rendition shown next to the
/// currency symbol.
fn format_price(price: f64) -> String {
    let fixed = format!("{price:.2}");
    let (int_part, frac_part) = fixed.split_once('.').expect("two decimal places");

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{grouped}.{frac_part}")
}
