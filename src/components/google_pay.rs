use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Promise, Reflect, JSON};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::console;

use crate::dom;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

// Bindings for the globally loaded Google Pay SDK. The request and response
// shapes are dictated by that API; everything crosses the boundary as plain
// `JsValue` objects.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "payments", "api"])]
    #[derive(Clone)]
    type PaymentsClient;

    #[wasm_bindgen(constructor, js_class = "PaymentsClient", js_namespace = ["google", "payments", "api"])]
    fn new(options: &JsValue) -> PaymentsClient;

    #[wasm_bindgen(method, js_name = isReadyToPay)]
    fn is_ready_to_pay(this: &PaymentsClient, request: &JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = createButton)]
    fn create_button(this: &PaymentsClient, options: &JsValue) -> web_sys::HtmlElement;

    #[wasm_bindgen(method, js_name = loadPaymentData)]
    fn load_payment_data(this: &PaymentsClient, request: &JsValue) -> Promise;
}

/// Container for the SDK-provided pay button. Renders nothing of its own:
/// if the SDK is loaded and reports readiness, the real button is dropped
/// into the container; otherwise the feature silently degrades to absent.
pub struct GooglePayButton {
    core: ViewCore,
    total_price: String,
    client: RefCell<Option<PaymentsClient>>,
}

impl GooglePayButton {
    pub fn new(total_price: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("div", ViewOptions::new().class("gpay-button-container")),
            total_price: total_price.into(),
            client: RefCell::new(None),
        })
    }

    /// Whether the SDK script made it onto the page.
    fn sdk_loaded() -> bool {
        Reflect::get(&dom::window(), &"google".into())
            .map(|value| !value.is_undefined())
            .unwrap_or(false)
    }

    /// Lazily construct (and cache) the payments client.
    fn client(&self) -> PaymentsClient {
        if self.client.borrow().is_none() {
            let options = JSON::parse(&json!({ "environment": "TEST" }).to_string())
                .expect("client options to parse");
            *self.client.borrow_mut() = Some(PaymentsClient::new(&options));
        }

        self.client
            .borrow()
            .as_ref()
            .expect("client to be initialised")
            .clone()
    }

    fn check_readiness(this: &Rc<Self>) {
        let request = JSON::parse(&ready_to_pay_request().to_string())
            .expect("readiness request to parse");
        let client = this.client();

        let this = Rc::downgrade(this);
        spawn_local(async move {
            match JsFuture::from(client.is_ready_to_pay(&request)).await {
                Ok(response) => {
                    let ready = Reflect::get(&response, &"result".into())
                        .ok()
                        .and_then(|value| value.as_bool())
                        .unwrap_or(false);

                    let Some(button) = this.upgrade() else { return };
                    if ready && button.core.is_alive() {
                        Self::render_sdk_button(&button);
                    }
                }
                Err(err) => {
                    console::error_2(&"Google Pay readiness probe failed:".into(), &err);
                }
            }
        });
    }

    fn render_sdk_button(this: &Rc<Self>) {
        let on_click = Closure::<dyn FnMut()>::new({
            let weak = Rc::downgrade(this);
            move || {
                if let Some(button) = weak.upgrade() {
                    button.request_payment();
                }
            }
        });

        let options = Object::new();
        Reflect::set(&options, &"onClick".into(), on_click.as_ref())
            .expect("click handler to set");
        for (key, value) in [
            ("buttonColor", "black"),
            ("buttonType", "buy"),
            ("buttonSizeMode", "fill"),
        ] {
            Reflect::set(&options, &key.into(), &value.into()).expect("button option to set");
        }

        let button = this.client().create_button(options.as_ref());
        dom::replace_children(this.core.element(), Some(button.as_ref()));

        // The SDK holds a bare function pointer; keep the closure alive for
        // as long as this view is.
        this.core.cleanup().add(move || drop(on_click));
    }

    fn request_payment(&self) {
        let request = JSON::parse(&payment_data_request(&self.total_price).to_string())
            .expect("payment request to parse");
        let client = self.client();

        spawn_local(async move {
            match JsFuture::from(client.load_payment_data(&request)).await {
                Ok(data) => console::log_2(&"Payment success:".into(), &data),
                Err(err) => console::error_2(&"Payment error:".into(), &err),
            }
        });
    }
}

impl View for GooglePayButton {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new()
    }

    fn on_mount(self: Rc<Self>) {
        if !Self::sdk_loaded() {
            console::error_1(&"Google Pay script not loaded; payment button disabled".into());
            return;
        }

        Self::check_readiness(&self);
    }
}

fn base_card_payment_method() -> serde_json::Value {
    json!({
        "type": "CARD",
        "parameters": {
            "allowedAuthMethods": ["PAN_ONLY", "CRYPTOGRAM_3DS"],
            "allowedCardNetworks": ["VISA", "MASTERCARD"],
        }
    })
}

fn ready_to_pay_request() -> serde_json::Value {
    json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "allowedPaymentMethods": [base_card_payment_method()],
    })
}

fn payment_data_request(total_price: &str) -> serde_json::Value {
    let mut method = base_card_payment_method();
    method["tokenizationSpecification"] = json!({
        "type": "DIRECT",
        "parameters": { "protocolVersion": "ECv2", "publicKey": "BCf..." },
    });

    json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "allowedPaymentMethods": [method],
        "transactionInfo": {
            "totalPriceStatus": "FINAL",
            "totalPrice": total_price,
            "currencyCode": "USD",
            "countryCode": "US",
        },
        "merchantInfo": { "merchantName": "Nocturne Motors" },
    })
}
