use std::collections::HashMap;

use crate::pages::{CartPage, HomePage, NotFoundPage};
use crate::router::{Route, RouteMap};
use crate::view::Mountable;

/// The storefront's route table. `/404` doubles as the fallback for paths
/// with no exact match.
pub fn routes() -> RouteMap {
    HashMap::from([
        (
            "/".to_string(),
            Route::new("Home", || Box::new(HomePage::new()) as Box<dyn Mountable>),
        ),
        (
            "/cart".to_string(),
            Route::new("Cart", || Box::new(CartPage::new()) as Box<dyn Mountable>),
        ),
        (
            "/404".to_string(),
            Route::new("Not found", || {
                Box::new(NotFoundPage::new()) as Box<dyn Mountable>
            }),
        ),
    ])
}
