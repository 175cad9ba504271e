//! Brand constants and asset locations shared across the storefront.

/// Brand title used in document titles and the navbar logo.
pub const APP_TITLE: &str = "Nocturne";

/// JSON endpoint serving the visitor's current cart selection.
pub const CART_ENDPOINT: &str = "https://api.nocturne-motors.example/cart";

/// Neutral stand-in shown while real media is still deferred.
pub const PLACEHOLDER_IMAGE: &str = "/assets/shared/placeholder.png";

/// Images the boot screen waits on before dismissing itself.
pub const BOOT_CRITICAL_IMAGES: [&str; 1] = [PLACEHOLDER_IMAGE];

/// Hero media for the home page.
pub const HERO_IMAGE: &str = "/assets/umbra/umbra_transparent.webp";
pub const HERO_POSTER: &str = "/assets/umbra/hero_endframe.webp";
pub const HERO_VIDEO: &str = "/assets/umbra/hero_video.webm";
