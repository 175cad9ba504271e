mod button;
mod google_pay;
mod lazy_image;
mod lazy_video;
mod media_card;
mod navbar;

pub use button::{Button, ButtonConfig, ButtonVariant};
pub use google_pay::GooglePayButton;
pub use lazy_image::{LazyImage, LazyImageConfig};
pub use lazy_video::{LazyVideo, LazyVideoConfig, LazyVideoSource, Preload};
pub use media_card::{MediaCard, MediaCardConfig, TextAnchor};
pub use navbar::Navbar;
