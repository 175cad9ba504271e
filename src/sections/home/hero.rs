use std::rc::Rc;

use crate::components::{
    LazyImage, LazyImageConfig, LazyVideo, LazyVideoConfig, LazyVideoSource,
};
use crate::content;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

/// Landing hero: headline plus deferred hero media, hydrated by the lazy
/// media controller once it scrolls near the viewport.
pub struct HomeHeroSection {
    core: ViewCore,
}

impl HomeHeroSection {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new(
                "section",
                ViewOptions::new().class("page-section").class("hero"),
            ),
        })
    }
}

impl View for HomeHeroSection {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new()
            .markup("<h1>Built for the night</h1>")
            .child(LazyImage::new(LazyImageConfig {
                src: content::HERO_IMAGE.to_string(),
                alt: "Umbra side profile".to_string(),
                class_name: Some("hero-media".to_string()),
                width: Some(1280),
                height: Some(720),
                placeholder: None,
            }))
            .child(LazyVideo::new(LazyVideoConfig {
                sources: vec![LazyVideoSource::new(content::HERO_VIDEO, "video/webm")],
                poster: Some(content::HERO_POSTER.to_string()),
                controls: true,
                muted: true,
                plays_inline: true,
                ..Default::default()
            }))
    }
}
