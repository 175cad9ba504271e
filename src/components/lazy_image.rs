use std::rc::Rc;

use crate::content;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

pub struct LazyImageConfig {
    pub src: String,
    pub alt: String,
    pub class_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Shown until the real source is hydrated; defaults to the shared
    /// placeholder asset.
    pub placeholder: Option<String>,
}

/// Image whose real source lives in `data-lazy-src` until the lazy media
/// controller hydrates it near the viewport.
pub struct LazyImage {
    core: ViewCore,
}

impl LazyImage {
    pub fn new(config: LazyImageConfig) -> Rc<Self> {
        let mut options = ViewOptions::new().class("lazy-image");
        if let Some(extra) = config.class_name {
            options = options.class(extra);
        }

        let options = options
            .attr(
                "src",
                config
                    .placeholder
                    .unwrap_or_else(|| content::PLACEHOLDER_IMAGE.to_string()),
            )
            .attr("alt", config.alt)
            .attr("decoding", "async")
            .attr("width", config.width)
            .attr("height", config.height)
            .data("lazySrc", config.src);

        Rc::new(Self {
            core: ViewCore::new("img", options),
        })
    }
}

impl View for LazyImage {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        // An <img> carries everything on its attributes.
        Template::new()
    }
}
