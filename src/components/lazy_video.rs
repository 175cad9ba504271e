use std::rc::Rc;

use crate::content;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

/// One `<source>` candidate for a [`LazyVideo`].
pub struct LazyVideoSource {
    pub src: String,
    pub media_type: Option<String>,
    pub media_query: Option<String>,
}

impl LazyVideoSource {
    pub fn new(src: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            media_type: Some(media_type.into()),
            media_query: None,
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum Preload {
    #[default]
    None,
    Metadata,
    Auto,
}

impl Preload {
    fn as_str(self) -> &'static str {
        match self {
            Preload::None => "none",
            Preload::Metadata => "metadata",
            Preload::Auto => "auto",
        }
    }
}

#[derive(Default)]
pub struct LazyVideoConfig {
    pub sources: Vec<LazyVideoSource>,
    pub class_name: Option<String>,
    /// Real poster, deferred behind `data-lazy-poster` until hydration.
    pub poster: Option<String>,
    pub placeholder_poster: Option<String>,
    pub preload: Preload,
    pub controls: bool,
    pub muted: bool,
    pub looped: bool,
    pub autoplay: bool,
    pub plays_inline: bool,
}

/// Video whose sources (and poster) stay in `data-lazy-*` attributes until
/// the lazy media controller hydrates them near the viewport.
pub struct LazyVideo {
    core: ViewCore,
    sources: Vec<LazyVideoSource>,
}

impl LazyVideo {
    /// Build the video element. A configuration without any source is a
    /// programmer error and fails fast.
    pub fn new(config: LazyVideoConfig) -> Rc<Self> {
        assert!(
            !config.sources.is_empty(),
            "LazyVideo requires at least one source"
        );

        let mut options = ViewOptions::new().class("lazy-video");
        if let Some(extra) = config.class_name {
            options = options.class(extra);
        }

        let mut options = options
            .attr("preload", config.preload.as_str())
            .attr("controls", config.controls)
            .attr("muted", config.muted)
            .attr("loop", config.looped)
            .attr("autoplay", config.autoplay)
            .attr("playsinline", config.plays_inline);

        if let Some(poster) = config.poster {
            options = options
                .attr(
                    "poster",
                    config
                        .placeholder_poster
                        .unwrap_or_else(|| content::PLACEHOLDER_IMAGE.to_string()),
                )
                .data("lazyPoster", poster);
        }

        Rc::new(Self {
            core: ViewCore::new("video", options),
            sources: config.sources,
        })
    }
}

impl View for LazyVideo {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        let mut template = Template::new();

        for source in &self.sources {
            template = template
                .markup("<source data-lazy-src=\"")
                .value(source.src.as_str())
                .markup("\"");

            if let Some(media_type) = &source.media_type {
                template = template
                    .markup(" type=\"")
                    .value(media_type.as_str())
                    .markup("\"");
            }

            if let Some(media_query) = &source.media_query {
                template = template
                    .markup(" media=\"")
                    .value(media_query.as_str())
                    .markup("\"");
            }

            template = template.markup(">");
        }

        template
    }
}
