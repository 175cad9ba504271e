use std::rc::Rc;

use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

/// Where a card's label sits within the card face.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::TopLeft => "top-left",
            TextAnchor::TopCenter => "top-center",
            TextAnchor::TopRight => "top-right",
            TextAnchor::CenterLeft => "center-left",
            TextAnchor::Center => "center",
            TextAnchor::CenterRight => "center-right",
            TextAnchor::BottomLeft => "bottom-left",
            TextAnchor::BottomCenter => "bottom-center",
            TextAnchor::BottomRight => "bottom-right",
        }
    }
}

const DEFAULT_TEXT_SIZE: &str = "1.6rem";
const DEFAULT_TEXT_COLOR: &str = "rgb(255 255 255)";
const DEFAULT_TEXT_WEIGHT: &str = "600";
const DEFAULT_BG_POSITION: &str = "center";
const DEFAULT_OFFSET: &str = "0px";

/// One place to steer a card: label placement via `text_anchor` plus offsets,
/// typography via the `text_*` fields, and the gradient readability layer via
/// `with_overlay`. Styling lands in CSS custom properties so the stylesheet
/// stays in charge of the actual layout.
pub struct MediaCardConfig {
    pub label: String,
    pub href: String,
    pub class_name: Option<String>,
    pub background_image: String,
    /// Defer the background image to the lazy media controller.
    pub defer_background_load: bool,
    pub background_position: Option<String>,
    pub text_anchor: TextAnchor,
    pub text_offset_x: Option<String>,
    pub text_offset_y: Option<String>,
    pub text_size: Option<String>,
    pub text_color: Option<String>,
    pub text_weight: Option<String>,
    pub with_overlay: bool,
}

impl Default for MediaCardConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            href: String::new(),
            class_name: None,
            background_image: String::new(),
            defer_background_load: false,
            background_position: None,
            text_anchor: TextAnchor::BottomLeft,
            text_offset_x: None,
            text_offset_y: None,
            text_size: None,
            text_color: None,
            text_weight: None,
            with_overlay: true,
        }
    }
}

/// Anchor card with a configured background and a single positioned label.
/// Renders its label span once; everything visual beyond that is CSS.
pub struct MediaCard {
    core: ViewCore,
    label: String,
    anchor: TextAnchor,
    label_style: String,
}

impl MediaCard {
    pub fn new(config: MediaCardConfig) -> Rc<Self> {
        let mut options = ViewOptions::new().class("media-card");
        if let Some(extra) = &config.class_name {
            options = options.class(extra.clone());
        }

        options = options
            .attr("href", config.href.clone())
            .attr("style", card_style(&config))
            .data("overlay", if config.with_overlay { "on" } else { "off" });

        if config.defer_background_load {
            options = options
                .data("lazyBgSrc", config.background_image.clone())
                .data("lazyBgCssVar", "--media-card-bg-image");
        }

        Rc::new(Self {
            core: ViewCore::new("a", options),
            label: config.label.clone(),
            anchor: config.text_anchor,
            label_style: label_style(&config),
        })
    }
}

impl View for MediaCard {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new()
            .markup("<span class=\"media-card-label\" data-anchor=\"")
            .value(self.anchor.as_str())
            .markup("\" style=\"")
            .value(self.label_style.as_str())
            .markup("\">")
            .text(self.label.as_str())
            .markup("</span>")
    }
}

fn card_style(config: &MediaCardConfig) -> String {
    let mut rules = Vec::new();

    if !config.defer_background_load {
        rules.push(format!(
            "--media-card-bg-image: url(\"{}\")",
            config.background_image
        ));
    }
    rules.push(format!(
        "--media-card-bg-position: {}",
        config
            .background_position
            .as_deref()
            .unwrap_or(DEFAULT_BG_POSITION)
    ));

    rules.join("; ")
}

fn label_style(config: &MediaCardConfig) -> String {
    [
        format!(
            "--media-card-text-size: {}",
            config.text_size.as_deref().unwrap_or(DEFAULT_TEXT_SIZE)
        ),
        format!(
            "--media-card-text-color: {}",
            config.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
        ),
        format!(
            "--media-card-text-weight: {}",
            config.text_weight.as_deref().unwrap_or(DEFAULT_TEXT_WEIGHT)
        ),
        format!(
            "--media-card-text-offset-x: {}",
            config.text_offset_x.as_deref().unwrap_or(DEFAULT_OFFSET)
        ),
        format!(
            "--media-card-text-offset-y: {}",
            config.text_offset_y.as_deref().unwrap_or(DEFAULT_OFFSET)
        ),
    ]
    .join("; ")
}

#[cfg(test)]
mod tests {
    use super::{card_style, label_style, MediaCardConfig};

    #[test]
    fn deferred_cards_leave_the_background_to_the_lazy_controller() {
        let config = MediaCardConfig {
            background_image: "/assets/gear/wheels.webp".to_string(),
            defer_background_load: true,
            ..Default::default()
        };

        let style = card_style(&config);
        assert!(!style.contains("--media-card-bg-image"));
        assert!(style.contains("--media-card-bg-position: center"));
    }

    #[test]
    fn eager_cards_inline_their_background() {
        let config = MediaCardConfig {
            background_image: "/assets/gear/wheels.webp".to_string(),
            background_position: Some("right 20% center".to_string()),
            ..Default::default()
        };

        let style = card_style(&config);
        assert!(style.contains("url(\"/assets/gear/wheels.webp\")"));
        assert!(style.contains("right 20% center"));
    }

    #[test]
    fn label_style_falls_back_to_defaults() {
        let style = label_style(&MediaCardConfig::default());
        assert!(style.contains("--media-card-text-size: 1.6rem"));
        assert!(style.contains("--media-card-text-offset-x: 0px"));
    }
}
