use std::rc::Rc;

use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

/// Visual flavor of a [`Button`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Plain text link.
    Text,
    /// Call-to-action treatment.
    Cta,
}

impl ButtonVariant {
    fn class_name(self) -> &'static str {
        match self {
            ButtonVariant::Text => "button-text",
            ButtonVariant::Cta => "button-cta",
        }
    }
}

pub struct ButtonConfig {
    pub label: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub class_name: Option<String>,
}

/// Link styled as a button. Navigation itself is handled by the global link
/// interception, so this stays a plain anchor.
pub struct Button {
    core: ViewCore,
    label: String,
}

impl Button {
    pub fn new(config: ButtonConfig) -> Rc<Self> {
        let mut options = ViewOptions::new()
            .class("button")
            .class(config.variant.class_name());

        if let Some(extra) = config.class_name {
            options = options.class(extra);
        }

        Rc::new(Self {
            core: ViewCore::new("a", options.attr("href", config.href)),
            label: config.label,
        })
    }
}

impl View for Button {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().text(self.label.as_str())
    }
}
