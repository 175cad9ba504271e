use std::rc::Rc;

use crate::sections::home::HomeHeroSection;
use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

pub struct HomePage {
    core: ViewCore,
}

impl HomePage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("section", ViewOptions::new().class("home-page")),
        })
    }
}

impl View for HomePage {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().child(HomeHeroSection::new())
    }
}
