use std::rc::Rc;

use crate::template::Template;
use crate::view::{View, ViewCore, ViewOptions};

pub struct NotFoundPage {
    core: ViewCore,
}

impl NotFoundPage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("section", ViewOptions::new()),
        })
    }
}

impl View for NotFoundPage {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().markup("<h1>404</h1>")
    }
}
