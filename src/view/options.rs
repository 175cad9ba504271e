use web_sys::HtmlElement;

/// Value for an attribute or dataset entry. `Skip` entries are omitted
/// entirely; `Flag` renders as an empty string, the boolean-attribute form.
pub enum AttrValue {
    Text(String),
    Flag,
    Skip,
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        if value {
            AttrValue::Flag
        } else {
            AttrValue::Skip
        }
    }
}

impl<T> From<Option<T>> for AttrValue
where
    T: Into<AttrValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => AttrValue::Skip,
        }
    }
}

macro_rules! impl_attr_value_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Text(value.to_string())
                }
            }
        )*
    };
}

impl_attr_value_from_display!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Builder for the static shape of a view's root element: class list, id,
/// attributes, and dataset entries.
#[derive(Default)]
pub struct ViewOptions {
    class_names: Vec<String>,
    id: Option<String>,
    attrs: Vec<(String, AttrValue)>,
    dataset: Vec<(String, AttrValue)>,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class name. May be called repeatedly.
    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.class_names.push(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute. `false`/`None` values skip the attribute, `true`
    /// sets the boolean-attribute empty string.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set a dataset entry. Keys are camelCase, as in `element.dataset`.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.dataset.push((key.into(), value.into()));
        self
    }

    pub(super) fn apply(self, element: &HtmlElement) {
        if !self.class_names.is_empty() {
            element.set_class_name(&self.class_names.join(" "));
        }

        if let Some(id) = self.id {
            element.set_id(&id);
        }

        for (name, value) in self.attrs {
            let text = match value {
                AttrValue::Skip => continue,
                AttrValue::Flag => String::new(),
                AttrValue::Text(text) => text,
            };
            element
                .set_attribute(&name, &text)
                .expect("attribute to set");
        }

        let dataset = element.dataset();
        for (key, value) in self.dataset {
            let text = match value {
                AttrValue::Skip => continue,
                AttrValue::Flag => String::new(),
                AttrValue::Text(text) => text,
            };
            dataset.set(&key, &text).expect("dataset entry to set");
        }
    }
}
