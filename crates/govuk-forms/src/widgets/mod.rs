//! Form widgets for rendering HTML inputs.

mod govuk;

pub use govuk::{CheckBox, RadioButton, Select, TextArea, TextInput};

use ironhtml::typed::Element;
use ironhtml_elements::{Label, Span};

use crate::config::join_classes;

/// Attributes applied to a widget, rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    attrs: Vec<(&'static str, String)>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Appends classes after the ones already present.
    pub fn add_class(&mut self, class: &str) {
        let merged = join_classes([self.get("class"), Some(class)]);
        self.set("class", merged);
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attrs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The input name (e.g. `person[name]`)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes, including `id` and `class`
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Renders a `<label>` around pre-rendered content.
pub fn render_label(for_id: &str, class: &str, content: &str) -> String {
    let label = Element::<Label>::new().attr("for", for_id);
    let label = if class.is_empty() {
        label
    } else {
        label.class(class)
    };
    label.raw(content).render()
}

/// Renders a `<span>` with a class and optional id around pre-rendered
/// content.
pub fn render_span(class: &str, id: Option<&str>, content: &str) -> String {
    let span = Element::<Span>::new().class(class);
    let span = match id {
        Some(id) => span.id(id),
        None => span,
    };
    span.raw(content).render()
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
