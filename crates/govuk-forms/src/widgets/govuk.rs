//! GOV.UK Elements form widgets.

use ironhtml::typed::Element;
use ironhtml_elements::{Input, Option_, Select as SelectEl, Textarea};

use super::{Widget, WidgetAttrs};

/// Single-line input (`text`, `email`, `password`, ...).
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type.
    pub input_type: &'static str,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::text()
    }
}

impl TextInput {
    /// Creates a text input.
    pub fn text() -> Self {
        Self { input_type: "text" }
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self {
            input_type: "email",
        }
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self {
            input_type: "password",
        }
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self {
            input_type: "number",
        }
    }

    /// Creates a telephone input.
    pub fn tel() -> Self {
        Self { input_type: "tel" }
    }

    /// Creates a range input.
    pub fn range() -> Self {
        Self {
            input_type: "range",
        }
    }

    /// Creates a search input.
    pub fn search() -> Self {
        Self {
            input_type: "search",
        }
    }

    /// Creates a URL input.
    pub fn url() -> Self {
        Self { input_type: "url" }
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let input = Element::<Input>::new()
            .attr("type", self.input_type)
            .attr("name", name);
        let input = attrs.iter().fold(input, |el, (k, v)| el.attr(k, v));
        match value {
            Some(v) => input.attr("value", v).render(),
            None => input.render(),
        }
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// Multi-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextArea {
    /// Number of rows.
    pub rows: Option<usize>,
}

impl TextArea {
    /// Creates a textarea with the specified rows.
    pub fn new(rows: Option<usize>) -> Self {
        Self { rows }
    }
}

impl Widget for TextArea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let textarea = Element::<Textarea>::new().attr("name", name);
        let textarea = attrs.iter().fold(textarea, |el, (k, v)| el.attr(k, v));
        let textarea = match self.rows {
            Some(rows) => textarea.attr("rows", &rows.to_string()),
            None => textarea,
        };
        textarea.text(value.unwrap_or_default()).render()
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Dropdown select.
#[derive(Debug, Clone, Default)]
pub struct Select {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Label of a leading empty option, if any.
    pub blank: Option<String>,
}

impl Select {
    /// Creates a select with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            blank: None,
        }
    }

    /// Adds a leading empty option.
    #[must_use]
    pub fn include_blank(mut self, label: impl Into<String>) -> Self {
        self.blank = Some(label.into());
        self
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let select = Element::<SelectEl>::new().attr("name", name);
        let select = attrs.iter().fold(select, |el, (k, v)| el.attr(k, v));
        let select = match &self.blank {
            Some(label) => select.child::<Option_, _>(|o| o.attr("value", "").text(label)),
            None => select,
        };
        self.choices
            .iter()
            .fold(select, |s, (opt_value, label)| {
                s.child::<Option_, _>(|o| {
                    let o = o.attr("value", opt_value).text(label);
                    if value == Some(opt_value.as_str()) {
                        o.bool_attr("selected")
                    } else {
                        o
                    }
                })
            })
            .render()
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Boolean checkbox, preceded by a hidden `0` so unchecked boxes submit.
#[derive(Debug, Clone, Default)]
pub struct CheckBox {
    /// Whether the box starts checked.
    pub checked: bool,
    /// Whether to emit the hidden `0` input.
    pub include_hidden: bool,
}

impl CheckBox {
    /// Creates a checkbox.
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            include_hidden: true,
        }
    }

    /// Creates one checkbox of a collection, without the hidden input.
    pub fn collection_member(checked: bool) -> Self {
        Self {
            checked,
            include_hidden: false,
        }
    }
}

impl Widget for CheckBox {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let hidden = if self.include_hidden {
            Element::<Input>::new()
                .attr("name", name)
                .attr("type", "hidden")
                .attr("value", "0")
                .render()
        } else {
            String::new()
        };
        let input = Element::<Input>::new()
            .attr("type", "checkbox")
            .attr("name", name)
            .attr("value", value.unwrap_or("1"));
        let input = attrs.iter().fold(input, |el, (k, v)| el.attr(k, v));
        let input = if self.checked {
            input.bool_attr("checked")
        } else {
            input
        };
        format!("{hidden}{}", input.render())
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// One radio button of a group.
#[derive(Debug, Clone, Default)]
pub struct RadioButton {
    /// Whether this button starts selected.
    pub checked: bool,
}

impl RadioButton {
    /// Creates a radio button.
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }
}

impl Widget for RadioButton {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let input = Element::<Input>::new()
            .attr("type", "radio")
            .attr("value", value.unwrap_or_default())
            .attr("name", name);
        let input = attrs.iter().fold(input, |el, (k, v)| el.attr(k, v));
        let input = if self.checked {
            input.bool_attr("checked")
        } else {
            input
        };
        input.render()
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}
