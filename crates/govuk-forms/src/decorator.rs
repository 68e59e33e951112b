//! Field decoration: classes, label, hint, error text and ARIA wiring.

use ironhtml::typed::Element;
use ironhtml_elements::Div;
use tracing::debug;

use crate::config::join_classes;
use crate::context::{FieldContext, FormContext};
use crate::error::Result;
use crate::i18n::Localized;
use crate::widgets::{html_escape, render_label, render_span, Widget, WidgetAttrs};

/// Caller options of one field helper.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Label overriding the translated one.
    pub label: Option<Localized>,
    /// Classes appended to the label's defaults.
    pub label_classes: Vec<String>,
    /// Classes appended to the input's defaults.
    pub classes: Vec<String>,
    /// Current value.
    pub value: Option<String>,
    /// Textarea rows.
    pub rows: Option<usize>,
    /// Extra input attributes.
    pub attrs: WidgetAttrs,
}

impl FieldOptions {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain label text, escaped on output.
    #[must_use]
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(Localized::Text(text.into()));
        self
    }

    /// Label markup, emitted as is.
    #[must_use]
    pub fn label_html(mut self, html: impl Into<String>) -> Self {
        self.label = Some(Localized::Html(html.into()));
        self
    }

    /// Adds a label class.
    #[must_use]
    pub fn label_class(mut self, class: impl Into<String>) -> Self {
        self.label_classes.push(class.into());
        self
    }

    /// Adds an input class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the current value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets textarea rows.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets an extra input attribute. A `class` value is merged with the
    /// defaults; `id` cannot be overridden.
    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }
}

/// Markup pieces of one decorated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedField {
    /// Class of the form group wrapper.
    pub wrapper_class: String,
    /// Id of the form group wrapper, present only with an error.
    pub wrapper_id: Option<String>,
    /// Class of the input control.
    pub input_class: String,
    /// The `<label>`, with error and hint spans inside it.
    pub label_markup: String,
    /// The input control.
    pub input_markup: String,
    /// Hint span, also contained in `label_markup`.
    pub hint_markup: Option<String>,
    /// Inline error span, also contained in `label_markup`.
    pub error_markup: Option<String>,
    /// Localized error text.
    pub error_message: Option<String>,
    /// Link target used by the error summary for this field.
    pub error_anchor_id: Option<String>,
}

impl DecoratedField {
    /// Renders the form group around label and input.
    pub fn render(&self) -> String {
        let div = Element::<Div>::new().class(&self.wrapper_class);
        let div = match &self.wrapper_id {
            Some(id) => div.id(id),
            None => div,
        };
        div.raw(&format!("{}\n{}", self.label_markup, self.input_markup))
            .render()
    }
}

/// Decorates single fields of one form.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecorator<'f> {
    form: &'f FormContext<'f>,
}

impl<'f> FieldDecorator<'f> {
    /// Creates a decorator for `form`.
    pub fn new(form: &'f FormContext<'f>) -> Self {
        Self { form }
    }

    /// Computes the markup of `attribute` rendered with `widget`.
    pub fn decorate(
        &self,
        attribute: &str,
        widget: &dyn Widget,
        options: &FieldOptions,
    ) -> Result<DecoratedField> {
        let form = self.form;
        let theme = form.theme();
        let field = FieldContext::new(form, attribute)?;

        let label_text = match &options.label {
            Some(label) => label.clone(),
            None => form.label(attribute)?,
        };
        let hint_markup = form.hint_markup(attribute)?;
        let error_message = if field.has_error {
            form.first_error_message(attribute)?
        } else {
            None
        };
        let error_markup = match (&error_message, &field.message_id) {
            (Some(message), Some(id)) => Some(render_span(
                &theme.error_message,
                Some(id),
                &html_escape(message),
            )),
            _ => None,
        };

        let label_class = join_classes(
            std::iter::once(Some(theme.form_label.as_str()))
                .chain(options.label_classes.iter().map(|c| Some(c.as_str()))),
        );
        let label_content = [
            Some(label_text.to_markup()),
            error_markup.clone(),
            hint_markup.clone(),
        ]
        .into_iter()
        .flatten()
        .collect::<String>();
        let label_markup = render_label(&field.field_id, &label_class, &label_content);

        let input_class = theme.control_class(field.has_error, &options.classes);
        let mut attrs = WidgetAttrs::new()
            .with("id", field.field_id.as_str())
            .with("class", input_class.as_str());
        if let Some(id) = &field.message_id {
            attrs.set("aria-describedby", id.as_str());
        }
        for (key, value) in options.attrs.iter() {
            match key {
                "class" => attrs.add_class(value),
                "aria-describedby" => {
                    let joined = attrs
                        .get(key)
                        .map_or_else(|| value.to_string(), |own| format!("{own} {value}"));
                    attrs.set(key, joined);
                }
                "id" | "name" | "type" | "value" => {
                    debug!(%attribute, key, "ignoring caller attribute the field sets itself");
                }
                _ => attrs.set(key, value),
            }
        }
        let input_class = attrs.get("class").unwrap_or_default().to_string();
        let input_markup = widget.render(&field.name, options.value.as_deref(), &attrs);

        Ok(DecoratedField {
            wrapper_class: theme.group_class(field.has_error),
            wrapper_id: field.anchor_id.clone(),
            input_class,
            label_markup,
            input_markup,
            hint_markup,
            error_markup,
            error_message,
            error_anchor_id: field.anchor_id,
        })
    }
}
