//! Fieldsets for radio and checkbox groups, with revealing panels.

use ironhtml::typed::{Element, TypedNode};
use ironhtml_elements::{Div, Fieldset, Input, Legend};
use tracing::trace;

use crate::anchor::check_fragment;
use crate::builder::FormBuilder;
use crate::config::join_classes;
use crate::context::FormContext;
use crate::error::Result;
use crate::i18n::Localized;
use crate::inflector::sanitize_value;
use crate::widgets::{
    html_escape, render_label, render_span, CheckBox, RadioButton, Widget, WidgetAttrs,
};

/// One selectable value of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Submitted value.
    pub value: String,
    /// Label text; translated from the value when absent.
    pub text: Option<String>,
}

impl Choice {
    /// A choice labelled by translation.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: None,
        }
    }

    /// A choice with explicit label text.
    pub fn with_text(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: Some(text.into()),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<(&str, &str)> for Choice {
    fn from((value, text): (&str, &str)) -> Self {
        Self::with_text(value, text)
    }
}

/// Options of a whole fieldset.
#[derive(Debug, Clone, Default)]
pub struct FieldsetOptions {
    /// Radio choices; `yes` and `no` when empty.
    pub choices: Vec<Choice>,
    /// Lays the choices out on one line.
    pub inline: bool,
    /// Legend overriding the translated one.
    pub legend: Option<Localized>,
    /// Classes appended to the legend text's defaults.
    pub legend_classes: Vec<String>,
    /// Class added to every choice row.
    pub row_class: Option<String>,
    /// Selected radio values, or checked checkbox attributes.
    pub checked: Vec<String>,
}

impl FieldsetOptions {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the choices.
    #[must_use]
    pub fn choices<C: Into<Choice>>(mut self, choices: impl IntoIterator<Item = C>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Renders the fieldset inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Plain legend text.
    #[must_use]
    pub fn legend(mut self, text: impl Into<String>) -> Self {
        self.legend = Some(Localized::Text(text.into()));
        self
    }

    /// Legend markup, emitted as is.
    #[must_use]
    pub fn legend_html(mut self, html: impl Into<String>) -> Self {
        self.legend = Some(Localized::Html(html.into()));
        self
    }

    /// Adds a legend class.
    #[must_use]
    pub fn legend_class(mut self, class: impl Into<String>) -> Self {
        self.legend_classes.push(class.into());
        self
    }

    /// Adds a class to every row.
    #[must_use]
    pub fn row_class(mut self, class: impl Into<String>) -> Self {
        self.row_class = Some(class.into());
        self
    }

    /// Marks a value (or checkbox attribute) as checked.
    #[must_use]
    pub fn checked(mut self, value: impl Into<String>) -> Self {
        self.checked.push(value.into());
        self
    }

    fn is_checked(&self, value: &str) -> bool {
        self.checked.iter().any(|c| c == value)
    }
}

/// Options of one choice row added inside a fieldset closure.
#[derive(Debug, Clone, Default)]
pub struct ChoiceOptions {
    /// Id of the panel this row reveals.
    pub panel_id: Option<String>,
    /// Extra row class.
    pub class: Option<String>,
    /// Label text overriding the translated one.
    pub text: Option<String>,
    /// Starts checked.
    pub checked: bool,
}

impl ChoiceOptions {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Links the row to the panel `panel_id`.
    #[must_use]
    pub fn panel_id(mut self, panel_id: impl Into<String>) -> Self {
        self.panel_id = Some(panel_id.into());
        self
    }

    /// Adds a row class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Overrides the label text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Starts checked.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Row<'r> {
    class: Option<&'r str>,
    extra_class: Option<&'r str>,
    data_target: Option<&'r str>,
    checked: bool,
}

/// Renders fieldsets of one form.
#[derive(Debug, Clone, Copy)]
pub struct FieldsetRenderer<'f> {
    form: &'f FormContext<'f>,
}

impl<'f> FieldsetRenderer<'f> {
    /// Creates a renderer for `form`.
    pub fn new(form: &'f FormContext<'f>) -> Self {
        Self { form }
    }

    /// Attributes of the group that have errors, legend key first.
    fn erroring<'k>(&self, legend_key: &'k str, attributes: &[&'k str]) -> Vec<&'k str> {
        let mut erroring: Vec<&str> = Vec::new();
        for attribute in std::iter::once(legend_key).chain(attributes.iter().copied()) {
            if self.form.has_error(attribute) && !erroring.contains(&attribute) {
                erroring.push(attribute);
            }
        }
        erroring
    }

    /// Wraps `body` in the form group, fieldset and legend.
    ///
    /// The group is in error when any of `legend_key` or `attributes` has
    /// an error; its id is the anchor of the first erroring one.
    pub fn render(
        &self,
        legend_key: &str,
        attributes: &[&str],
        options: &FieldsetOptions,
        body: &str,
    ) -> Result<String> {
        let theme = self.form.theme();
        let erroring = self.erroring(legend_key, attributes);
        let wrapper_id = match erroring.first() {
            Some(attribute) => Some(self.form.path().anchor_id(attribute)?),
            None => None,
        };
        let legend = self.legend(legend_key, &erroring, options)?;

        // Rows and panels arrive rendered; `Fieldset` only takes typed children.
        let mut fieldset = Element::<Fieldset>::new()
            .when(options.inline, |f| f.class(&theme.inline_fieldset))
            .into_node();
        if let TypedNode::Element { children, .. } = &mut fieldset {
            children.push(TypedNode::Raw(legend));
            children.push(TypedNode::Raw(format!("\n{body}")));
        }
        let fieldset = fieldset.render();

        let div = Element::<Div>::new().class(&theme.group_class(!erroring.is_empty()));
        let div = match &wrapper_id {
            Some(id) => div.id(id),
            None => div,
        };
        Ok(div.raw(&fieldset).render())
    }

    /// Legend with its text, inline error spans and hint.
    pub fn legend(
        &self,
        legend_key: &str,
        erroring: &[&str],
        options: &FieldsetOptions,
    ) -> Result<String> {
        let form = self.form;
        let theme = form.theme();
        let text = match &options.legend {
            Some(legend) => legend.clone(),
            None => form.messages().legend(form.scope(), legend_key)?,
        };
        let class = join_classes(
            std::iter::once(Some(theme.form_label_bold.as_str()))
                .chain(options.legend_classes.iter().map(|c| Some(c.as_str()))),
        );

        let mut content = render_span(&class, None, &text.to_markup());
        for attribute in erroring {
            if let Some(error) = form.error_markup(attribute)? {
                content.push_str(&error);
            }
        }
        if let Some(hint) = form.hint_markup(legend_key)? {
            content.push_str(&hint);
        }
        Ok(Element::<Legend>::new().raw(&content).render())
    }

    /// Panel revealed by a choice, followed by a newline.
    pub fn panel<F>(&self, panel_id: &str, content: F) -> Result<String>
    where
        F: FnOnce(&FormBuilder<'_>) -> Result<String>,
    {
        check_fragment(panel_id)?;
        let builder = FormBuilder::from_context(self.form.clone());
        let body = content(&builder)?;
        trace!(%panel_id, "revealing panel rendered");
        let panel = Element::<Div>::new()
            .class(&self.form.theme().panel)
            .id(panel_id)
            .raw(&body)
            .render();
        Ok(format!("{panel}\n"))
    }

    fn row(&self, input: &str, label: &str, row: Row<'_>) -> String {
        let class = join_classes([
            Some(self.form.theme().multiple_choice.as_str()),
            row.class,
            row.extra_class,
        ]);
        let div = Element::<Div>::new().class(&class);
        let div = match row.data_target {
            Some(target) => div.attr("data-target", target),
            None => div,
        };
        div.raw(&format!("{input}{label}")).render()
    }

    fn input_attrs(&self, attribute: &str, id: &str) -> Result<WidgetAttrs> {
        let mut attrs = WidgetAttrs::new().with("id", id);
        if self.form.has_error(attribute) {
            attrs.set("aria-describedby", self.form.path().message_id(attribute)?);
        }
        Ok(attrs)
    }

    /// Input and label of one value of `attribute`.
    fn choice_row(
        &self,
        attribute: &str,
        choice: &Choice,
        widget: &dyn Widget,
        name: &str,
        text: Option<&str>,
        row: Row<'_>,
    ) -> Result<String> {
        let form = self.form;
        let id = form.path().choice_id(attribute, &choice.value)?;
        let label = match text.or(choice.text.as_deref()) {
            Some(text) => html_escape(text),
            None => form.label(&format!("{attribute}.{}", choice.value))?.to_markup(),
        };
        let input = widget.render(name, Some(&choice.value), &self.input_attrs(attribute, &id)?);
        Ok(self.row(&input, &render_label(&id, "", &label), row))
    }

    fn radio_row(
        &self,
        attribute: &str,
        choice: &Choice,
        text: Option<&str>,
        row: Row<'_>,
    ) -> Result<String> {
        let widget = RadioButton::new(row.checked);
        self.choice_row(attribute, choice, &widget, &self.form.input_name(attribute), text, row)
    }

    fn collection_check_box_row(&self, attribute: &str, choice: &Choice, row: Row<'_>) -> Result<String> {
        let widget = CheckBox::collection_member(row.checked);
        let name = format!("{}[]", self.form.input_name(attribute));
        self.choice_row(attribute, choice, &widget, &name, None, row)
    }

    fn check_box_row(&self, attribute: &str, text: Option<&str>, row: Row<'_>) -> Result<String> {
        let form = self.form;
        let id = form.path().field_id(attribute)?;
        let label = match text {
            Some(text) => html_escape(text),
            None => form.label(attribute)?.to_markup(),
        };
        let input = CheckBox::new(row.checked).render(
            &form.input_name(attribute),
            None,
            &self.input_attrs(attribute, &id)?,
        );
        Ok(self.row(&input, &render_label(&id, "", &label), row))
    }

    /// Default rows of a radio group.
    pub(crate) fn radio_rows(&self, attribute: &str, options: &FieldsetOptions) -> Result<String> {
        let defaults = [Choice::new("yes"), Choice::new("no")];
        let choices = if options.choices.is_empty() {
            &defaults[..]
        } else {
            &options.choices[..]
        };
        let rows = choices
            .iter()
            .map(|choice| {
                let row = Row {
                    class: options.row_class.as_deref(),
                    checked: options.is_checked(&choice.value),
                    ..Row::default()
                };
                self.radio_row(attribute, choice, None, row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(rows.join("\n"))
    }

    /// Default rows of a checkbox group, one per attribute.
    pub(crate) fn check_box_rows(&self, attributes: &[&str], options: &FieldsetOptions) -> Result<String> {
        let rows = attributes
            .iter()
            .map(|attribute| {
                let row = Row {
                    class: options.row_class.as_deref(),
                    checked: options.is_checked(attribute),
                    ..Row::default()
                };
                self.check_box_row(attribute, None, row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(rows.join("\n"))
    }

    /// Rows of a multi-value checkbox group, with the trailing empty value
    /// that lets an unchecked group submit.
    pub(crate) fn collection_check_box_rows(
        &self,
        attribute: &str,
        choices: &[Choice],
        options: &FieldsetOptions,
    ) -> Result<String> {
        let mut rows = choices
            .iter()
            .map(|choice| {
                let row = Row {
                    class: options.row_class.as_deref(),
                    checked: options.is_checked(&choice.value),
                    ..Row::default()
                };
                self.collection_check_box_row(attribute, choice, row)
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n");
        let name = format!("{}[]", self.form.input_name(attribute));
        rows.push_str(
            &Element::<Input>::new()
                .attr("type", "hidden")
                .attr("name", &name)
                .attr("value", "")
                .render(),
        );
        Ok(rows)
    }
}

/// Helpers available while rendering the body of one fieldset.
///
/// Carries the attribute the fieldset belongs to, so radio rows added here
/// need only their value.
pub struct FieldsetScope<'s> {
    renderer: FieldsetRenderer<'s>,
    attribute: String,
    options: &'s FieldsetOptions,
    markup: String,
}

impl std::fmt::Debug for FieldsetScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldsetScope")
            .field("attribute", &self.attribute)
            .field("markup", &self.markup)
            .finish_non_exhaustive()
    }
}

impl<'s> FieldsetScope<'s> {
    pub(crate) fn new(form: &'s FormContext<'s>, attribute: &str, options: &'s FieldsetOptions) -> Self {
        Self {
            renderer: FieldsetRenderer::new(form),
            attribute: attribute.to_string(),
            options,
            markup: String::new(),
        }
    }

    /// Attribute (or legend key) of the fieldset being rendered.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    fn row<'r>(&'r self, options: &'r ChoiceOptions, checked: bool, data_target: Option<&'r str>) -> Row<'r> {
        Row {
            class: self.options.row_class.as_deref(),
            extra_class: options.class.as_deref(),
            data_target,
            checked: options.checked || checked,
        }
    }

    /// Adds a radio row for `choice`. With a `panel_id` the row targets a
    /// panel rendered elsewhere.
    pub fn radio_input(&mut self, choice: impl Into<Choice>, options: &ChoiceOptions) -> Result<()> {
        let choice = choice.into();
        if let Some(panel_id) = &options.panel_id {
            check_fragment(panel_id)?;
        }
        let row = self.row(
            options,
            self.options.is_checked(&choice.value),
            options.panel_id.as_deref(),
        );
        let markup = self
            .renderer
            .radio_row(&self.attribute, &choice, options.text.as_deref(), row)?;
        self.markup.push_str(&markup);
        self.markup.push('\n');
        Ok(())
    }

    /// Adds a radio row for `choice` followed by the panel it reveals.
    ///
    /// The panel id defaults to `<attribute>_<choice>_panel`.
    pub fn radio_input_with_panel<F>(
        &mut self,
        choice: impl Into<Choice>,
        options: &ChoiceOptions,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&FormBuilder<'_>) -> Result<String>,
    {
        let choice = choice.into();
        let panel_id = match &options.panel_id {
            Some(id) => id.clone(),
            None => format!("{}_{}_panel", self.attribute, sanitize_value(&choice.value)),
        };
        let panel = self.renderer.panel(&panel_id, content)?;
        let row = self.row(
            options,
            self.options.is_checked(&choice.value),
            Some(panel_id.as_str()),
        );
        let markup = self
            .renderer
            .radio_row(&self.attribute, &choice, options.text.as_deref(), row)?;
        self.markup.push_str(&markup);
        self.markup.push('\n');
        self.markup.push_str(&panel);
        Ok(())
    }

    /// Adds a checkbox row for the boolean `attribute`.
    pub fn check_box_input(&mut self, attribute: &str, options: &ChoiceOptions) -> Result<()> {
        if let Some(panel_id) = &options.panel_id {
            check_fragment(panel_id)?;
        }
        let row = self.row(
            options,
            self.options.is_checked(attribute),
            options.panel_id.as_deref(),
        );
        let markup = self
            .renderer
            .check_box_row(attribute, options.text.as_deref(), row)?;
        self.markup.push_str(&markup);
        self.markup.push('\n');
        Ok(())
    }

    /// Adds a checkbox row for `attribute` followed by the panel it reveals.
    ///
    /// The panel id defaults to `<attribute>_panel`.
    pub fn check_box_input_with_panel<F>(
        &mut self,
        attribute: &str,
        options: &ChoiceOptions,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&FormBuilder<'_>) -> Result<String>,
    {
        let panel_id = match &options.panel_id {
            Some(id) => id.clone(),
            None => format!("{attribute}_panel"),
        };
        let panel = self.renderer.panel(&panel_id, content)?;
        let row = self.row(options, self.options.is_checked(attribute), Some(panel_id.as_str()));
        let markup = self
            .renderer
            .check_box_row(attribute, options.text.as_deref(), row)?;
        self.markup.push_str(&markup);
        self.markup.push('\n');
        self.markup.push_str(&panel);
        Ok(())
    }

    /// Adds a standalone panel, for rows that name it via `panel_id`.
    pub fn revealing_panel<F>(&mut self, panel_id: &str, content: F) -> Result<()>
    where
        F: FnOnce(&FormBuilder<'_>) -> Result<String>,
    {
        let panel = self.renderer.panel(panel_id, content)?;
        self.markup.push_str(&panel);
        Ok(())
    }

    /// Adds caller markup as is.
    pub fn raw(&mut self, markup: &str) {
        self.markup.push_str(markup);
    }

    pub(crate) fn into_markup(self) -> String {
        self.markup
    }
}
