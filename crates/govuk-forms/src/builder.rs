//! The form builder facade.

use tracing::debug;

use crate::config::FormTheme;
use crate::context::FormContext;
use crate::decorator::{DecoratedField, FieldDecorator, FieldOptions};
use crate::error::Result;
use crate::fieldset::{Choice, FieldsetOptions, FieldsetRenderer, FieldsetScope};
use crate::i18n::Translator;
use crate::model::Entity;
use crate::summary::ErrorSummaryRenderer;
use crate::widgets::{Select, TextArea, TextInput, Widget};

/// Renders GOV.UK Elements markup for the fields of one entity.
///
/// # Example
///
/// ```rust
/// use govuk_forms::{Entity, Errors, FieldOptions, FormBuilder, NullTranslator};
///
/// #[derive(Entity)]
/// struct Person {
///     #[entity(errors)]
///     errors: Errors,
/// }
///
/// let mut person = Person { errors: Errors::new() };
/// person.errors.add("name", "Name is required");
///
/// let form = FormBuilder::new(&person, &NullTranslator).unwrap();
/// let html = form.text_field("name", &FieldOptions::new()).unwrap();
/// assert!(html.contains(r#"id="error_person_name""#));
/// assert!(html.contains(r#"aria-describedby="error_message_person_name""#));
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder<'a> {
    ctx: FormContext<'a>,
}

impl<'a> FormBuilder<'a> {
    /// Builder for `entity`; the object name is its param key.
    pub fn new(entity: &'a dyn Entity, translator: &'a dyn Translator) -> Result<Self> {
        Ok(Self {
            ctx: FormContext::new(entity, translator)?,
        })
    }

    pub(crate) fn from_context(ctx: FormContext<'a>) -> Self {
        Self { ctx }
    }

    /// Replaces the object name (`appeal[penalty]`).
    pub fn with_object_name(self, object_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            ctx: self.ctx.with_object_name(object_name)?,
        })
    }

    /// Uses a custom theme.
    #[must_use]
    pub fn with_theme(self, theme: &'a FormTheme) -> Self {
        Self {
            ctx: self.ctx.with_theme(theme),
        }
    }

    /// The object name inputs are named under.
    pub fn object_name(&self) -> &str {
        self.ctx.object_name()
    }

    /// The render context.
    pub fn context(&self) -> &FormContext<'a> {
        &self.ctx
    }

    /// Builder for a single nested entity (`person[address_attributes]`).
    pub fn fields_for<'b>(&'b self, field: &str, child: &'b dyn Entity) -> Result<FormBuilder<'b>> {
        let object_name = format!("{}[{field}_attributes]", self.ctx.object_name());
        debug!(%object_name, "nested form builder");
        Ok(FormBuilder {
            ctx: self.ctx.nested(object_name, child)?,
        })
    }

    /// Builder for one element of a nested collection
    /// (`case[subcases_attributes][0]`).
    pub fn fields_for_index<'b>(
        &'b self,
        field: &str,
        index: usize,
        child: &'b dyn Entity,
    ) -> Result<FormBuilder<'b>> {
        let object_name = format!("{}[{field}_attributes][{index}]", self.ctx.object_name());
        debug!(%object_name, "nested form builder");
        Ok(FormBuilder {
            ctx: self.ctx.nested(object_name, child)?,
        })
    }

    /// Decorates `attribute` without wrapping it, for custom layouts.
    pub fn decorate(
        &self,
        attribute: &str,
        widget: &dyn Widget,
        options: &FieldOptions,
    ) -> Result<DecoratedField> {
        FieldDecorator::new(&self.ctx).decorate(attribute, widget, options)
    }

    fn field(&self, attribute: &str, widget: &dyn Widget, options: &FieldOptions) -> Result<String> {
        Ok(self.decorate(attribute, widget, options)?.render())
    }

    /// Text input.
    pub fn text_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::text(), options)
    }

    /// Email input.
    pub fn email_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::email(), options)
    }

    /// Password input.
    pub fn password_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::password(), options)
    }

    /// Number input.
    pub fn number_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::number(), options)
    }

    /// Telephone input.
    pub fn phone_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::tel(), options)
    }

    /// Telephone input.
    pub fn telephone_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.phone_field(attribute, options)
    }

    /// Range input.
    pub fn range_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::range(), options)
    }

    /// Search input.
    pub fn search_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::search(), options)
    }

    /// URL input.
    pub fn url_field(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextInput::url(), options)
    }

    /// Textarea; rows come from `options`.
    pub fn text_area(&self, attribute: &str, options: &FieldOptions) -> Result<String> {
        self.field(attribute, &TextArea::new(options.rows), options)
    }

    /// Dropdown over `choices`, selecting `options.value`.
    pub fn collection_select(
        &self,
        attribute: &str,
        choices: &[Choice],
        options: &FieldOptions,
    ) -> Result<String> {
        let widget = Select::new(
            choices
                .iter()
                .map(|c| (c.value.clone(), c.text.clone().unwrap_or_else(|| c.value.clone())))
                .collect(),
        );
        self.field(attribute, &widget, options)
    }

    /// Radio group over `options.choices` (`yes`/`no` by default).
    pub fn radio_button_fieldset(&self, attribute: &str, options: &FieldsetOptions) -> Result<String> {
        let renderer = FieldsetRenderer::new(&self.ctx);
        let body = renderer.radio_rows(attribute, options)?;
        renderer.render(attribute, &[attribute], options, &body)
    }

    /// Radio group whose rows are added by `body`.
    pub fn radio_button_fieldset_with<F>(
        &self,
        attribute: &str,
        options: &FieldsetOptions,
        body: F,
    ) -> Result<String>
    where
        F: FnOnce(&mut FieldsetScope<'_>) -> Result<()>,
    {
        let mut scope = FieldsetScope::new(&self.ctx, attribute, options);
        body(&mut scope)?;
        FieldsetRenderer::new(&self.ctx).render(attribute, &[attribute], options, &scope.into_markup())
    }

    /// Checkbox group of boolean `attributes` under the legend `legend_key`.
    pub fn check_box_fieldset(
        &self,
        legend_key: &str,
        attributes: &[&str],
        options: &FieldsetOptions,
    ) -> Result<String> {
        let renderer = FieldsetRenderer::new(&self.ctx);
        let body = renderer.check_box_rows(attributes, options)?;
        renderer.render(legend_key, attributes, options, &body)
    }

    /// Checkbox group whose rows are added by `body`.
    pub fn check_box_fieldset_with<F>(
        &self,
        legend_key: &str,
        attributes: &[&str],
        options: &FieldsetOptions,
        body: F,
    ) -> Result<String>
    where
        F: FnOnce(&mut FieldsetScope<'_>) -> Result<()>,
    {
        let mut scope = FieldsetScope::new(&self.ctx, legend_key, options);
        body(&mut scope)?;
        FieldsetRenderer::new(&self.ctx).render(legend_key, attributes, options, &scope.into_markup())
    }

    /// Checkbox group submitting several values of one attribute
    /// (`person[pets][]`).
    pub fn collection_check_boxes(
        &self,
        attribute: &str,
        choices: &[Choice],
        options: &FieldsetOptions,
    ) -> Result<String> {
        let renderer = FieldsetRenderer::new(&self.ctx);
        let body = renderer.collection_check_box_rows(attribute, choices, options)?;
        renderer.render(attribute, &[attribute], options, &body)
    }

    /// Radio group over `choices`.
    pub fn collection_radio_buttons(
        &self,
        attribute: &str,
        choices: &[Choice],
        options: &FieldsetOptions,
    ) -> Result<String> {
        let options = FieldsetOptions {
            choices: choices.to_vec(),
            ..options.clone()
        };
        self.radio_button_fieldset(attribute, &options)
    }

    /// Panel revealed by a row elsewhere on the page.
    pub fn revealing_panel<F>(&self, panel_id: &str, content: F) -> Result<String>
    where
        F: FnOnce(&FormBuilder<'_>) -> Result<String>,
    {
        FieldsetRenderer::new(&self.ctx).panel(panel_id, content)
    }

    /// Error summary of the entity and everything nested in it, `None` when
    /// there are no errors.
    pub fn error_summary(&self, title: &str, description: Option<&str>) -> Result<Option<String>> {
        ErrorSummaryRenderer::new(self.ctx.messages().translator())
            .with_theme(self.ctx.theme())
            .render_at(self.ctx.entity(), self.ctx.path(), title, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldset::ChoiceOptions;
    use crate::i18n::{NullTranslator, Translations};
    use crate::model::Errors;

    struct Person {
        errors: Errors,
    }

    impl Entity for Person {
        fn model_name(&self) -> &str {
            "Person"
        }

        fn errors(&self) -> Option<&Errors> {
            Some(&self.errors)
        }
    }

    fn person(errors: &[(&str, &str)]) -> Person {
        let mut e = Errors::new();
        for (attribute, message) in errors {
            e.add(attribute, *message);
        }
        Person { errors: e }
    }

    #[test]
    fn test_field_helpers_input_types() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let options = FieldOptions::new();
        assert!(form.email_field("email", &options).unwrap().contains(r#"type="email""#));
        assert!(form.password_field("pin", &options).unwrap().contains(r#"type="password""#));
        assert!(form.number_field("age", &options).unwrap().contains(r#"type="number""#));
        assert!(form.phone_field("phone", &options).unwrap().contains(r#"type="tel""#));
        assert!(form.telephone_field("phone", &options).unwrap().contains(r#"type="tel""#));
        assert!(form.range_field("level", &options).unwrap().contains(r#"type="range""#));
        assert!(form.search_field("q", &options).unwrap().contains(r#"type="search""#));
        assert!(form.url_field("site", &options).unwrap().contains(r#"type="url""#));
        assert!(form
            .text_area("bio", &FieldOptions::new().rows(5))
            .unwrap()
            .contains(r#"rows="5""#));
    }

    #[test]
    fn test_object_name_override() {
        let p = person(&[("title", "Title is required")]);
        let form = FormBuilder::new(&p, &NullTranslator)
            .unwrap()
            .with_object_name("appeal[penalty]")
            .unwrap();
        let html = form.text_field("title", &FieldOptions::new()).unwrap();
        assert!(html.contains(r#"name="appeal[penalty][title]""#));
        assert!(html.contains(r#"id="appeal_penalty_title""#));
        assert!(html.contains(r#"id="error_appeal_penalty_title""#));
    }

    #[test]
    fn test_object_name_override_summary_links() {
        let p = person(&[("title", "Title is required")]);
        let form = FormBuilder::new(&p, &NullTranslator)
            .unwrap()
            .with_object_name("appeal[penalty]")
            .unwrap();
        let html = form.text_field("title", &FieldOptions::new()).unwrap();
        let summary = form.error_summary("There was a problem", None).unwrap().unwrap();
        assert!(html.contains(r#"id="error_appeal_penalty_title""#));
        assert!(summary.contains(r##"<a href="#error_appeal_penalty_title">Title is required</a>"##));
        assert!(!summary.contains("error_person_title"));
    }

    #[test]
    fn test_collection_select() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .collection_select(
                "country",
                &[Choice::with_text("gb", "United Kingdom"), Choice::new("fr")],
                &FieldOptions::new().value("fr"),
            )
            .unwrap();
        assert!(html.contains(r#"class="form-group""#));
        assert!(html.contains(r#"for="person_country""#));
        assert!(html.contains("United Kingdom</option>"));
        assert!(html.contains("selected"));
    }

    #[test]
    fn test_radio_fieldset_defaults() {
        let p = person(&[]);
        let t = Translations::new().with("helpers.fieldset.person.has_pets", "Do you have pets?");
        let form = FormBuilder::new(&p, &t).unwrap();
        let html = form
            .radio_button_fieldset("has_pets", &FieldsetOptions::new().inline())
            .unwrap();
        assert!(html.contains(r#"<fieldset class="inline"><legend><span class="form-label-bold">"#));
        assert!(html.contains("</legend>\n<div class=\"multiple-choice\""));
        assert!(html.ends_with("</fieldset></div>"));
        assert!(html.contains("Do you have pets?</span>"));
        assert!(html.contains(r#"id="person_has_pets_yes""#));
        assert!(html.contains(r#"for="person_has_pets_no""#));
        assert!(html.contains(">Yes</label>"));
        assert_eq!(html.matches(r#"class="multiple-choice""#).count(), 2);
    }

    #[test]
    fn test_radio_fieldset_with_error() {
        let p = person(&[("gender", "Gender is required")]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .radio_button_fieldset(
                "gender",
                &FieldsetOptions::new().choices(["female", "male"]).checked("male"),
            )
            .unwrap();
        assert!(html.contains(r#"class="form-group form-group-error""#));
        assert!(html.contains(r#"id="error_person_gender""#));
        assert!(html.contains(
            r#"<span class="error-message" id="error_message_person_gender">Gender is required</span>"#
        ));
        assert_eq!(
            html.matches(r#"aria-describedby="error_message_person_gender""#).count(),
            2
        );
        let male = html.find(r#"value="male""#).unwrap();
        assert!(html[male..].find("checked").is_some());
    }

    #[test]
    fn test_radio_input_with_panel() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .radio_button_fieldset_with("location", &FieldsetOptions::new(), |fieldset| {
                assert_eq!(fieldset.attribute(), "location");
                fieldset.radio_input("ni", &ChoiceOptions::new())?;
                fieldset.radio_input_with_panel("other", &ChoiceOptions::new(), |panel| {
                    panel.text_field("location_other", &FieldOptions::new())
                })
            })
            .unwrap();
        assert!(html.contains(r#"data-target="location_other_panel""#));
        assert!(html.contains(r#"id="location_other_panel""#));
        assert!(html.contains(r#"class="panel panel-border-narrow js-hidden""#));
        assert!(html.contains(r#"id="person_location_other""#));
        assert_eq!(html.matches("data-target").count(), 1);
    }

    #[test]
    fn test_revealing_panel_standalone() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .revealing_panel("contact_panel", |panel| panel.email_field("email", &FieldOptions::new()))
            .unwrap();
        assert!(html.starts_with("<div"));
        assert!(html.contains(r#"class="panel panel-border-narrow js-hidden""#));
        assert!(html.contains(r#"id="contact_panel""#));
        assert!(html.contains(r#"type="email""#));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_check_box_fieldset() {
        let p = person(&[("waste_transport", "Choose at least one")]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .check_box_fieldset(
                "waste_transport",
                &["animal_carcasses", "mines_quarries"],
                &FieldsetOptions::new().checked("mines_quarries"),
            )
            .unwrap();
        assert!(html.contains(r#"id="error_person_waste_transport""#));
        assert!(html.contains("Waste transport</span>"));
        assert!(html.contains(r#"id="error_message_person_waste_transport""#));
        assert!(html.contains(r#"name="person[animal_carcasses]""#));
        assert!(html.contains(r#"for="person_mines_quarries""#));
        assert!(html.contains(">Animal carcasses</label>"));
    }

    #[test]
    fn test_check_box_input_with_panel() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .check_box_fieldset_with("contact", &["email"], &FieldsetOptions::new(), |fieldset| {
                fieldset.check_box_input_with_panel("email", &ChoiceOptions::new(), |panel| {
                    panel.email_field("email_address", &FieldOptions::new())
                })?;
                fieldset.check_box_input("phone", &ChoiceOptions::new().panel_id("phone_panel"))?;
                fieldset.revealing_panel("phone_panel", |panel| {
                    panel.phone_field("phone_number", &FieldOptions::new())
                })
            })
            .unwrap();
        assert!(html.contains(r#"data-target="email_panel""#));
        assert!(html.contains(r#"id="email_panel""#));
        assert!(html.contains(r#"data-target="phone_panel""#));
        assert!(html.contains(r#"id="phone_panel""#));
    }

    #[test]
    fn test_collection_check_boxes_and_radios() {
        let p = person(&[]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let html = form
            .collection_check_boxes(
                "pets",
                &[Choice::with_text("cat", "Cat"), Choice::with_text("dog", "Dog")],
                &FieldsetOptions::new().checked("dog"),
            )
            .unwrap();
        assert!(html.contains(r#"name="person[pets][]""#));
        assert!(html.contains(r#"id="person_pets_cat""#));
        assert_eq!(html.matches(r#"type="checkbox""#).count(), 2);
        assert_eq!(html.matches(r#"type="hidden""#).count(), 1);

        let html = form
            .collection_radio_buttons("size", &["small".into(), "large".into()], &FieldsetOptions::new())
            .unwrap();
        assert!(html.contains(r#"id="person_size_small""#));
        assert!(!html.contains("person_size_yes"));
    }

    #[test]
    fn test_error_summary_from_builder() {
        let p = person(&[("name", "Name is required")]);
        let form = FormBuilder::new(&p, &NullTranslator).unwrap();
        let summary = form.error_summary("There was a problem", None).unwrap().unwrap();
        assert!(summary.contains(r##"href="#error_person_name""##));

        let clean = person(&[]);
        let form = FormBuilder::new(&clean, &NullTranslator).unwrap();
        assert_eq!(form.error_summary("There was a problem", None).unwrap(), None);
    }
}
