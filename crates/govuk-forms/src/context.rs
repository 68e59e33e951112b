//! Render-call context shared by the field and fieldset helpers.

use crate::anchor::AnchorPath;
use crate::config::FormTheme;
use crate::error::Result;
use crate::i18n::{Localized, Translator};
use crate::messages::MessageResolver;
use crate::model::Entity;
use crate::widgets::{html_escape, render_span};

/// Everything a helper needs to know about the form it renders into.
///
/// Built per form (and per nested `fields_for` scope). Holds only shared
/// references, so concurrent renders each work on their own context.
#[derive(Clone)]
pub struct FormContext<'a> {
    entity: &'a dyn Entity,
    messages: MessageResolver<'a>,
    theme: &'a FormTheme,
    object_name: String,
    path: AnchorPath,
    scope: String,
}

impl std::fmt::Debug for FormContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContext")
            .field("model", &self.entity.model_name())
            .field("object_name", &self.object_name)
            .field("path", &self.path)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<'a> FormContext<'a> {
    /// Context for a root entity; the object name is its param key.
    pub fn new(entity: &'a dyn Entity, translator: &'a dyn Translator) -> Result<Self> {
        let object_name = entity.param_key();
        Ok(Self {
            entity,
            messages: MessageResolver::new(translator),
            theme: FormTheme::default_ref(),
            path: AnchorPath::from_object_name(&object_name)?,
            object_name,
            scope: entity.i18n_scope(),
        })
    }

    /// Replaces the object name used for input names and ids.
    pub fn with_object_name(mut self, object_name: impl Into<String>) -> Result<Self> {
        let object_name = object_name.into();
        self.path = AnchorPath::from_object_name(&object_name)?;
        self.object_name = object_name;
        Ok(self)
    }

    /// Uses a custom theme.
    #[must_use]
    pub fn with_theme(mut self, theme: &'a FormTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Context for a nested entity rendered under `object_name`.
    pub fn nested<'b>(&'b self, object_name: String, child: &'b dyn Entity) -> Result<FormContext<'b>> {
        Ok(FormContext {
            entity: child,
            messages: self.messages,
            theme: self.theme,
            path: AnchorPath::from_object_name(&object_name)?,
            object_name,
            scope: child.i18n_scope(),
        })
    }

    /// The entity being rendered.
    pub fn entity(&self) -> &'a dyn Entity {
        self.entity
    }

    /// Label, hint and message lookup.
    pub fn messages(&self) -> MessageResolver<'a> {
        self.messages
    }

    /// The theme.
    pub fn theme(&self) -> &'a FormTheme {
        self.theme
    }

    /// Object name (`person`, `person[address_attributes]`).
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Id prefix derived from the object name.
    pub fn path(&self) -> &AnchorPath {
        &self.path
    }

    /// Translation scope of the entity.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Name attribute of an input (`person[name]`).
    pub fn input_name(&self, attribute: &str) -> String {
        format!("{}[{attribute}]", self.object_name)
    }

    /// Returns whether the entity exposes errors and has one for `attribute`.
    pub fn has_error(&self, attribute: &str) -> bool {
        self.entity.has_errors_for(attribute)
    }

    /// Localized text of the first error on `attribute`.
    pub fn first_error_message(&self, attribute: &str) -> Result<Option<String>> {
        match self.entity.error_details(attribute).first() {
            Some(detail) => Ok(Some(
                self.messages.full_message(&self.scope, attribute, detail)?,
            )),
            None => Ok(None),
        }
    }

    /// Label text for `attribute`.
    pub fn label(&self, attribute: &str) -> Result<Localized> {
        self.messages.label(&self.scope, attribute)
    }

    /// Hint span for `attribute`, if a hint is translated.
    pub fn hint_markup(&self, attribute: &str) -> Result<Option<String>> {
        Ok(self
            .messages
            .hint(&self.scope, attribute)?
            .map(|hint| render_span(&self.theme.form_hint, None, &hint.to_markup())))
    }

    /// Inline error span for `attribute`, if it has an error.
    pub fn error_markup(&self, attribute: &str) -> Result<Option<String>> {
        let Some(message) = self.first_error_message(attribute)? else {
            return Ok(None);
        };
        let id = self.path.message_id(attribute)?;
        Ok(Some(render_span(
            &self.theme.error_message,
            Some(&id),
            &html_escape(&message),
        )))
    }
}

/// Per-call state of one decorated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Attribute being rendered.
    pub attribute: String,
    /// Whether the attribute has an error.
    pub has_error: bool,
    /// Input name.
    pub name: String,
    /// Input id.
    pub field_id: String,
    /// Form group id when the attribute has an error.
    pub anchor_id: Option<String>,
    /// Inline error text id when the attribute has an error.
    pub message_id: Option<String>,
}

impl FieldContext {
    /// Computes names and ids of `attribute` within `form`.
    pub fn new(form: &FormContext<'_>, attribute: &str) -> Result<Self> {
        let has_error = form.has_error(attribute);
        let path = form.path();
        Ok(Self {
            attribute: attribute.to_string(),
            has_error,
            name: form.input_name(attribute),
            field_id: path.field_id(attribute)?,
            anchor_id: if has_error {
                Some(path.anchor_id(attribute)?)
            } else {
                None
            },
            message_id: if has_error {
                Some(path.message_id(attribute)?)
            } else {
                None
            },
        })
    }
}
