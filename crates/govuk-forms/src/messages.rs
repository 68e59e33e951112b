//! Localized labels, hints, legends and error messages.

use tracing::trace;

use crate::error::Result;
use crate::i18n::{translate, Localized, Translator};
use crate::inflector::default_label;
use crate::model::ErrorDetail;

/// Resolves display text for one translation scope.
///
/// Labels fall back to the humanized attribute name; hints have no fallback.
#[derive(Clone, Copy)]
pub struct MessageResolver<'t> {
    translator: &'t dyn Translator,
}

impl std::fmt::Debug for MessageResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver").finish_non_exhaustive()
    }
}

impl<'t> MessageResolver<'t> {
    /// Creates a resolver backed by `translator`.
    pub fn new(translator: &'t dyn Translator) -> Self {
        Self { translator }
    }

    /// The underlying translator.
    pub fn translator(&self) -> &'t dyn Translator {
        self.translator
    }

    /// Translated label, if one exists.
    pub fn localized_label(&self, scope: &str, attribute: &str) -> Result<Option<Localized>> {
        translate(self.translator, "helpers.label", &format!("{scope}.{attribute}"))
    }

    /// Label text: translation, else the humanized attribute name.
    pub fn label(&self, scope: &str, attribute: &str) -> Result<Localized> {
        Ok(self
            .localized_label(scope, attribute)?
            .unwrap_or_else(|| Localized::Text(default_label(attribute))))
    }

    /// Hint text, absent without a translation.
    pub fn hint(&self, scope: &str, attribute: &str) -> Result<Option<Localized>> {
        translate(self.translator, "helpers.hint", &format!("{scope}.{attribute}"))
    }

    /// Legend text: fieldset translation, else the humanized attribute name.
    pub fn legend(&self, scope: &str, attribute: &str) -> Result<Localized> {
        Ok(
            translate(self.translator, "helpers.fieldset", &format!("{scope}.{attribute}"))?
                .unwrap_or_else(|| Localized::Text(default_label(attribute))),
        )
    }

    /// Display text of one error.
    ///
    /// A translation for the error kind replaces the default message. The
    /// first occurrence of the default label is then replaced by the
    /// translated label; when the default label does not occur, the message
    /// is returned unchanged.
    pub fn full_message(
        &self,
        scope: &str,
        attribute: &str,
        detail: &ErrorDetail,
    ) -> Result<String> {
        let message = match &detail.kind {
            Some(kind) => {
                let key = format!("activemodel.errors.models.{scope}.attributes.{attribute}.{kind}");
                self.translator
                    .lookup(&key)?
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| detail.message.clone())
            }
            None => detail.message.clone(),
        };

        let Some(Localized::Text(label)) = self.localized_label(scope, attribute)? else {
            return Ok(message);
        };
        let default = default_label(attribute);
        if message.contains(&default) {
            Ok(message.replacen(&default, &label, 1))
        } else {
            trace!(%attribute, %message, "default label not found in message");
            Ok(message)
        }
    }
}
