//! CSS classes and fixed ids used in generated markup.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;

static DEFAULT_THEME: LazyLock<FormTheme> = LazyLock::new(FormTheme::default);

/// Class names and ids for every element the builder emits.
///
/// The defaults are the GOV.UK Elements names. Any subset can be overridden
/// from JSON; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormTheme {
    pub form_group: String,
    pub form_group_error: String,
    pub form_control: String,
    pub form_control_error: String,
    pub form_label: String,
    pub form_label_bold: String,
    pub form_hint: String,
    pub error_message: String,
    pub multiple_choice: String,
    pub inline_fieldset: String,
    pub panel: String,
    pub error_summary: String,
    pub error_summary_role: String,
    pub error_summary_heading: String,
    pub error_summary_heading_id: String,
    pub error_summary_list: String,
}

impl Default for FormTheme {
    fn default() -> Self {
        Self {
            form_group: "form-group".to_string(),
            form_group_error: "form-group-error".to_string(),
            form_control: "form-control".to_string(),
            form_control_error: "form-control-error".to_string(),
            form_label: "form-label".to_string(),
            form_label_bold: "form-label-bold".to_string(),
            form_hint: "form-hint".to_string(),
            error_message: "error-message".to_string(),
            multiple_choice: "multiple-choice".to_string(),
            inline_fieldset: "inline".to_string(),
            panel: "panel panel-border-narrow js-hidden".to_string(),
            error_summary: "error-summary".to_string(),
            error_summary_role: "alert".to_string(),
            error_summary_heading: "heading-medium error-summary-heading".to_string(),
            error_summary_heading_id: "error-summary-heading".to_string(),
            error_summary_list: "error-summary-list".to_string(),
        }
    }
}

impl FormTheme {
    /// Shared instance of the default theme.
    pub fn default_ref() -> &'static Self {
        &DEFAULT_THEME
    }

    /// Parses a theme from JSON; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Class of a form group wrapper.
    pub fn group_class(&self, has_error: bool) -> String {
        join_classes([
            Some(self.form_group.as_str()),
            has_error.then_some(self.form_group_error.as_str()),
        ])
    }

    /// Class of an input control, caller classes after the defaults.
    pub fn control_class(&self, has_error: bool, extra: &[String]) -> String {
        let defaults = [
            Some(self.form_control.as_str()),
            has_error.then_some(self.form_control_error.as_str()),
        ];
        join_classes(
            defaults
                .into_iter()
                .chain(extra.iter().map(|c| Some(c.as_str()))),
        )
    }
}

/// Joins class names, skipping absent and blank ones.
pub(crate) fn join_classes<'a>(classes: impl IntoIterator<Item = Option<&'a str>>) -> String {
    classes
        .into_iter()
        .flatten()
        .filter(|c| !c.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
