//! Translation lookup.
//!
//! Keys follow the Rails conventions the GOV.UK form builders use:
//!
//! | Purpose | Key |
//! |---------|-----|
//! | Label | `helpers.label.<scope>.<attribute>` |
//! | Choice label | `helpers.label.<scope>.<attribute>.<choice>` |
//! | Hint | `helpers.hint.<scope>.<attribute>` |
//! | Legend | `helpers.fieldset.<scope>.<attribute>` |
//! | Error | `activemodel.errors.models.<scope>.attributes.<attribute>.<kind>` |
//!
//! A key suffixed `_html` holds pre-escaped markup and wins over the plain
//! key when both exist.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::widgets::html_escape;

/// Source of translated strings.
///
/// Shared read-only between concurrent renders. Backend failures are
/// returned as errors and reach the caller unchanged.
pub trait Translator: Send + Sync {
    /// Looks up a fully qualified dotted key.
    fn lookup(&self, key: &str) -> Result<Option<String>>;
}

/// A translated string and how it must be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Localized {
    /// Plain text, escaped on output.
    Text(String),
    /// Trusted markup from an `_html` key, embedded as is.
    Html(String),
}

impl Localized {
    /// The raw string, without escaping.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }

    /// Returns whether this came from an `_html` key.
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }

    /// Markup safe to embed in an element body.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Text(s) => html_escape(s),
            Self::Html(s) => s.clone(),
        }
    }
}

/// Looks up `<scope>.<key>`, preferring the `_html` variant.
///
/// Blank translations count as missing.
pub fn translate(
    translator: &dyn Translator,
    scope: &str,
    key: &str,
) -> Result<Option<Localized>> {
    let full_key = format!("{scope}.{key}");
    if let Some(html) = present(translator.lookup(&format!("{full_key}_html"))?) {
        return Ok(Some(Localized::Html(html)));
    }
    let found = present(translator.lookup(&full_key)?).map(Localized::Text);
    if found.is_none() {
        trace!(key = %full_key, "translation missing");
    }
    Ok(found)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Translator that knows no keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn lookup(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Flat store of dotted keys for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses nested JSON such as `{"helpers": {"label": {"person": {"name": "Full name"}}}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Flattens a nested JSON value into dotted keys.
    ///
    /// Strings, numbers and booleans become entries; nulls and arrays are
    /// ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut translations = Self::new();
        flatten(&mut translations.entries, String::new(), value);
        translations
    }

    /// Adds or replaces one key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`Translations::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copies every key of `other` over this store.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns the value of a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(entries: &mut HashMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(entries, full_key, nested);
            }
        }
        Value::String(s) => {
            entries.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            entries.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            entries.insert(prefix, b.to_string());
        }
        Value::Null | Value::Array(_) => {}
    }
}

impl Translator for Translations {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).map(str::to_owned))
    }
}

/// Translations for several locales with a default fallback.
#[derive(Debug, Clone)]
pub struct I18n {
    default_locale: String,
    locales: HashMap<String, Translations>,
}

impl I18n {
    /// Creates an empty catalogue.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            locales: HashMap::new(),
        }
    }

    /// Parses JSON whose top-level keys are locales, as in a Rails locale
    /// file: `{"en": {...}, "cy": {...}}`.
    pub fn from_json_str(default_locale: impl Into<String>, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut i18n = Self::new(default_locale);
        if let Value::Object(map) = value {
            for (locale, tree) in map {
                i18n.add_locale(locale, Translations::from_value(&tree));
            }
        }
        Ok(i18n)
    }

    /// Merges translations into a locale.
    pub fn add_locale(&mut self, locale: impl Into<String>, translations: Translations) {
        self.locales
            .entry(locale.into())
            .or_default()
            .merge(translations);
    }

    /// Builder form of [`I18n::add_locale`].
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, translations: Translations) -> Self {
        self.add_locale(locale, translations);
        self
    }

    /// The default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Translator for `locale`, falling back to the default locale.
    pub fn for_locale(&self, locale: &str) -> LocaleTranslator<'_> {
        LocaleTranslator {
            primary: self.locales.get(locale),
            fallback: self.locales.get(&self.default_locale),
        }
    }

    /// Translator for the default locale.
    pub fn default_translator(&self) -> LocaleTranslator<'_> {
        self.for_locale(&self.default_locale)
    }
}

/// One locale of an [`I18n`] catalogue.
#[derive(Debug, Clone, Copy)]
pub struct LocaleTranslator<'a> {
    primary: Option<&'a Translations>,
    fallback: Option<&'a Translations>,
}

impl Translator for LocaleTranslator<'_> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .primary
            .and_then(|t| t.get(key))
            .or_else(|| self.fallback.and_then(|t| t.get(key)));
        Ok(value.map(str::to_owned))
    }
}
