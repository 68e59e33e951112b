//! # govuk-forms
//!
//! Form markup following GOV.UK Elements: labels, hints, inline error
//! messages, fieldsets and an error summary linking every error to its
//! field.
//!
//! This crate provides:
//! - An entity model with `#[derive(Entity)]` for declaring nested entities
//! - An error collector walking nested (and cyclic) entity graphs
//! - Error summary rendering
//! - Field and fieldset helpers, including revealing panels
//! - Translation lookup with `_html` variants and locale fallback
//!
//! ## Quick Start
//!
//! ```rust
//! use govuk_forms::{Entity, Errors, FieldOptions, FormBuilder, Translations};
//!
//! #[derive(Entity)]
//! struct Address {
//!     #[entity(errors)]
//!     errors: Errors,
//! }
//!
//! #[derive(Entity)]
//! struct Person {
//!     #[entity(errors)]
//!     errors: Errors,
//!     #[entity(nested)]
//!     address: Address,
//! }
//!
//! let mut person = Person {
//!     errors: Errors::new(),
//!     address: Address { errors: Errors::new() },
//! };
//! person.errors.add_kind("name", "blank", "Name is required");
//! person.address.errors.add("postcode", "Postcode is required");
//!
//! let translations = Translations::new().with("helpers.label.person.name", "Full name");
//! let form = FormBuilder::new(&person, &translations).unwrap();
//!
//! let summary = form.error_summary("There was a problem", None).unwrap().unwrap();
//! assert!(summary.contains(r##"<a href="#error_person_name">Full name is required</a>"##));
//! assert!(summary.contains(r##"href="#error_person_address_attributes_postcode""##));
//!
//! let name = form.text_field("name", &FieldOptions::new()).unwrap();
//! assert!(name.contains(r#"id="error_person_name""#));
//!
//! let address = form.fields_for("address", &person.address).unwrap();
//! let postcode = address.text_field("postcode", &FieldOptions::new()).unwrap();
//! assert!(postcode.contains(r#"name="person[address_attributes][postcode]""#));
//! assert!(postcode.contains(r#"id="error_person_address_attributes_postcode""#));
//! ```
//!
//! ## Fieldsets
//!
//! ```rust
//! use govuk_forms::{ChoiceOptions, Entity, Errors, FieldOptions, FieldsetOptions, FormBuilder, NullTranslator};
//!
//! #[derive(Entity)]
//! struct Person {
//!     #[entity(errors)]
//!     errors: Errors,
//! }
//!
//! let person = Person { errors: Errors::new() };
//! let form = FormBuilder::new(&person, &NullTranslator).unwrap();
//!
//! let html = form
//!     .radio_button_fieldset_with("location", &FieldsetOptions::new(), |fieldset| {
//!         fieldset.radio_input("england", &ChoiceOptions::new())?;
//!         fieldset.radio_input_with_panel("other", &ChoiceOptions::new(), |panel| {
//!             panel.text_field("location_other", &FieldOptions::new())
//!         })
//!     })
//!     .unwrap();
//! assert!(html.contains(r#"data-target="location_other_panel""#));
//! ```

extern crate self as govuk_forms;

mod anchor;
mod builder;
mod collector;
mod config;
mod context;
mod decorator;
mod error;
mod fieldset;
mod i18n;
pub mod inflector;
mod messages;
mod model;
mod summary;
pub mod widgets;

pub use anchor::AnchorPath;
pub use builder::FormBuilder;
pub use collector::{ErrorCollector, ErrorEntry};
pub use config::FormTheme;
pub use context::{FieldContext, FormContext};
pub use decorator::{DecoratedField, FieldDecorator, FieldOptions};
pub use error::{FormError, Result};
pub use fieldset::{Choice, ChoiceOptions, FieldsetOptions, FieldsetRenderer, FieldsetScope};
pub use govuk_forms_derive::Entity;
pub use i18n::{translate, I18n, Localized, LocaleTranslator, NullTranslator, Translations, Translator};
pub use messages::MessageResolver;
pub use model::{Entity, ErrorDetail, Errors, Nested, NestedEntities, NestedVisitor};
pub use summary::{error_summary, ErrorSummaryRenderer};
