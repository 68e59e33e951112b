//! Validatable entities and their error state.
//!
//! The validation engine is external: it fills an [`Errors`] collection on
//! each entity, and this crate only reads it back. Nested entities are
//! declared explicitly through [`Entity::visit_nested`], usually generated by
//! `#[derive(Entity)]`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{FormError, Result};
use crate::inflector;

/// One validation failure on one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Validation engine error key (e.g. `blank`), used for translation.
    pub kind: Option<String>,
    /// Default full message produced by the validation engine.
    pub message: String,
}

impl ErrorDetail {
    /// Creates a detail without an error key.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
        }
    }

    /// Creates a detail with an error key.
    pub fn with_kind(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            message: message.into(),
        }
    }
}

/// Validation errors keyed by attribute, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, Vec<ErrorDetail>)>,
}

impl Errors {
    /// Creates an empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message for an attribute.
    pub fn add(&mut self, attribute: &str, message: impl Into<String>) {
        self.push(attribute, ErrorDetail::new(message));
    }

    /// Adds a message with its error key for an attribute.
    pub fn add_kind(
        &mut self,
        attribute: &str,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(attribute, ErrorDetail::with_kind(kind, message));
    }

    /// Adds a prepared detail for an attribute.
    pub fn push(&mut self, attribute: &str, detail: ErrorDetail) {
        match self.entries.iter_mut().find(|(name, _)| name == attribute) {
            Some((_, details)) => details.push(detail),
            None => self.entries.push((attribute.to_string(), vec![detail])),
        }
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns whether no attribute has a message.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, details)| details.is_empty())
    }

    /// Returns the total number of messages.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, details)| details.len()).sum()
    }

    /// Returns whether the attribute has at least one message.
    pub fn has_errors_for(&self, attribute: &str) -> bool {
        !self.for_attribute(attribute).is_empty()
    }

    /// Returns the details recorded for an attribute.
    pub fn for_attribute(&self, attribute: &str) -> &[ErrorDetail] {
        self.entries
            .iter()
            .find(|(name, _)| name == attribute)
            .map_or(&[][..], |(_, details)| details.as_slice())
    }

    /// Returns the default messages recorded for an attribute.
    pub fn full_messages_for(&self, attribute: &str) -> Vec<&str> {
        self.for_attribute(attribute)
            .iter()
            .map(|d| d.message.as_str())
            .collect()
    }

    /// Iterates attributes with at least one message, in check order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ErrorDetail])> {
        self.entries
            .iter()
            .filter(|(_, details)| !details.is_empty())
            .map(|(name, details)| (name.as_str(), details.as_slice()))
    }
}

/// A nested entity reached through a declared field.
#[derive(Clone, Copy)]
pub struct Nested<'a> {
    /// Field name on the owning entity.
    pub field: &'a str,
    /// Position within a collection-valued field.
    pub index: Option<usize>,
    /// The nested entity.
    pub entity: &'a dyn Entity,
}

impl std::fmt::Debug for Nested<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nested")
            .field("field", &self.field)
            .field("index", &self.index)
            .field("model", &self.entity.model_name())
            .finish()
    }
}

/// Callback receiving each nested entity during traversal.
pub type NestedVisitor<'v> = dyn FnMut(Nested<'_>) -> Result<()> + 'v;

/// A validatable domain object.
pub trait Entity {
    /// Type name, `::` namespaced (e.g. `Steps::Appeal::Penalty`).
    fn model_name(&self) -> &str;

    /// Error state, or `None` when this entity does not expose errors.
    fn errors(&self) -> Option<&Errors> {
        None
    }

    /// Visits every declared nested entity in declaration order.
    fn visit_nested(&self, visit: &mut NestedVisitor<'_>) -> Result<()> {
        let _ = visit;
        Ok(())
    }

    /// Lower-snake-case key used for ids and input names.
    fn param_key(&self) -> String {
        inflector::param_key(self.model_name())
    }

    /// Dotted translation scope.
    fn i18n_scope(&self) -> String {
        inflector::i18n_scope(self.model_name())
    }

    /// Returns whether this entity itself has any error.
    fn has_errors(&self) -> bool {
        self.errors().is_some_and(|e| !e.is_empty())
    }

    /// Returns whether `attribute` has at least one message.
    fn has_errors_for(&self, attribute: &str) -> bool {
        self.errors().is_some_and(|e| e.has_errors_for(attribute))
    }

    /// Returns the details recorded for `attribute`.
    fn error_details(&self, attribute: &str) -> &[ErrorDetail] {
        match self.errors() {
            Some(errors) => errors.for_attribute(attribute),
            None => &[],
        }
    }
}

/// Identity of an entity for the duration of one traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct EntityKey {
    address: usize,
    model: String,
}

impl EntityKey {
    pub(crate) fn of(entity: &dyn Entity) -> Self {
        Self {
            address: std::ptr::from_ref(entity).cast::<()>() as usize,
            model: entity.model_name().to_string(),
        }
    }
}

/// Values that hold zero or more nested entities.
///
/// Implemented by `#[derive(Entity)]` for the entity itself, and here for the
/// containers a nested field is commonly declared with.
pub trait NestedEntities {
    /// Hands each contained entity to `visit`, tagged with `field` and `index`.
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()>;
}

impl<T: NestedEntities> NestedEntities for Option<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        match self {
            Some(value) => value.visit_as(field, index, visit),
            None => Ok(()),
        }
    }
}

/// Elements are visited with their position as index.
///
/// A collection placed directly inside another (`Vec<Vec<T>>`) has no
/// `field_attributes_<i>` form name and fails with `MalformedAnchorPath`.
impl<T: NestedEntities> NestedEntities for Vec<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        if let Some(outer) = index {
            return Err(FormError::malformed(
                field,
                format!("element {outer} is itself a collection"),
            ));
        }
        for (i, item) in self.iter().enumerate() {
            item.visit_as(field, Some(i), visit)?;
        }
        Ok(())
    }
}

impl<T: NestedEntities + ?Sized> NestedEntities for Box<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        (**self).visit_as(field, index, visit)
    }
}

impl<T: NestedEntities + ?Sized> NestedEntities for Rc<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        (**self).visit_as(field, index, visit)
    }
}

impl<T: NestedEntities + ?Sized> NestedEntities for Arc<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        (**self).visit_as(field, index, visit)
    }
}

impl<T: NestedEntities> NestedEntities for RefCell<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        let value = self
            .try_borrow()
            .map_err(|e| FormError::EntityUnavailable {
                field: field.to_string(),
                reason: e.to_string(),
            })?;
        value.visit_as(field, index, visit)
    }
}

impl<T: NestedEntities> NestedEntities for std::rc::Weak<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        match self.upgrade() {
            Some(value) => value.visit_as(field, index, visit),
            None => Ok(()),
        }
    }
}

impl<T: NestedEntities> NestedEntities for std::sync::Weak<T> {
    fn visit_as(
        &self,
        field: &str,
        index: Option<usize>,
        visit: &mut NestedVisitor<'_>,
    ) -> Result<()> {
        match self.upgrade() {
            Some(value) => value.visit_as(field, index, visit),
            None => Ok(()),
        }
    }
}
