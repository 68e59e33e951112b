//! Element ids linking summary entries to their inputs.
//!
//! Every attribute rendered on a form gets three ids, all derived from the
//! same prefix:
//!
//! - `field_id` (`person_address_attributes_postcode`) on the input,
//! - `anchor_id` (`error_person_address_attributes_postcode`) on the
//!   form group, the target of the error summary link,
//! - `message_id` (`error_message_person_address_attributes_postcode`) on the
//!   inline error text, referenced by the input's `aria-describedby`.
//!
//! The prefix is built the same way by the error collector (walking nested
//! entities) and by the form builder (parsing `person[address_attributes]`
//! object names), so the ids always agree.

use crate::error::{FormError, Result};
use crate::inflector::sanitize_value;
use crate::model::{Entity, Nested};

const ANCHOR_PREFIX: &str = "error";
const MESSAGE_PREFIX: &str = "error_message";

/// Normalized id prefix for one entity within a rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorPath {
    prefix: String,
}

impl AnchorPath {
    /// Creates a path from an already normalized prefix.
    pub fn new(prefix: &str) -> Result<Self> {
        check_fragment(prefix)?;
        Ok(Self {
            prefix: prefix.to_string(),
        })
    }

    /// Path of a root entity.
    pub fn root(entity: &dyn Entity) -> Result<Self> {
        Self::new(&entity.param_key())
    }

    /// Parses a form object name such as `person[address_attributes]`.
    ///
    /// Brackets become underscores, runs of underscores are squeezed and
    /// trailing underscores dropped.
    pub fn from_object_name(object_name: &str) -> Result<Self> {
        let mut prefix = String::with_capacity(object_name.len());
        for c in object_name.chars() {
            let c = if c == '[' || c == ']' { '_' } else { c };
            if c == '_' && prefix.ends_with('_') {
                continue;
            }
            prefix.push(c);
        }
        while prefix.ends_with('_') {
            prefix.pop();
        }
        Self::new(&prefix)
    }

    /// Path of an entity held by a single-valued nested field.
    pub fn nested(&self, field: &str) -> Result<Self> {
        check_fragment(field)?;
        Ok(Self {
            prefix: format!("{}_{field}_attributes", self.prefix),
        })
    }

    /// Path of the entity at `index` in a collection-valued nested field.
    pub fn nested_index(&self, field: &str, index: usize) -> Result<Self> {
        check_fragment(field)?;
        Ok(Self {
            prefix: format!("{}_{field}_attributes_{index}", self.prefix),
        })
    }

    /// Path of a nested entity reached during traversal.
    pub fn child(&self, nested: &Nested<'_>) -> Result<Self> {
        match nested.index {
            Some(index) => self.nested_index(nested.field, index),
            None => self.nested(nested.field),
        }
    }

    /// The normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Id of the input control for `attribute`.
    pub fn field_id(&self, attribute: &str) -> Result<String> {
        check_fragment(attribute)?;
        Ok(format!("{}_{attribute}", self.prefix))
    }

    /// Id of the input for one `value` of `attribute` (`person_gender_female`).
    pub fn choice_id(&self, attribute: &str, value: &str) -> Result<String> {
        let suffix = sanitize_value(value);
        if suffix.is_empty() {
            return Err(FormError::malformed(value, "value has no characters usable in an id"));
        }
        check_fragment(&suffix)?;
        Ok(format!("{}_{suffix}", self.field_id(attribute)?))
    }

    /// Id of the form group, targeted by error summary links.
    pub fn anchor_id(&self, attribute: &str) -> Result<String> {
        Ok(format!("{ANCHOR_PREFIX}_{}", self.field_id(attribute)?))
    }

    /// Id of the inline error text.
    pub fn message_id(&self, attribute: &str) -> Result<String> {
        Ok(format!("{MESSAGE_PREFIX}_{}", self.field_id(attribute)?))
    }
}

pub(crate) fn check_fragment(fragment: &str) -> Result<()> {
    if fragment.is_empty() {
        return Err(FormError::malformed(fragment, "empty fragment"));
    }
    if let Some(c) = fragment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(FormError::malformed(
            fragment,
            format!("character {c:?} is not allowed in an element id"),
        ));
    }
    Ok(())
}
