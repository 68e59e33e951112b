//! Error collection across a graph of nested entities.

use std::collections::HashSet;

use tracing::debug;

use crate::anchor::AnchorPath;
use crate::error::Result;
use crate::i18n::Translator;
use crate::messages::MessageResolver;
use crate::model::{Entity, EntityKey, Nested};

/// One error to list in a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Link target (`error_person_name`), the id of the field's form group.
    pub anchor_id: String,
    /// Id of the input control (`person_name`).
    pub field_id: String,
    /// Attribute name on the owning entity.
    pub attribute: String,
    /// Localized message text.
    pub message: String,
}

/// Entities already walked in one traversal.
#[derive(Debug, Default)]
struct VisitedSet {
    seen: HashSet<EntityKey>,
}

impl VisitedSet {
    /// Records `entity`; returns `false` if it was already recorded.
    fn insert(&mut self, entity: &dyn Entity) -> bool {
        self.seen.insert(EntityKey::of(entity))
    }
}

/// Collects every error of an entity and of its nested entities.
///
/// Entries come out depth-first: an entity's own attributes in check order,
/// then each nested field in declaration order. Each entity is walked at
/// most once per call, so back references and shared children terminate;
/// the first path that reaches an entity decides its anchors.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCollector<'t> {
    messages: MessageResolver<'t>,
}

impl<'t> ErrorCollector<'t> {
    /// Creates a collector translating messages with `translator`.
    pub fn new(translator: &'t dyn Translator) -> Self {
        Self {
            messages: MessageResolver::new(translator),
        }
    }

    /// Returns the errors reachable from `entity`, empty for `None`.
    pub fn collect(&self, entity: Option<&dyn Entity>) -> Result<Vec<ErrorEntry>> {
        match entity {
            Some(entity) => self.collect_at(entity, &AnchorPath::root(entity)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the errors reachable from `entity`, with ids under `path`
    /// instead of the entity's own param key.
    pub fn collect_at(&self, entity: &dyn Entity, path: &AnchorPath) -> Result<Vec<ErrorEntry>> {
        let mut visited = VisitedSet::default();
        let mut entries = Vec::new();
        self.walk(entity, path, &mut visited, &mut entries)?;
        debug!(
            model = entity.model_name(),
            prefix = path.prefix(),
            errors = entries.len(),
            "collected errors"
        );
        Ok(entries)
    }

    fn walk(
        &self,
        entity: &dyn Entity,
        path: &AnchorPath,
        visited: &mut VisitedSet,
        entries: &mut Vec<ErrorEntry>,
    ) -> Result<()> {
        if !visited.insert(entity) {
            debug!(
                model = entity.model_name(),
                prefix = path.prefix(),
                "entity already visited, skipping"
            );
            return Ok(());
        }

        if let Some(errors) = entity.errors() {
            let scope = entity.i18n_scope();
            for (attribute, details) in errors.iter() {
                let anchor_id = path.anchor_id(attribute)?;
                let field_id = path.field_id(attribute)?;
                for detail in details {
                    entries.push(ErrorEntry {
                        anchor_id: anchor_id.clone(),
                        field_id: field_id.clone(),
                        attribute: attribute.to_string(),
                        message: self.messages.full_message(&scope, attribute, detail)?,
                    });
                }
            }
        }

        entity.visit_nested(&mut |nested: Nested<'_>| {
            let child_path = path.child(&nested)?;
            self.walk(nested.entity, &child_path, visited, entries)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::NullTranslator;
    use crate::model::{Errors, NestedEntities, NestedVisitor};

    struct Node {
        name: &'static str,
        errors: Errors,
        children: Vec<Node>,
    }

    impl Entity for Node {
        fn model_name(&self) -> &str {
            self.name
        }

        fn errors(&self) -> Option<&Errors> {
            Some(&self.errors)
        }

        fn visit_nested(&self, visit: &mut NestedVisitor<'_>) -> Result<()> {
            for child in &self.children {
                child.visit_as("child", None, visit)?;
            }
            Ok(())
        }
    }

    impl NestedEntities for Node {
        fn visit_as(
            &self,
            field: &str,
            index: Option<usize>,
            visit: &mut NestedVisitor<'_>,
        ) -> Result<()> {
            visit(Nested {
                field,
                index,
                entity: self,
            })
        }
    }

    fn node(name: &'static str, messages: &[(&str, &str)], children: Vec<Node>) -> Node {
        let mut errors = Errors::new();
        for (attribute, message) in messages {
            errors.add(attribute, *message);
        }
        Node {
            name,
            errors,
            children,
        }
    }

    #[test]
    fn test_absent_entity_collects_nothing() {
        let collector = ErrorCollector::new(&NullTranslator);
        assert!(collector.collect(None).unwrap().is_empty());
    }

    #[test]
    fn test_all_messages_emitted_in_order() {
        let root = node(
            "Person",
            &[("name", "Name is required"), ("name", "Name is too short"), ("age", "Age is invalid")],
            vec![node("Pet", &[("kind", "Kind is required")], Vec::new())],
        );
        let entries = ErrorCollector::new(&NullTranslator)
            .collect(Some(&root))
            .unwrap();

        let anchors: Vec<&str> = entries.iter().map(|e| e.anchor_id.as_str()).collect();
        assert_eq!(
            anchors,
            vec![
                "error_person_name",
                "error_person_name",
                "error_person_age",
                "error_person_child_attributes_kind",
            ]
        );
        assert_eq!(entries[1].message, "Name is too short");
        assert_eq!(entries[3].field_id, "person_child_attributes_kind");
    }

    #[test]
    fn test_clean_parent_contributes_children() {
        let root = node(
            "Person",
            &[],
            vec![node("Address", &[("postcode", "Postcode is required")], Vec::new())],
        );
        let entries = ErrorCollector::new(&NullTranslator)
            .collect(Some(&root))
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attribute, "postcode");
    }

    #[test]
    fn test_collect_is_deterministic() {
        let root = node(
            "Person",
            &[("name", "Name is required")],
            vec![
                node("Address", &[("postcode", "Postcode is required")], Vec::new()),
                node("Address", &[("town", "Town is required")], Vec::new()),
            ],
        );
        let collector = ErrorCollector::new(&NullTranslator);
        assert_eq!(
            collector.collect(Some(&root)).unwrap(),
            collector.collect(Some(&root)).unwrap()
        );
    }

    #[test]
    fn test_collect_at_uses_given_prefix() {
        let root = node(
            "Person",
            &[("name", "Name is required")],
            vec![node("Pet", &[("kind", "Kind is required")], Vec::new())],
        );
        let path = AnchorPath::from_object_name("appeal[penalty]").unwrap();
        let entries = ErrorCollector::new(&NullTranslator)
            .collect_at(&root, &path)
            .unwrap();
        assert_eq!(entries[0].anchor_id, "error_appeal_penalty_name");
        assert_eq!(entries[1].field_id, "appeal_penalty_child_attributes_kind");
    }

    #[test]
    fn test_malformed_attribute_fails() {
        let root = node("Person", &[("full name", "Full name is required")], Vec::new());
        assert!(ErrorCollector::new(&NullTranslator)
            .collect(Some(&root))
            .is_err());
    }
}
