//! Tests for the `#[derive(Entity)]` macro output.

mod common;

use std::sync::Arc;

use common::*;
use govuk_forms::{Entity, ErrorCollector, Errors, FormError, Nested, NullTranslator, Result};

#[derive(Entity)]
struct Marker;

#[derive(Entity)]
#[entity(model_name = "Claims::Claimant")]
struct Claimant {
    #[entity(errors)]
    errors: Errors,
    #[entity(nested, name = "home_address")]
    address: Box<Address>,
    #[entity(nested)]
    previous: Vec<Arc<Address>>,
    #[allow(dead_code)]
    note: String,
}

#[derive(Entity)]
struct Rota {
    #[entity(errors)]
    errors: Errors,
    #[entity(nested)]
    weeks: Vec<Vec<Country>>,
    #[entity(nested)]
    cover: Option<Vec<Country>>,
}

fn nested_fields(entity: &dyn Entity) -> Result<Vec<(String, Option<usize>, String)>> {
    let mut seen = Vec::new();
    entity.visit_nested(&mut |nested: Nested<'_>| {
        seen.push((
            nested.field.to_string(),
            nested.index,
            nested.entity.model_name().to_string(),
        ));
        Ok(())
    })?;
    Ok(seen)
}

#[test]
fn test_default_model_name() {
    let person = Person::default();
    assert_eq!(person.model_name(), "Person");
    assert_eq!(person.param_key(), "person");
    assert!(person.errors().is_some());
}

#[test]
fn test_custom_model_name() {
    let penalty = Penalty::default();
    assert_eq!(penalty.model_name(), "Steps::Appeal::Penalty");
    assert_eq!(penalty.param_key(), "steps_appeal_penalty");
    assert_eq!(penalty.i18n_scope(), "steps.appeal.penalty");
}

#[test]
fn test_entity_without_errors_field() {
    assert!(Marker.errors().is_none());
    assert!(!Marker.has_errors());
    assert!(nested_fields(&Marker).unwrap().is_empty());
    assert!(StateMachine::default().errors().is_none());
}

#[test]
fn test_nested_fields_in_declaration_order() {
    let claimant = Claimant {
        errors: Errors::new(),
        address: Box::default(),
        previous: vec![Arc::default(), Arc::default()],
        note: String::new(),
    };
    assert_eq!(
        nested_fields(&claimant).unwrap(),
        vec![
            ("home_address".to_string(), None, "Address".to_string()),
            ("previous".to_string(), Some(0), "Address".to_string()),
            ("previous".to_string(), Some(1), "Address".to_string()),
        ]
    );
}

#[test]
fn test_absent_optional_child_is_skipped() {
    let person = Person::default();
    assert!(nested_fields(&person).unwrap().is_empty());

    let person = person_missing_postcode();
    assert_eq!(nested_fields(&person).unwrap().len(), 1);
}

#[test]
fn test_dropped_back_reference_is_skipped() {
    let machine = StateMachine::default();
    assert!(nested_fields(&machine).unwrap().is_empty());
}

#[test]
fn test_optional_collection_is_indexed() {
    let rota = Rota {
        errors: Errors::new(),
        weeks: Vec::new(),
        cover: Some(vec![Country::default(), Country::default()]),
    };
    assert_eq!(
        nested_fields(&rota).unwrap(),
        vec![
            ("cover".to_string(), Some(0), "Country".to_string()),
            ("cover".to_string(), Some(1), "Country".to_string()),
        ]
    );
}

#[test]
fn test_collection_of_collections_fails() {
    let rota = Rota {
        errors: Errors::new(),
        weeks: vec![vec![Country::default()], vec![Country::default()]],
        cover: None,
    };
    assert!(matches!(
        nested_fields(&rota),
        Err(FormError::MalformedAnchorPath { .. })
    ));
    assert!(matches!(
        ErrorCollector::new(&NullTranslator).collect(Some(&rota)),
        Err(FormError::MalformedAnchorPath { .. })
    ));
}
