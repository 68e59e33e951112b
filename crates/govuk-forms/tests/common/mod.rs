#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use govuk_forms::{Entity, Errors, FormError, I18n, Result, Translator};

#[derive(Debug, Default, Entity)]
pub struct Country {
    #[entity(errors)]
    pub errors: Errors,
    pub name: String,
}

#[derive(Debug, Default, Entity)]
pub struct Address {
    #[entity(errors)]
    pub errors: Errors,
    #[entity(nested)]
    pub country: Option<Country>,
    pub postcode: String,
}

#[derive(Debug, Default, Entity)]
pub struct Person {
    #[entity(errors)]
    pub errors: Errors,
    #[entity(nested)]
    pub address: Option<Address>,
    pub name: String,
}

/// Holds a back reference to its owning case and no errors of its own.
#[derive(Debug, Default, Entity)]
pub struct StateMachine {
    #[entity(nested)]
    pub object: Weak<RefCell<Case>>,
}

#[derive(Debug, Default, Entity)]
pub struct Case {
    #[entity(errors)]
    pub errors: Errors,
    #[entity(nested)]
    pub state_machine: Option<StateMachine>,
    #[entity(nested)]
    pub subcases: Vec<Case>,
}

#[derive(Debug, Default, Entity)]
pub struct Household {
    #[entity(nested)]
    pub members: Vec<Rc<RefCell<Person>>>,
}

#[derive(Debug, Default, Entity)]
#[entity(model_name = "Steps::Appeal::Penalty")]
pub struct Penalty {
    #[entity(errors)]
    pub errors: Errors,
}

pub fn blank(errors: &mut Errors, attribute: &str, label: &str) {
    errors.add_kind(attribute, "blank", format!("{label} is required"));
}

pub fn person_missing_name() -> Person {
    let mut person = Person::default();
    blank(&mut person.errors, "name", "Name");
    person
}

pub fn person_missing_postcode() -> Person {
    let mut address = Address::default();
    blank(&mut address.errors, "postcode", "Postcode");
    Person {
        address: Some(address),
        ..Person::default()
    }
}

pub fn person_missing_country_name() -> Person {
    let mut country = Country::default();
    blank(&mut country.errors, "name", "Name");
    Person {
        address: Some(Address {
            country: Some(country),
            ..Address::default()
        }),
        ..Person::default()
    }
}

/// A case whose state machine points back at the case itself.
pub fn self_referencing_case() -> Rc<RefCell<Case>> {
    let case = Rc::new(RefCell::new(Case::default()));
    {
        let mut inner = case.borrow_mut();
        blank(&mut inner.errors, "name", "Name");
        inner.state_machine = Some(StateMachine {
            object: Rc::downgrade(&case),
        });
    }
    case
}

pub fn case_with_subcases() -> Case {
    let mut root = Case::default();
    blank(&mut root.errors, "name", "Name");
    for _ in 0..2 {
        let mut subcase = Case::default();
        blank(&mut subcase.errors, "name", "Name");
        root.subcases.push(subcase);
    }
    root
}

pub const LOCALES: &str = r#"{
    "en": {
        "helpers": {
            "label": {
                "person": {
                    "name": "Full name",
                    "gender": {"female": "Woman", "male": "Man"}
                },
                "address": {"postcode": "Postcode"},
                "steps": {"appeal": {"penalty": {"amount": "Penalty amount"}}}
            },
            "hint": {
                "person": {"name": "As shown on your passport"}
            },
            "fieldset": {
                "person": {"gender": "What is your gender?"}
            }
        }
    },
    "cy": {
        "helpers": {
            "label": {
                "person": {"name": "Enw llawn"}
            }
        },
        "activemodel": {
            "errors": {
                "models": {
                    "person": {
                        "attributes": {
                            "name": {"blank": "Rhowch eich enw llawn"}
                        }
                    }
                }
            }
        }
    }
}"#;

pub fn i18n() -> I18n {
    I18n::from_json_str("en", LOCALES).unwrap_or_else(|e| panic!("invalid locales: {e}"))
}

/// Translator whose backend is down.
pub struct FailingTranslator;

impl Translator for FailingTranslator {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Err(FormError::Translation {
            key: key.to_string(),
            message: "backend unavailable".to_string(),
        })
    }
}
