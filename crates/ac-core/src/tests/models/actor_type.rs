use crate::{ActorType, CoreError};

use std::str::FromStr;

#[test]
fn test_actor_type_from_str_is_case_insensitive() {
    assert_eq!(ActorType::from_str("group").unwrap(), ActorType::Group);
    assert_eq!(ActorType::from_str("PERSON").unwrap(), ActorType::Person);
}

#[test]
fn test_actor_type_from_str_invalid() {
    let result = ActorType::from_str("robot");
    assert!(matches!(result, Err(CoreError::InvalidActorType { .. })));
}

#[test]
fn test_actor_type_predicates() {
    assert!(ActorType::Group.is_group());
    assert!(!ActorType::Group.is_person());
    assert!(ActorType::default().is_person());
}

#[test]
fn test_actor_type_typename() {
    assert_eq!(ActorType::Person.typename(), "Person");
    assert_eq!(ActorType::Group.typename(), "Group");
}
