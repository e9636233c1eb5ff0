use crate::{Actor, IdentitySet};

fn set(ids: &[&str]) -> IdentitySet {
    ids.iter().map(|id| Actor::with_id(*id)).collect::<Vec<_>>().into()
}

#[test]
fn given_persisted_id_in_set_when_select_then_matching_actor() {
    let identities = set(&["7", "42"]);
    let selected = identities.select_active(Some("42")).unwrap();
    assert_eq!(selected.valid_id(), Some("42"));
}

#[test]
fn given_unknown_persisted_id_when_select_then_first_actor() {
    let identities = set(&["B", "C"]);
    let selected = identities.select_active(Some("Z")).unwrap();
    assert_eq!(selected.valid_id(), Some("B"));
}

#[test]
fn given_no_persisted_id_when_select_then_first_actor() {
    let identities = set(&["B", "C"]);
    assert_eq!(identities.select_active(None).unwrap().valid_id(), Some("B"));
}

#[test]
fn given_empty_set_when_select_then_none() {
    let identities = IdentitySet::default();
    assert!(identities.is_empty());
    assert!(identities.select_active(Some("1")).is_none());
}

#[test]
fn given_json_array_when_deserialize_then_transparent() {
    let identities: IdentitySet =
        serde_json::from_str(r#"[{"id":"1","preferredUsername":"a"},{"id":"2"}]"#).unwrap();
    assert_eq!(identities.len(), 2);
    assert_eq!(identities.find("2").unwrap().valid_id(), Some("2"));
}
