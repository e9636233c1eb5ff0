use crate::{Actor, ActorType};

use serde_json::json;

fn actor(username: &str, name: &str, domain: Option<&str>) -> Actor {
    Actor {
        preferred_username: username.to_string(),
        name: name.to_string(),
        domain: domain.map(String::from),
        ..Actor::with_id("1")
    }
}

#[test]
fn given_remote_actor_when_username_with_domain_then_qualified() {
    let remote = actor("bob", "Bob", Some("other.social"));
    assert_eq!(remote.username_with_domain(None), "bob@other.social");
}

#[test]
fn given_local_actor_when_username_with_domain_then_bare_username() {
    let local = actor("alice", "Alice", None);
    assert_eq!(local.username_with_domain(None), "alice");
}

#[test]
fn given_local_actor_when_forced_host_then_qualified_with_host() {
    let local = actor("alice", "Alice", None);
    assert_eq!(
        local.username_with_domain(Some("events.example")),
        "alice@events.example"
    );
}

#[test]
fn given_no_username_when_username_with_domain_then_empty() {
    let nameless = actor("", "Ghost", Some("x.org"));
    assert_eq!(nameless.username_with_domain(Some("host")), "");
}

#[test]
fn given_literal_undefined_name_when_display_name_then_username_used() {
    let broken = actor("carol", "undefined", None);
    assert_eq!(broken.display_name(), "carol");
}

#[test]
fn given_name_when_display_name_and_username_then_both_shown() {
    let remote = actor("bob", "Bob", Some("other.social"));
    assert_eq!(remote.display_name_and_username(), "Bob (@bob@other.social)");
}

#[test]
fn given_blank_name_when_display_name_and_username_then_username_only() {
    let blank = actor("dave", "   ", None);
    assert_eq!(blank.display_name_and_username(), "dave");
}

#[test]
fn given_empty_or_missing_id_when_valid_id_then_none() {
    assert!(Actor::default().valid_id().is_none());
    assert!(Actor::with_id("").valid_id().is_none());
    assert_eq!(Actor::with_id("7").valid_id(), Some("7"));
}

#[test]
fn given_graphql_payload_when_deserialize_then_camel_case_fields_mapped() {
    let payload = json!({
        "__typename": "Person",
        "id": "42",
        "preferredUsername": "alice",
        "name": "Alice",
        "type": "GROUP",
        "avatar": { "uuid": "u1", "url": "https://x/a.png" }
    });

    let actor: Actor = serde_json::from_value(payload).unwrap();

    assert_eq!(actor.valid_id(), Some("42"));
    assert_eq!(actor.preferred_username, "alice");
    assert_eq!(actor.actor_type, ActorType::Group);
    assert_eq!(actor.avatar.unwrap().uuid.as_deref(), Some("u1"));
}

#[test]
fn given_actor_when_to_cache_value_then_typename_added() {
    let value = Actor::with_id("7").to_cache_value();

    assert_eq!(value["__typename"], "Person");
    assert_eq!(value["id"], "7");
}
