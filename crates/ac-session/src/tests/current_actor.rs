use super::{actor, group};
use crate::CurrentActorSlot;

use ac_core::ActorType;

use googletest::prelude::*;

#[test]
fn given_new_slot_when_read_then_empty() {
    let slot = CurrentActorSlot::new();

    assert!(slot.get().is_none());
    assert!(slot.subscribe().current_id().is_none());
}

#[test]
fn given_slot_when_set_then_previous_returned() {
    let slot = CurrentActorSlot::new();

    assert!(slot.set(Some(actor("1"))).is_none());
    assert_eq!(slot.set(Some(actor("2"))), Some(actor("1")));
    assert_eq!(slot.get(), Some(actor("2")));
}

#[test]
fn given_watch_when_slot_set_then_current_reflects_it() {
    let slot = CurrentActorSlot::new();
    let watch = slot.subscribe();

    slot.set(Some(group("g")));

    assert_eq!(watch.current_id(), Some("g".to_string()));
    assert_that!(watch.current_type(), eq(Some(ActorType::Group)));
}

#[tokio::test]
async fn given_dropped_slot_when_waiting_for_change_then_none() {
    let slot = CurrentActorSlot::new();
    let mut watch = slot.subscribe();

    drop(slot);

    assert!(watch.changed().await.is_none());
}
