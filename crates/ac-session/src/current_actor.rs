use ac_core::{Actor, ActorType};

use tokio::sync::watch;

/// The single current-identity slot.
///
/// Only the coordinator writes; everyone else observes through
/// [`CurrentActorWatch`].
#[derive(Debug)]
pub struct CurrentActorSlot {
    tx: watch::Sender<Option<Actor>>,
}

impl CurrentActorSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the current actor and notifies observers. Returns the previous one.
    pub(crate) fn set(&self, actor: Option<Actor>) -> Option<Actor> {
        self.tx.send_replace(actor)
    }

    pub fn get(&self) -> Option<Actor> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> CurrentActorWatch {
        CurrentActorWatch {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CurrentActorSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle on the current actor.
#[derive(Debug, Clone)]
pub struct CurrentActorWatch {
    rx: watch::Receiver<Option<Actor>>,
}

impl CurrentActorWatch {
    pub fn current(&self) -> Option<Actor> {
        self.rx.borrow().clone()
    }

    pub fn current_id(&self) -> Option<String> {
        self.rx
            .borrow()
            .as_ref()
            .and_then(|actor| actor.valid_id().map(str::to_string))
    }

    pub fn current_type(&self) -> Option<ActorType> {
        self.rx.borrow().as_ref().map(|actor| actor.actor_type)
    }

    /// Waits for the next change and returns the new value.
    ///
    /// `None` once the slot has been dropped.
    pub async fn changed(&mut self) -> Option<Option<Actor>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
