use crate::Actor;

use serde::{Deserialize, Serialize};

/// The actors available to the authenticated principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct IdentitySet(Vec<Actor>);

impl IdentitySet {
    pub fn new(actors: Vec<Actor>) -> Self {
        Self(actors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Actor] {
        &self.0
    }

    pub fn find(&self, id: &str) -> Option<&Actor> {
        self.0.iter().find(|actor| actor.valid_id() == Some(id))
    }

    /// Picks the actor to activate on start.
    ///
    /// The actor matching `persisted_id` wins; otherwise the first element.
    /// `None` only when the set is empty.
    pub fn select_active(&self, persisted_id: Option<&str>) -> Option<&Actor> {
        persisted_id
            .and_then(|id| self.find(id))
            .or_else(|| self.0.first())
    }
}

impl From<Vec<Actor>> for IdentitySet {
    fn from(actors: Vec<Actor>) -> Self {
        Self(actors)
    }
}

impl<'a> From<&'a [Actor]> for IdentitySet {
    fn from(actors: &'a [Actor]) -> Self {
        Self(actors.to_vec())
    }
}
