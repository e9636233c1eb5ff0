pub mod coordinator;
pub mod current_actor;
pub mod error;
pub mod fetch_policy;
pub mod query_client;
pub mod query_request;
pub mod switch_report;
pub mod transport;

pub use coordinator::ActorSwitchCoordinator;
pub use current_actor::{CurrentActorSlot, CurrentActorWatch};
pub use error::{Result as SessionResult, SessionError, TransportError};
pub use fetch_policy::FetchPolicy;
pub use query_client::QueryClient;
pub use query_request::QueryRequest;
pub use switch_report::{RefetchStatus, SwitchReport};
pub use transport::Transport;

#[cfg(test)]
mod tests;

/// Variable carrying the actor id in the actor-scoped refetch.
pub const ACTOR_ID_VARIABLE: &str = "actorId";
