mod current_actor;

use crate::{QueryRequest, Transport, TransportError};

use ac_config::SessionConfig;
use ac_core::{Actor, ActorType, CacheKey};
use ac_store::{ClientStorage, InMemoryStore, NormalizedStore, StoreError, StoreResult};

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::sync::Notify;

pub(crate) const ACTOR_ID_KEY: &str = "auth-user-actor-id";

pub(crate) fn actor(id: &str) -> Actor {
    Actor {
        preferred_username: format!("user{id}"),
        ..Actor::with_id(id)
    }
}

pub(crate) fn group(id: &str) -> Actor {
    Actor {
        actor_type: ActorType::Group,
        ..actor(id)
    }
}

pub(crate) fn key(s: &str) -> CacheKey {
    CacheKey::new(s).unwrap()
}

/// Response the fake server returns for the actor-scoped refetch.
pub(crate) fn logged_person_data(actor_id: &str) -> Value {
    json!({
        "loggedPerson": {
            "__typename": "Person",
            "id": actor_id,
            "conversations": {
                "total": 1,
                "elements": [
                    { "__typename": "Conversation", "id": format!("conv-{actor_id}") },
                ],
            },
        },
    })
}

fn requested_actor_id(request: &QueryRequest) -> String {
    request
        .variables
        .get(crate::ACTOR_ID_VARIABLE)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Answers every request with the logged person of the requested actor.
#[derive(Default)]
pub(crate) struct FakeTransport {
    pub(crate) fail: bool,
    pub(crate) requests: Mutex<Vec<QueryRequest>>,
}

impl FakeTransport {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<QueryRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: &QueryRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(TransportError::network("connection refused"));
        }
        Ok(logged_person_data(&requested_actor_id(request)))
    }
}

/// Holds the response for `gated_actor` until released.
pub(crate) struct GatedTransport {
    pub(crate) gated_actor: String,
    pub(crate) started: Notify,
    pub(crate) release: Notify,
}

impl GatedTransport {
    pub(crate) fn new(gated_actor: &str) -> Self {
        Self {
            gated_actor: gated_actor.to_string(),
            started: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: &QueryRequest) -> Result<Value, TransportError> {
        let actor_id = requested_actor_id(request);
        if actor_id == self.gated_actor {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(logged_person_data(&actor_id))
    }
}

/// Storage whose every operation fails.
pub(crate) struct BrokenStorage;

fn broken() -> StoreError {
    StoreError::file_write(
        PathBuf::from("storage.json"),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
    )
}

#[async_trait]
impl ClientStorage for BrokenStorage {
    async fn get_item(&self, _name: &str) -> StoreResult<Option<String>> {
        Err(broken())
    }

    async fn set_item(&self, _name: &str, _value: &str) -> StoreResult<()> {
        Err(broken())
    }

    async fn remove_item(&self, _name: &str) -> StoreResult<()> {
        Err(broken())
    }
}

/// In-memory store with switchable failures.
#[derive(Default)]
pub(crate) struct FlakyStore {
    pub(crate) inner: InMemoryStore,
    pub(crate) fail_root_writes: bool,
    pub(crate) fail_evict: bool,
    pub(crate) fail_gc: bool,
}

impl NormalizedStore for FlakyStore {
    fn write(&self, key: &CacheKey, fields: Map<String, Value>) -> StoreResult<()> {
        self.inner.write(key, fields)
    }

    fn read(&self, key: &CacheKey) -> StoreResult<Option<Value>> {
        self.inner.read(key)
    }

    fn write_root_field(&self, field: &str, value: Value) -> StoreResult<()> {
        if self.fail_root_writes {
            return Err(StoreError::poisoned("writing a root field"));
        }
        self.inner.write_root_field(field, value)
    }

    fn read_root_field(&self, field: &str) -> StoreResult<Option<Value>> {
        self.inner.read_root_field(field)
    }

    fn evict(&self, field_name: &str) -> StoreResult<bool> {
        if self.fail_evict {
            return Err(StoreError::poisoned("evicting a root field"));
        }
        self.inner.evict(field_name)
    }

    fn gc(&self) -> StoreResult<Vec<CacheKey>> {
        if self.fail_gc {
            return Err(StoreError::poisoned("collecting garbage"));
        }
        self.inner.gc()
    }

    fn contains(&self, key: &CacheKey) -> StoreResult<bool> {
        self.inner.contains(key)
    }

    fn entity_count(&self) -> StoreResult<usize> {
        self.inner.entity_count()
    }

    fn root_fields(&self) -> StoreResult<Vec<String>> {
        self.inner.root_fields()
    }
}

pub(crate) fn session_config() -> SessionConfig {
    SessionConfig::default()
}
