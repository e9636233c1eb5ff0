//! Actor switching.
//!
//! A switch runs five steps in order: activate, persist, evict, collect,
//! refetch. Only activation can fail the switch. The remaining steps are
//! cache hygiene: failures are logged and recorded in the [`SwitchReport`].
//!
//! Every switch takes a generation number. A switch that observes a newer
//! generation after one of its suspension points stops touching the cache
//! and discards its refetch response.

use crate::{
    ACTOR_ID_VARIABLE, CurrentActorSlot, CurrentActorWatch, FetchPolicy, QueryClient,
    QueryRequest, RefetchStatus, SessionError, SessionResult, SwitchReport, Transport,
};

use ac_config::SessionConfig;
use ac_core::{Actor, ActorType, CacheKey, IdentitySet};
use ac_store::{ClientStorage, NormalizedStore, StoreError};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use tokio::sync::Mutex;

pub struct ActorSwitchCoordinator {
    store: Arc<dyn NormalizedStore>,
    storage: Arc<dyn ClientStorage>,
    client: QueryClient,
    config: SessionConfig,
    actor_id_key: String,
    slot: CurrentActorSlot,
    generation: AtomicU64,
    /// Held while the slot and the current-actor root field are updated together.
    activation_lock: std::sync::Mutex<()>,
    /// Serializes writes of the persisted actor id.
    persist_lock: Mutex<()>,
}

impl ActorSwitchCoordinator {
    pub fn new(
        store: Arc<dyn NormalizedStore>,
        storage: Arc<dyn ClientStorage>,
        transport: Arc<dyn Transport>,
        config: SessionConfig,
        actor_id_key: impl Into<String>,
    ) -> Self {
        Self {
            client: QueryClient::new(Arc::clone(&store), transport),
            store,
            storage,
            config,
            actor_id_key: actor_id_key.into(),
            slot: CurrentActorSlot::new(),
            generation: AtomicU64::new(0),
            activation_lock: std::sync::Mutex::new(()),
            persist_lock: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_actor(&self) -> Option<Actor> {
        self.slot.get()
    }

    pub fn subscribe(&self) -> CurrentActorWatch {
        self.slot.subscribe()
    }

    pub fn current_actor_type(&self) -> Option<ActorType> {
        self.slot.get().map(|actor| actor.actor_type)
    }

    pub fn is_current_actor_group(&self) -> bool {
        self.current_actor_type()
            .is_some_and(|actor_type| actor_type.is_group())
    }

    pub fn is_current_actor_person(&self) -> bool {
        self.current_actor_type()
            .is_some_and(|actor_type| actor_type.is_person())
    }

    /// Generation of the newest switch or logout.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Makes `candidate` the active actor.
    ///
    /// A candidate without an id is ignored and `Ok(None)` returned. The only
    /// reported failure is a store error while activating; everything after
    /// that is best-effort.
    pub async fn switch_to(&self, candidate: &Actor) -> SessionResult<Option<SwitchReport>> {
        let Some(actor_id) = candidate.valid_id().map(str::to_string) else {
            warn!("Ignoring switch to an actor without an id");
            return Ok(None);
        };

        let generation = self.activate(candidate, &actor_id)?;
        let mut report = SwitchReport::new(actor_id.clone(), generation);
        debug!("Activated actor {actor_id} (generation {generation})");

        report.persisted = self.persist(generation, &actor_id).await;

        if self.is_superseded(generation) {
            return Ok(Some(self.superseded(report)));
        }

        self.evict_scoped_fields(&mut report);
        self.collect_garbage(&mut report);

        report.refetch = self.refetch(generation, &actor_id, &mut report.warnings).await;
        if report.refetch == RefetchStatus::Superseded {
            report.superseded = true;
        }

        info!(
            "Switched to actor {actor_id} (generation {generation}, persisted={}, evicted={}, collected={}, refetch={})",
            report.persisted,
            report.evicted.len(),
            report.collected.len(),
            report.refetch
        );
        Ok(Some(report))
    }

    /// Selects and activates an actor at start.
    ///
    /// `None` means the identity list has not loaded yet and is a no-op. An
    /// empty list is an error. Otherwise the persisted actor wins, falling
    /// back to the first one.
    pub async fn restore_active_identity(
        &self,
        identities: Option<&[Actor]>,
    ) -> SessionResult<Option<SwitchReport>> {
        let Some(identities) = identities else {
            debug!("Identities not loaded yet, nothing to restore");
            return Ok(None);
        };

        let identities = IdentitySet::from(identities);
        if identities.is_empty() {
            return Err(SessionError::no_identities_available());
        }

        let persisted_id = self.read_persisted_id().await;

        let Some(actor) = identities.select_active(persisted_id.as_deref()) else {
            return Err(SessionError::no_identities_available());
        };

        if persisted_id.as_deref() != actor.valid_id() {
            debug!(
                "Persisted actor {:?} not among {} identities, using {:?}",
                persisted_id,
                identities.len(),
                actor.valid_id()
            );
        }

        let report = self.switch_to(actor).await?;
        if let Some(report) = &report {
            info!("Restored active identity {}", report.actor_id);
        }
        Ok(report)
    }

    /// Tears the session down: clears the slot and persisted id, evicts the
    /// current-actor and actor-scoped fields, then collects.
    ///
    /// Returns the collected keys. In-flight switches are superseded.
    pub async fn logout(&self) -> SessionResult<Vec<CacheKey>> {
        let generation = {
            let _guard = self
                .activation_lock
                .lock()
                .map_err(|_| SessionError::from(StoreError::poisoned("logging out")))?;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.slot.set(None);
            generation
        };

        {
            let _guard = self.persist_lock.lock().await;
            if let Err(e) = self.storage.remove_item(&self.actor_id_key).await {
                warn!("Failed to clear persisted actor id: {e}");
            }
        }

        let fields = std::iter::once(&self.config.current_actor_field)
            .chain(self.config.actor_scoped_fields.iter());
        for field in fields {
            if let Err(e) = self.store.evict(field) {
                warn!("{}", SessionError::eviction(field.as_str(), e));
            }
        }

        let collected = match self.store.gc() {
            Ok(collected) => collected,
            Err(e) => {
                warn!("{}", SessionError::garbage_collection(e));
                Vec::new()
            }
        };

        info!(
            "Logged out (generation {generation}, collected {} entities)",
            collected.len()
        );
        Ok(collected)
    }

    fn activate(&self, candidate: &Actor, actor_id: &str) -> SessionResult<u64> {
        let _guard = self
            .activation_lock
            .lock()
            .map_err(|_| SessionError::activation(actor_id, StoreError::poisoned("activating")))?;

        self.store
            .write_root_field(&self.config.current_actor_field, candidate.to_cache_value())
            .map_err(|e| SessionError::activation(actor_id, e))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.slot.set(Some(candidate.clone()));
        Ok(generation)
    }

    async fn persist(&self, generation: u64, actor_id: &str) -> bool {
        let _guard = self.persist_lock.lock().await;

        if self.is_superseded(generation) {
            debug!("Skipping persistence of actor {actor_id}: superseded");
            return false;
        }

        match self.storage.set_item(&self.actor_id_key, actor_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to persist actor {actor_id}, keeping it in memory only: {e}");
                false
            }
        }
    }

    fn evict_scoped_fields(&self, report: &mut SwitchReport) {
        for field in &self.config.actor_scoped_fields {
            match self.store.evict(field) {
                Ok(true) => report.evicted.push(field.clone()),
                Ok(false) => {}
                Err(e) => {
                    let error = SessionError::eviction(field.as_str(), e);
                    warn!("{error}");
                    report.warnings.push(error.to_string());
                }
            }
        }
    }

    fn collect_garbage(&self, report: &mut SwitchReport) {
        match self.store.gc() {
            Ok(collected) => report.collected = collected,
            Err(e) => {
                let error = SessionError::garbage_collection(e);
                warn!("{error}");
                report.warnings.push(error.to_string());
            }
        }
    }

    async fn refetch(
        &self,
        generation: u64,
        actor_id: &str,
        warnings: &mut Vec<String>,
    ) -> RefetchStatus {
        if !self.config.refetch_enabled {
            return RefetchStatus::Disabled;
        }

        let request = QueryRequest::new(self.config.refetch_document.as_str())
            .with_variable(ACTOR_ID_VARIABLE, actor_id)
            .with_fetch_policy(FetchPolicy::NetworkOnly)
            .with_root_fields(self.config.refetch_root_fields.iter().cloned());

        let result = match self.client.fetch(&request).await {
            Ok(_) if self.is_superseded(generation) => {
                debug!("Discarding refetch for actor {actor_id}: superseded");
                return RefetchStatus::Superseded;
            }
            Ok(data) => self.client.write_data(&data).map(|_| ()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => RefetchStatus::Completed,
            Err(e) => {
                let error = SessionError::refetch(actor_id, e);
                warn!("{error}");
                warnings.push(error.to_string());
                RefetchStatus::Failed(error.to_string())
            }
        }
    }

    async fn read_persisted_id(&self) -> Option<String> {
        match self.storage.get_item(&self.actor_id_key).await {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                warn!("Failed to read persisted actor id, treating as absent: {e}");
                None
            }
        }
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn superseded(&self, mut report: SwitchReport) -> SwitchReport {
        debug!(
            "Switch to actor {} superseded, skipping cache hygiene",
            report.actor_id
        );
        report.superseded = true;
        report.refetch = RefetchStatus::Superseded;
        report
    }
}
