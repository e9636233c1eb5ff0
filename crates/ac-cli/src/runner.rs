use crate::commands::Commands;
use crate::identity_commands::IdentityCommands;
use crate::{CliClientResult, ClientError, GraphqlClient};

use ac_config::Config;
use ac_core::{CacheIdentityResolver, CachedObject, IdentitySet, KeyPolicy};
use ac_session::{ActorSwitchCoordinator, Transport};
use ac_store::{ClientStorage, FileStorage, InMemoryStore};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use serde_json::{Value, json};

/// Executes CLI commands against one coordinator.
///
/// The normalized store lives for the duration of the process; only the
/// client storage file survives between invocations.
pub struct Runner {
    config: Config,
    storage: Arc<dyn ClientStorage>,
    resolver: CacheIdentityResolver,
    coordinator: ActorSwitchCoordinator,
}

impl Runner {
    /// Wires file storage and the HTTP transport from configuration.
    pub fn new(config: Config) -> CliClientResult<Self> {
        let storage: Arc<dyn ClientStorage> = Arc::new(FileStorage::new(config.storage_path()?));

        let transport = GraphqlClient::new(
            &config.transport.endpoint,
            Duration::from_secs(config.transport.timeout_secs),
        )?
        .with_token_storage(Arc::clone(&storage), config.storage.access_token_key.clone());

        Ok(Self::with_parts(config, storage, Arc::new(transport)))
    }

    pub fn with_parts(
        config: Config,
        storage: Arc<dyn ClientStorage>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let resolver = CacheIdentityResolver::default();
        let coordinator = ActorSwitchCoordinator::new(
            Arc::new(InMemoryStore::new(resolver.clone())),
            Arc::clone(&storage),
            transport,
            config.session.clone(),
            config.storage.actor_id_key.clone(),
        );

        Self {
            config,
            storage,
            resolver,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &ActorSwitchCoordinator {
        &self.coordinator
    }

    pub async fn run(&self, command: Commands) -> CliClientResult<Value> {
        match command {
            Commands::Key { input } => self.resolve_key(&input),
            Commands::Identity { action } => match action {
                IdentityCommands::Restore { identities } => self.restore(&identities).await,
                IdentityCommands::Switch { id, identities } => self.switch(&id, &identities).await,
                IdentityCommands::Show { identities } => self.show(identities.as_deref()).await,
            },
            Commands::Logout => self.logout().await,
        }
    }

    /// Cache key of a JSON object given inline or as `@path`.
    pub fn resolve_key(&self, input: &str) -> CliClientResult<Value> {
        let text = match input.strip_prefix('@') {
            Some(path) => read_file(Path::new(path))?,
            None => input.to_string(),
        };

        let value: Value = serde_json::from_str(&text)?;
        let object = CachedObject::from_value(&value).ok_or_else(|| {
            ClientError::input("expected a JSON object with a non-empty __typename")
        })?;

        let resolution = if self.resolver.resolve(&object).is_default() {
            "default"
        } else {
            "custom"
        };
        let key = self.resolver.data_id(&object);

        Ok(json!({
            "typename": object.typename(),
            "resolution": resolution,
            "key": key,
        }))
    }

    pub async fn restore(&self, identities: &Path) -> CliClientResult<Value> {
        let identities = load_identities(identities)?;
        let report = self
            .coordinator
            .restore_active_identity(Some(identities.as_slice()))
            .await?;
        Ok(serde_json::to_value(report)?)
    }

    pub async fn switch(&self, id: &str, identities: &Path) -> CliClientResult<Value> {
        let identities = load_identities(identities)?;
        let actor = identities
            .find(id)
            .ok_or_else(|| ClientError::input(format!("actor {id} is not an available identity")))?;

        let report = self.coordinator.switch_to(actor).await?;
        Ok(serde_json::to_value(report)?)
    }

    pub async fn show(&self, identities: Option<&Path>) -> CliClientResult<Value> {
        let actor_id = self
            .storage
            .get_item(&self.config.storage.actor_id_key)
            .await?;

        let actor = match (identities, actor_id.as_deref()) {
            (Some(path), Some(id)) => load_identities(path)?.find(id).cloned(),
            _ => None,
        };

        Ok(json!({
            "actorId": actor_id,
            "actor": actor,
        }))
    }

    /// Tears the session down and forgets the stored tokens.
    pub async fn logout(&self) -> CliClientResult<Value> {
        let collected = self.coordinator.logout().await?;

        for key in [
            &self.config.storage.access_token_key,
            &self.config.storage.refresh_token_key,
        ] {
            if let Err(e) = self.storage.remove_item(key).await {
                warn!("Failed to remove '{key}' from storage: {e}");
            }
        }

        info!("Session cleared");
        Ok(json!({
            "loggedOut": true,
            "collected": collected,
        }))
    }
}

fn read_file(path: &Path) -> CliClientResult<String> {
    std::fs::read_to_string(path).map_err(|e| ClientError::io(PathBuf::from(path), e))
}

fn load_identities(path: &Path) -> CliClientResult<IdentitySet> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}
