//! Application state wiring the identity directory and auth service

use crate::{WebConfig, WebResult};
use gatehouse_core::{AuthService, Identity, IdentityDirectory, MemoryDirectory};
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "sqlite")]
use crate::database::SqliteDirectory;

/// Shared per-request application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Identity directory collaborator
    pub directory: Arc<dyn IdentityDirectory>,
    /// Authentication service over the directory
    pub auth: AuthService,
}

impl AppState {
    /// Create a new application state, choosing the directory backend from
    /// the configuration.
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let directory = Self::build_directory(&config).await;
        Ok(Self::with_directory(config, directory))
    }

    /// Create application state around an existing directory (used by tests
    /// and embedders that manage their own backing store).
    pub fn with_directory(config: WebConfig, directory: Arc<dyn IdentityDirectory>) -> Self {
        let auth = AuthService::new(directory.clone());
        info!("Application state initialized");
        Self {
            config,
            directory,
            auth,
        }
    }

    async fn build_directory(config: &WebConfig) -> Arc<dyn IdentityDirectory> {
        #[cfg(feature = "sqlite")]
        {
            if let Some(database_url) = &config.database_url {
                match SqliteDirectory::connect(database_url).await {
                    Ok(directory) => {
                        info!("Identity directory backed by sqlite");
                        return Arc::new(directory);
                    }
                    Err(e) => {
                        warn!(
                            "Failed to open sqlite directory, falling back to memory: {}",
                            e
                        );
                    }
                }
            }
        }

        #[cfg(not(feature = "sqlite"))]
        {
            if config.database_url.is_some() {
                warn!("DATABASE_URL is set but the sqlite feature is disabled; using the in-memory directory");
            }
        }

        let directory = MemoryDirectory::new();
        if config.dev_mode {
            Self::seed_demo_identities(&directory);
        }
        Arc::new(directory)
    }

    /// Seed a handful of identities so a development server is usable
    fn seed_demo_identities(directory: &MemoryDirectory) {
        for name in ["alice", "bob"] {
            let identity = Identity::new(name);
            info!("Seeded demo identity: {} ({})", identity.name, identity.id);
            directory.insert(identity);
        }
    }
}
