//! Identity directory abstraction
//!
//! The directory is a narrow two-method read interface so that any backing
//! store (in-memory map, relational table, remote service) can satisfy it.
//! Persistence, schema, and uniqueness enforcement belong to the backing
//! store, not to this crate.

use crate::{identity_not_found, ErrorContext, GatehouseError, GatehouseResult, Identity};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Read access to the user directory.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up an identity by its unique id.
    ///
    /// Returns `IdentityNotFound` when no identity has this id.
    async fn find(&self, id: &str) -> GatehouseResult<Identity>;

    /// Look up an identity by its name. A missing name is not an error.
    async fn find_by_name(&self, name: &str) -> GatehouseResult<Option<Identity>>;
}

/// In-memory directory (for development and testing)
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    identities: Arc<RwLock<HashMap<String, Identity>>>,
    ids_by_name: Arc<RwLock<HashMap<String, String>>>, // name -> id
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity, replacing any previous entry with the same name.
    pub fn insert(&self, identity: Identity) {
        let mut identities = self.identities.write().unwrap();
        let mut ids_by_name = self.ids_by_name.write().unwrap();

        if let Some(previous_id) = ids_by_name.insert(identity.name.clone(), identity.id.clone()) {
            identities.remove(&previous_id);
        }
        identities.insert(identity.id.clone(), identity);
    }

    /// Remove an identity by id, returning it if it existed.
    pub fn remove(&self, id: &str) -> Option<Identity> {
        let mut identities = self.identities.write().unwrap();
        let mut ids_by_name = self.ids_by_name.write().unwrap();

        let identity = identities.remove(id)?;
        ids_by_name.remove(&identity.name);
        Some(identity)
    }

    pub fn len(&self) -> usize {
        self.identities.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IdentityDirectory for MemoryDirectory {
    async fn find(&self, id: &str) -> GatehouseResult<Identity> {
        let identities = self.identities.read().unwrap();
        identities
            .get(id)
            .cloned()
            .ok_or_else(|| identity_not_found!(format!("identity {}", id), "memory_directory"))
    }

    async fn find_by_name(&self, name: &str) -> GatehouseResult<Option<Identity>> {
        let ids_by_name = self.ids_by_name.read().unwrap();
        let Some(id) = ids_by_name.get(name) else {
            debug!("No identity named '{}'", name);
            return Ok(None);
        };

        let identities = self.identities.read().unwrap();
        Ok(identities.get(id).cloned())
    }
}
