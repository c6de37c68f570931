//! Per-request session store abstraction
//!
//! The session store is owned by the hosting request layer (a cookie-backed
//! session in the web front end, a plain map in tests). This crate only reads
//! and writes the single `user_id` key through a narrow get/set/delete
//! interface, keeping transport and signing concerns out of the core.

use crate::GatehouseResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Session key holding the signed-in identity's id.
pub const USER_ID_KEY: &str = "user_id";

/// Key-value storage scoped to the current caller's request chain.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> GatehouseResult<Option<String>>;
    async fn set(&self, key: &str, value: String) -> GatehouseResult<()>;
    async fn delete(&self, key: &str) -> GatehouseResult<()>;
}

/// In-memory session for a single request chain (tests and local tools)
#[derive(Debug, Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySession {
    async fn get(&self, key: &str) -> GatehouseResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> GatehouseResult<()> {
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> GatehouseResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
