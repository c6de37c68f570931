//! Core data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user known to the identity directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique opaque identifier
    pub id: String,
    /// Unique lookup name
    pub name: String,
    /// Display name (optional)
    pub display_name: Option<String>,
    /// When the identity was created
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            display_name: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Name suitable for rendering
    pub fn display_string(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.name.clone())
    }
}
