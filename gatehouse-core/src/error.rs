//! Unified error handling
//!
//! Provides structured error types with context and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type GatehouseResult<T> = Result<T, GatehouseError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Gatehouse system
#[derive(Error, Debug)]
pub enum GatehouseError {
    /// An identity id did not resolve. This is the only variant handled as
    /// control flow rather than a hard failure.
    #[error("Identity not found: {resource}")]
    IdentityNotFound {
        resource: String,
        context: ErrorContext,
    },

    #[error("Directory error: {message}")]
    Directory {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Session store error: {message}")]
    Session {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatehouseError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            GatehouseError::IdentityNotFound { context, .. } => Some(context),
            GatehouseError::Directory { context, .. } => Some(context),
            GatehouseError::Session { context, .. } => Some(context),
            GatehouseError::Config { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Whether this is the missing-identity case, which callers convert into
    /// a redirect or re-rendered form instead of surfacing as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatehouseError::IdentityNotFound { .. })
    }
}

/// Convenience macro for creating directory errors with context
#[macro_export]
macro_rules! directory_error {
    ($msg:expr, $component:expr) => {
        GatehouseError::Directory {
            message: $msg.to_string(),
            source: None,
            context: ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        GatehouseError::Directory {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! identity_not_found {
    ($resource:expr, $component:expr) => {
        GatehouseError::IdentityNotFound {
            resource: $resource.to_string(),
            context: ErrorContext::new($component)
                .with_suggestion("Check that the identity still exists in the directory"),
        }
    };
}
