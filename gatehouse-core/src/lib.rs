//! Gatehouse Core - identity directory, session store, and sign-in flows
//!
//! This crate defines the abstractions shared by every Gatehouse front end:
//! the identity directory, the per-request session store, and the
//! authentication service built on top of them.

pub mod auth;
pub mod directory;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

pub use auth::*;
pub use directory::*;
pub use error::*;
pub use logging::*;
pub use session::*;
pub use types::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tracing;
