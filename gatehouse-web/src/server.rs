//! Gatehouse Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Gatehouse web server
pub struct GatehouseServer {
    config: WebConfig,
    state: AppState,
}

impl GatehouseServer {
    /// Create a new Gatehouse server
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Gatehouse web server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.dev_mode);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for GatehouseServer
pub struct GatehouseServerBuilder {
    config: WebConfig,
}

impl GatehouseServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Set database URL for the identity directory
    pub fn database_url<S: Into<String>>(mut self, database_url: S) -> Self {
        self.config.database_url = Some(database_url.into());
        self
    }

    /// Set the session cookie signing secret
    pub fn session_secret<S: Into<String>>(mut self, session_secret: S) -> Self {
        self.config.session_secret = Some(session_secret.into());
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<GatehouseServer> {
        GatehouseServer::new(self.config).await
    }
}

impl Default for GatehouseServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_applies_overrides() {
        let server = GatehouseServerBuilder::new()
            .host("0.0.0.0")
            .port(3000)
            .dev_mode(true)
            .build()
            .await
            .unwrap();

        assert_eq!(server.config().host, "0.0.0.0");
        assert_eq!(server.config().port, 3000);
        assert!(server.config().dev_mode);
        assert_eq!(server.config().address(), "0.0.0.0:3000");
    }
}
