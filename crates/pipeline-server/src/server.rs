//! Main Pipeline Server implementation
//!
//! This module contains the PipelineServer implementation.

use axum::http::HeaderValue;
use axum::Router;
use pipeline_dag::DagValidator;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Main server implementation
#[derive(Debug, Clone)]
pub struct PipelineServer {
    /// Configuration
    pub config: ServerConfig,

    /// Graph validator
    validator: DagValidator,

    /// Parsed CORS origins
    cors_origins: Vec<HeaderValue>,
}

impl PipelineServer {
    /// Create a new PipelineServer
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let cors_origins = config.cors_origins()?;

        Ok(Self {
            config,
            validator: DagValidator::new(),
            cors_origins,
        })
    }

    /// Graph validator used by request handlers
    pub fn validator(&self) -> DagValidator {
        self.validator
    }

    /// CORS policy for the configured origins
    ///
    /// Credentials are allowed, so wildcards are expressed by mirroring the
    /// request: a `*` origin echoes the caller's origin, and methods and
    /// headers always echo what the preflight asked for.
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.config.allowed_origins.iter().any(|origin| origin == "*") {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::list(self.cors_origins.clone())
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }

    /// Build the application router
    pub fn router(&self) -> Router {
        crate::api::build_router(Arc::new(self.clone()))
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting Pipeline Server");

        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let listener = TcpListener::bind(&addr).await?;

        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// The listener may be bound to port 0; the address it actually got is
    /// logged.
    pub async fn serve_with_shutdown<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("Listening on {}", addr);

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_origins() {
        let config = ServerConfig {
            allowed_origins: Vec::new(),
            ..ServerConfig::default()
        };
        assert!(PipelineServer::new(config).is_err());
    }
}
