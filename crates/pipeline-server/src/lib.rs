//!
//! Pipeline Server - HTTP front end for pipeline DAG validation
//!
//! This module exports all the components of the Pipeline Server.

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

// Re-export key types
pub use config::ServerConfig;
pub use server::PipelineServer;
pub use error::{ServerError, ServerResult};
pub use api::pipelines::PipelineResponse;

/// Run function
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    // Initialize logging
    init_logging(&config);

    tracing::info!(
        port = config.port,
        bind_address = %config.bind_address,
        allowed_origins = ?config.allowed_origins,
        "Server configuration"
    );

    let server = PipelineServer::new(config)?;
    server.run().await
}

/// Initialize logging to stdout
///
/// `RUST_LOG` takes precedence over the configured log level. Calling this
/// more than once keeps the first subscriber.
pub fn init_logging(config: &ServerConfig) {
    init_logging_with_writer(config, std::io::stdout);
}

/// Initialize logging to `writer`
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging_with_writer<W>(config: &ServerConfig, writer: W) -> bool
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    use tracing_subscriber::{fmt, EnvFilter};

    // Create filter based on config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = if config.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(writer)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(writer)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
        return false;
    }
    true
}
