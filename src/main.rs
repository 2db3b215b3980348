//! uptimebot - single-channel chat bot with a stream uptime command.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uptimebot::config::{Config, validate};
use uptimebot::error::error_chain;
use uptimebot::handlers::default_registry;
use uptimebot::network::{self, Session};
use uptimebot::status::HelixStatus;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Trace every line sent and received (the credential line excepted)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config = Config::load(&args.config).map_err(|e| {
        error!(path = %args.config.display(), error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See error messages above.",
            errors.len()
        ));
    }

    info!(
        nick = %config.username,
        channel = %config.channel,
        server = %config.server.host,
        port = config.server.port,
        "Starting uptimebot"
    );

    let status = Arc::new(HelixStatus::new(&config.status));
    let registry = Arc::new(default_registry(&config, status)?);
    info!(rules = registry.len(), "Rule table ready");

    let stream = network::connect(&config.server.host, config.server.port).await?;
    let (reader, writer) = tokio::io::split(stream);

    let mut session =
        Session::new(reader, writer, Arc::new(config.session()), registry).quiet(!args.verbose);
    session.bootstrap().await?;

    match session.run().await {
        Ok(never) => match never {},
        Err(e) => {
            error!(error = %error_chain(&e), "Connection lost");
            Err(e.into())
        }
    }
}
