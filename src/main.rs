use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitalis::animations::AnimationClient;
use vitalis::api::{self, AppState};
use vitalis::cli::{self, Cli, Commands};
use vitalis::config::AppConfig;
use vitalis::error::{Result, VitalisError};
use vitalis::registry::ModelRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { host, port } => {
            let config = AppConfig::load_from(&cli.config)?;
            init_logging(&config);
            run_serve(config, host.as_deref(), *port).await?;
        }
        Commands::Check { models } => {
            init_logging_simple();
            let config = AppConfig::load_from(&cli.config)?;
            let dir = models.clone().unwrap_or(config.models.dir);
            cli::run_check(&dir)?;
        }
        Commands::Predict {
            disease,
            values,
            models,
        } => {
            init_logging_simple();
            let config = AppConfig::load_from(&cli.config)?;
            let dir = models.clone().unwrap_or(config.models.dir);
            cli::run_predict(&dir, disease, values)?;
        }
    }

    Ok(())
}

async fn run_serve(config: AppConfig, host: Option<&str>, port: Option<u16>) -> Result<()> {
    if let Err(errors) = config.validate() {
        return Err(VitalisError::Validation(format!(
            "invalid configuration: {}",
            errors.join("; ")
        )));
    }

    // Eager, fatal model loading: the service never starts degraded.
    let registry = Arc::new(ModelRegistry::load(&config.models.dir)?);
    info!(models = registry.len(), "model registry ready");

    let animations = Arc::new(AnimationClient::new(config.animations.clone())?);
    let state = AppState::new(registry, animations);

    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);
    let addr = cli::parse_addr(host, port)?;

    api::serve(state, addr).await
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},vitalis=debug", config.logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn init_logging_simple() {
    // Minimal logging for CLI commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
