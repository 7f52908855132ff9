//! statuswatch - health endpoint monitor
//!
//! Main entry point: loads the configuration, sets up logging and runs the
//! polling loop until the process is stopped.

mod cli;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statuswatch_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use statuswatch_monitor::{CycleOutcome, Monitor};

use cli::{Cli, Commands};

/// Initialize tracing with console and optional file output.
///
/// Log files rotate daily and the last 30 are kept.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match logging.log_dir() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("statuswatch")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes the writer on drop, so it must live as long as the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(&cli.config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            init_tracing(&config.logging)?;
            run_monitor(config).await
        }
        Commands::Check => {
            init_tracing(&LoggingConfig {
                file: false,
                ..config.logging.clone()
            })?;
            check_once(config).await
        }
        Commands::Validate => validate(&config),
    }
}

/// Run the polling loop in the foreground.
async fn run_monitor(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting statuswatch v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(&config)?;
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!(
            "invalid configuration ({} error(s))",
            validation.errors.len()
        )
        .into());
    }

    let monitor = Monitor::from_config(&config)?;

    tokio::select! {
        _ = monitor.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}

/// Probe once and print the observed status.
async fn check_once(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut monitor = Monitor::from_config(&config)?;

    match monitor.check_once().await {
        CycleOutcome::ProbeFailed(e) => Err(e.into()),
        outcome => {
            println!(
                "{} is {} ({})",
                config.service_name,
                monitor.state().status(),
                config.health_url
            );
            if let Some(uptime) = monitor.state().backend_uptime() {
                println!("Backend uptime: {}", uptime);
            }
            debug!("Check outcome: {:?}", outcome);
            Ok(())
        }
    }
}

/// Print validation results, failing on errors.
fn validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        println!("error: {}: {}", err.path, err.message);
    }

    if result.is_valid() {
        println!(
            "Configuration OK: {} webhook(s), {} channel(s), checking every {}ms",
            config.webhooks.len(),
            config.channels.len(),
            config.check_interval
        );
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}
