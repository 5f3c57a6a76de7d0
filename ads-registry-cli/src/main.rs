//! ads-registry entry point
//!
//! Reconciles the registry file in place, then verifies its certification
//! authority ids. Exit code 0 means valid, 1 means manual fixing is needed,
//! 2 means the run failed.

use std::process::ExitCode;

use ads_registry_cli::{exit_code, run, AppConfig, Cli, TracingReporter, EXIT_FATAL};
use ads_registry_core::CoreError;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };
    config.apply_cli(&cli);
    init_tracing(&config.log_level);

    tracing::info!("Formatting {}", config.file.display());
    let result = run(&config, &TracingReporter).await;

    match &result {
        Ok(summary) if cli.summary_json => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to serialize run summary: {e}"),
        },
        Ok(_) => {}
        Err(e @ (CoreError::RetriesExhausted { .. } | CoreError::LookupFailed { .. })) => {
            tracing::error!("{e}; the registry file had already been rewritten");
        }
        Err(e) if e.is_expected() => tracing::warn!("{e}"),
        Err(e) => tracing::error!("{e}"),
    }

    ExitCode::from(exit_code(&result))
}

/// Initialize tracing to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
