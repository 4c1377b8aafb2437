use anyhow::Context as _;
use clap::Parser;
use newsctl::{Application, Config, telemetry};
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;

/// Future that resolves on Ctrl+C or SIGTERM. newsctl only runs on Unix hosts.
/// The SIGTERM handler is installed before the server starts.
fn shutdown_signal() -> anyhow::Result<impl Future<Output = ()> + Send + 'static> {
    let mut sigterm = signal(SignalKind::terminate()).context("install SIGTERM handler")?;

    Ok(async move {
        tokio::select! {
            Ok(()) = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down gracefully..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = newsctl::config::Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    // Initialize structured logging
    telemetry::init_telemetry(&config.log)?;

    tracing::debug!("{:?}", args);

    // Run the application with graceful shutdown on SIGTERM/Ctrl+C
    let shutdown = shutdown_signal()?;
    Application::new(config).await?.serve(shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sigterm_resolves_shutdown() {
        let shutdown = shutdown_signal().unwrap();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .expect("shutdown future should resolve on SIGTERM");
    }
}
