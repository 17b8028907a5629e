use tracing_subscriber::EnvFilter;

use hwbot_common::config::{AppConfig, LogFormat};
use hwbot_poller::poller::StatusPoller;

const DEFAULT_LOG_FILTER: &str = "hwbot=info,hwbot_poller=info,hwbot_notifier=info,hwbot_common=info";

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so LOG_FORMAT can pick the layer.
    let config = AppConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or(LogFormat::Pretty),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(severity = "critical", error = %e, "Cannot start homework bot");
            return Err(e.into());
        }
    };

    tracing::info!(
        endpoint = %config.practicum_endpoint,
        retry_interval_secs = config.retry_interval_secs,
        lookback_secs = config.lookback_secs,
        "Homework bot starting..."
    );

    let mut poller = StatusPoller::from_config(&config, chrono::Utc::now())?;

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework bot stopped.");
    Ok(())
}
