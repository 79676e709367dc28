// ABOUTME: Global subscriber assembly from the configured layer set
// ABOUTME: Console and file layers stack on one registry behind a level filter

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;
use crate::layers::{BoxedLayer, console_layer, file_layer, level_filter};

/// Install the global subscriber described by `config`.
///
/// Fails when a global subscriber is already set, so embedders and
/// tests can install their own first.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if let Some(console) = console_layer(&config) {
        layers.push(console);
    }
    if let Some(file) = file_layer(&config).context("Failed to build the file log layer")? {
        layers.push(file);
    }

    let filter = level_filter(&config).context("Failed to build the level filter")?;
    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    tracing::info!(
        level = %config.level,
        console = config.console,
        json = config.json,
        file = ?config.file,
        "Logging initialized"
    );

    Ok(())
}
