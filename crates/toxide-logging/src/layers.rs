// ABOUTME: Builders for the individual subscriber layers and the level filter
// ABOUTME: Each builder returns a boxed layer so the set can be composed as one

use anyhow::{Context, Result};
use std::fs;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LoggingConfig;

/// A type-erased layer ready to stack on the registry.
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Console layer on stderr, when enabled.
///
/// stderr keeps log records out of the command output on stdout.
pub fn console_layer(config: &LoggingConfig) -> Option<BoxedLayer> {
    if !config.console {
        return None;
    }

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();
    Some(layer.boxed())
}

/// File layer with daily rotation, when a log file is configured.
///
/// The file format follows `config.json`; either way the writes go
/// through a non-blocking worker so logging never stalls the caller.
pub fn file_layer(config: &LoggingConfig) -> Result<Option<BoxedLayer>> {
    let Some(path) = &config.file else {
        return Ok(None);
    };

    let directory = path.parent().context("log file path has no parent")?;
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("log file path has no file name")?;

    let appender = rolling::daily(directory, file_name);
    let (writer, guard) = non_blocking(appender);
    // The guard flushes on drop; it has to outlive every later log call
    std::mem::forget(guard);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    let layer = if config.json {
        layer.json().boxed()
    } else {
        layer.with_ansi(false).boxed()
    };
    Ok(Some(layer))
}

/// Level filter built from the baseline level and the module overrides.
pub fn level_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.to_string());
    for (module, level) in &config.module_levels {
        let directive = format!("{module}={level}")
            .parse()
            .with_context(|| format!("invalid level override for module '{module}'"))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
