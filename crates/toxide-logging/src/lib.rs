// ABOUTME: Logging facade for the toxide crates, built on tokio-tracing
// ABOUTME: One call installs the configured subscriber; macros re-export from here

pub mod config;
pub mod layers;
pub mod subscriber;

pub use config::{LogLevel, LoggingConfig};
pub use subscriber::init_subscriber;

// The other crates log through these instead of importing tracing directly
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

use anyhow::Result;

/// Install the global subscriber with default settings.
pub fn init_logging() -> Result<()> {
    init_subscriber(LoggingConfig::default())
}

/// Install the global subscriber for the given configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexported_macros_compile() {
        trace!("trace record");
        debug!("debug record");
        info!(environment = "py39", "info record");
        warn!("warn record");
        error!("error record");
    }

    #[test]
    fn test_level_conversions() {
        let level: LogLevel = Level::DEBUG.into();
        assert_eq!(level, LogLevel(Level::DEBUG));
        assert_eq!(Level::from(level), Level::DEBUG);
    }
}
