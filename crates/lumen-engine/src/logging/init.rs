use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_engine::shader=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Builds, but does not install, a logger for `config`.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then `info`.
pub fn logger_builder(config: &LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.env_filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.write_style(config.write_style);
    builder
}

/// Initializes the global logger once. Later calls are ignored.
///
/// If the host application already installed a logger, that one is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if logger_builder(&config).try_init().is_err() {
            log::debug!("a global logger is already installed; keeping it");
            return;
        }
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig {
            env_filter: Some("lumen_engine=trace".into()),
            ..LoggingConfig::default()
        };
        let logger = logger_builder(&config).build();
        assert_eq!(logger.filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn repeated_init_keeps_first_logger() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            ..LoggingConfig::default()
        });
        let first = log::max_level();
        assert_ne!(first, log::LevelFilter::Off);

        init_logging(LoggingConfig {
            env_filter: Some("off".into()),
            ..LoggingConfig::default()
        });
        assert_eq!(log::max_level(), first);

        // A second backend cannot replace the installed one either.
        let late = logger_builder(&LoggingConfig {
            env_filter: Some("off".into()),
            ..LoggingConfig::default()
        })
        .try_init();
        assert!(late.is_err());
        assert_eq!(log::max_level(), first);
    }
}
