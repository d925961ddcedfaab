use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
    /// Directory for rolling log files; console only when unset
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Reads `LOG_LEVEL`, `LOG_DIR` and `LOG_FORMAT`.
    pub fn from_env() -> Self {
        let level = std::env::var("LOG_LEVEL")
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let dir = std::env::var("LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let format = match std::env::var("LOG_FORMAT") {
            Ok(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Self { level, dir, format }
    }

    fn console_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{},tower_http=warn,hyper=warn,sqlx=warn",
                self.level
            ))
        })
    }
}

/// Installs the global subscriber.
///
/// Console output is always on. With a log directory, two daily rolling
/// files are added: `qcm.log` for errors and `qcm.json` for structured logs.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(config.console_filter())
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(config.console_filter())
            .boxed(),
    };
    layers.push(console_layer);

    if let Some(dir) = &config.dir {
        std::fs::create_dir_all(dir)?;

        let error_appender = RollingFileAppender::new(Rotation::DAILY, dir, "qcm.log");
        layers.push(
            fmt::layer()
                .with_writer(error_appender)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("error"))
                .boxed(),
        );

        let json_appender = RollingFileAppender::new(Rotation::DAILY, dir, "qcm.json");
        layers.push(
            fmt::layer()
                .json()
                .with_writer(json_appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new(&config.level))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::info!(
        level = %config.level,
        log_dir = ?config.dir,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["LOG_LEVEL", "LOG_DIR", "LOG_FORMAT"], || {
            assert_eq!(LoggingConfig::from_env(), LoggingConfig::default());
        });
    }

    #[test]
    fn test_from_env_values() {
        temp_env::with_vars(
            [
                ("LOG_LEVEL", Some("debug")),
                ("LOG_DIR", Some("/tmp/qcm-logs")),
                ("LOG_FORMAT", Some("JSON")),
            ],
            || {
                let config = LoggingConfig::from_env();
                assert_eq!(config.level, "debug");
                assert_eq!(config.dir, Some(PathBuf::from("/tmp/qcm-logs")));
                assert_eq!(config.format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        temp_env::with_vars(
            [
                ("LOG_LEVEL", Some("  ")),
                ("LOG_DIR", Some("")),
                ("LOG_FORMAT", Some("pretty")),
            ],
            || {
                assert_eq!(LoggingConfig::from_env(), LoggingConfig::default());
            },
        );
    }
}
