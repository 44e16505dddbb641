//! Tracing subscriber setup for atlantis.
//!
//! A [`AtlantisTracer`] collects one stdout layer plus optional journald and rolling-file
//! layers, each with its own format and filter, and installs them as the global subscriber.
//!
//! ```no_run
//! use atlantis_tracing::{AtlantisTracer, LayerInfo, Tracer};
//!
//! let _guard = AtlantisTracer::new().with_stdout(LayerInfo::default()).init();
//! ```

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};

mod formatter;
mod layers;

use crate::layers::Layers;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The default tracer: stdout always, journald and file output on request.
#[derive(Debug, Clone)]
pub struct AtlantisTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl AtlantisTracer {
    /// A tracer with the default stdout layer and nothing else.
    pub fn new() -> Self {
        Self { stdout: LayerInfo::default(), journald: None, file: None }
    }

    /// Replace the stdout layer configuration.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Also log to journald with the given filter.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Also log to rolling files.
    pub fn with_file(mut self, config: LayerInfo, file_info: FileInfo) -> Self {
        self.file = Some((config, file_info));
        self
    }
}

impl Default for AtlantisTracer {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration of one logging layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new `LayerInfo`.
    ///
    /// `default_directive` applies when `RUST_LOG` is unset, `filters` is a comma-separated list
    /// of extra directives, and `color` is the `--color` mode (`None` disables ANSI output).
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Installs a global tracing subscriber.
pub trait Tracer {
    /// Initialize the subscriber. The returned guard, if any, must be held for file logs to be
    /// flushed.
    fn init(self) -> eyre::Result<Option<WorkerGuard>>;
}

impl Tracer for AtlantisTracer {
    fn init(self) -> eyre::Result<Option<WorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(filter) = self.journald {
            layers.journald(&filter)?;
        }

        let file_guard = if let Some((config, file_info)) = self.file {
            Some(layers.file(config.format, &config.filters, file_info)?)
        } else {
            None
        };

        // a second init, e.g. across tests, keeps the first subscriber
        let _ = tracing_subscriber::registry().with(layers.into_inner()).try_init();
        Ok(file_guard)
    }
}

/// Initializes a debug-level terminal tracer for tests. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = AtlantisTracer::new()
        .with_stdout(LayerInfo::new(
            LogFormat::Terminal,
            LevelFilter::DEBUG.to_string(),
            String::new(),
            None,
        ))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_test_tracing();
        init_test_tracing();
        tracing::debug!("tracing initialized");
    }

    #[test]
    fn test_invalid_default_directive() {
        let tracer = AtlantisTracer::new().with_stdout(LayerInfo::new(
            LogFormat::Json,
            "atlantis=verbose".to_string(),
            String::new(),
            None,
        ));
        assert!(tracer.init().is_err());
    }
}
