//! # Logger
//!
//! Installs the global `tracing` subscriber for Portico binaries.
//!
//! Library crates only emit events (`tracing::info!`, `tracing::warn!`, ...); a binary
//! decides where they go by calling [`LoggerBuilder::init`] once at startup.
//!
//! * Console output uses the compact formatter.
//! * File output rolls with [`Rotation`] and can be switched to JSON lines.
//! * [`LoggerBuilder::trace_attachment`] raises the endpoint binding crate to `debug`,
//!   which prints every registered descriptor and every suppressed operation name.
//! * `RUST_LOG` still wins over the programmatic directives.
//!
//! ## Example
//!
//! ```rust
//! # use portico_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("portico-inspect")
//!     .level(LevelFilter::WARN)
//!     .trace_attachment(true)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";
const ATTACHMENT_DIRECTIVE: &str = "portico_endpoints=debug";

/// Rolling file sink settings.
#[derive(Debug)]
struct FileSink {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

/// A builder for configuring and installing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    stderr: bool,
    level: LevelFilter,
    directives: Vec<String>,
    file: Option<FileSink>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            stderr: false,
            level: LevelFilter::INFO,
            directives: Vec::new(),
            file: None,
        }
    }
}

impl LoggerBuilder {
    /// Sets the logger name, used as the rolling file prefix.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables console output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Sends console output to stderr, leaving stdout to the program's own output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    /// Sets the default level for targets without an explicit directive.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive such as `portico_endpoints=trace`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Shows per-descriptor and per-suppression diagnostics from model attachment.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn trace_attachment(self, enabled: bool) -> Self {
        if enabled { self.directive(ATTACHMENT_DIRECTIVE) } else { self }
    }

    /// Writes logs to rolling files inside `dir`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSink {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        self
    }

    /// Sets the rotation of the file sink. Ignored without [`LoggerBuilder::file`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(sink) = self.file.as_mut() {
            sink.rotation = rotation;
        }
        self
    }

    /// Caps the number of rolled files kept on disk.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(sink) = self.file.as_mut() {
            sink.max_files = max;
        }
        self
    }

    /// Emits JSON lines in the file sink.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self) -> Self {
        if let Some(sink) = self.file.as_mut() {
            sink.json = true;
        }
        self
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writer's worker guard.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidSettings`] for an empty name, zero `max_files` or no output.
    /// - [`LoggerError::Filter`] for a directive that does not parse.
    /// - [`LoggerError::Directory`] / [`LoggerError::FileSink`] when the file sink cannot open.
    /// - [`LoggerError::AlreadyInstalled`] when a global subscriber exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.env_filter()?;

        let mut layers = Vec::new();
        if self.console {
            let console = layer().compact().with_target(true);
            layers.push(if self.stderr { console.with_writer(std::io::stderr).boxed() } else { console.boxed() });
        }

        let guard = match self.file {
            Some(sink) => {
                fs::create_dir_all(&sink.dir).context(sink.dir.display().to_string())?;

                let appender = RollingFileAppender::builder()
                    .rotation(sink.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(sink.max_files)
                    .build(&sink.dir)
                    .context(self.name.clone())?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if sink.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidSettings {
                message: "console and file output are both disabled".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidSettings {
                message: "name must not be empty".into(),
                context: None,
            });
        }
        if self.file.as_ref().is_some_and(|sink| sink.max_files == 0) {
            return Err(LoggerError::InvalidSettings {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        if self.directives.is_empty() {
            return Ok(builder.from_env_lossy());
        }

        let joined = self.directives.join(",");
        builder.parse(&joined).context(joined)
    }
}

/// Handle to the installed subscriber.
///
/// Dropping it flushes and stops the background file writer.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] with console output at `INFO`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Whether a file sink (and its worker guard) is active.
    #[must_use]
    pub const fn has_file_sink(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_console_info() {
        let builder = Logger::builder().name("inspect");
        assert!(builder.console);
        assert!(!builder.stderr);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.directives.is_empty());
        assert!(builder.file.is_none());
    }

    #[test]
    fn trace_attachment_adds_endpoint_directive() {
        let builder = Logger::builder().name("inspect").trace_attachment(true);
        assert_eq!(builder.directives, vec![ATTACHMENT_DIRECTIVE.to_owned()]);

        let builder = Logger::builder().name("inspect").trace_attachment(false);
        assert!(builder.directives.is_empty());
    }

    #[test]
    fn file_settings_apply_only_with_a_sink() {
        let builder = Logger::builder().name("inspect").max_files(3).json();
        assert!(builder.file.is_none());

        let builder = Logger::builder().name("inspect").file("logs").max_files(3).json();
        let sink = builder.file.as_ref().expect("file sink");
        assert_eq!(sink.max_files, 3);
        assert!(sink.json);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Logger::builder().init().expect_err("empty name");
        assert!(matches!(err, LoggerError::InvalidSettings { .. }));
    }

    #[test]
    fn zero_max_files_is_rejected() {
        let err = Logger::builder().name("inspect").file("logs").max_files(0).init();
        assert!(matches!(err, Err(LoggerError::InvalidSettings { .. })));
    }

    #[test]
    fn bad_directive_is_rejected() {
        let err = Logger::builder().name("inspect").directive("portico_endpoints=loudest").init();
        assert!(matches!(err, Err(LoggerError::Filter { .. })));
    }

    #[test]
    fn no_output_is_rejected() {
        let err = Logger::builder().name("inspect").console(false).init();
        assert!(matches!(err, Err(LoggerError::InvalidSettings { .. })));
    }
}
