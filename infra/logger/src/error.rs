use std::borrow::Cow;

/// Reasons a diagnostics subscriber could not be installed.
#[portico_derive::portico_error]
pub enum LoggerError {
    /// The log directory does not exist and could not be created.
    #[error("Cannot prepare log directory{}: {source}", format_context(context))]
    Directory { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The rolling file appender refused its settings.
    #[error("Cannot open rolling log file{}: {source}", format_context(context))]
    FileSink { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// A filter directive does not parse (`portico_endpoints=loudest`).
    #[error("Invalid filter directive{}: {source}", format_context(context))]
    Filter { source: tracing_subscriber::filter::ParseError, context: Option<Cow<'static, str>> },

    /// Another global subscriber already owns this process.
    #[error("Global subscriber already installed{}: {source}", format_context(context))]
    AlreadyInstalled { source: tracing_subscriber::util::TryInitError, context: Option<Cow<'static, str>> },

    /// Builder settings that cannot produce a working subscriber.
    #[error("Invalid logger settings{}: {message}", format_context(context))]
    InvalidSettings { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal logger error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
