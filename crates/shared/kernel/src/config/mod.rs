use config::{Config, Environment, File};
use portico_domain::config::BindingConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for overrides (`PORTICO__STRICT_SUPPRESSION=true`).
pub const ENV_PREFIX: &str = "PORTICO";

const DEFAULT_CONFIG_FILE: &str = "portico";

/// Custom error type for config loading.
#[portico_derive::portico_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file layered with environment overrides.
///
/// 1. **Base file**: `path`, or `portico` (any supported extension) in the working directory.
/// 2. **Environment**: variables prefixed with `PORTICO__`; nested keys use `__`
///    (`PORTICO__DEFAULTS__BLACKLIST` maps to `defaults.blacklist`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, unreadable, or does not match `T`.
///
/// # Example
/// ```rust
/// use portico_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct ToolConfig {
///     verbose: bool,
/// }
///
/// let cfg: ToolConfig = load_config(Some("config/local")).unwrap_or_default();
/// # let _ = cfg.verbose;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .list_separator(",")
                .with_list_parse_key("blacklist")
                .with_list_parse_key("defaults.blacklist")
                .try_parsing(true)
                .source(env),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the application-wide [`BindingConfig`].
///
/// # Errors
/// See [`load_config`].
pub fn load_binding_config(path: Option<impl AsRef<Path>>) -> Result<BindingConfig, ConfigError> {
    load_config(path)
}
