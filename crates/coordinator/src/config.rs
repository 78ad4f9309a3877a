use crate::error::{CoordinatorError, CoordinatorErrorExt};
use config::{Config, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `COORD__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "COORD";
/// File loaded when no explicit path is given (extension resolved by `config`).
pub const DEFAULT_CONFIG_FILE: &str = "coordinator";

const DEFAULT_LOGGER_NAME: &str = "coordinator";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_FILES: usize = 10;

/// Top-level configuration of a coordinator host.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub logging: LoggingConfig,
    pub events: EventsConfig,
}

/// Where and how much to log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
    pub env_filter: Option<String>,
    pub console: bool,
    pub json: bool,
    pub directory: Option<PathBuf>,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_owned(),
            level: DEFAULT_LOG_LEVEL.to_owned(),
            env_filter: None,
            console: true,
            json: false,
            directory: None,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// Event bus knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Deliver `publish_dev` events. Defaults to on in debug builds.
    pub development_events: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { development_events: cfg!(debug_assertions) }
    }
}

/// Loads a configuration file and overlays `COORD__`-prefixed environment variables.
///
/// Nested keys use double underscores: `COORD__EVENTS__DEVELOPMENT_EVENTS=false`
/// maps to `events.development_events`.
///
/// # Errors
/// Returns [`CoordinatorError::Config`] when the file is missing or the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use coordinator::config::{CoordinatorConfig, load_config};
///
/// let cfg: CoordinatorConfig = load_config(Some("config/local")).unwrap_or_default();
/// assert!(!cfg.logging.name.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, CoordinatorError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading coordinator config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
