//! Configuration loading
//!
//! The per-user configuration lives in `~/.bible-config` (`HOME`, or `USERPROFILE` on
//! Windows). Precedence (lowest to highest):
//! 1. Configuration file (JSON; `.bible-config.json` and `.bible-config.toml` also accepted)
//! 2. Environment variables: `BIBLE__*` prefix, `__` as nesting separator
//!    (e.g. `BIBLE__VERSIONS__EN__SOURCE=/data/kjv.json`)
//!
//! The content is owned by the verse provider; this module only locates and loads it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};

/// File name of the per-user configuration.
pub const CONFIG_FILE_NAME: &str = ".bible-config";

/// Environment variable holding the home directory on `platform`.
///
/// `platform` uses the values of `std::env::consts::OS`.
pub fn home_env_var(platform: &str) -> &'static str {
    if platform == "windows" {
        "USERPROFILE"
    } else {
        "HOME"
    }
}

/// Resolve `~/.bible-config` for `platform` from an environment mapping.
///
/// Returns `None` when the home variable is missing or empty.
pub fn resolve_config_path(platform: &str, env: &HashMap<String, String>) -> Option<PathBuf> {
    env.get(home_env_var(platform))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

/// Resolve the configuration path from the process environment.
///
/// Falls back to the platform home directory when the home variable is unset.
pub fn default_config_path() -> Option<PathBuf> {
    let env: HashMap<String, String> = std::env::vars().collect();
    resolve_config_path(std::env::consts::OS, &env).or_else(|| {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
    })
}

/// Find the file backing `path`: the path itself (JSON), then `.json`, then `.toml`.
fn locate(path: &Path) -> Option<(PathBuf, FileFormat)> {
    let with_suffix = |suffix: &str| {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };

    [
        (path.to_path_buf(), FileFormat::Json),
        (with_suffix(".json"), FileFormat::Json),
        (with_suffix(".toml"), FileFormat::Toml),
    ]
    .into_iter()
    .find(|(candidate, _)| candidate.is_file())
}

/// Loaded configuration, opaque to the CLI and handed to the verse provider.
#[derive(Debug, Clone)]
pub struct Settings {
    path: Option<PathBuf>,
    config: Config,
}

impl Settings {
    /// Load the configuration file at `path` and overlay `BIBLE__*` environment variables.
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let (file, format) = locate(path).ok_or_else(|| ApplicationError::Config {
            message: format!("configuration file not found: {}", path.display()),
        })?;
        debug!("load: file={} format={:?}", file.display(), format);

        let config = Config::builder()
            .add_source(File::from(file.clone()).format(format).required(true))
            .add_source(env_source())
            .build()
            .map_err(|e| config_err(&file, e))?;

        Ok(Self {
            path: Some(file),
            config,
        })
    }

    /// Build settings from an in-memory JSON document (no environment overlay).
    pub fn from_json(content: &str) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Json))
            .build()
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })?;
        Ok(Self { path: None, config })
    }

    /// File the settings were loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Deserialize the settings into the schema of the consumer.
    pub fn deserialize<T: DeserializeOwned>(&self) -> ApplicationResult<T> {
        self.config
            .clone()
            .try_deserialize()
            .map_err(|e| match &self.path {
                Some(path) => config_err(path, e),
                None => ApplicationError::Config {
                    message: e.to_string(),
                },
            })
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("BIBLE")
        .prefix_separator("__")
        .separator("__")
}

fn config_err(path: &Path, e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: format!("{}: {}", path.display(), e),
    }
}
