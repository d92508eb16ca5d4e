//! Engine configuration.
//!
//! Settings are read from a `hearth.toml` file:
//!
//! ```toml
//! [network]
//! fan_out_posts = false
//! notify_on_friendship = false
//! notify_on_comment = false
//!
//! [limits]
//! max_display_name_len = 64
//! max_bio_len = 280
//! max_body_len = 2000
//! ```
//!
//! Every key is optional; missing keys fall back to the defaults shown above.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name searched for by [`HearthConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "hearth.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HEARTH_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HearthConfig {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub limits: Limits,
}

/// Behaviour switches for the directory. All off by default: feeds and
/// notifications are only populated by explicit calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Push every post created via `publish_post` into each friend's feed.
    #[serde(default)]
    pub fan_out_posts: bool,
    /// Notify both users when a new friendship edge is created.
    #[serde(default)]
    pub notify_on_friendship: bool,
    /// Notify the post owner when a comment or reply lands on their post.
    #[serde(default)]
    pub notify_on_comment: bool,
}

/// Field length limits, counted in chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_display_name_len")]
    pub max_display_name_len: usize,
    #[serde(default = "default_max_bio_len")]
    pub max_bio_len: usize,
    #[serde(default = "default_max_body_len")]
    pub max_body_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_display_name_len: default_max_display_name_len(),
            max_bio_len: default_max_bio_len(),
            max_body_len: default_max_body_len(),
        }
    }
}

fn default_max_display_name_len() -> usize {
    64
}

fn default_max_bio_len() -> usize {
    280
}

fn default_max_body_len() -> usize {
    2000
}

impl HearthConfig {
    /// Load configuration from an explicit file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Find `hearth.toml` in `start` or any parent directory.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence: `explicit` path, then `$HEARTH_CONFIG`, then a discovered
    /// `hearth.toml` above `start`, then defaults. Returns the path that was
    /// loaded, if any.
    pub fn resolve(explicit: Option<&Path>, start: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .or_else(|| Self::discover(start));

        match path {
            Some(path) => {
                let config = Self::load(&path)?;
                log::debug!("loaded configuration from {}", path.display());
                Ok((config, Some(path)))
            }
            None => {
                log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }
}
