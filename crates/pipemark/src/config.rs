//! YAML configuration.
//!
//! A config file carries the same settings as the CLI flags:
//!
//! ```yaml
//! prefix: "utils."
//! debug: false
//! sveltekit_defaults: true
//! exclude:
//!   - vendor/
//!   - legacy/
//! ```
//!
//! Every key is optional. Unknown keys are an error, so a typo does not
//! silently fall back to a default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::exclude::PathExclusions;
use crate::options::RewriteOptions;
use crate::preprocess::Preprocessor;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid YAML for [`Config`].
    #[error("invalid config{}: {source}", path_suffix(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Preprocessor settings as loaded from a file or assembled by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Call-name prefix.
    pub prefix: String,
    /// Record every rewrite.
    pub debug: bool,
    /// Extra path exclusion matchers.
    pub exclude: Vec<String>,
    /// Also exclude SvelteKit's generated files.
    pub sveltekit_defaults: bool,
}

impl Config {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Reads and parses a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            source,
        })
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions::new()
            .prefix(self.prefix.clone())
            .debug(self.debug)
    }

    /// The exclusion list: SvelteKit defaults first when enabled, then the
    /// explicit matchers.
    pub fn path_exclusions(&self) -> PathExclusions {
        let mut exclusions = if self.sveltekit_defaults {
            PathExclusions::sveltekit_defaults()
        } else {
            PathExclusions::new()
        };
        exclusions.extend(self.exclude.iter().cloned());
        exclusions
    }

    pub fn preprocessor(&self) -> Preprocessor {
        Preprocessor::new(self.rewrite_options()).exclusions(self.path_exclusions())
    }
}
