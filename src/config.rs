use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_vcs_bin() -> String {
    "svn".to_string()
}

fn default_build_bin() -> String {
    "mvn".to_string()
}

fn default_stop_goal() -> String {
    "jetty:stop".to_string()
}

fn default_start_goal() -> String {
    "jetty:run".to_string()
}

fn default_views_dir() -> String {
    "views".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

/// Dashboard configuration, read once at startup from a JSON file and
/// immutable for the rest of the process lifetime. Handlers receive it
/// behind an `Arc` — there is no global state and no locking.
///
/// Only `port` and `project_dir` are mandatory; everything else defaults to
/// the classic svn + maven-jetty toolchain.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Debug mode: relaxes cross-origin restrictions on JSON responses.
    #[serde(default)]
    pub debug: bool,
    /// HTTP listen port.
    pub port: u16,
    /// Absolute path of the project checkout the dashboard operates on.
    pub project_dir: String,
    /// Build profile appended to the start command as `-P<profile>`.
    /// An empty string counts as unset.
    #[serde(default)]
    pub profile: Option<String>,
    /// Listen address (default: all interfaces, LAN dashboards are the
    /// normal deployment).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Version-control client executable.
    #[serde(default = "default_vcs_bin")]
    pub vcs_bin: String,
    /// Build tool executable used to stop/start the dev server.
    #[serde(default = "default_build_bin")]
    pub build_bin: String,
    /// Build-tool goal that stops the running dev server.
    #[serde(default = "default_stop_goal")]
    pub stop_goal: String,
    /// Build-tool goal that launches the dev server.
    #[serde(default = "default_start_goal")]
    pub start_goal: String,
    /// Directory holding the layout and page templates.
    #[serde(default = "default_views_dir")]
    pub views_dir: String,
    /// Directory served under the static asset prefixes.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Startup configuration failure. Always fatal — the process must not serve
/// a single request with a missing or malformed config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Load the config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn project_path(&self) -> &Path {
        Path::new(&self.project_dir)
    }

    /// The configured build profile, treating the empty string as unset.
    pub fn build_profile(&self) -> Option<&str> {
        self.profile.as_deref().filter(|p| !p.is_empty())
    }
}
