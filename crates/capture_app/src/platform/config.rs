//! Optional RON configuration.
//!
//! Every key is optional; absent keys keep the engine defaults. Example:
//!
//! ```ron
//! (
//!     request_timeout_secs: Some(15),
//!     user_agent: Some("my-agent/1.0"),
//!     output_dir: Some("captures"),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use capture_engine::EngineConfig;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = "capture.ron";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub redirect_limit: Option<usize>,
    pub max_bytes: Option<u64>,
    pub user_agent: Option<String>,
    /// Relative paths are resolved against the working directory.
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    pub(crate) fn engine_config(&self, cwd: PathBuf, output_path: Option<PathBuf>) -> EngineConfig {
        let output_dir = match &self.output_dir {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        let mut config = EngineConfig::default_with_output(output_dir);
        config.output_path = output_path;

        let fetch = &mut config.fetch;
        if let Some(secs) = self.connect_timeout_secs {
            fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = self.redirect_limit {
            fetch.redirect_limit = limit;
        }
        if let Some(max_bytes) = self.max_bytes {
            fetch.max_bytes = max_bytes;
        }
        if let Some(agent) = &self.user_agent {
            fetch.user_agent = agent.clone();
        }
        config
    }
}

/// Loads the config file. A missing default file is silent; any other problem
/// is logged and the defaults are used.
pub(crate) fn load(explicit: Option<&Path>) -> AppConfig {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG));
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            return AppConfig::default();
        }
        Err(err) => {
            engine_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            engine_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            engine_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
