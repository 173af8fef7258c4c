//! Configuration management
//!
//! Settings come from `helpdesk.yaml` next to the data directory, overridden
//! by `HELPDESK_*` environment variables. The email-provider API key itself
//! is never stored here; only the name of the environment variable that
//! holds it is.

use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "helpdesk.yaml";
pub const DATA_DIR: &str = ".helpdesk";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data directory, relative to the project root
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Hosted notification endpoint; when unset, dispatch runs the endpoint
    /// handler in-process against the provider API
    pub endpoint: Option<String>,
    /// Provider-verified sender address
    pub sender: String,
    /// Name of the environment variable holding the provider API key
    pub api_key_env: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: DATA_DIR.to_string(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            sender: "helpdesk@example.com".to_string(),
            api_key_env: "SENDGRID_KEY".to_string(),
        }
    }
}

impl Config {
    /// Load configuration for the given project root
    ///
    /// Merges, in order: built-in defaults, `helpdesk.yaml` if present, and
    /// `HELPDESK_*` environment variables (e.g. `HELPDESK_NOTIFY__SENDER`).
    pub fn load(root: &Path) -> Result<Self> {
        let file = root.join(CONFIG_FILE);
        let builder = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .map_err(|e| HelpdeskError::Config(e.to_string()))?,
            )
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::with_prefix("HELPDESK").separator("__"));

        builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| HelpdeskError::Config(e.to_string()))
    }

    /// Absolute path of the data directory under the given root
    #[must_use]
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.store.dir)
    }
}
