//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tp_api::DEFAULT_ENDPOINT;
use tp_core::DayShift;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint of the backend.
    pub endpoint: String,
    /// File holding the login token.
    pub token_path: PathBuf,
    /// How `p<n>`/`n<n>` day offsets move a time.
    pub day_shift: DayShift,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("token_path", &self.token_path)
            .field("day_shift", &self.day_shift)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_path: data_dir.join("token"),
            day_shift: DayShift::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: built-in defaults, `config.toml` in the user config
    /// directory, the given file, then `TODOPEER_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TODOPEER_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for todopeer.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("todopeer"))
}

/// Returns the platform-specific data directory for todopeer.
///
/// On Linux: `~/.local/share/todopeer`
fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("todopeer"))
}
