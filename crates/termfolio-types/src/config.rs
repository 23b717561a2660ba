//! Terminal configuration loaded from TOML.
//!
//! Every field has a default, so an empty document (or no file at all) gives
//! the stock portfolio terminal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermfolioError};

/// Top-level terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Prefix shown before echoed input lines.
    pub prompt: String,
    /// Commands whose output appears only after a simulated loading delay.
    pub slow_commands: Vec<String>,
    /// Simulated delay for slow commands, in milliseconds.
    pub loading_delay_ms: u64,
    pub boot: BootConfig,
    pub backdrop: BackdropConfig,
    /// Optional TOML file overriding the built-in section content.
    pub content_path: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "visitor@portfolio:~$ ".to_string(),
            slow_commands: vec![
                "skills".to_string(),
                "projects".to_string(),
                "experience".to_string(),
            ],
            loading_delay_ms: 1000,
            boot: BootConfig::default(),
            backdrop: BackdropConfig::default(),
            content_path: None,
        }
    }
}

/// Boot sequence timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub enabled: bool,
    /// Delay before the "loading modules" announcement.
    pub announce_delay_ms: u64,
    /// Delay after the announcement before the ready line.
    pub ready_delay_ms: u64,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            announce_delay_ms: 1000,
            ready_delay_ms: 2000,
        }
    }
}

/// Background visual-effect parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Number of matrix rain columns.
    pub rain_columns: usize,
    /// Glyphs per rain column.
    pub rain_length: usize,
    /// Spawn period for floating code snippets.
    pub float_interval_ms: u64,
    /// Maximum number of snippets alive at once.
    pub max_floats: usize,
    /// How long a snippet stays alive.
    pub float_lifetime_ms: u64,
    /// Seed for the effect RNG (0 picks a time-based seed).
    pub seed: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            rain_columns: 50,
            rain_length: 20,
            float_interval_ms: 3000,
            max_floats: 10,
            float_lifetime_ms: 15000,
            seed: 0,
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    ///
    /// A relative `content_path` is resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(content) = config.content_path.as_mut()
            && content.is_relative()
            && let Some(dir) = path.parent()
        {
            *content = dir.join(&*content);
        }
        log::info!("Loaded terminal config from {}", path.display());
        Ok(config)
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        if self.backdrop.float_interval_ms == 0 {
            return Err(TermfolioError::Config(
                "backdrop.float_interval_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(bad) = self.slow_commands.iter().find(|name| name.trim().is_empty()) {
            return Err(TermfolioError::Config(format!(
                "slow_commands contains an empty name: {bad:?}"
            )));
        }
        Ok(())
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

impl BootConfig {
    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(self.announce_delay_ms)
    }

    /// Delay from session start to the ready line.
    pub fn ready_at(&self) -> Duration {
        Duration::from_millis(self.announce_delay_ms + self.ready_delay_ms)
    }
}
