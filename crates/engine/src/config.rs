//! Engine configuration via `zstack.toml`
//!
//! A default `zstack.toml` can be written next to the application's data.
//! To change settings, edit the file and restart.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use zstack_core::{Error, Result};

use crate::cascade::ShiftPolicy;
use crate::ids::IdStrategy;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "zstack.toml";

/// Engine configuration loaded from `zstack.toml`.
///
/// # Example
///
/// ```toml
/// # Which widgets move when a Z collides: "tail" (default) or "contiguous"
/// shift_policy = "tail"
///
/// # Widget id generation: "random" (default) or "sequential"
/// id_strategy = "random"
///
/// # Re-check both indices after every mutation (slow, for debugging)
/// verify_invariants = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shift policy: `"contiguous"` or `"tail"`.
    #[serde(default = "default_shift_policy_str")]
    pub shift_policy: String,
    /// Id strategy: `"random"` or `"sequential"`.
    #[serde(default = "default_id_strategy_str")]
    pub id_strategy: String,
    /// Run the full consistency check after every mutation.
    #[serde(default)]
    pub verify_invariants: bool,
}

fn default_shift_policy_str() -> String {
    ShiftPolicy::default().as_str().to_string()
}

fn default_id_strategy_str() -> String {
    IdStrategy::default().as_str().to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shift_policy: default_shift_policy_str(),
            id_strategy: default_id_strategy_str(),
            verify_invariants: false,
        }
    }
}

impl EngineConfig {
    /// Parse the shift policy string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"contiguous"` or `"tail"`.
    pub fn shift_policy(&self) -> Result<ShiftPolicy> {
        self.shift_policy.parse()
    }

    /// Parse the id strategy string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"random"` or `"sequential"`.
    pub fn id_strategy(&self) -> Result<IdStrategy> {
        self.id_strategy.parse()
    }

    /// Validate every enumerated field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field's error.
    pub fn validate(&self) -> Result<()> {
        self.shift_policy()?;
        self.id_strategy()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# zstack engine configuration
#
# Which widgets move when a requested Z is already taken:
#   "tail"       = every widget at or above that Z moves up by one
#   "contiguous" = only the unbroken run starting at that Z moves up by one
shift_policy = "tail"

# Widget id generation: "random" (UUID v4) or "sequential" (1, 2, 3, ...)
id_strategy = "random"

# Re-check identity/ordering index consistency after every mutation.
# Panics on the first inconsistency. Slow; meant for debugging.
verify_invariants = false
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        info!(
            target: "zstack::config",
            path = %path.display(),
            shift_policy = %config.shift_policy,
            id_strategy = %config.id_strategy,
            "Loaded engine config"
        );
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
