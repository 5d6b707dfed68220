//! Configuration management for cadence.
//!
//! Settings live in a JSON file in the platform data directory (see
//! [`DataStorage`]). Every section is optional so a missing or partial file
//! still yields a working configuration.
//!
//! ## Configuration Structure
//!
//! - **Recurrence**: how many occurrences `preview` shows and how many are
//!   scheduled ahead after a pattern change
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use cadence::libs::config::Config;
//!
//! let config = Config::read()?;
//! let recurrence = config.recurrence_or_default();
//! println!("Preview shows {} occurrences", recurrence.preview_count);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::recurrence::{DEFAULT_LOOKAHEAD_COUNT, DEFAULT_PREVIEW_COUNT};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Batch sizes used when generating occurrences.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RecurrenceConfig {
    /// Occurrences listed by a one-shot preview.
    pub preview_count: usize,

    /// Occurrences generated and stored after a pattern is edited.
    pub lookahead_count: usize,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        RecurrenceConfig {
            preview_count: DEFAULT_PREVIEW_COUNT,
            lookahead_count: DEFAULT_LOOKAHEAD_COUNT,
        }
    }
}

/// Main configuration container for the application.
///
/// Unconfigured sections are omitted from the JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceConfig>,
}

impl Config {
    /// Reads the configuration from the data directory.
    ///
    /// A missing file is not an error: defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from an explicit file path.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON to the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file from the data directory.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::delete_at(&config_file_path)
    }

    /// Removes the configuration file at `path`. A missing file is fine.
    pub fn delete_at(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Recurrence settings, falling back to the built-in defaults.
    pub fn recurrence_or_default(&self) -> RecurrenceConfig {
        self.recurrence.clone().unwrap_or_default()
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Existing values are offered as defaults. The result is returned for
    /// the caller to save.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.recurrence_or_default();

        msg_print!(Message::ConfigModuleRecurrence, true);
        config.recurrence = Some(RecurrenceConfig {
            preview_count: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPreviewCount.to_string())
                .default(default.preview_count)
                .interact_text()?,

            lookahead_count: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptLookaheadCount.to_string())
                .default(default.lookahead_count)
                .interact_text()?,
        });

        Ok(config)
    }
}
