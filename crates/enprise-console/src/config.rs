//! Configuration file loading for the console.
//!
//! Settings come from a TOML file, `enprise.toml` in the current directory
//! unless another path is given, and may be overridden from the command line.

use enprise_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The default promotion letter does not name a promotion piece.
    #[error("Invalid default promotion: {0:?} (expected one of q, r, b, n)")]
    InvalidPromotion(char),
}

/// Console settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Append `*` to pieces that have moved. Defaults to true.
    #[serde(default = "default_true")]
    pub show_moved_marker: bool,
    /// Print rank numbers and file letters around the board. Defaults to true.
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    /// Piece letter used when a promoting move names no piece. Defaults to `q`.
    #[serde(default = "default_promotion")]
    pub default_promotion: char,
}

fn default_true() -> bool {
    true
}

fn default_promotion() -> char {
    'q'
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            show_moved_marker: true,
            show_coordinates: true,
            default_promotion: default_promotion(),
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration path, `enprise.toml` in the working
    /// directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("enprise.toml")
    }

    /// Resolves [`Self::default_promotion`] to a piece kind.
    pub fn promotion_kind(&self) -> Result<PieceKind, ConfigError> {
        PieceKind::from_letter(self.default_promotion)
            .filter(|kind| kind.is_promotion_target())
            .ok_or(ConfigError::InvalidPromotion(self.default_promotion))
    }
}
