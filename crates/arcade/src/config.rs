//! Configuration file loading for the arcade front end.
//!
//! Settings live in a small TOML file. Every field has a default, so a
//! missing file or an empty one gives a playable setup.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How pieces are drawn on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Glyphs {
    /// Letters, uppercase for White (`K`, `q`, ...).
    #[default]
    Letters,
    /// Unicode chess symbols.
    Unicode,
    /// ASCII art drawings, three text lines per square.
    Ascii,
}

impl Glyphs {
    /// Returns the next style, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Glyphs::Letters => Glyphs::Unicode,
            Glyphs::Unicode => Glyphs::Ascii,
            Glyphs::Ascii => Glyphs::Letters,
        }
    }
}

/// Front end settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArcadeConfig {
    /// Piece style. Defaults to letters.
    #[serde(default)]
    pub glyphs: Glyphs,
    /// Draw file letters and rank numbers around the board.
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    /// List captured pieces under the board.
    #[serde(default = "default_true")]
    pub show_captures: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        ArcadeConfig {
            glyphs: Glyphs::default(),
            show_coordinates: true,
            show_captures: true,
        }
    }
}

impl ArcadeConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        PathBuf::from("arcade.toml")
    }
}
