//! Chip theme configuration.
//!
//! Themes are plain serde structs. On disk they are TOML with colors written
//! as hex strings:
//!
//! ```toml
//! background = "#e0e0e0"
//! text = "#212121"
//! button = "#757575"
//! button_hover = "#424242"
//! font_size = 13.0
//! padding = 6.0
//! corner_radius = 12.0
//! remove_glyph = "×"
//! ```

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Theme file could not be read or written
    #[error("theme I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Theme text is not valid TOML for [`ChipTheme`]
    #[error("theme parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field parsed but holds an unusable value
    #[error("invalid theme value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Visual configuration for chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipTheme {
    /// Chip background
    #[serde(with = "hex_color")]
    pub background: Color,
    /// Label color
    #[serde(with = "hex_color")]
    pub text: Color,
    /// Remove button glyph color
    #[serde(with = "hex_color")]
    pub button: Color,
    /// Remove button glyph color while hovered
    #[serde(with = "hex_color")]
    pub button_hover: Color,
    /// Label font size in pixels
    pub font_size: f32,
    /// Inner padding in pixels
    pub padding: f32,
    /// Corner radius in pixels
    pub corner_radius: f32,
    /// Text shown on the remove button
    pub remove_glyph: String,
}

impl Default for ChipTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ChipTheme {
    /// Light palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: Color::rgb(0.878, 0.878, 0.878),
            text: Color::rgb(0.129, 0.129, 0.129),
            button: Color::rgb(0.459, 0.459, 0.459),
            button_hover: Color::rgb(0.259, 0.259, 0.259),
            font_size: 13.0,
            padding: 6.0,
            corner_radius: 12.0,
            remove_glyph: "\u{d7}".to_string(),
        }
    }

    /// Dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0.259, 0.259, 0.259),
            text: Color::rgb(0.933, 0.933, 0.933),
            button: Color::rgb(0.741, 0.741, 0.741),
            button_hover: Color::WHITE,
            ..Self::light()
        }
    }

    /// Parse a theme from TOML. Missing fields take light defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ThemeError> {
        let theme: Self = toml::from_str(toml_str)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a theme from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ThemeError> {
        let contents = std::fs::read_to_string(path)?;
        let theme = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "chip theme loaded");
        Ok(theme)
    }

    /// Serialize to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values that would make a chip unrenderable.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ThemeError::InvalidValue {
                field: "font_size",
                reason: format!("must be positive, got {}", self.font_size),
            });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(ThemeError::InvalidValue {
                field: "padding",
                reason: format!("must be non-negative, got {}", self.padding),
            });
        }
        if self.remove_glyph.is_empty() {
            return Err(ThemeError::InvalidValue {
                field: "remove_glyph",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

mod hex_color {
    use crate::color::Color;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(|e| D::Error::custom(format!("{hex}: {e}")))
    }
}
