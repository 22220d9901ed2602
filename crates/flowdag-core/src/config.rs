//! Layout parameters.
//!
//! [`LayoutParams`] is the parameter object the host passes alongside the
//! graph. Every field has a default, so a partial TOML or JSON document is
//! enough; field names accept both the camelCase wire form (`nodeWidth`)
//! and snake_case (`node_width`) for hand-written config files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::ConfigError;

/// Largest accepted size or spacing, in pixels.
///
/// Keeps every sum and product the placement computes well inside `f64`
/// range, so coordinates stay finite.
pub const MAX_DIMENSION: f64 = 1e9;

/// Direction in which layers flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Layers run left to right.
    #[default]
    Horizontal,
    /// Layers run top to bottom.
    Vertical,
}

/// Placement strategy. Only layered placement exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    #[default]
    Layered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    /// Viewport width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Viewport height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_node_width", alias = "node_width")]
    pub node_width: f64,
    #[serde(default = "default_node_height", alias = "node_height")]
    pub node_height: f64,
    #[serde(default = "default_horizontal_spacing", alias = "horizontal_spacing")]
    pub horizontal_spacing: f64,
    #[serde(default = "default_vertical_spacing", alias = "vertical_spacing")]
    pub vertical_spacing: f64,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub algorithm: LayoutAlgorithm,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            orientation: Orientation::default(),
            algorithm: LayoutAlgorithm::default(),
        }
    }
}

impl LayoutParams {
    /// Fixed dimensions used when only the topology of a layout matters
    /// (layer count, widest layer). Independent of any viewport.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            node_width: 150.0,
            node_height: 50.0,
            horizontal_spacing: 50.0,
            vertical_spacing: 50.0,
            orientation: Orientation::Horizontal,
            algorithm: LayoutAlgorithm::Layered,
        }
    }

    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub const fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Parse parameters from a TOML document and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Check every numeric field.
    ///
    /// Node sizes must be finite and positive; viewport size and spacing
    /// must be finite and non-negative. Nothing may exceed
    /// [`MAX_DIMENSION`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value, strict) in self.fields() {
            if !is_usable(value, strict) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: if value > MAX_DIMENSION {
                        "exceeds the 1e9 pixel limit"
                    } else if strict {
                        "must be finite and positive"
                    } else {
                        "must be finite and non-negative"
                    },
                });
            }
        }
        Ok(())
    }

    /// Return a copy with every unusable field replaced by its default.
    ///
    /// The layout engine calls this instead of [`Self::validate`] because
    /// it must always produce output.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |field: &'static str, value: f64, fallback: f64, strict: bool| {
            if is_usable(value, strict) {
                value
            } else {
                warn!(field, value, fallback, "replacing unusable layout parameter");
                fallback
            }
        };

        Self {
            width: pick("width", self.width, defaults.width, false),
            height: pick("height", self.height, defaults.height, false),
            node_width: pick("node_width", self.node_width, defaults.node_width, true),
            node_height: pick("node_height", self.node_height, defaults.node_height, true),
            horizontal_spacing: pick(
                "horizontal_spacing",
                self.horizontal_spacing,
                defaults.horizontal_spacing,
                false,
            ),
            vertical_spacing: pick(
                "vertical_spacing",
                self.vertical_spacing,
                defaults.vertical_spacing,
                false,
            ),
            orientation: self.orientation,
            algorithm: self.algorithm,
        }
    }

    const fn fields(&self) -> [(&'static str, f64, bool); 6] {
        [
            ("width", self.width, false),
            ("height", self.height, false),
            ("node_width", self.node_width, true),
            ("node_height", self.node_height, true),
            ("horizontal_spacing", self.horizontal_spacing, false),
            ("vertical_spacing", self.vertical_spacing, false),
        ]
    }
}

/// Load layout parameters from a TOML file.
///
/// A missing file yields [`LayoutParams::default`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// holds an unusable value.
pub fn load_layout_params(path: &Path) -> Result<LayoutParams> {
    if !path.exists() {
        return Ok(LayoutParams::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    LayoutParams::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn is_usable(value: f64, strict: bool) -> bool {
    value.is_finite()
        && value <= MAX_DIMENSION
        && if strict { value > 0.0 } else { value >= 0.0 }
}

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    600.0
}

const fn default_node_width() -> f64 {
    180.0
}

const fn default_node_height() -> f64 {
    60.0
}

const fn default_horizontal_spacing() -> f64 {
    80.0
}

const fn default_vertical_spacing() -> f64 {
    40.0
}
