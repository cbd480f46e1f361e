//! Configuration structures for the color engine.
//!
//! Tunable parameters are grouped per component: palette extraction and
//! accessibility analysis. Every struct has named defaults and can be
//! serialized to/from JSON for reproducible runs:
//!
//! ```no_run
//! use theme_colors::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), theme_colors::ThemeColorError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{cvd, extraction, wcag};
use crate::error::{Result, ThemeColorError};

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Palette extraction parameters
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Contrast and CVD analysis parameters
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

/// Palette extraction parameters.
///
/// Controls pixel sampling, the median-cut depth and how many colors are
/// promoted into the final palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of pixels sampled from the buffer
    pub sample_limit: usize,

    /// Median-cut recursion depth; yields at most 2^depth buckets
    pub max_depth: u32,

    /// Pixels with alpha below this value are skipped (RGBA only)
    pub alpha_threshold: u8,

    /// Relative luminance window for usable pixels
    pub luminance_bounds: LuminanceBounds,

    /// Number of palette entries returned
    pub max_colors: usize,

    /// Minimum usable samples; fewer is an extraction failure
    pub min_samples: usize,
}

/// Inclusive relative-luminance window.
///
/// Near-black and near-white pixels carry little hue information and are
/// excluded from sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuminanceBounds {
    /// Minimum relative luminance
    pub min: f64,

    /// Maximum relative luminance
    pub max: f64,
}

impl LuminanceBounds {
    pub fn contains(&self, luminance: f64) -> bool {
        (self.min..=self.max).contains(&luminance)
    }
}

/// Contrast and color vision analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    /// Normalized distance at or below which simulated colors collide
    pub distinguish_threshold: f64,

    /// Palette size above which pairwise CVD analysis logs a warning
    pub max_analyzed_palette: usize,

    /// Contrast ratio targeted by suggestions
    pub default_target_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sample_limit: extraction::SAMPLE_LIMIT,
            max_depth: extraction::MAX_DEPTH,
            alpha_threshold: extraction::ALPHA_THRESHOLD,
            luminance_bounds: LuminanceBounds::default(),
            max_colors: extraction::MAX_COLORS,
            min_samples: extraction::MIN_SAMPLES,
        }
    }
}

impl Default for LuminanceBounds {
    fn default() -> Self {
        Self {
            min: extraction::MIN_LUMINANCE,
            max: extraction::MAX_LUMINANCE,
        }
    }
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            distinguish_threshold: cvd::DISTINGUISH_THRESHOLD,
            max_analyzed_palette: cvd::MAX_ANALYZED_PALETTE,
            default_target_ratio: wcag::AA_NORMAL,
        }
    }
}

impl ExtractionConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(ThemeColorError::invalid_parameter("sample_limit", self.sample_limit));
        }
        // at most 2^16 leaves
        if self.max_depth > 16 {
            return Err(ThemeColorError::invalid_parameter("max_depth", self.max_depth));
        }
        if self.max_colors == 0 {
            return Err(ThemeColorError::invalid_parameter("max_colors", self.max_colors));
        }
        // an empty sample set must stay an error
        if self.min_samples == 0 {
            return Err(ThemeColorError::invalid_parameter("min_samples", self.min_samples));
        }
        let bounds = self.luminance_bounds;
        if !(0.0..=1.0).contains(&bounds.min)
            || !(0.0..=1.0).contains(&bounds.max)
            || bounds.min > bounds.max
        {
            return Err(ThemeColorError::invalid_parameter(
                "luminance_bounds",
                format!("[{}, {}]", bounds.min, bounds.max),
            ));
        }
        Ok(())
    }
}

impl AccessibilityConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.distinguish_threshold) {
            return Err(ThemeColorError::invalid_parameter(
                "distinguish_threshold",
                self.distinguish_threshold,
            ));
        }
        if !(1.0..=21.0).contains(&self.default_target_ratio) {
            return Err(ThemeColorError::invalid_parameter(
                "default_target_ratio",
                self.default_target_ratio,
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.accessibility.validate()
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ThemeColorError::config_format("Invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ThemeColorError::config_io(format!("Cannot read {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ThemeColorError::config_format("Cannot serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| ThemeColorError::config_io(format!("Cannot write {}", path.display()), e))
    }
}
