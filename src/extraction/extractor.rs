//! Palette extraction from pixel buffers
//!
//! Pipeline:
//! 1. Sample informative pixels (see [`sample_pixels`])
//! 2. Median-cut the samples into leaf buckets
//! 3. Rank leaves by pixel count boosted by saturation
//! 4. Promote the best leaves to canonical colors and assign theme roles

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::median_cut::{median_cut, QuantizedColor};
use super::sampling::{sample_pixels, PixelBuffer};
use crate::accessibility::contrast::relative_luminance;
use crate::color::CanonicalColor;
use crate::config::ExtractionConfig;
use crate::constants::roles::{
    BACKGROUND_MIN_LUMINANCE, FOREGROUND_MAX_LUMINANCE, MUTED_LUMINANCE_HIGH, MUTED_LUMINANCE_LOW,
};
use crate::error::{Result, ThemeColorError};

/// Theme role suggested for an extracted color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteRole {
    Primary,
    Accent,
    Background,
    Foreground,
    Muted,
    Secondary,
}

impl PaletteRole {
    /// Role for the entry at `index` (0 = most important) with `luminance`
    ///
    /// Rules are evaluated in order; the first match wins:
    /// index 0 is Primary, very light is Background, very dark is Foreground,
    /// index 1 is Accent, mid-tones are Muted, anything else is Secondary.
    pub fn assign(index: usize, luminance: f64) -> Self {
        if index == 0 {
            PaletteRole::Primary
        } else if luminance > BACKGROUND_MIN_LUMINANCE {
            PaletteRole::Background
        } else if luminance < FOREGROUND_MAX_LUMINANCE {
            PaletteRole::Foreground
        } else if index == 1 {
            PaletteRole::Accent
        } else if luminance > MUTED_LUMINANCE_LOW && luminance < MUTED_LUMINANCE_HIGH {
            PaletteRole::Muted
        } else {
            PaletteRole::Secondary
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "primary",
            PaletteRole::Accent => "accent",
            PaletteRole::Background => "background",
            PaletteRole::Foreground => "foreground",
            PaletteRole::Muted => "muted",
            PaletteRole::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// One color of an extracted palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: CanonicalColor,
    /// Samples that fell into this color's bucket
    pub pixel_count: u32,
    /// WCAG relative luminance
    pub luminance: f64,
    pub role: PaletteRole,
}

impl PaletteEntry {
    /// Canonical `oklch(...)` string
    pub fn canonical_string(&self) -> String {
        self.color.to_canonical_string()
    }

    /// `#RRGGBB` string for presentation
    pub fn display_hex(&self) -> String {
        self.color.to_display_hex()
    }
}

/// Palette extractor implementing sampled median-cut quantization
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    config: ExtractionConfig,
}

impl PaletteExtractor {
    /// Create an extractor with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom parameters
    ///
    /// # Errors
    ///
    /// Returns [`ThemeColorError::InvalidParameter`] if the configuration is unusable.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract up to `max_colors` palette entries, most important first
    ///
    /// # Errors
    ///
    /// Returns [`ThemeColorError::InsufficientColorVariety`] when fewer than
    /// `min_samples` pixels survive the alpha and luminance filters.
    pub fn extract(&self, buffer: &PixelBuffer<'_>) -> Result<Vec<PaletteEntry>> {
        // Step 1: Sampling
        let samples = sample_pixels(buffer, &self.config);
        debug!(
            width = buffer.width(),
            height = buffer.height(),
            samples = samples.len(),
            "sampled pixels"
        );

        if samples.len() < self.config.min_samples {
            return Err(ThemeColorError::InsufficientColorVariety {
                samples: samples.len(),
                minimum: self.config.min_samples,
            });
        }

        // Step 2: Quantization
        let leaves = median_cut(samples, self.config.max_depth);
        debug!(leaves = leaves.len(), depth = self.config.max_depth, "median cut complete");

        // Step 3: Ranking
        let ranked = rank(leaves, self.config.max_colors);

        // Step 4: Promotion
        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(index, leaf)| promote(index, leaf))
            .collect())
    }
}

/// Order leaves by importance, most important first, and keep `limit`
fn rank(mut leaves: Vec<QuantizedColor>, limit: usize) -> Vec<QuantizedColor> {
    leaves.sort_by(|a, b| b.importance().total_cmp(&a.importance()));
    leaves.truncate(limit);
    leaves
}

fn promote(index: usize, leaf: QuantizedColor) -> PaletteEntry {
    let color = leaf.color.to_display().to_canonical();
    let luminance = relative_luminance(&color);

    PaletteEntry {
        color,
        pixel_count: u32::try_from(leaf.pixel_count).unwrap_or(u32::MAX),
        luminance,
        role: PaletteRole::assign(index, luminance),
    }
}
