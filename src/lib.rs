//! # Theme Colors
//!
//! A Rust crate implementing the color science behind a theme designer.
//!
//! This library provides:
//! - Parsing of `#RRGGBB`, `rgb(r, g, b)` and `oklch(L C H [/ A])` color text
//!   into a perceptual canonical form, and conversion back to display sRGB
//! - WCAG 2.1 relative luminance, contrast ratios and compliance levels
//! - Color vision deficiency simulation and palette collision analysis
//! - Palette extraction from pixel buffers via median-cut quantization
//! - Lightness/chroma/hue adjustment, blending and harmony generation
//!
//! Every operation is a pure function of its inputs; nothing here performs
//! I/O apart from loading and saving [`EngineConfig`] files.
//!
//! ## Example
//!
//! ```rust
//! use theme_colors::{check_compliance, parse, ComplianceLevel};
//!
//! let fg = parse("#ffffff").unwrap();
//! let bg = parse("#666666").unwrap();
//! let result = check_compliance(&fg, &bg);
//! assert_eq!(result.level, ComplianceLevel::Aa);
//! let accent = parse("oklch(0.666 0.179 58.318)").unwrap();
//! println!("{:.2}:1, accent {}", result.ratio, accent.to_display_hex());
//! ```

use std::collections::BTreeMap;

pub mod accessibility;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;

pub use accessibility::{
    check_compliance, contrast_ratio, minimal_contrast_fix, relative_luminance,
    suggest_accessible_color, ComplianceLevel, ContrastResult, CvdReport, CvdSimulator, CvdType,
};
pub use color::{
    adjust_chroma, adjust_lightness, delta_e, is_in_display_gamut, mix, parse, shift_hue,
    to_canonical_string, to_display_hex, CanonicalColor, DisplayColor, HarmonyRule,
};
pub use config::{AccessibilityConfig, EngineConfig, ExtractionConfig, LuminanceBounds};
pub use error::{Result, ThemeColorError};
pub use extraction::{PaletteEntry, PaletteExtractor, PaletteRole, PixelBuffer, PixelLayout};

/// Simulate how `color` appears under a color vision deficiency
pub fn simulate(color: &CanonicalColor, cvd: CvdType) -> CanonicalColor {
    CvdSimulator::new().simulate(color, cvd)
}

/// Check whether two colors remain distinguishable under a deficiency
///
/// `threshold` is a normalized sRGB distance in [0, 1]; 0.1 is the usual value.
pub fn are_distinguishable(
    a: &CanonicalColor,
    b: &CanonicalColor,
    cvd: CvdType,
    threshold: f64,
) -> bool {
    CvdSimulator::with_threshold(threshold).are_distinguishable(a, b, cvd)
}

/// Find colliding color pairs under every deficiency, using default settings
pub fn analyze_palette(colors: &[CanonicalColor]) -> BTreeMap<CvdType, CvdReport> {
    CvdSimulator::new().analyze_palette(colors)
}

/// Extract a palette with default settings
///
/// # Errors
///
/// Returns [`ThemeColorError::InsufficientColorVariety`] if fewer than ten
/// usable pixels are found.
pub fn extract_palette(buffer: &PixelBuffer<'_>) -> Result<Vec<PaletteEntry>> {
    PaletteExtractor::new().extract(buffer)
}

/// Engine bundling every configurable component
///
/// Built once from an [`EngineConfig`]; cheap to clone and safe to share
/// between threads.
#[derive(Debug, Clone)]
pub struct ThemeEngine {
    extractor: PaletteExtractor,
    simulator: CvdSimulator,
    target_ratio: f64,
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self {
            extractor: PaletteExtractor::new(),
            simulator: CvdSimulator::new(),
            target_ratio: AccessibilityConfig::default().default_target_ratio,
        }
    }
}

impl ThemeEngine {
    /// Build an engine from a validated configuration
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: PaletteExtractor::with_config(config.extraction.clone())?,
            simulator: CvdSimulator::from_config(&config.accessibility),
            target_ratio: config.accessibility.default_target_ratio,
        })
    }

    pub fn extractor(&self) -> &PaletteExtractor {
        &self.extractor
    }

    pub fn simulator(&self) -> &CvdSimulator {
        &self.simulator
    }

    /// Extract a palette from a pixel buffer
    pub fn extract_palette(&self, buffer: &PixelBuffer<'_>) -> Result<Vec<PaletteEntry>> {
        self.extractor.extract(buffer)
    }

    /// Coarse fix for `fg` on `bg` at the configured target ratio
    pub fn suggest_accessible_color(
        &self,
        fg: &CanonicalColor,
        bg: &CanonicalColor,
    ) -> CanonicalColor {
        suggest_accessible_color(fg, bg, self.target_ratio)
    }

    /// Minimal lightness fix for `fg` on `bg` at the configured target ratio
    pub fn minimal_contrast_fix(
        &self,
        fg: &CanonicalColor,
        bg: &CanonicalColor,
    ) -> CanonicalColor {
        minimal_contrast_fix(fg, bg, self.target_ratio)
    }

    /// Pairwise CVD analysis with the configured threshold
    pub fn analyze_palette(&self, colors: &[CanonicalColor]) -> BTreeMap<CvdType, CvdReport> {
        self.simulator.analyze_palette(colors)
    }
}
