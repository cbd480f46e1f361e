//! Reference values and defaults for the color engine
//!
//! This module contains compile-time constants for color conversion,
//! accessibility evaluation and palette extraction, based on the WCAG 2.1
//! definitions and the CIE Lab reference formulas.

/// Scaling between CIE Lab and the canonical (OKLCH-style) representation
pub mod lab {
    /// CIE L* spans [0, 100]; canonical lightness spans [0, 1]
    pub const LIGHTNESS_SCALE: f64 = 100.0;

    /// Divisor mapping CIE Lab chroma onto the OKLCH chroma range.
    /// Saturated sRGB primaries land between 0.24 and 0.34.
    pub const CHROMA_SCALE: f64 = 400.0;

    /// Below this canonical chroma the hue is undefined and pinned to 0
    pub const ACHROMATIC_CHROMA: f64 = 1e-4;
}

/// Limits of the canonical representation
pub mod canonical {
    /// Upper bound applied by chroma adjustments
    pub const MAX_CHROMA: f64 = 0.4;

    /// Decimal places used by the canonical string form
    pub const STRING_PRECISION: usize = 4;
}

/// Display (8-bit sRGB) fallbacks
pub mod display {
    /// Neutral gray returned when a canonical color cannot be converted
    pub const FALLBACK_RGB: (u8, u8, u8) = (128, 128, 128);

    /// Hex form of [`FALLBACK_RGB`]
    pub const FALLBACK_HEX: &str = "#808080";
}

/// WCAG 2.1 contrast thresholds
pub mod wcag {
    /// Rec. 709 luminance weights for linear R, G, B
    pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

    /// Flare term added to both luminances in the contrast ratio
    pub const FLARE: f64 = 0.05;

    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AAA_LARGE: f64 = 4.5;

    /// Backgrounds brighter than this get dark suggestions
    pub const LIGHT_BACKGROUND_LUMINANCE: f64 = 0.5;

    /// Canonical lightness of the near-black fallback
    pub const NEAR_BLACK_LIGHTNESS: f64 = 0.1;

    /// Canonical lightness of the near-white fallback
    pub const NEAR_WHITE_LIGHTNESS: f64 = 0.98;

    /// Bisection steps used by the minimal contrast fix
    pub const FIX_SEARCH_ITERATIONS: usize = 24;
}

/// Color vision deficiency analysis defaults
pub mod cvd {
    /// Normalized sRGB distance below which two simulated colors collide
    pub const DISTINGUISH_THRESHOLD: f64 = 0.1;

    /// Largest palette the pairwise analysis is meant for (O(n²) pairs)
    pub const MAX_ANALYZED_PALETTE: usize = 20;
}

/// Palette extraction defaults
pub mod extraction {
    /// Maximum number of pixels sampled from one image
    pub const SAMPLE_LIMIT: usize = 10_000;

    /// Median-cut recursion depth (2^3 = 8 leaf buckets)
    pub const MAX_DEPTH: u32 = 3;

    /// Pixels with alpha below this are invisible and skipped
    pub const ALPHA_THRESHOLD: u8 = 128;

    /// Relative luminance window for informative pixels
    pub const MIN_LUMINANCE: f64 = 0.05;
    pub const MAX_LUMINANCE: f64 = 0.95;

    /// Number of palette entries returned
    pub const MAX_COLORS: usize = 5;

    /// Fewer usable samples than this is an extraction failure
    pub const MIN_SAMPLES: usize = 10;
}

/// Luminance thresholds for palette role assignment
pub mod roles {
    pub const BACKGROUND_MIN_LUMINANCE: f64 = 0.8;
    pub const FOREGROUND_MAX_LUMINANCE: f64 = 0.2;
    pub const MUTED_LUMINANCE_LOW: f64 = 0.3;
    pub const MUTED_LUMINANCE_HIGH: f64 = 0.7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights_sum_to_one() {
        let sum: f64 = wcag::LUMINANCE_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_ordering() {
        assert!(wcag::AA_LARGE < wcag::AA_NORMAL);
        assert!(wcag::AA_NORMAL < wcag::AAA_NORMAL);
        assert!(extraction::MIN_LUMINANCE < extraction::MAX_LUMINANCE);
        assert!(roles::FOREGROUND_MAX_LUMINANCE < roles::MUTED_LUMINANCE_LOW);
        assert!(roles::MUTED_LUMINANCE_HIGH < roles::BACKGROUND_MIN_LUMINANCE);
    }
}
