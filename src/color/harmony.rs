//! Color harmony generation
//!
//! Harmonies rotate the base hue by fixed angles and keep lightness and
//! chroma, except [`HarmonyRule::Monochromatic`] which varies lightness.

use serde::{Deserialize, Serialize};

use super::adjust::{adjust_lightness, shift_hue};
use super::canonical::CanonicalColor;

/// Hue offset used by analogous and split-complementary schemes
const ANALOGOUS_SPREAD: f64 = 30.0;

/// Lightness step used by the monochromatic scheme
const MONOCHROMATIC_STEP: f64 = 0.15;

/// Classic color-wheel relationships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyRule {
    /// Base and its opposite
    Complementary,
    /// Base flanked by neighbours at ±30°
    Analogous,
    /// Three hues 120° apart
    Triadic,
    /// Base plus the two neighbours of its complement
    SplitComplementary,
    /// Four hues 90° apart
    Tetradic,
    /// Same hue, darker and lighter
    Monochromatic,
}

impl HarmonyRule {
    pub const ALL: [Self; 6] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::SplitComplementary,
        Self::Tetradic,
        Self::Monochromatic,
    ];

    /// Generate the scheme; the base color is always the first element
    pub fn generate(self, base: &CanonicalColor) -> Vec<CanonicalColor> {
        let rotations: &[f64] = match self {
            HarmonyRule::Complementary => &[180.0],
            HarmonyRule::Analogous => &[-ANALOGOUS_SPREAD, ANALOGOUS_SPREAD],
            HarmonyRule::Triadic => &[120.0, 240.0],
            HarmonyRule::SplitComplementary => {
                &[180.0 - ANALOGOUS_SPREAD, 180.0 + ANALOGOUS_SPREAD]
            }
            HarmonyRule::Tetradic => &[90.0, 180.0, 270.0],
            HarmonyRule::Monochromatic => {
                return vec![
                    *base,
                    adjust_lightness(base, -MONOCHROMATIC_STEP),
                    adjust_lightness(base, MONOCHROMATIC_STEP),
                ];
            }
        };

        std::iter::once(*base)
            .chain(rotations.iter().map(|&degrees| shift_hue(base, degrees)))
            .collect()
    }
}
