//! Canonical and display color value types
//!
//! [`CanonicalColor`] is the source of truth everywhere in the engine: a
//! cylindrical (lightness, chroma, hue) color in the OKLCH-style range.
//! [`DisplayColor`] is the 8-bit sRGB form derived from it on demand.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::constants::canonical::MAX_CHROMA;
use crate::error::ThemeColorError;

/// Perceptual color in cylindrical form
///
/// Ranges: lightness [0, 1], chroma [0, ~0.4], hue [0, 360), alpha [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalColor {
    /// Perceptual lightness (0 = black, 1 = white)
    pub lightness: f64,
    /// Colorfulness; 0 is achromatic
    pub chroma: f64,
    /// Hue angle in degrees
    pub hue: f64,
    /// Opacity
    #[serde(default = "opaque")]
    pub alpha: f64,
}

fn opaque() -> f64 {
    1.0
}

impl CanonicalColor {
    /// Create an opaque color, bringing each component into its domain.
    ///
    /// Lightness is clamped to [0, 1], negative chroma becomes 0 and the hue
    /// is wrapped into [0, 360).
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        Self {
            lightness: lightness.clamp(0.0, 1.0),
            chroma: chroma.max(0.0),
            hue: normalize_hue(hue),
            alpha: 1.0,
        }
    }

    /// Return a copy with the given opacity (clamped to [0, 1])
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Achromatic color with the given lightness
    pub fn gray(lightness: f64) -> Self {
        Self::new(lightness, 0.0, 0.0)
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.lightness.is_finite()
            && self.chroma.is_finite()
            && self.hue.is_finite()
            && self.alpha.is_finite()
    }

    /// Parse color text; see [`crate::color::parse`] for the grammar
    pub fn parse(text: &str) -> Option<Self> {
        super::parse::parse(text)
    }

    /// Serialize as `oklch(L C H)` (or `oklch(L C H / A)` when translucent)
    pub fn to_canonical_string(&self) -> String {
        super::conversion::to_canonical_string(self)
    }

    /// Convert to 8-bit sRGB, clamping out-of-gamut channels
    pub fn to_display(&self) -> DisplayColor {
        super::conversion::to_display(self)
    }

    /// Convert to a `#RRGGBB` string
    pub fn to_display_hex(&self) -> String {
        super::conversion::to_display_hex(self)
    }
}

impl fmt::Display for CanonicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl FromStr for CanonicalColor {
    type Err = ThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ThemeColorError::Unparseable {
            input: s.to_string(),
        })
    }
}

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_hue(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a chroma value into the adjustable range
pub(crate) fn clamp_chroma(chroma: f64) -> f64 {
    chroma.clamp(0.0, MAX_CHROMA)
}

/// 8-bit sRGB color for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize a gamma-encoded sRGB color, clamping each channel to [0, 1]
    pub fn from_srgb(srgb: Srgb<f64>) -> Self {
        Self {
            r: quantize(srgb.red),
            g: quantize(srgb.green),
            b: quantize(srgb.blue),
        }
    }

    /// Gamma-encoded channels in [0, 1]
    pub fn to_srgb(self) -> Srgb<f64> {
        Srgb::<f64>::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Hex color string (e.g., "#FF0000")
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Functional notation (e.g., "rgb(255, 0, 0)")
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Promote to the canonical representation
    pub fn to_canonical(self) -> CanonicalColor {
        super::conversion::canonical_from_display(self)
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn quantize(channel: f64) -> u8 {
    // NaN maps to 0 through the saturating cast
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
