//! Color space conversion utilities
//!
//! Conversion chain between display sRGB and the canonical form:
//!
//! ```text
//! sRGB <-> linear RGB <-> CIE XYZ (D65) <-> CIE Lab <-> LCh <-> CanonicalColor
//! ```
//!
//! The gamma transfer (breakpoints 0.0031308 linear / 0.04045 encoded), the
//! D65 matrix and the Lab cube-root piecewise (epsilon 0.008856) come from
//! `palette`. The last step rescales CIE LCh into the OKLCH-style range:
//! lightness is divided by 100 and chroma by [`CHROMA_SCALE`].
//!
//! This is CIE Lab wearing OKLCH units, not OKLab. Round trips are exact to
//! floating point noise; 8-bit hex round trips are stable within one unit.

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{Lab, Lch, LinSrgb, Srgb};
use tracing::warn;

use super::canonical::{normalize_hue, CanonicalColor, DisplayColor};
use crate::constants::canonical::STRING_PRECISION;
use crate::constants::display::{FALLBACK_HEX, FALLBACK_RGB};
use crate::constants::lab::{ACHROMATIC_CHROMA, CHROMA_SCALE, LIGHTNESS_SCALE};

/// Promote a gamma-encoded sRGB color (channels in [0, 1]) to canonical form
pub fn canonical_from_srgb(srgb: Srgb<f64>) -> CanonicalColor {
    let lab = Lab::<D65, f64>::from_color_unclamped(srgb);
    canonical_from_lab(lab)
}

/// Promote an 8-bit display color to canonical form
pub fn canonical_from_display(display: DisplayColor) -> CanonicalColor {
    canonical_from_srgb(display.to_srgb())
}

/// Convert CIE Lab to canonical form
pub fn canonical_from_lab(lab: Lab<D65, f64>) -> CanonicalColor {
    let lch = Lch::<D65, f64>::from_color_unclamped(lab);
    let chroma = lch.chroma / CHROMA_SCALE;

    // Hue of a neutral is numerical noise; pin it so output is deterministic
    let hue = if chroma < ACHROMATIC_CHROMA {
        0.0
    } else {
        normalize_hue(lch.hue.into_positive_degrees())
    };

    CanonicalColor {
        lightness: (lch.l / LIGHTNESS_SCALE).clamp(0.0, 1.0),
        chroma,
        hue,
        alpha: 1.0,
    }
}

/// Convert canonical form back to CIE Lab
pub fn canonical_to_lab(color: &CanonicalColor) -> Lab<D65, f64> {
    let lch = Lch::<D65, f64>::new(
        color.lightness * LIGHTNESS_SCALE,
        color.chroma * CHROMA_SCALE,
        color.hue,
    );
    Lab::from_color_unclamped(lch)
}

/// Convert to gamma-encoded sRGB without any clamping
///
/// Channels outside [0, 1] mean the color is outside the display gamut.
pub fn canonical_to_srgb_unclamped(color: &CanonicalColor) -> Srgb<f64> {
    Srgb::<f64>::from_color_unclamped(canonical_to_lab(color))
}

/// Convert to gamma-encoded sRGB, clamped per channel to [0, 1]
///
/// Returns `None` if the color has non-finite components.
pub fn canonical_to_srgb(color: &CanonicalColor) -> Option<Srgb<f64>> {
    if !color.is_finite() {
        return None;
    }

    let srgb = canonical_to_srgb_unclamped(color);
    if !(srgb.red.is_finite() && srgb.green.is_finite() && srgb.blue.is_finite()) {
        return None;
    }

    Some(Srgb::<f64>::new(
        srgb.red.clamp(0.0, 1.0),
        srgb.green.clamp(0.0, 1.0),
        srgb.blue.clamp(0.0, 1.0),
    ))
}

/// Convert to linear-light RGB (clamped to the display gamut)
///
/// Unconvertible colors map to the neutral-gray fallback.
pub fn canonical_to_linear(color: &CanonicalColor) -> LinSrgb<f64> {
    let srgb = canonical_to_srgb(color).unwrap_or_else(|| fallback_display().to_srgb());
    srgb.into_linear()
}

/// Convert to 8-bit sRGB
///
/// Out-of-gamut channels are hard-clamped. Colors that cannot be converted
/// at all (non-finite components) yield the neutral gray `#808080`.
pub fn to_display(color: &CanonicalColor) -> DisplayColor {
    match canonical_to_srgb(color) {
        Some(srgb) => DisplayColor::from_srgb(srgb),
        None => {
            warn!(
                lightness = color.lightness,
                chroma = color.chroma,
                hue = color.hue,
                fallback = FALLBACK_HEX,
                "color not convertible to sRGB, using fallback"
            );
            fallback_display()
        }
    }
}

/// Convert to a `#RRGGBB` string; see [`to_display`] for clamping and fallback
pub fn to_display_hex(color: &CanonicalColor) -> String {
    to_display(color).to_hex()
}

/// Serialize in the canonical `oklch(...)` notation with 4 decimals
///
/// The alpha suffix is written only for translucent colors. The output is
/// always accepted by [`crate::parse`] for in-range colors.
pub fn to_canonical_string(color: &CanonicalColor) -> String {
    let p = STRING_PRECISION;
    let scale = 10f64.powi(p as i32);
    let mut hue = (color.hue * scale).round() / scale;
    if hue >= 360.0 {
        hue = 0.0;
    }

    if color.alpha < 1.0 {
        format!(
            "oklch({:.p$} {:.p$} {:.p$} / {:.p$})",
            color.lightness, color.chroma, hue, color.alpha
        )
    } else {
        format!("oklch({:.p$} {:.p$} {:.p$})", color.lightness, color.chroma, hue)
    }
}

/// Check if a canonical color is within the sRGB gamut
pub fn is_in_display_gamut(color: &CanonicalColor) -> bool {
    const EPS: f64 = 1e-9;
    let srgb = canonical_to_srgb_unclamped(color);
    [srgb.red, srgb.green, srgb.blue]
        .iter()
        .all(|c| (-EPS..=1.0 + EPS).contains(c))
}

/// Euclidean color difference in CIE Lab (ΔE76)
///
/// Works on the unscaled Lab coordinates, so a difference of about 2.3 is a
/// just-noticeable difference.
pub fn delta_e(a: &CanonicalColor, b: &CanonicalColor) -> f64 {
    let lab1 = canonical_to_lab(a);
    let lab2 = canonical_to_lab(b);
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

fn fallback_display() -> DisplayColor {
    let (r, g, b) = FALLBACK_RGB;
    DisplayColor::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(r: u8, g: u8, b: u8) -> CanonicalColor {
        canonical_from_display(DisplayColor::new(r, g, b))
    }

    #[test]
    fn test_black_and_white() {
        let black = canonical(0, 0, 0);
        assert!(black.lightness < 0.001);
        assert!(black.chroma < 0.001);

        let white = canonical(255, 255, 255);
        assert!(white.lightness > 0.999);
        assert!(white.chroma < 0.001);
        assert_eq!(white.hue, 0.0);
    }

    #[test]
    fn test_primaries_land_in_oklch_chroma_range() {
        for (r, g, b) in [(255, 0, 0), (0, 255, 0), (0, 0, 255)] {
            let color = canonical(r, g, b);
            assert!(color.chroma > 0.2 && color.chroma < 0.4, "{:?}", color);
        }
    }

    #[test]
    fn test_red_hue() {
        // CIE LCh hue of sRGB red is about 40 degrees
        let red = canonical(255, 0, 0);
        assert!((red.hue - 40.0).abs() < 2.0, "hue {}", red.hue);
    }

    #[test]
    fn test_round_trip_hex() {
        let samples = [
            (0x33, 0x66, 0xCC),
            (0xFF, 0x88, 0x00),
            (0x12, 0x34, 0x56),
            (0xEE, 0xEE, 0xEE),
            (0x80, 0x00, 0x80),
            (0x00, 0xFF, 0x7F),
        ];
        for (r, g, b) in samples {
            let back = to_display(&canonical(r, g, b));
            assert!((back.r as i16 - r as i16).abs() <= 1);
            assert!((back.g as i16 - g as i16).abs() <= 1);
            assert!((back.b as i16 - b as i16).abs() <= 1);
        }
    }

    #[test]
    fn test_round_trip_lab_precision() {
        let color = CanonicalColor::new(0.62, 0.12, 250.0);
        let back = canonical_from_lab(canonical_to_lab(&color));
        assert!((back.lightness - color.lightness).abs() < 1e-2);
        assert!((back.chroma - color.chroma).abs() < 1e-2);
        assert!((back.hue - color.hue).abs() < 1.0);
    }

    #[test]
    fn test_out_of_gamut_is_clamped() {
        let wild = CanonicalColor::new(0.5, 0.4, 140.0);
        assert!(!is_in_display_gamut(&wild));
        let srgb = canonical_to_srgb(&wild).unwrap();
        for c in [srgb.red, srgb.green, srgb.blue] {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_in_gamut_gray() {
        assert!(is_in_display_gamut(&CanonicalColor::gray(0.5)));
    }

    #[test]
    fn test_non_finite_falls_back_to_gray() {
        let broken = CanonicalColor {
            lightness: f64::NAN,
            chroma: 0.1,
            hue: 10.0,
            alpha: 1.0,
        };
        assert_eq!(to_display_hex(&broken), FALLBACK_HEX);
    }

    #[test]
    fn test_canonical_string_format() {
        let color = CanonicalColor::new(0.5, 0.12346, 200.0);
        assert_eq!(to_canonical_string(&color), "oklch(0.5000 0.1235 200.0000)");

        let translucent = color.with_alpha(0.5);
        assert_eq!(
            to_canonical_string(&translucent),
            "oklch(0.5000 0.1235 200.0000 / 0.5000)"
        );
    }

    #[test]
    fn test_canonical_string_never_prints_360() {
        let color = CanonicalColor::new(0.5, 0.1, 359.99999);
        assert_eq!(to_canonical_string(&color), "oklch(0.5000 0.1000 0.0000)");
    }

    #[test]
    fn test_delta_e() {
        let a = canonical(120, 40, 40);
        assert!(delta_e(&a, &a) < 1e-9);
        let b = canonical(40, 40, 120);
        assert!(delta_e(&a, &b) > 10.0);
    }

    #[test]
    fn test_linear_of_white_is_one() {
        let white = canonical(255, 255, 255);
        let lin = canonical_to_linear(&white);
        assert!((lin.red - 1.0).abs() < 1e-6);
        assert!((lin.green - 1.0).abs() < 1e-6);
        assert!((lin.blue - 1.0).abs() < 1e-6);
    }
}
