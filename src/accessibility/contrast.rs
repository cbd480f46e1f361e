//! WCAG 2.1 contrast evaluation
//!
//! Relative luminance is computed on linear-light sRGB with the Rec. 709
//! weights, and the contrast ratio is `(L1 + 0.05) / (L2 + 0.05)` with the
//! lighter luminance on top, so it is symmetric in its arguments.

use palette::LinSrgb;
use serde::{Deserialize, Serialize};

use crate::color::adjust::adjust_lightness;
use crate::color::conversion::canonical_to_linear;
use crate::color::{CanonicalColor, DisplayColor};
use crate::constants::wcag::{
    AAA_LARGE, AAA_NORMAL, AA_LARGE, AA_NORMAL, FIX_SEARCH_ITERATIONS, FLARE,
    LIGHT_BACKGROUND_LUMINANCE, LUMINANCE_WEIGHTS, NEAR_BLACK_LIGHTNESS, NEAR_WHITE_LIGHTNESS,
};

/// Highest WCAG tier a color pair satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplianceLevel {
    #[serde(rename = "Fail")]
    Fail,
    /// Large text only (ratio >= 3.0)
    #[serde(rename = "AA Large")]
    AaLarge,
    /// Normal text (ratio >= 4.5)
    #[serde(rename = "AA")]
    Aa,
    /// Enhanced (ratio >= 7.0)
    #[serde(rename = "AAA")]
    Aaa,
}

impl ComplianceLevel {
    /// Tier for a given contrast ratio
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_NORMAL {
            ComplianceLevel::Aaa
        } else if ratio >= AA_NORMAL {
            ComplianceLevel::Aa
        } else if ratio >= AA_LARGE {
            ComplianceLevel::AaLarge
        } else {
            ComplianceLevel::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplianceLevel::Aaa => "AAA",
            ComplianceLevel::Aa => "AA",
            ComplianceLevel::AaLarge => "AA Large",
            ComplianceLevel::Fail => "Fail",
        }
    }
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contrast ratio and WCAG pass/fail flags for a color pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    /// Ratio in [1, 21]
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aa_large: bool,
    pub passes_aaa: bool,
    pub passes_aaa_large: bool,
    pub level: ComplianceLevel,
}

impl ContrastResult {
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            passes_aa: ratio >= AA_NORMAL,
            passes_aa_large: ratio >= AA_LARGE,
            passes_aaa: ratio >= AAA_NORMAL,
            passes_aaa_large: ratio >= AAA_LARGE,
            level: ComplianceLevel::from_ratio(ratio),
        }
    }
}

/// WCAG relative luminance in [0, 1]
pub fn relative_luminance(color: &CanonicalColor) -> f64 {
    linear_luminance(canonical_to_linear(color))
}

/// WCAG relative luminance of an 8-bit sRGB color
pub fn display_luminance(color: DisplayColor) -> f64 {
    linear_luminance(color.to_srgb().into_linear())
}

fn linear_luminance(linear: LinSrgb<f64>) -> f64 {
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;
    wr * linear.red + wg * linear.green + wb * linear.blue
}

/// Contrast ratio between two colors, in [1, 21]
pub fn contrast_ratio(fg: &CanonicalColor, bg: &CanonicalColor) -> f64 {
    ratio_of_luminances(relative_luminance(fg), relative_luminance(bg))
}

pub(crate) fn ratio_of_luminances(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + FLARE) / (darker + FLARE)
}

/// Evaluate a foreground/background pair against every WCAG threshold
pub fn check_compliance(fg: &CanonicalColor, bg: &CanonicalColor) -> ContrastResult {
    ContrastResult::from_ratio(contrast_ratio(fg, bg))
}

/// Coarse accessible replacement for `fg`
///
/// Returns `fg` unchanged when it already reaches `target_ratio`. Otherwise
/// returns near-black for light backgrounds (luminance above 0.5) and
/// near-white for dark ones. No search is performed; see
/// [`minimal_contrast_fix`] for the smallest lightness change.
pub fn suggest_accessible_color(
    fg: &CanonicalColor,
    bg: &CanonicalColor,
    target_ratio: f64,
) -> CanonicalColor {
    if contrast_ratio(fg, bg) >= target_ratio {
        return *fg;
    }

    if relative_luminance(bg) > LIGHT_BACKGROUND_LUMINANCE {
        CanonicalColor::gray(NEAR_BLACK_LIGHTNESS)
    } else {
        CanonicalColor::gray(NEAR_WHITE_LIGHTNESS)
    }
}

/// Smallest lightness change that makes `fg` reach `target_ratio` on `bg`
///
/// Chroma and hue are kept. Lightness is bisected between its current value
/// and the extreme (0 on light backgrounds, 1 on dark ones). If even the
/// extreme cannot reach the target, the coarse suggestion is returned.
///
/// A candidate passes only if it also reaches the target once rounded to
/// 8-bit sRGB, so the hex form of the result is compliant too.
pub fn minimal_contrast_fix(
    fg: &CanonicalColor,
    bg: &CanonicalColor,
    target_ratio: f64,
) -> CanonicalColor {
    if contrast_ratio(fg, bg) >= target_ratio {
        return *fg;
    }

    let bg_luminance = relative_luminance(bg);
    let extreme = if bg_luminance > LIGHT_BACKGROUND_LUMINANCE { 0.0 } else { 1.0 };
    let with_lightness = |lightness: f64| adjust_lightness(fg, lightness - fg.lightness);
    let passes = |candidate: &CanonicalColor| {
        let exact = relative_luminance(candidate);
        let displayed = relative_luminance(&candidate.to_display().to_canonical());
        ratio_of_luminances(exact, bg_luminance) >= target_ratio
            && ratio_of_luminances(displayed, bg_luminance) >= target_ratio
    };

    let farthest = with_lightness(extreme);
    if !passes(&farthest) {
        return suggest_accessible_color(fg, bg, target_ratio);
    }

    // Invariant: `near` fails, `far` passes
    let mut near = fg.lightness;
    let mut far = extreme;
    for _ in 0..FIX_SEARCH_ITERATIONS {
        let mid = (near + far) / 2.0;
        if passes(&with_lightness(mid)) {
            far = mid;
        } else {
            near = mid;
        }
    }

    with_lightness(far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse;

    fn color(text: &str) -> CanonicalColor {
        parse(text).unwrap()
    }

    #[test]
    fn test_black_on_white_is_21() {
        let ratio = contrast_ratio(&color("#000000"), &color("#ffffff"));
        assert!((ratio - 21.0).abs() < 0.01, "ratio {}", ratio);
    }

    #[test]
    fn test_identity_is_one() {
        for text in ["#000000", "#777777", "#3366cc", "#ffffff"] {
            let c = color(text);
            assert!((contrast_ratio(&c, &c) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_order_independent() {
        let a = color("#3366cc");
        let b = color("#ffcc00");
        assert_eq!(contrast_ratio(&a, &b), contrast_ratio(&b, &a));
    }

    #[test]
    fn test_white_on_gray_666() {
        let result = check_compliance(&color("#ffffff"), &color("#666666"));
        assert!((result.ratio - 5.74).abs() < 0.01, "ratio {}", result.ratio);
        assert_eq!(result.level, ComplianceLevel::Aa);
        assert!(result.passes_aa);
        assert!(result.passes_aa_large);
        assert!(result.passes_aaa_large);
        assert!(!result.passes_aaa);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ComplianceLevel::from_ratio(21.0), ComplianceLevel::Aaa);
        assert_eq!(ComplianceLevel::from_ratio(7.0), ComplianceLevel::Aaa);
        assert_eq!(ComplianceLevel::from_ratio(6.99), ComplianceLevel::Aa);
        assert_eq!(ComplianceLevel::from_ratio(4.5), ComplianceLevel::Aa);
        assert_eq!(ComplianceLevel::from_ratio(3.0), ComplianceLevel::AaLarge);
        assert_eq!(ComplianceLevel::from_ratio(2.99), ComplianceLevel::Fail);
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!(relative_luminance(&color("#000000")) < 1e-6);
        assert!((relative_luminance(&color("#ffffff")) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_luminance_matches_canonical() {
        let display = DisplayColor::new(0x33, 0x66, 0xCC);
        let canonical = display.to_canonical();
        assert!((display_luminance(display) - relative_luminance(&canonical)).abs() < 1e-6);
    }

    #[test]
    fn test_suggest_keeps_compliant_color() {
        let fg = color("#000000");
        let bg = color("#ffffff");
        assert_eq!(suggest_accessible_color(&fg, &bg, 4.5), fg);
    }

    #[test]
    fn test_suggest_dark_on_light_background() {
        let fg = color("#dddddd");
        let bg = color("#ffffff");
        let suggestion = suggest_accessible_color(&fg, &bg, 4.5);
        assert_eq!(suggestion.lightness, NEAR_BLACK_LIGHTNESS);
        assert!(contrast_ratio(&suggestion, &bg) >= 4.5);
    }

    #[test]
    fn test_suggest_light_on_dark_background() {
        let fg = color("#222222");
        let bg = color("#111111");
        let suggestion = suggest_accessible_color(&fg, &bg, 4.5);
        assert_eq!(suggestion.lightness, NEAR_WHITE_LIGHTNESS);
    }

    #[test]
    fn test_minimal_fix_reaches_target_with_small_change() {
        let fg = color("#999999");
        let bg = color("#ffffff");
        let fixed = minimal_contrast_fix(&fg, &bg, 4.5);
        let ratio = contrast_ratio(&fixed, &bg);
        assert!(ratio >= 4.5);
        assert!(ratio < 4.6, "overshot to {}", ratio);
        assert!(fixed.lightness < fg.lightness);
        assert!(fixed.lightness > NEAR_BLACK_LIGHTNESS);
    }

    #[test]
    fn test_minimal_fix_keeps_hue() {
        let fg = color("#ff8080");
        let bg = color("#ffffff");
        let fixed = minimal_contrast_fix(&fg, &bg, 4.5);
        assert_eq!(fixed.hue, fg.hue);
        assert_eq!(fixed.chroma, fg.chroma);
    }

    #[test]
    fn test_minimal_fix_unreachable_falls_back() {
        // No lightness gets within 21:1 of mid gray
        let fg = color("#808080");
        let bg = color("#808080");
        let fixed = minimal_contrast_fix(&fg, &bg, 21.0);
        assert_eq!(fixed, suggest_accessible_color(&fg, &bg, 21.0));
    }

    #[test]
    fn test_minimal_fix_hex_meets_target() {
        let bg = color("#ffffff");
        let foregrounds = [
            "#999999", "#ff8080", "#33cc99", "#cccccc", "#3366ff", "#ffcc00", "#dddddd",
        ];
        for text in foregrounds {
            for target in [3.0, 4.5, 7.0] {
                let fixed = minimal_contrast_fix(&color(text), &bg, target);
                let hex = fixed.to_display_hex();
                let ratio = contrast_ratio(&color(&hex), &bg);
                assert!(ratio >= target, "{} at {} gave {} ({:.3})", text, target, hex, ratio);
            }
        }
    }
}
