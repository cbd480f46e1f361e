//! Lightness, chroma and hue manipulation
//!
//! Every function returns a new [`CanonicalColor`]; inputs are never mutated.
//! Results stay inside the canonical ranges: lightness [0, 1], chroma
//! [0, 0.4], hue [0, 360).

use super::canonical::{clamp_chroma, normalize_hue, CanonicalColor};

/// Add `delta` to the lightness, clamping to [0, 1]
pub fn adjust_lightness(color: &CanonicalColor, delta: f64) -> CanonicalColor {
    CanonicalColor {
        lightness: (color.lightness + delta).clamp(0.0, 1.0),
        ..*color
    }
}

/// Add `delta` to the chroma, clamping to [0, 0.4]
pub fn adjust_chroma(color: &CanonicalColor, delta: f64) -> CanonicalColor {
    CanonicalColor {
        chroma: clamp_chroma(color.chroma + delta),
        ..*color
    }
}

/// Rotate the hue by `degrees` (any sign or magnitude)
pub fn shift_hue(color: &CanonicalColor, degrees: f64) -> CanonicalColor {
    CanonicalColor {
        hue: normalize_hue(color.hue + degrees),
        ..*color
    }
}

/// Interpolate between two colors
///
/// Lightness, chroma and alpha are interpolated linearly. Hue travels the
/// shorter way around the circle: the difference is folded into (-180, 180]
/// before it is scaled by `t`. `t` is clamped to [0, 1].
pub fn mix(a: &CanonicalColor, b: &CanonicalColor, t: f64) -> CanonicalColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    CanonicalColor {
        lightness: lerp(a.lightness, b.lightness, t).clamp(0.0, 1.0),
        chroma: lerp(a.chroma, b.chroma, t).max(0.0),
        hue: normalize_hue(a.hue + shortest_arc(a.hue, b.hue) * t),
        alpha: lerp(a.alpha, b.alpha, t).clamp(0.0, 1.0),
    }
}

/// Signed hue difference from `from` to `to`, folded into (-180, 180]
pub fn shortest_arc(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CanonicalColor {
        CanonicalColor::new(0.6, 0.15, 30.0)
    }

    #[test]
    fn test_adjust_lightness_clamps() {
        assert_eq!(adjust_lightness(&sample(), 0.7).lightness, 1.0);
        assert_eq!(adjust_lightness(&sample(), -0.9).lightness, 0.0);
        assert!((adjust_lightness(&sample(), 0.1).lightness - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_adjust_chroma_clamps() {
        assert_eq!(adjust_chroma(&sample(), 1.0).chroma, 0.4);
        assert_eq!(adjust_chroma(&sample(), -1.0).chroma, 0.0);
    }

    #[test]
    fn test_adjust_keeps_other_components() {
        let color = sample().with_alpha(0.5);
        let adjusted = adjust_chroma(&color, 0.05);
        assert_eq!(adjusted.lightness, color.lightness);
        assert_eq!(adjusted.hue, color.hue);
        assert_eq!(adjusted.alpha, 0.5);
    }

    #[test]
    fn test_shift_hue_wraps() {
        let color = sample();
        let a = shift_hue(&color, 370.0);
        let b = shift_hue(&color, 10.0);
        assert!((a.hue - b.hue).abs() < 1e-9);

        let negative = shift_hue(&color, -60.0);
        assert!((negative.hue - 330.0).abs() < 1e-9);

        let full = shift_hue(&color, 330.0);
        assert_eq!(full.hue, 0.0);
    }

    #[test]
    fn test_shortest_arc() {
        assert_eq!(shortest_arc(350.0, 10.0), 20.0);
        assert_eq!(shortest_arc(10.0, 350.0), -20.0);
        assert_eq!(shortest_arc(0.0, 180.0), 180.0);
        assert_eq!(shortest_arc(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_mix_endpoints() {
        let a = CanonicalColor::new(0.2, 0.1, 40.0);
        let b = CanonicalColor::new(0.8, 0.3, 100.0);
        assert_eq!(mix(&a, &b, 0.0), a);
        let end = mix(&a, &b, 1.0);
        assert!((end.lightness - 0.8).abs() < 1e-12);
        assert!((end.hue - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mix_crosses_zero_hue() {
        let a = CanonicalColor::new(0.5, 0.1, 350.0);
        let b = CanonicalColor::new(0.5, 0.1, 30.0);
        let mid = mix(&a, &b, 0.5);
        assert!((mid.hue - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_mix_clamps_t() {
        let a = CanonicalColor::new(0.2, 0.1, 40.0);
        let b = CanonicalColor::new(0.8, 0.3, 100.0);
        assert_eq!(mix(&a, &b, -3.0), a);
        assert_eq!(mix(&a, &b, f64::NAN), a);
    }
}
