//! Color vision deficiency simulation
//!
//! Dichromacy is simulated in cone space (Brettel/Viénot style):
//!
//! ```text
//! sRGB -> linear RGB -> LMS -> projected LMS -> linear RGB -> sRGB (clamped)
//! ```
//!
//! Achromatopsia bypasses the matrices and collapses each color to its
//! luminance-weighted gray. All functions are pure.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::conversion::canonical_from_display;
use crate::color::{CanonicalColor, DisplayColor};
use crate::config::AccessibilityConfig;
use crate::constants::cvd::{DISTINGUISH_THRESHOLD, MAX_ANALYZED_PALETTE};
use crate::constants::wcag::LUMINANCE_WEIGHTS;

type Matrix3 = [[f64; 3]; 3];

/// Linear RGB to LMS cone response
const RGB_TO_LMS: Matrix3 = [
    [17.8824, 43.5161, 4.11935],
    [3.45565, 27.1554, 3.86714],
    [0.0299566, 0.184309, 1.46709],
];

/// Inverse of [`RGB_TO_LMS`]
const LMS_TO_RGB: Matrix3 = [
    [0.0809444479, -0.130504409, 0.116721066],
    [-0.0102485335, 0.0540193266, -0.113614708],
    [-0.000365296938, -0.00412161469, 0.693511405],
];

/// Missing L cones: L is rebuilt from M and S
const PROTANOPIA: Matrix3 = [
    [0.0, 2.02344, -2.52581],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Missing M cones: M is rebuilt from L and S
const DEUTERANOPIA: Matrix3 = [
    [1.0, 0.0, 0.0],
    [0.494207, 0.0, 1.24827],
    [0.0, 0.0, 1.0],
];

/// Missing S cones: S is rebuilt from L and M
const TRITANOPIA: Matrix3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-0.395913, 0.801109, 0.0],
];

/// Kinds of color vision deficiency that can be simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvdType {
    /// Red-blind (no L cones)
    Protanopia,
    /// Green-blind (no M cones)
    Deuteranopia,
    /// Blue-blind (no S cones)
    Tritanopia,
    /// Total color blindness
    Achromatopsia,
}

impl CvdType {
    pub const ALL: [Self; 4] = [
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CvdType::Protanopia => "protanopia",
            CvdType::Deuteranopia => "deuteranopia",
            CvdType::Tritanopia => "tritanopia",
            CvdType::Achromatopsia => "achromatopsia",
        }
    }

    /// Cone-space projection, `None` for achromatopsia
    fn projection(&self) -> Option<&'static Matrix3> {
        match self {
            CvdType::Protanopia => Some(&PROTANOPIA),
            CvdType::Deuteranopia => Some(&DEUTERANOPIA),
            CvdType::Tritanopia => Some(&TRITANOPIA),
            CvdType::Achromatopsia => None,
        }
    }
}

impl fmt::Display for CvdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for CVD type names that are not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color vision deficiency type: {0}")]
pub struct UnknownCvdType(pub String);

impl FromStr for CvdType {
    type Err = UnknownCvdType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CvdType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCvdType(s.to_string()))
    }
}

/// Per-type outcome of a palette analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvdReport {
    /// Index pairs `(i, j)`, `i < j`, that collide under this deficiency
    pub issues: Vec<(usize, usize)>,
    /// True when no pair collides
    pub accessible: bool,
}

/// Simulates color vision deficiencies and checks palettes against them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvdSimulator {
    threshold: f64,
    max_palette: usize,
}

impl Default for CvdSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl CvdSimulator {
    /// Create a simulator with the default distinguishability threshold (0.1)
    pub fn new() -> Self {
        Self {
            threshold: DISTINGUISH_THRESHOLD,
            max_palette: MAX_ANALYZED_PALETTE,
        }
    }

    /// Create a simulator with a custom distinguishability threshold
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::new()
        }
    }

    /// Create a simulator from the accessibility section of the configuration
    pub fn from_config(config: &AccessibilityConfig) -> Self {
        Self {
            threshold: config.distinguish_threshold,
            max_palette: config.max_analyzed_palette,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Simulate a canonical color, returning the re-promoted result
    pub fn simulate(&self, color: &CanonicalColor, cvd: CvdType) -> CanonicalColor {
        let simulated = simulate_display(color.to_display(), cvd);
        canonical_from_display(simulated).with_alpha(color.alpha)
    }

    /// Simulate by type name; unknown names leave the color unchanged
    pub fn simulate_named(&self, color: &CanonicalColor, cvd: &str) -> CanonicalColor {
        match cvd.parse::<CvdType>() {
            Ok(cvd) => self.simulate(color, cvd),
            Err(err) => {
                warn!(cvd_type = cvd, error = %err, "unsupported CVD type, color passed through");
                *color
            }
        }
    }

    /// True when `a` and `b` stay apart after simulation
    ///
    /// Distance is Euclidean in gamma-encoded sRGB ([0, 1] per channel),
    /// divided by √3 so it lies in [0, 1].
    pub fn are_distinguishable(
        &self,
        a: &CanonicalColor,
        b: &CanonicalColor,
        cvd: CvdType,
    ) -> bool {
        let sa = simulate_display(a.to_display(), cvd);
        let sb = simulate_display(b.to_display(), cvd);
        normalized_distance(sa, sb) > self.threshold
    }

    /// Check every pair of a palette under every deficiency
    ///
    /// Cost is O(n²) per type. Palettes are expected to stay small (about 20
    /// colors); larger inputs are analyzed anyway but logged.
    pub fn analyze_palette(&self, colors: &[CanonicalColor]) -> BTreeMap<CvdType, CvdReport> {
        if colors.len() > self.max_palette {
            warn!(
                colors = colors.len(),
                limit = self.max_palette,
                "palette larger than expected for pairwise CVD analysis"
            );
        }

        let displays: Vec<DisplayColor> = colors.iter().map(CanonicalColor::to_display).collect();

        CvdType::ALL
            .into_iter()
            .map(|cvd| {
                let simulated: Vec<DisplayColor> =
                    displays.iter().map(|d| simulate_display(*d, cvd)).collect();

                let mut issues = Vec::new();
                for i in 0..simulated.len() {
                    for j in (i + 1)..simulated.len() {
                        if normalized_distance(simulated[i], simulated[j]) <= self.threshold {
                            issues.push((i, j));
                        }
                    }
                }

                debug!(cvd_type = %cvd, issues = issues.len(), "analyzed palette");
                let accessible = issues.is_empty();
                (cvd, CvdReport { issues, accessible })
            })
            .collect()
    }
}

/// Simulate a display color under a deficiency
pub fn simulate_display(color: DisplayColor, cvd: CvdType) -> DisplayColor {
    let linear: LinSrgb<f64> = color.to_srgb().into_linear();
    let rgb = [linear.red, linear.green, linear.blue];

    let simulated = match cvd.projection() {
        Some(projection) => {
            let lms = apply(&RGB_TO_LMS, rgb);
            let projected = apply(projection, lms);
            apply(&LMS_TO_RGB, projected)
        }
        None => {
            let [wr, wg, wb] = LUMINANCE_WEIGHTS;
            let gray = wr * rgb[0] + wg * rgb[1] + wb * rgb[2];
            [gray; 3]
        }
    };

    let [r, g, b] = simulated.map(|c| c.clamp(0.0, 1.0));
    DisplayColor::from_srgb(Srgb::<f64>::from_linear(LinSrgb::<f64>::new(r, g, b)))
}

/// Euclidean sRGB distance scaled into [0, 1]
pub fn normalized_distance(a: DisplayColor, b: DisplayColor) -> f64 {
    let (a, b) = (a.to_srgb(), b.to_srgb());
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    (dr * dr + dg * dg + db * db).sqrt() / 3f64.sqrt()
}

fn apply(m: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
