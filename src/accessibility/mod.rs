//! Accessibility evaluation
//!
//! WCAG contrast checks and color vision deficiency simulation, both working
//! on [`CanonicalColor`](crate::color::CanonicalColor) values.

pub mod contrast;
pub mod cvd;

pub use contrast::{
    check_compliance, contrast_ratio, minimal_contrast_fix, relative_luminance,
    suggest_accessible_color, ComplianceLevel, ContrastResult,
};
pub use cvd::{CvdReport, CvdSimulator, CvdType, UnknownCvdType};
