//! Color representation, conversion and manipulation
//!
//! This module handles parsing color text, converting between the canonical
//! perceptual form and display sRGB, and the adjustment and harmony
//! utilities built on top of them.

pub mod adjust;
pub mod canonical;
pub mod conversion;
pub mod harmony;
pub mod parse;

pub use adjust::{adjust_chroma, adjust_lightness, mix, shift_hue};
pub use canonical::{normalize_hue, CanonicalColor, DisplayColor};
pub use conversion::{delta_e, is_in_display_gamut, to_canonical_string, to_display_hex};
pub use harmony::HarmonyRule;
pub use parse::parse;
