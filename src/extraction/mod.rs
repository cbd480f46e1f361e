//! Palette extraction module
//!
//! This module turns raw pixel buffers into a small themed palette:
//! sampling, median-cut quantization, ranking and role assignment.

pub mod extractor;
pub mod median_cut;
pub mod sampling;

pub use extractor::{PaletteEntry, PaletteExtractor, PaletteRole};
pub use median_cut::{median_cut, QuantizationBucket, QuantizedColor};
pub use sampling::{sample_pixels, PixelBuffer, PixelLayout, RgbSample};
