//! Pixel buffer input and sampling
//!
//! The extractor never decodes images itself; callers hand over an
//! interleaved RGBA or RGB byte buffer produced by their own decoder.

use crate::accessibility::contrast::display_luminance;
use crate::color::DisplayColor;
use crate::config::ExtractionConfig;
use crate::error::{Result, ThemeColorError};

/// Channel layout of an interleaved pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 4 bytes per pixel, alpha last
    Rgba,
    /// 3 bytes per pixel, always opaque
    Rgb,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgba => 4,
            PixelLayout::Rgb => 3,
        }
    }
}

/// Borrowed, validated pixel data
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a pixel buffer, checking its length against the dimensions
    ///
    /// # Errors
    ///
    /// - [`ThemeColorError::NoImage`] if the buffer or either dimension is empty
    /// - [`ThemeColorError::InvalidBuffer`] if the length does not match
    pub fn new(data: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        if data.is_empty() || width == 0 || height == 0 {
            return Err(ThemeColorError::NoImage);
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(layout.bytes_per_pixel()))
            .ok_or_else(|| {
                ThemeColorError::invalid_parameter("dimensions", format!("{}x{}", width, height))
            })?;
        if data.len() != expected {
            return Err(ThemeColorError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Wrap an interleaved RGBA buffer
    pub fn rgba(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, PixelLayout::Rgba)
    }

    /// Wrap an interleaved RGB buffer
    pub fn rgb(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, PixelLayout::Rgb)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Color and alpha of the pixel at a linear index
    fn pixel(&self, index: usize) -> (RgbSample, u8) {
        let offset = index * self.layout.bytes_per_pixel();
        let px = &self.data[offset..offset + self.layout.bytes_per_pixel()];
        let alpha = match self.layout {
            PixelLayout::Rgba => px[3],
            PixelLayout::Rgb => u8::MAX,
        };
        (RgbSample::new(px[0], px[1], px[2]), alpha)
    }
}

/// One of the three color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

/// 8-bit RGB value taken from the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbSample {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Spread between the strongest and weakest channel, 0-255
    pub fn saturation(&self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }

    pub fn to_display(self) -> DisplayColor {
        DisplayColor::new(self.r, self.g, self.b)
    }
}

/// Collect informative pixels from the buffer
///
/// Pixels are visited with a fixed stride so that at most
/// `config.sample_limit` are examined. Translucent pixels (alpha below
/// `config.alpha_threshold`) and pixels whose relative luminance falls
/// outside `config.luminance_bounds` are dropped.
pub fn sample_pixels(buffer: &PixelBuffer<'_>, config: &ExtractionConfig) -> Vec<RgbSample> {
    let pixel_count = buffer.pixel_count();
    let stride = pixel_count.div_ceil(config.sample_limit.max(1)).max(1);

    (0..pixel_count)
        .step_by(stride)
        .map(|index| buffer.pixel(index))
        .filter(|(_, alpha)| *alpha >= config.alpha_threshold)
        .map(|(sample, _)| sample)
        .filter(|sample| {
            config
                .luminance_bounds
                .contains(display_luminance(sample.to_display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgba(r: u8, g: u8, b: u8, a: u8, pixels: usize) -> Vec<u8> {
        [r, g, b, a].repeat(pixels)
    }

    #[test]
    fn test_empty_buffer_is_no_image() {
        assert!(matches!(PixelBuffer::rgba(&[], 0, 0), Err(ThemeColorError::NoImage)));
        assert!(matches!(PixelBuffer::rgb(&[1, 2, 3], 0, 1), Err(ThemeColorError::NoImage)));
    }

    #[test]
    fn test_length_mismatch() {
        let data = vec![0u8; 10];
        let err = PixelBuffer::rgba(&data, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            ThemeColorError::InvalidBuffer { expected: 16, actual: 10 }
        ));
    }

    #[test]
    fn test_rgb_layout() {
        let data = [10, 20, 30, 40, 50, 60];
        let buffer = PixelBuffer::rgb(&data, 2, 1).unwrap();
        assert_eq!(buffer.pixel(1), (RgbSample::new(40, 50, 60), 255));
    }

    #[test]
    fn test_saturation() {
        assert_eq!(RgbSample::new(200, 50, 100).saturation(), 150);
        assert_eq!(RgbSample::new(7, 7, 7).saturation(), 0);
    }

    #[test]
    fn test_sample_limit_respected() {
        let data = solid_rgba(200, 80, 40, 255, 100 * 100);
        let buffer = PixelBuffer::rgba(&data, 100, 100).unwrap();
        let config = ExtractionConfig {
            sample_limit: 1000,
            ..ExtractionConfig::default()
        };
        let samples = sample_pixels(&buffer, &config);
        assert_eq!(samples.len(), 1000);
    }

    #[test]
    fn test_stride_rounds_up() {
        let data = solid_rgba(200, 80, 40, 255, 25);
        let buffer = PixelBuffer::rgba(&data, 5, 5).unwrap();
        let config = ExtractionConfig {
            sample_limit: 10,
            ..ExtractionConfig::default()
        };
        // stride 3 -> indices 0, 3, ..., 24
        assert_eq!(sample_pixels(&buffer, &config).len(), 9);
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let mut data = solid_rgba(200, 80, 40, 255, 10);
        data.extend(solid_rgba(40, 80, 200, 127, 10));
        let buffer = PixelBuffer::rgba(&data, 20, 1).unwrap();
        let samples = sample_pixels(&buffer, &ExtractionConfig::default());
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|s| s.r == 200));
    }

    #[test]
    fn test_extreme_luminance_skipped() {
        let mut data = solid_rgba(0, 0, 0, 255, 5);
        data.extend(solid_rgba(255, 255, 255, 255, 5));
        data.extend(solid_rgba(128, 128, 128, 255, 5));
        let buffer = PixelBuffer::rgba(&data, 15, 1).unwrap();
        let samples = sample_pixels(&buffer, &ExtractionConfig::default());
        assert_eq!(samples, vec![RgbSample::new(128, 128, 128); 5]);
    }
}
