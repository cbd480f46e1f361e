//! Median-cut color quantization
//!
//! A bucket of samples is split along the channel with the widest range, at
//! the median of that channel, until the depth budget is spent. Each leaf is
//! represented by the plain (unweighted) mean of its members.

use super::sampling::{Channel, RgbSample};

/// Samples being partitioned; consumed by the split
#[derive(Debug, Clone, Default)]
pub struct QuantizationBucket {
    pixels: Vec<RgbSample>,
}

/// Representative color of one leaf bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedColor {
    pub color: RgbSample,
    pub pixel_count: usize,
}

impl QuantizedColor {
    /// Ranking weight: pixel count boosted by up to 2x for saturated colors
    pub fn importance(&self) -> f64 {
        self.pixel_count as f64 * (1.0 + self.color.saturation() as f64 / 255.0)
    }
}

impl QuantizationBucket {
    pub fn new(pixels: Vec<RgbSample>) -> Self {
        Self { pixels }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Channel with the greatest max-min spread, and that spread
    ///
    /// Ties resolve in R, G, B order.
    fn widest_channel(&self) -> (Channel, u8) {
        let mut widest = (Channel::Red, 0u8);
        for channel in Channel::ALL {
            let (min, max) = self
                .pixels
                .iter()
                .map(|p| p.channel(channel))
                .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let range = max.saturating_sub(min);
            if range > widest.1 {
                widest = (channel, range);
            }
        }
        widest
    }

    /// Mean color of the bucket, `None` when empty
    fn representative(&self) -> Option<QuantizedColor> {
        if self.pixels.is_empty() {
            return None;
        }

        let n = self.pixels.len() as u64;
        let (r, g, b) = self.pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), p| {
            (r + p.r as u64, g + p.g as u64, b + p.b as u64)
        });
        // Rounded integer mean; each result is at most 255
        let mean = |sum: u64| ((sum + n / 2) / n) as u8;

        Some(QuantizedColor {
            color: RgbSample::new(mean(r), mean(g), mean(b)),
            pixel_count: self.pixels.len(),
        })
    }

    /// Sort along `channel` and split at the midpoint index
    fn split(mut self, channel: Channel) -> (Self, Self) {
        self.pixels.sort_by_key(|p| p.channel(channel));
        let upper = self.pixels.split_off(self.pixels.len() / 2);
        (self, Self::new(upper))
    }
}

/// Quantize samples into at most `2^max_depth` representative colors
///
/// A bucket becomes a leaf when the depth budget is spent or when it cannot
/// be split further (one pixel, or every channel constant). Empty buckets
/// produce no leaf.
pub fn median_cut(samples: Vec<RgbSample>, max_depth: u32) -> Vec<QuantizedColor> {
    let mut leaves = Vec::new();
    cut(QuantizationBucket::new(samples), 0, max_depth, &mut leaves);
    leaves
}

fn cut(bucket: QuantizationBucket, depth: u32, max_depth: u32, leaves: &mut Vec<QuantizedColor>) {
    if bucket.is_empty() {
        return;
    }

    let (channel, range) = bucket.widest_channel();
    if depth >= max_depth || bucket.len() < 2 || range == 0 {
        leaves.extend(bucket.representative());
        return;
    }

    let (lower, upper) = bucket.split(channel);
    cut(lower, depth + 1, max_depth, leaves);
    cut(upper, depth + 1, max_depth, leaves);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_color_is_one_leaf() {
        let color = RgbSample::new(120, 60, 200);
        let leaves = median_cut(vec![color; 500], 3);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].color, color);
        assert_eq!(leaves[0].pixel_count, 500);
    }

    #[test]
    fn test_empty_input() {
        assert!(median_cut(Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_depth_zero_averages_everything() {
        let samples = vec![RgbSample::new(0, 0, 0), RgbSample::new(100, 50, 201)];
        let leaves = median_cut(samples, 0);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].color, RgbSample::new(50, 25, 101));
        assert_eq!(leaves[0].pixel_count, 2);
    }

    #[test]
    fn test_two_clusters_separate() {
        let mut samples = vec![RgbSample::new(200, 30, 30); 40];
        samples.extend(vec![RgbSample::new(30, 30, 200); 60]);
        let leaves = median_cut(samples, 3);

        let total: usize = leaves.iter().map(|l| l.pixel_count).sum();
        assert_eq!(total, 100);
        assert!(leaves.iter().any(|l| l.color == RgbSample::new(200, 30, 30)));
        assert!(leaves.iter().any(|l| l.color == RgbSample::new(30, 30, 200)));
    }

    #[test]
    fn test_leaf_budget() {
        let samples: Vec<RgbSample> = (0..=255u8)
            .map(|v| RgbSample::new(v, 255 - v, v / 2))
            .collect();
        let leaves = median_cut(samples, 3);
        assert_eq!(leaves.len(), 8);
        assert!(leaves.iter().all(|l| l.pixel_count == 32));
    }

    #[test]
    fn test_widest_channel() {
        let bucket = QuantizationBucket::new(vec![
            RgbSample::new(10, 0, 100),
            RgbSample::new(20, 200, 110),
        ]);
        assert_eq!(bucket.widest_channel(), (Channel::Green, 200));
    }

    #[test]
    fn test_importance_prefers_saturated() {
        let gray = QuantizedColor {
            color: RgbSample::new(128, 128, 128),
            pixel_count: 100,
        };
        let vivid = QuantizedColor {
            color: RgbSample::new(255, 0, 0),
            pixel_count: 60,
        };
        assert_eq!(gray.importance(), 100.0);
        assert_eq!(vivid.importance(), 120.0);
    }
}
