//! Fixed-bin histogram shared by LBP scores and raw intensities.
//!
//! 26 bins of width 10 cover `[0, 259]`, so every `u8` lands in bins `0..=25`.

use std::ops::{AddAssign, RangeInclusive};

use serde::Serialize;

use crate::image::ImageView;

pub const BIN_COUNT: usize = 26;
pub const BIN_WIDTH: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Histogram {
    bins: [u64; BIN_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Empty histogram, all counters zero.
    pub fn new() -> Self {
        Self {
            bins: [0; BIN_COUNT],
        }
    }

    /// Count every element of `grid`.
    pub fn from_grid(grid: &impl ImageView) -> Self {
        let mut hist = Self::new();
        for r in 0..grid.rows() {
            for &v in grid.row(r) {
                hist.record(v);
            }
        }
        hist
    }

    pub fn from_values(values: impl IntoIterator<Item = u8>) -> Self {
        let mut hist = Self::new();
        for v in values {
            hist.record(v);
        }
        hist
    }

    /// Bin index for `value`.
    #[inline]
    pub fn bin_of(value: u8) -> usize {
        value as usize / BIN_WIDTH
    }

    /// Inclusive value range counted by bin `i`.
    pub fn bin_range(i: usize) -> RangeInclusive<usize> {
        let lo = i * BIN_WIDTH;
        lo..=lo + BIN_WIDTH - 1
    }

    #[inline]
    pub fn record(&mut self, value: u8) {
        self.bins[Self::bin_of(value)] += 1;
    }

    /// Element-wise sum of `other` into `self`.
    pub fn merge(&mut self, other: &Histogram) {
        for (acc, n) in self.bins.iter_mut().zip(other.bins.iter()) {
            *acc += n;
        }
    }

    pub fn bins(&self) -> &[u64; BIN_COUNT] {
        &self.bins
    }

    pub fn bin(&self, i: usize) -> u64 {
        self.bins[i]
    }

    /// Number of values counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Each bin as a percentage of [`Histogram::total`].
    ///
    /// All zeros when nothing was counted.
    pub fn percentages(&self) -> [f64; BIN_COUNT] {
        let total = self.total();
        let mut out = [0.0; BIN_COUNT];
        if total == 0 {
            return out;
        }
        for (pct, &n) in out.iter_mut().zip(self.bins.iter()) {
            *pct = n as f64 * 100.0 / total as f64;
        }
        out
    }
}

impl AddAssign<&Histogram> for Histogram {
    fn add_assign(&mut self, rhs: &Histogram) {
        self.merge(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn boundaries_land_in_expected_bins() {
        let hist = Histogram::from_values([0, 9, 10, 19, 249, 250, 255]);
        assert_eq!(hist.bin(0), 2);
        assert_eq!(hist.bin(1), 2);
        assert_eq!(hist.bin(24), 1);
        assert_eq!(hist.bin(25), 2);
        assert_eq!(Histogram::bin_of(255), BIN_COUNT - 1);
    }

    #[test]
    fn bin_range_is_ten_wide() {
        assert_eq!(Histogram::bin_range(0), 0..=9);
        assert_eq!(Histogram::bin_range(25), 250..=259);
    }

    #[test]
    fn total_matches_values_processed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let rows: usize = rng.gen_range(1..40);
            let cols: usize = rng.gen_range(1..40);
            let img = GrayImage::from_fn(rows, cols, |_, _| rng.gen());
            let hist = Histogram::from_grid(&img);
            assert_eq!(hist.total(), (rows * cols) as u64);
        }
    }

    #[test]
    fn grid_and_stream_agree() {
        let img = GrayImage::from_fn(7, 9, |r, c| (r * 31 + c * 17) as u8);
        assert_eq!(Histogram::from_grid(&img), Histogram::from_values(img.pixels()));
    }

    #[test]
    fn merge_adds_elementwise() {
        let mut a = Histogram::from_values([0, 100]);
        let b = Histogram::from_values([5, 255]);
        a += &b;
        assert_eq!(a.bin(0), 2);
        assert_eq!(a.bin(10), 1);
        assert_eq!(a.bin(25), 1);
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn percentages_of_empty_histogram_are_zero() {
        assert!(Histogram::new().percentages().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let hist = Histogram::from_values([0, 0, 0, 200]);
        let pct = hist.percentages();
        assert!((pct[0] - 75.0).abs() < 1e-9);
        assert!((pct[20] - 25.0).abs() < 1e-9);
        assert!((pct.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }
}
