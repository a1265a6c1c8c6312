//! Passive spoof check via intensity histogram analysis.
//!
//! A printed photograph or a screen replay, once reduced to its region of
//! interest, collapses most of its pixels into the darkest histogram bin:
//! paper and display reproductions lose the mid-tone texture a live scene
//! keeps. The check normalizes bin 0 to a share of all counted pixels and flags
//! an attack when that share is too large.
//!
//! # Threat Coverage
//!
//! - **Flags:** Low-contrast reproductions whose ROI is dominated by dark
//!   pixels.
//! - **Does not flag:** Well-lit high-quality prints, 3D masks, or any attack
//!   that preserves the intensity distribution of the original scene.

use serde::Serialize;

use crate::histogram::Histogram;

/// Result of a dark-bin spoof check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpoofVerdict {
    /// Whether the histogram looks like a reproduction (true = likely attack).
    pub is_attack: bool,
    /// Share of counted pixels in bin 0, in percent.
    pub dark_bin_percent: f64,
    /// Threshold the share was compared against, in percent.
    pub max_dark_percent: f64,
    /// Number of values the histogram holds.
    pub pixels_analysed: u64,
}

/// Default ceiling for the bin 0 share, in percent.
pub const DEFAULT_MAX_DARK_PERCENT: f64 = 70.0;

/// Check whether a histogram carries too much of its mass in bin 0.
///
/// # Arguments
///
/// * `histogram`: Intensity histogram of the masked region of interest.
/// * `max_dark_percent`: Largest acceptable share of bin 0, in percent. If
///   `None`, uses [`DEFAULT_MAX_DARK_PERCENT`].
///
/// # Returns
///
/// A [`SpoofVerdict`]. The comparison is strict: a share exactly at the
/// threshold is not an attack. An empty histogram cannot be judged and passes
/// with `is_attack = false` and `pixels_analysed = 0`.
pub fn check_dark_bin(histogram: &Histogram, max_dark_percent: Option<f64>) -> SpoofVerdict {
    let threshold = max_dark_percent.unwrap_or(DEFAULT_MAX_DARK_PERCENT);
    let total = histogram.total();

    if total == 0 {
        return SpoofVerdict {
            is_attack: false, // nothing to judge, pass through
            dark_bin_percent: 0.0,
            max_dark_percent: threshold,
            pixels_analysed: 0,
        };
    }

    let dark_bin_percent = histogram.percentages()[0];

    SpoofVerdict {
        is_attack: dark_bin_percent > threshold,
        dark_bin_percent,
        max_dark_percent: threshold,
        pixels_analysed: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: histogram with `dark` values in bin 0 and `bright` in bin 20.
    fn histogram_with(dark: usize, bright: usize) -> Histogram {
        Histogram::from_values(
            std::iter::repeat(3u8)
                .take(dark)
                .chain(std::iter::repeat(200u8).take(bright)),
        )
    }

    #[test]
    fn test_empty_histogram_passes() {
        let verdict = check_dark_bin(&Histogram::new(), None);
        assert!(!verdict.is_attack);
        assert_eq!(verdict.pixels_analysed, 0);
        assert_eq!(verdict.max_dark_percent, DEFAULT_MAX_DARK_PERCENT);
    }

    #[test]
    fn test_mostly_dark_is_attack() {
        let verdict = check_dark_bin(&histogram_with(80, 20), None);
        assert!(verdict.is_attack);
        assert!((verdict.dark_bin_percent - 80.0).abs() < 1e-9);
        assert_eq!(verdict.pixels_analysed, 100);
    }

    #[test]
    fn test_balanced_histogram_passes() {
        let verdict = check_dark_bin(&histogram_with(30, 70), None);
        assert!(!verdict.is_attack);
        assert!((verdict.dark_bin_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 70% in bin 0 is not above the ceiling.
        let verdict = check_dark_bin(&histogram_with(70, 30), None);
        assert!(!verdict.is_attack);

        let verdict = check_dark_bin(&histogram_with(71, 29), None);
        assert!(verdict.is_attack);
    }

    #[test]
    fn test_custom_low_threshold() {
        let verdict = check_dark_bin(&histogram_with(30, 70), Some(10.0));
        assert!(verdict.is_attack);
        assert_eq!(verdict.max_dark_percent, 10.0);
    }

    #[test]
    fn test_custom_high_threshold() {
        let verdict = check_dark_bin(&histogram_with(95, 5), Some(99.0));
        assert!(!verdict.is_attack);
    }

    #[test]
    fn test_bin_zero_upper_edge() {
        // 9 is still bin 0, 10 is not.
        let hist = Histogram::from_values([9u8, 9, 9, 10]);
        let verdict = check_dark_bin(&hist, None);
        assert!((verdict.dark_bin_percent - 75.0).abs() < 1e-9);
        assert!(verdict.is_attack);
    }
}
