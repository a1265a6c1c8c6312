//! Region-of-interest masking by repeated thresholding.

use crate::error::LbpError;
use crate::image::{GrayImage, ImageView};

/// Default number of intensity levels for [`roi_mask`].
pub const DEFAULT_LEVELS: usize = 10;

fn check_same_shape(a: &impl ImageView, b: &impl ImageView) -> Result<(), LbpError> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(LbpError::InvalidParameters(format!(
            "image is {}x{} but mask is {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Set `dst` to `value` wherever `src` is strictly above `thresh`.
///
/// Pixels at or below the threshold are left as they are, so several calls
/// with increasing thresholds stack into a quantized image.
pub fn threshold_into(
    src: &impl ImageView,
    thresh: u8,
    dst: &mut GrayImage,
    value: u8,
) -> Result<(), LbpError> {
    check_same_shape(src, dst)?;
    for r in 0..src.rows() {
        let out = dst.row_mut(r);
        for (d, &s) in out.iter_mut().zip(src.row(r)) {
            if s > thresh {
                *d = value;
            }
        }
    }
    Ok(())
}

/// Quantized mask of `src`.
///
/// Starts at 255 everywhere, then for `i` in `1..levels - 1` every pixel above
/// `i * step` (with `step = 255 / levels`) takes the value `i * step`. With the
/// default 10 levels this stacks thresholds 25, 50, .., 200; pixels at or
/// below 25 keep 255.
pub fn roi_mask(src: &impl ImageView, levels: usize) -> Result<GrayImage, LbpError> {
    if !(3..=255).contains(&levels) {
        return Err(LbpError::InvalidParameters(format!(
            "threshold levels must be in 3..=255, got {levels}"
        )));
    }
    let step = 255 / levels;
    let mut mask = GrayImage::filled(src.rows(), src.cols(), 255);
    for i in 1..levels - 1 {
        let level = (i * step) as u8;
        threshold_into(src, level, &mut mask, level)?;
    }
    Ok(mask)
}

/// Keep `src` where `mask` is non-zero, zero elsewhere.
pub fn apply_mask(src: &impl ImageView, mask: &impl ImageView) -> Result<GrayImage, LbpError> {
    check_same_shape(src, mask)?;
    let mut out = GrayImage::filled(src.rows(), src.cols(), 0);
    for r in 0..src.rows() {
        for ((o, &s), &m) in out.row_mut(r).iter_mut().zip(src.row(r)).zip(mask.row(r)) {
            if m != 0 {
                *o = s;
            }
        }
    }
    Ok(out)
}
