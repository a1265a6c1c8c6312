//! Detection pipeline: ROI mask, intensity histogram, dark-bin verdict and
//! optional LBP texture statistics.

use serde::Serialize;

use crate::error::LbpError;
use crate::histogram::{Histogram, BIN_COUNT};
use crate::image::{GrayImage, ImageView};
use crate::lbp::{LbpEngine, TileLayout};
use crate::liveness::{check_dark_bin, SpoofVerdict, DEFAULT_MAX_DARK_PERCENT};
use crate::roi::{apply_mask, roi_mask, DEFAULT_LEVELS};

/// Tunables for [`detect`].
#[derive(Clone, Debug)]
pub struct DetectOptions {
    /// Intensity levels used to build the ROI mask.
    pub threshold_levels: usize,
    /// Bin 0 share (percent) above which the image is flagged. Must be a
    /// finite value in `0..=100`.
    pub max_dark_percent: f64,
    /// When set, also run the LBP engine on the masked image.
    pub lbp_cell_size: Option<usize>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            threshold_levels: DEFAULT_LEVELS,
            max_dark_percent: DEFAULT_MAX_DARK_PERCENT,
            lbp_cell_size: None,
        }
    }
}

/// LBP statistics of the masked image.
#[derive(Clone, Debug, Serialize)]
pub struct TextureSummary {
    pub layout: TileLayout,
    pub histogram: Histogram,
    pub percentages: [f64; BIN_COUNT],
}

/// Outcome of [`detect`] for one image.
#[derive(Clone, Debug, Serialize)]
pub struct Detection {
    pub rows: usize,
    pub cols: usize,
    pub histogram: Histogram,
    pub percentages: [f64; BIN_COUNT],
    pub verdict: SpoofVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSummary>,
}

/// Masked intermediates of the detection pipeline.
pub struct RoiStages {
    /// Quantized threshold mask, same size as the input.
    pub mask: GrayImage,
    /// Input with the mask applied.
    pub roi: GrayImage,
}

/// Build the quantized mask of `image` and apply it.
pub fn roi_stages(image: &GrayImage, levels: usize) -> Result<RoiStages, LbpError> {
    let mask = roi_mask(image, levels)?;
    let roi = apply_mask(image, &mask)?;
    Ok(RoiStages { mask, roi })
}

/// Decide whether `image` looks like a reproduction.
///
/// Masks the image, histograms the masked intensities and checks the share of
/// the darkest bin. The histogram covers every pixel of the image, masked-out
/// ones included as zeros.
pub fn detect(image: &GrayImage, options: &DetectOptions) -> Result<Detection, LbpError> {
    if image.is_empty() {
        return Err(LbpError::InvalidParameters(format!(
            "image is {}x{}",
            image.rows(),
            image.cols()
        )));
    }
    let max = options.max_dark_percent;
    if !(0.0..=100.0).contains(&max) {
        return Err(LbpError::InvalidParameters(format!(
            "max dark percent {max} is outside 0..=100"
        )));
    }

    let stages = roi_stages(image, options.threshold_levels)?;
    let histogram = Histogram::from_grid(&stages.roi);
    let verdict = check_dark_bin(&histogram, Some(options.max_dark_percent));

    tracing::debug!(
        rows = image.rows(),
        cols = image.cols(),
        dark_bin_percent = verdict.dark_bin_percent,
        is_attack = verdict.is_attack,
        "dark bin check"
    );

    let texture = match options.lbp_cell_size {
        Some(cell_size) => {
            let out = LbpEngine::new(cell_size)?.run(&stages.roi)?;
            Some(TextureSummary {
                layout: out.layout,
                percentages: out.histogram.percentages(),
                histogram: out.histogram,
            })
        }
        None => None,
    };

    Ok(Detection {
        rows: image.rows(),
        cols: image.cols(),
        percentages: histogram.percentages(),
        histogram,
        verdict,
        texture,
    })
}
