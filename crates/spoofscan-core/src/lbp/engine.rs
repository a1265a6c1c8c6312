//! Whole-image LBP pass: row-major tiling into square cells, per-cell
//! scoring and histogram reduction.

use serde::Serialize;

use crate::error::LbpError;
use crate::histogram::Histogram;
use crate::image::{GrayImage, ImageView};

use super::score::{score_cell, ScoreMatrix};
use super::{MAX_CELL_SIZE, MIN_CELL_SIZE};

/// How an image is cut into cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileLayout {
    pub cell_size: usize,
    /// Full cells down the image.
    pub cells_r: usize,
    /// Full cells across the image.
    pub cells_c: usize,
    /// Trailing rows past the last full cell, never scored.
    pub skipped_rows: usize,
    /// Trailing columns past the last full cell, never scored.
    pub skipped_cols: usize,
}

impl TileLayout {
    pub fn new(rows: usize, cols: usize, cell_size: usize) -> Self {
        let cells_r = rows / cell_size;
        let cells_c = cols / cell_size;
        Self {
            cell_size,
            cells_r,
            cells_c,
            skipped_rows: rows - cells_r * cell_size,
            skipped_cols: cols - cells_c * cell_size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells_r * self.cells_c
    }

    /// Pixels that receive a code: `(cell_size - 2)²` per cell.
    pub fn scored_pixels(&self) -> u64 {
        let inner = self.cell_size.saturating_sub(2) as u64;
        self.cell_count() as u64 * inner * inner
    }

    /// Top-left corner of each cell in row-major order.
    fn origins(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.cells_r).flat_map(move |cr| {
            (0..self.cells_c).map(move |cc| (cr * self.cell_size, cc * self.cell_size))
        })
    }
}

/// Result of an LBP pass over a full image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LbpOutput {
    /// Same size as the input; cell borders and the untiled remainder are 0.
    pub scores: GrayImage,
    /// Sum of the per-cell interior histograms.
    pub histogram: Histogram,
    pub layout: TileLayout,
}

/// Tiles an image into square cells and scores each one.
#[derive(Clone, Copy, Debug)]
pub struct LbpEngine {
    cell_size: usize,
}

impl LbpEngine {
    pub fn new(cell_size: usize) -> Result<Self, LbpError> {
        if cell_size < MIN_CELL_SIZE {
            return Err(LbpError::InvalidParameters(format!(
                "cell size {cell_size} is below the minimum of {MIN_CELL_SIZE}"
            )));
        }
        if cell_size > MAX_CELL_SIZE {
            return Err(LbpError::InvalidCellSize {
                rows: cell_size,
                cols: cell_size,
            });
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn run(&self, image: &GrayImage) -> Result<LbpOutput, LbpError> {
        if image.is_empty() {
            return Err(LbpError::InvalidParameters(format!(
                "image is {}x{}",
                image.rows(),
                image.cols()
            )));
        }

        let layout = TileLayout::new(image.rows(), image.cols(), self.cell_size);
        if layout.skipped_rows > 0 || layout.skipped_cols > 0 {
            tracing::debug!(
                rows = image.rows(),
                cols = image.cols(),
                cell_size = self.cell_size,
                skipped_rows = layout.skipped_rows,
                skipped_cols = layout.skipped_cols,
                "image does not divide into whole cells; remainder left unscored"
            );
        }

        let cells = score_tiles(image, &layout)?;

        let mut scores = GrayImage::filled(image.rows(), image.cols(), 0);
        let mut histogram = Histogram::new();
        for ((row, col), cell) in layout.origins().zip(cells.iter()) {
            scores.paste(row, col, cell)?;
            histogram += &cell.histogram();
        }

        tracing::debug!(
            cells = layout.cell_count(),
            scored = histogram.total(),
            "lbp pass complete"
        );

        Ok(LbpOutput {
            scores,
            histogram,
            layout,
        })
    }
}

/// Run a single LBP pass with the given cell size.
pub fn run_lbp(image: &GrayImage, cell_size: usize) -> Result<LbpOutput, LbpError> {
    LbpEngine::new(cell_size)?.run(image)
}

fn score_tile(image: &GrayImage, row: usize, col: usize, size: usize) -> Result<ScoreMatrix, LbpError> {
    let cell = image.region(row..row + size, col..col + size)?;
    score_cell(&cell)
}

#[cfg(not(feature = "rayon"))]
fn score_tiles(image: &GrayImage, layout: &TileLayout) -> Result<Vec<ScoreMatrix>, LbpError> {
    layout
        .origins()
        .map(|(row, col)| score_tile(image, row, col, layout.cell_size))
        .collect()
}

// Cells are independent; collecting keeps tile order so the reduction in
// `LbpEngine::run` is the same as the sequential one.
#[cfg(feature = "rayon")]
fn score_tiles(image: &GrayImage, layout: &TileLayout) -> Result<Vec<ScoreMatrix>, LbpError> {
    use rayon::prelude::*;

    let origins: Vec<(usize, usize)> = layout.origins().collect();
    origins
        .par_iter()
        .map(|&(row, col)| score_tile(image, row, col, layout.cell_size))
        .collect()
}
