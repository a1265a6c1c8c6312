//! Per-pixel and per-cell LBP scoring.

use crate::error::LbpError;
use crate::histogram::Histogram;
use crate::image::ImageView;

use super::{NeighborOffsets, MAX_CELL_SIZE, NEIGHBOR_OFFSETS};

/// LBP code of pixel `(r, c)` using the canonical neighbor order.
pub fn score_pixel(cell: &impl ImageView, r: usize, c: usize) -> Result<u8, LbpError> {
    score_pixel_with(&NEIGHBOR_OFFSETS, cell, r, c)
}

/// LBP code of pixel `(r, c)` with an explicit neighbor table.
///
/// The pixel must have all 8 neighbors inside `cell`, otherwise
/// [`LbpError::OutOfBounds`] is returned. The same holds for custom tables
/// that reach further than one pixel. Ties never set a bit.
pub fn score_pixel_with(
    offsets: &NeighborOffsets,
    cell: &impl ImageView,
    r: usize,
    c: usize,
) -> Result<u8, LbpError> {
    let (rows, cols) = (cell.rows(), cell.cols());
    let out_of_bounds = || LbpError::OutOfBounds {
        row: r,
        col: c,
        rows,
        cols,
    };
    if r < 1 || c < 1 || r + 2 > rows || c + 2 > cols {
        return Err(out_of_bounds());
    }

    let value = cell.get(r, c);
    let mut code = 0u8;
    for (n, &(dr, dc)) in offsets.iter().enumerate() {
        let nr = r.checked_add_signed(dr).filter(|&nr| nr < rows);
        let nc = c.checked_add_signed(dc).filter(|&nc| nc < cols);
        let (Some(nr), Some(nc)) = (nr, nc) else {
            return Err(out_of_bounds());
        };
        if value < cell.get(nr, nc) {
            code |= 1 << n;
        }
    }
    Ok(code)
}

/// LBP codes of one square cell.
///
/// Same shape as the cell it was computed from. The outer ring holds 0 but is
/// not a score; use [`ScoreMatrix::is_interior`] or
/// [`ScoreMatrix::interior_codes`] to tell the two apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreMatrix {
    size: usize,
    codes: Vec<u8>,
}

impl ScoreMatrix {
    fn zeroed(size: usize) -> Self {
        Self {
            size,
            codes: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `(r, c)` carries a computed code.
    #[inline]
    pub fn is_interior(&self, r: usize, c: usize) -> bool {
        r >= 1 && c >= 1 && r + 1 < self.size && c + 1 < self.size
    }

    /// Codes of the scored pixels, row-major, border excluded.
    pub fn interior_codes(&self) -> impl Iterator<Item = u8> + '_ {
        let size = self.size;
        let codes = &self.codes;
        let inner = 1..size.saturating_sub(1);
        inner
            .clone()
            .flat_map(move |r| inner.clone().map(move |c| codes[r * size + c]))
    }

    /// Histogram over the interior codes only.
    pub fn histogram(&self) -> Histogram {
        Histogram::from_values(self.interior_codes())
    }
}

impl ImageView for ScoreMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.size
    }
    #[inline]
    fn cols(&self) -> usize {
        self.size
    }
    #[inline]
    fn row(&self, r: usize) -> &[u8] {
        let start = r * self.size;
        &self.codes[start..start + self.size]
    }
}

/// Score every interior pixel of a square cell of at most 20 pixels.
pub fn score_cell(cell: &impl ImageView) -> Result<ScoreMatrix, LbpError> {
    let size = cell.rows();
    if size != cell.cols() || size > MAX_CELL_SIZE {
        return Err(LbpError::InvalidCellSize {
            rows: cell.rows(),
            cols: cell.cols(),
        });
    }

    let mut scores = ScoreMatrix::zeroed(size);
    for r in 1..size.saturating_sub(1) {
        for c in 1..size - 1 {
            scores.codes[r * size + c] = score_pixel(cell, r, c)?;
        }
    }
    Ok(scores)
}
