//! Local Binary Pattern texture descriptors.
//!
//! Every interior pixel of a cell is compared against its 8 neighbors, walked
//! clockwise from the top-left. Bit `n` of the resulting code is set when the
//! neighbor at offset `n` is strictly brighter than the pixel itself:
//!
//! <pre>
//! 0  1  2
//! 7  p  3
//! 6  5  4
//! </pre>
//!
//! The image is cut into non-overlapping square cells of `cell_size` pixels.
//! Each cell is scored on its own, so the one-pixel border of every cell has no
//! code and is left out of all statistics. Rows and columns past the last full
//! cell are not scored at all.

mod engine;
mod score;

pub use self::engine::{run_lbp, LbpEngine, LbpOutput, TileLayout};
pub use self::score::{score_cell, score_pixel, score_pixel_with, ScoreMatrix};

/// Smallest cell with at least one interior pixel.
pub const MIN_CELL_SIZE: usize = 3;
/// Largest accepted cell edge.
pub const MAX_CELL_SIZE: usize = 20;

/// `(Δrow, Δcol)` for each bit position of an LBP code.
pub type NeighborOffsets = [(isize, isize); 8];

/// Clockwise from the top-left neighbor. Bit `n` of every code refers to
/// entry `n`; reordering this table changes every score.
pub const NEIGHBOR_OFFSETS: NeighborOffsets = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];
