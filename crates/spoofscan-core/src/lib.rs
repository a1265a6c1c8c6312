//! Texture statistics for telling genuine captures from reproductions.
//!
//! - [`lbp`] – Local Binary Pattern codes per cell and per image.
//! - [`histogram`] – the 26-bin histogram shared by codes and intensities.
//! - [`roi`] – quantized threshold mask and masking.
//! - [`liveness`] – the dark-bin spoof verdict.
//! - [`detect`] – the pipeline tying those together.
//!
//! # Features
//!
//! - `rayon` – scores LBP cells on the rayon thread pool. Results are
//!   identical to the sequential path.

pub mod detect;
pub mod error;
pub mod histogram;
pub mod image;
pub mod lbp;
pub mod liveness;
pub mod roi;

pub use crate::detect::{detect, DetectOptions, Detection};
pub use crate::error::LbpError;
pub use crate::histogram::Histogram;
pub use crate::image::{CellView, GrayImage, ImageView};
pub use crate::lbp::{run_lbp, LbpEngine, LbpOutput};
pub use crate::liveness::{check_dark_bin, SpoofVerdict};
