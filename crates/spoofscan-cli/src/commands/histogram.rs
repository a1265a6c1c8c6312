//! `spoofscan histogram`: 26-bin intensity histogram of an image.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use spoofscan_core::histogram::BIN_COUNT;
use spoofscan_core::Histogram;

use crate::io::load_gray;
use crate::report::{format_bins, format_histogram, Report};

#[derive(Serialize)]
struct HistogramSummary {
    histogram: Histogram,
    percentages: [f64; BIN_COUNT],
}

/// Intensity histogram of every pixel in `image_path`.
pub fn compute(image_path: &Path) -> Result<Histogram> {
    let image = load_gray(image_path)?;
    Ok(Histogram::from_grid(&image))
}

pub fn run(image_path: &Path, percent: bool, json: bool) -> Result<()> {
    let histogram = compute(image_path)?;

    if json {
        let summary = HistogramSummary {
            percentages: histogram.percentages(),
            histogram,
        };
        return Report::new(image_path, summary).print();
    }

    if percent {
        println!("{}", format_bins(&histogram.percentages()));
    } else {
        print!("{}", format_histogram(&histogram));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{save_gray, temp_dir};
    use spoofscan_core::GrayImage;

    #[test]
    fn counts_every_pixel() {
        let dir = temp_dir("histogram");
        let path = dir.join("halves.png");
        // Left half 3, right half 200.
        save_gray(&path, &GrayImage::from_fn(4, 6, |_, c| if c < 3 { 3 } else { 200 })).unwrap();

        let histogram = compute(&path).unwrap();
        assert_eq!(histogram.total(), 24);
        assert_eq!(histogram.bin(0), 12);
        assert_eq!(histogram.bin(20), 12);
        assert!((histogram.percentages()[0] - 50.0).abs() < 1e-9);

        run(&path, false, false).unwrap();
        run(&path, true, false).unwrap();
        run(&path, false, true).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = temp_dir("histogram-missing");
        assert!(compute(&dir.join("absent.png")).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
