//! `spoofscan detect`: dark-bin spoof check on the masked image.

use std::path::Path;

use anyhow::Result;
use spoofscan_core::{detect, DetectOptions, Detection};

use crate::config::Config;
use crate::io::load_gray;
use crate::report::{format_histogram, Report};

/// Load `image_path` and run the detection pipeline with the configured options.
pub fn analyze(
    config: &Config,
    image_path: &Path,
    lbp_cell_size: Option<usize>,
    max_dark_percent: Option<f64>,
) -> Result<Detection> {
    let image = load_gray(image_path)?;
    let options = DetectOptions {
        threshold_levels: config.threshold_levels,
        max_dark_percent: max_dark_percent.unwrap_or(config.max_dark_percent),
        lbp_cell_size,
    };

    let detection = detect(&image, &options)?;
    tracing::info!(
        image = %image_path.display(),
        is_attack = detection.verdict.is_attack,
        dark_bin_percent = detection.verdict.dark_bin_percent,
        "detection complete"
    );
    Ok(detection)
}

pub fn run(
    config: &Config,
    image_path: &Path,
    lbp_cell_size: Option<usize>,
    max_dark_percent: Option<f64>,
    json: bool,
) -> Result<()> {
    let detection = analyze(config, image_path, lbp_cell_size, max_dark_percent)?;

    if json {
        return Report::new(image_path, &detection).print();
    }

    if detection.verdict.is_attack {
        println!("An attack was detected");
    } else {
        println!("No attack was detected");
    }
    println!(
        "dark bin: {:.2}% of {} pixels (limit {:.2}%)",
        detection.verdict.dark_bin_percent,
        detection.verdict.pixels_analysed,
        detection.verdict.max_dark_percent
    );

    if let Some(texture) = &detection.texture {
        println!(
            "LBP: {}x{} cells of {} px, {} codes",
            texture.layout.cells_r,
            texture.layout.cells_c,
            texture.layout.cell_size,
            texture.histogram.total()
        );
        print!("{}", format_histogram(&texture.histogram));
    }

    Ok(())
}
