//! `spoofscan lbp`: score image and histogram of a whole image.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use spoofscan_core::lbp::TileLayout;
use spoofscan_core::{Histogram, LbpEngine, LbpOutput};

use crate::config::Config;
use crate::io::{load_gray, save_gray};
use crate::report::{format_histogram, Report};

#[derive(Serialize)]
struct LbpSummary<'a> {
    layout: TileLayout,
    histogram: &'a Histogram,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
}

/// Score `image_path` and write the score image to `output` when given.
pub fn compute(
    config: &Config,
    image_path: &Path,
    cell_size: Option<usize>,
    output: Option<&Path>,
) -> Result<LbpOutput> {
    let cell_size = cell_size.unwrap_or(config.cell_size);
    let engine = LbpEngine::new(cell_size).context("invalid cell size")?;

    let image = load_gray(image_path)?;
    let out = engine.run(&image)?;
    tracing::info!(
        image = %image_path.display(),
        cell_size,
        cells = out.layout.cell_count(),
        "lbp computed"
    );

    if let Some(path) = output {
        save_gray(path, &out.scores)?;
    }
    Ok(out)
}

pub fn run(
    config: &Config,
    image_path: &Path,
    cell_size: Option<usize>,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let out = compute(config, image_path, cell_size, output)?;
    let cell_size = out.layout.cell_size;

    if json {
        let summary = LbpSummary {
            layout: out.layout,
            histogram: &out.histogram,
            output,
        };
        return Report::new(image_path, summary).print();
    }

    println!(
        "{}x{} cells of {} px ({} rows, {} cols left unscored)",
        out.layout.cells_r,
        out.layout.cells_c,
        cell_size,
        out.layout.skipped_rows,
        out.layout.skipped_cols
    );
    print!("{}", format_histogram(&out.histogram));
    if let Some(path) = output {
        println!("score image written to {}", path.display());
    }
    Ok(())
}
