//! `spoofscan compare`: side-by-side run of every stage on a known-genuine
//! and a suspect image, keeping the intermediates on disk for inspection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use spoofscan_core::detect::roi_stages;
use spoofscan_core::histogram::BIN_COUNT;
use spoofscan_core::{check_dark_bin, run_lbp, Histogram, SpoofVerdict};

use crate::config::Config;
use crate::io::{load_gray, save_gray};
use crate::report::{format_bins, Report};

/// Files written for one input image.
#[derive(Debug, Serialize)]
struct StageOutputs {
    thresh: PathBuf,
    roi: PathBuf,
    lbp: PathBuf,
}

impl StageOutputs {
    fn for_input(out_dir: &Path, input: &Path, tag: &str) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| tag.to_string());
        // Prefix with the role so two inputs with the same stem don't collide.
        let base = format!("{tag}_{stem}");
        Self {
            thresh: out_dir.join(format!("{base}_thresh.png")),
            roi: out_dir.join(format!("{base}_roi.png")),
            lbp: out_dir.join(format!("{base}_lbp.png")),
        }
    }
}

fn process(config: &Config, input: &Path, outputs: &StageOutputs) -> Result<Histogram> {
    let image = load_gray(input)?;

    let stages = roi_stages(&image, config.threshold_levels)?;
    save_gray(&outputs.thresh, &stages.mask)?;
    save_gray(&outputs.roi, &stages.roi)?;

    let lbp = run_lbp(&stages.roi, config.cell_size)
        .with_context(|| format!("lbp failed for {}", input.display()))?;
    save_gray(&outputs.lbp, &lbp.scores)?;

    tracing::info!(
        input = %input.display(),
        roi = %outputs.roi.display(),
        lbp_codes = lbp.histogram.total(),
        "stages written"
    );

    Ok(Histogram::from_grid(&stages.roi))
}

/// Stages and verdict for one side of the comparison.
#[derive(Debug, Serialize)]
pub struct CompareEntry {
    input: PathBuf,
    roi_histogram: Histogram,
    percentages: [f64; BIN_COUNT],
    verdict: SpoofVerdict,
    outputs: StageOutputs,
}

#[derive(Debug, Serialize)]
pub struct Comparison {
    genuine: CompareEntry,
    suspect: CompareEntry,
}

fn entry(config: &Config, out_dir: &Path, input: &Path, tag: &str) -> Result<CompareEntry> {
    let outputs = StageOutputs::for_input(out_dir, input, tag);
    let roi_histogram = process(config, input, &outputs)?;
    let verdict = check_dark_bin(&roi_histogram, Some(config.max_dark_percent));
    Ok(CompareEntry {
        input: input.to_path_buf(),
        percentages: roi_histogram.percentages(),
        roi_histogram,
        verdict,
        outputs,
    })
}

/// Run every stage on both images, writing intermediates into `out_dir`.
pub fn compare(
    config: &Config,
    genuine: &Path,
    suspect: &Path,
    out_dir: Option<&Path>,
) -> Result<Comparison> {
    let out_dir = out_dir.unwrap_or(config.output_dir.as_path());
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create directory {}", out_dir.display()))?;

    Ok(Comparison {
        genuine: entry(config, out_dir, genuine, "genuine")?,
        suspect: entry(config, out_dir, suspect, "suspect")?,
    })
}

fn print_entry(tag: &str, entry: &CompareEntry) {
    println!("{} ({}):", tag.to_uppercase(), entry.input.display());
    println!("  ROI histogram %: {}", format_bins(&entry.percentages));
    println!(
        "  dark bin {:.2}% -> {}",
        entry.verdict.dark_bin_percent,
        if entry.verdict.is_attack { "attack" } else { "no attack" }
    );
    println!(
        "  wrote {}, {}, {}",
        entry.outputs.thresh.display(),
        entry.outputs.roi.display(),
        entry.outputs.lbp.display()
    );
}

/// The JSON envelope is keyed on the suspect image; both sides are in the body.
pub fn run(
    config: &Config,
    genuine: &Path,
    suspect: &Path,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let comparison = compare(config, genuine, suspect, out_dir)?;

    if json {
        return Report::new(suspect, &comparison).print();
    }

    print_entry("genuine", &comparison.genuine);
    print_entry("suspect", &comparison.suspect);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::temp_dir;
    use spoofscan_core::GrayImage;

    #[test]
    fn output_names_carry_role_and_stem() {
        let outputs = StageOutputs::for_input(Path::new("/out"), Path::new("/in/true.jpg"), "genuine");
        assert_eq!(outputs.thresh, PathBuf::from("/out/genuine_true_thresh.png"));
        assert_eq!(outputs.roi, PathBuf::from("/out/genuine_true_roi.png"));
        assert_eq!(outputs.lbp, PathBuf::from("/out/genuine_true_lbp.png"));
    }

    #[test]
    fn writes_all_stages_for_both_inputs() {
        let dir = temp_dir("compare-run");
        let genuine = dir.join("true.png");
        let suspect = dir.join("fake.png");
        save_gray(&genuine, &GrayImage::from_fn(30, 30, |r, c| (r * 8 + c) as u8)).unwrap();
        save_gray(&suspect, &GrayImage::filled(30, 30, 3)).unwrap();

        let out_dir = dir.join("out");
        run(&Config::default(), &genuine, &suspect, Some(out_dir.as_path()), false).unwrap();

        for name in [
            "genuine_true_thresh.png",
            "genuine_true_roi.png",
            "genuine_true_lbp.png",
            "suspect_fake_thresh.png",
            "suspect_fake_roi.png",
            "suspect_fake_lbp.png",
        ] {
            assert!(out_dir.join(name).exists(), "{name} missing");
        }

        let lbp = load_gray(&out_dir.join("genuine_true_lbp.png")).unwrap();
        assert_eq!(lbp.as_slice().len(), 900);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_body_carries_both_sides() {
        let dir = temp_dir("compare-json");
        let genuine = dir.join("true.png");
        let suspect = dir.join("fake.png");
        save_gray(&genuine, &GrayImage::from_fn(20, 20, |r, c| (r * 12 + c) as u8)).unwrap();
        save_gray(&suspect, &GrayImage::filled(20, 20, 3)).unwrap();
        let out_dir = dir.join("out");

        let comparison = compare(&Config::default(), &genuine, &suspect, Some(out_dir.as_path())).unwrap();
        assert!(!comparison.genuine.verdict.is_attack);
        assert!(comparison.suspect.verdict.is_attack);
        assert_eq!(comparison.suspect.roi_histogram.total(), 400);

        let report = Report::new(suspect.as_path(), &comparison);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["genuine"]["verdict"]["is_attack"], false);
        assert_eq!(value["suspect"]["verdict"]["is_attack"], true);
        assert_eq!(
            value["suspect"]["outputs"]["lbp"],
            out_dir.join("suspect_fake_lbp.png").to_str().unwrap()
        );
        assert_eq!(value["genuine"]["percentages"].as_array().unwrap().len(), BIN_COUNT);

        run(&Config::default(), &genuine, &suspect, Some(out_dir.as_path()), true).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
