//! Text and JSON rendering shared by the subcommands.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use spoofscan_core::histogram::BIN_COUNT;
use spoofscan_core::Histogram;

/// Envelope for `--json` output.
#[derive(Serialize)]
pub struct Report<'a, T: Serialize> {
    pub image: &'a Path,
    pub analyzed_at: String,
    #[serde(flatten)]
    pub body: T,
}

impl<'a, T: Serialize> Report<'a, T> {
    pub fn new(image: &'a Path, body: T) -> Self {
        Self {
            image,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            body,
        }
    }

    pub fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// One line per non-empty bin: `  [lo-hi]  count  (pct%)`.
pub fn format_histogram(histogram: &Histogram) -> String {
    let percentages = histogram.percentages();
    let mut out = String::new();
    for i in 0..BIN_COUNT {
        let count = histogram.bin(i);
        if count == 0 {
            continue;
        }
        let range = Histogram::bin_range(i);
        out.push_str(&format!(
            "  [{:>3}-{:>3}] {:>10}  ({:6.2}%)\n",
            range.start(),
            range.end(),
            count,
            percentages[i]
        ));
    }
    if out.is_empty() {
        out.push_str("  (empty)\n");
    }
    out
}

/// Comma-separated per-bin values, the compact form used by `compare`.
pub fn format_bins(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
