use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod io;
mod report;

use config::Config;

/// Texture-based spoof detection for still images.
#[derive(Parser)]
#[command(name = "spoofscan", version, about)]
struct Cli {
    /// TOML configuration file. `SPOOFSCAN_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether an image is a reproduction (dark-bin check on the ROI).
    Detect {
        image: PathBuf,
        /// Also report LBP statistics of the ROI using this cell size.
        #[arg(long)]
        lbp_cell_size: Option<usize>,
        /// Override the bin 0 share (percent) that flags an attack.
        #[arg(long)]
        max_dark_percent: Option<f64>,
    },
    /// Compute the LBP score image and its histogram.
    Lbp {
        image: PathBuf,
        /// Cell edge length (3..=20). Defaults to the configured value.
        #[arg(long)]
        cell_size: Option<usize>,
        /// Write the score image here (format from the extension).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the 26-bin intensity histogram of an image.
    Histogram {
        image: PathBuf,
        /// Show percentages instead of counts.
        #[arg(long)]
        percent: bool,
    },
    /// Run every stage on a genuine and a suspect image and save intermediates.
    Compare {
        genuine: PathBuf,
        suspect: PathBuf,
        /// Directory for the intermediate images. Defaults to the configured value.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Detect {
            image,
            lbp_cell_size,
            max_dark_percent,
        } => commands::detect::run(&config, &image, lbp_cell_size, max_dark_percent, cli.json),
        Command::Lbp {
            image,
            cell_size,
            output,
        } => commands::lbp::run(&config, &image, cell_size, output.as_deref(), cli.json),
        Command::Histogram { image, percent } => {
            commands::histogram::run(&image, percent, cli.json)
        }
        Command::Compare {
            genuine,
            suspect,
            out_dir,
        } => commands::compare::run(&config, &genuine, &suspect, out_dir.as_deref(), cli.json),
    }
}
