// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// stavescan — straighten and clean up a photographed sheet-music page.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use stavescan_core::{PageFormat, RectifyConfig, human_errors::humanize_error};
use stavescan_rectify::PageRectifier;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Straighten and binarize a photographed sheet-music page.
#[derive(Debug, Parser)]
#[command(name = "stavescan", version, about)]
struct Cli {
    /// Photo of the page (PNG, JPEG, or TIFF).
    input: PathBuf,

    /// Where to write the rectified page.
    #[arg(short, long, default_value = "scanned_output.png")]
    output: PathBuf,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Gaussian smoothing sigma before edge detection.
    #[arg(long)]
    blur_sigma: Option<f32>,

    /// Canny low gradient threshold.
    #[arg(long)]
    canny_low: Option<f32>,

    /// Canny high gradient threshold.
    #[arg(long)]
    canny_high: Option<f32>,

    /// Polygon simplification tolerance as a fraction of contour perimeter.
    #[arg(long)]
    epsilon: Option<f64>,

    /// Minimum page area as a fraction of the image area.
    #[arg(long)]
    min_area: Option<f64>,

    /// Adaptive threshold neighbourhood size (odd, >= 3).
    #[arg(long)]
    block_size: Option<u32>,

    /// Constant subtracted from the local mean when binarizing.
    #[arg(long)]
    offset: Option<i32>,
}

impl Cli {
    fn config(&self) -> RectifyConfig {
        let mut config = RectifyConfig::default();
        if let Some(v) = self.blur_sigma {
            config.blur_sigma = v;
        }
        if let Some(v) = self.canny_low {
            config.canny_low = v;
        }
        if let Some(v) = self.canny_high {
            config.canny_high = v;
        }
        if let Some(v) = self.epsilon {
            config.approx_epsilon_ratio = v;
        }
        if let Some(v) = self.min_area {
            config.min_quad_area_ratio = v;
        }
        if let Some(v) = self.block_size {
            config.threshold_block_size = v;
        }
        if let Some(v) = self.offset {
            config.threshold_offset = v;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
    let config = cli.config();

    let format = input_format(&cli.input).with_context(|| {
        format!(
            "unsupported input {}; expected a png, jpg/jpeg, or tif/tiff file",
            cli.input.display()
        )
    })?;
    info!(mime = format.mime_type(), "Input format recognised");

    let result = PageRectifier::open(&cli.input)
        .and_then(|rectifier| rectifier.with_config(config).rectify());

    let page = match result {
        Ok(page) => page,
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("{} {}", human.message, human.suggestion);
            return Err(err).with_context(|| {
                format!("could not rectify {}", cli.input.display())
            });
        }
    };

    page.save(&cli.output)
        .with_context(|| format!("could not write {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        width = page.report.output_width,
        height = page.report.output_height,
        used_fallback = page.report.used_fallback,
        "Rectified page written"
    );

    if let Some(report_path) = &cli.report {
        let json = serde_json::to_string_pretty(&page.report)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("could not write report {}", report_path.display()))?;
        info!(report = %report_path.display(), "Run report written");
    }

    Ok(())
}

/// Infer the input raster format from the file extension.
fn input_format(path: &Path) -> Option<PageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(PageFormat::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognised_extensions_map_to_formats() {
        assert_eq!(input_format(Path::new("page.png")), Some(PageFormat::Png));
        assert_eq!(input_format(Path::new("page.JPG")), Some(PageFormat::Jpeg));
        assert_eq!(input_format(Path::new("scan.tiff")), Some(PageFormat::Tiff));
    }

    #[test]
    fn unsupported_or_missing_extensions_are_rejected() {
        assert_eq!(input_format(Path::new("page.bmp")), None);
        assert_eq!(input_format(Path::new("page")), None);
    }

    #[test]
    fn config_overrides_apply() {
        let cli = Cli::parse_from(["stavescan", "in.png", "--canny-low", "30", "--offset", "5"]);
        let config = cli.config();
        assert!((config.canny_low - 30.0).abs() < f32::EPSILON);
        assert_eq!(config.threshold_offset, 5);
        assert!((config.blur_sigma - 1.1).abs() < f32::EPSILON);
    }
}
