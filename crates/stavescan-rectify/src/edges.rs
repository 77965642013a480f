// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection stage — Gaussian smoothing followed by Canny.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use stavescan_core::RectifyConfig;
use tracing::{debug, instrument};

/// Produce a binary edge map of the page photo.
///
/// Smooths the grayscale input with a Gaussian filter before running Canny,
/// so sensor noise and paper texture do not show up as edges. Edge pixels
/// are 255, everything else 0.
#[instrument(skip(gray, config), fields(width = gray.width(), height = gray.height()))]
pub fn detect_edges(gray: &GrayImage, config: &RectifyConfig) -> GrayImage {
    let blurred = gaussian_blur_f32(gray, config.blur_sigma);
    debug!(sigma = config.blur_sigma, "Gaussian blur applied");

    let edges = canny(&blurred, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        "Canny edge detection complete"
    );
    edges
}
