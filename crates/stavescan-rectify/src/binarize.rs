// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive binarization stage — Gaussian-weighted local thresholding that
// keeps staff lines legible under uneven lighting.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, instrument};

/// Binarize a grayscale page with a Gaussian-weighted local threshold.
///
/// Each pixel is compared against the Gaussian-weighted mean of its
/// `block_size` neighbourhood minus `offset`: pixels above the local
/// threshold become white (255), the rest black (0). The weighting sigma
/// is derived from the block size the same way a separable Gaussian
/// kernel of that width would be, so `block_size` stays the single
/// neighbourhood knob.
///
/// Because the threshold tracks local brightness, a shadow across the
/// page does not swallow the staff lines the way a single global
/// threshold would.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn binarize(gray: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let sigma = sigma_for_block(block_size);
    let local_mean = gaussian_blur_f32(gray, sigma);
    debug!(block_size, sigma, offset, "Local means computed");

    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = i32::from(gray.get_pixel(x, y).0[0]);
            let threshold = i32::from(local_mean.get_pixel(x, y).0[0]) - offset;
            let binary = if value > threshold { 255u8 } else { 0u8 };
            output.put_pixel(x, y, Luma([binary]));
        }
    }

    debug!("Binarization complete");
    output
}

/// Sigma of a Gaussian kernel spanning `block_size` pixels.
fn sigma_for_block(block_size: u32) -> f32 {
    let half = (block_size.saturating_sub(1) / 2) as f32;
    0.3 * (half - 1.0) + 0.8
}
