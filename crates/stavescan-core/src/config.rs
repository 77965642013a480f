// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StavescanError};

/// Tunable parameters for the page rectification pipeline.
///
/// Every numeric constant the pipeline depends on lives here with a
/// documented default, so behaviour can be tuned and tested independently
/// of the algorithms. There is no process-wide configuration: a config
/// value is passed explicitly into each pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectifyConfig {
    /// Gaussian smoothing sigma applied before edge detection.
    /// The default 1.1 is the sigma conventionally derived from a 5×5 kernel.
    pub blur_sigma: f32,
    /// Canny low gradient threshold (default 75).
    pub canny_low: f32,
    /// Canny high gradient threshold (default 200).
    pub canny_high: f32,
    /// Polygon simplification tolerance as a fraction of the contour
    /// perimeter (default 0.02).
    pub approx_epsilon_ratio: f64,
    /// Minimum enclosed area of an accepted page quadrilateral, as a
    /// fraction of the image area (default 0.10). Candidates below this
    /// floor are rejected as spurious micro-rectangles.
    pub min_quad_area_ratio: f64,
    /// Adaptive threshold neighbourhood size in pixels (default 11; must
    /// be odd and at least 3).
    pub threshold_block_size: u32,
    /// Constant subtracted from the Gaussian-weighted local mean when
    /// binarizing (default 10).
    pub threshold_offset: i32,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 75.0,
            canny_high: 200.0,
            approx_epsilon_ratio: 0.02,
            min_quad_area_ratio: 0.10,
            threshold_block_size: 11,
            threshold_offset: 10,
        }
    }
}

impl RectifyConfig {
    /// Check the invariants the pipeline assumes.
    ///
    /// # Errors
    ///
    /// Returns [`StavescanError::InvalidConfig`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.blur_sigma <= 0.0 {
            return Err(StavescanError::InvalidConfig(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        if self.canny_low <= 0.0 || self.canny_high <= 0.0 {
            return Err(StavescanError::InvalidConfig(format!(
                "canny thresholds must be positive, got {}/{}",
                self.canny_low, self.canny_high
            )));
        }
        if self.canny_low > self.canny_high {
            return Err(StavescanError::InvalidConfig(format!(
                "canny_low ({}) exceeds canny_high ({})",
                self.canny_low, self.canny_high
            )));
        }
        if self.approx_epsilon_ratio <= 0.0 {
            return Err(StavescanError::InvalidConfig(format!(
                "approx_epsilon_ratio must be positive, got {}",
                self.approx_epsilon_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.min_quad_area_ratio) {
            return Err(StavescanError::InvalidConfig(format!(
                "min_quad_area_ratio must be within [0, 1], got {}",
                self.min_quad_area_ratio
            )));
        }
        if self.threshold_block_size < 3 || self.threshold_block_size % 2 == 0 {
            return Err(StavescanError::InvalidConfig(format!(
                "threshold_block_size must be odd and at least 3, got {}",
                self.threshold_block_size
            )));
        }
        Ok(())
    }
}
