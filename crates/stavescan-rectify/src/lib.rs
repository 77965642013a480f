// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stavescan — page rectification pipeline for photographed sheet music.
//
// The pipeline takes a camera photo of a printed score and produces a
// flat, high-contrast page image: edge detection finds the page boundary,
// a perspective warp straightens it, and adaptive thresholding strips
// lighting gradients so staff lines and noteheads come out crisp.

pub mod binarize;
pub mod contour;
pub mod corners;
pub mod edges;
pub mod pipeline;
pub mod quad;
pub mod warp;

pub use binarize::binarize;
pub use contour::{PageContour, extract_contours};
pub use corners::order_corners;
pub use edges::detect_edges;
pub use pipeline::{PageRectifier, RectifiedPage};
pub use quad::select_quad;
pub use warp::rectify_perspective;
