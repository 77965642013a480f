// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction stage — closed boundaries traced from the edge map,
// ranked by enclosed area.

use image::GrayImage;
use imageproc::contours::find_contours;
use stavescan_core::Point;
use tracing::{debug, instrument};

/// A closed boundary traced from the edge map, with its enclosed area
/// precomputed so candidates can be ranked without re-walking the points.
#[derive(Debug, Clone)]
pub struct PageContour {
    /// Boundary points in traversal order.
    pub points: Vec<Point>,
    /// Enclosed area via the shoelace formula.
    pub area: f64,
}

impl PageContour {
    /// Perimeter of the closed boundary, including the closing segment.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| f64::from(self.points[i].distance(self.points[(i + 1) % n])))
            .sum()
    }
}

/// Trace all closed contours in a binary edge map and rank them by
/// enclosed area, largest first.
///
/// Topology is deliberately flat: outer borders and hole borders are
/// treated alike, since only the area ranking matters for finding the
/// page boundary. Contours with fewer than three points enclose nothing
/// and are dropped.
#[instrument(skip(edges), fields(width = edges.width(), height = edges.height()))]
pub fn extract_contours(edges: &GrayImage) -> Vec<PageContour> {
    let raw = find_contours::<i32>(edges);

    let mut contours: Vec<PageContour> = raw
        .into_iter()
        .filter(|c| c.points.len() >= 3)
        .map(|c| {
            let points: Vec<Point> = c
                .points
                .iter()
                .map(|p| Point::new(p.x as f32, p.y as f32))
                .collect();
            let area = shoelace_area(&points);
            PageContour { points, area }
        })
        .collect();

    // Largest enclosed area first. Area is always finite and non-negative
    // here, so the comparison cannot observe NaN.
    contours.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));

    debug!(contour_count = contours.len(), "Contours extracted and ranked");
    contours
}

/// Area of a closed polygon via the shoelace formula.
pub(crate) fn shoelace_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += f64::from(points[i].x) * f64::from(points[j].y);
        area -= f64::from(points[j].x) * f64::from(points[i].y);
    }
    area.abs() / 2.0
}
