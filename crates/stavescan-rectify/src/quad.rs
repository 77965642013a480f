// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page boundary selection — polygon simplification of ranked contours and
// the first-acceptable-quadrilateral scan with full-frame fallback.

use stavescan_core::{Point, Quad, RectifyConfig};
use tracing::{debug, info, instrument, warn};

use crate::contour::PageContour;

/// Scan the ranked contours for the page boundary.
///
/// Each contour is simplified with a tolerance proportional to its
/// perimeter. The first candidate that simplifies to exactly four
/// vertices, is convex, and encloses at least `min_quad_area_ratio` of
/// the image is taken as the page boundary. Candidates failing the
/// convexity or area check are skipped and the scan continues down the
/// ranking.
///
/// When no contour qualifies the entire frame is used instead. The
/// fallback is a designed behaviour, reported through the returned flag
/// and a warning, never an error.
#[instrument(skip(contours), fields(contour_count = contours.len()))]
pub fn select_quad(
    contours: &[PageContour],
    width: u32,
    height: u32,
    config: &RectifyConfig,
) -> (Quad, bool) {
    let min_area = config.min_quad_area_ratio * f64::from(width) * f64::from(height);

    for (rank, contour) in contours.iter().enumerate() {
        let epsilon = config.approx_epsilon_ratio * contour.perimeter();
        let approx = simplify_closed(&contour.points, epsilon);
        if approx.len() != 4 {
            continue;
        }

        let candidate = Quad::new([approx[0], approx[1], approx[2], approx[3]]);
        if !candidate.is_convex() {
            debug!(rank, "Rejecting non-convex quadrilateral candidate");
            continue;
        }
        let area = candidate.area();
        if area < min_area {
            debug!(rank, area, min_area, "Rejecting undersized quadrilateral candidate");
            continue;
        }

        info!(rank, area, "Page boundary selected");
        return (candidate, false);
    }

    warn!(width, height, "No page boundary found; falling back to the full frame");
    (Quad::full_frame(width, height), true)
}

/// Simplify a closed polygon with the Ramer-Douglas-Peucker algorithm.
///
/// The closed ring is split at the point farthest from the first vertex,
/// each open chain is simplified independently, and the halves are
/// rejoined without duplicating the shared endpoints. Points closer than
/// `epsilon` to the chord of their chain are discarded.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 4 {
        return points.to_vec();
    }

    let anchor = points[0];
    let mut split = 0;
    let mut max_dist = 0.0f32;
    for (i, p) in points.iter().enumerate() {
        let d = anchor.distance(*p);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }
    if split == 0 {
        // All points coincide with the anchor.
        return vec![anchor];
    }

    let mut first = rdp(&points[..=split], epsilon);
    let mut second_points: Vec<Point> = points[split..].to_vec();
    second_points.push(anchor);
    let second = rdp(&second_points, epsilon);

    // Both chains contain the split point and the anchor; keep each once.
    first.extend_from_slice(&second[1..second.len() - 1]);
    first
}

/// Ramer-Douglas-Peucker on an open chain. Keeps both endpoints.
///
/// Runs over an explicit work-list of index ranges rather than
/// recursing, so stack depth stays constant however long or noisy the
/// traced contour is.
fn rdp(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut ranges = vec![(0usize, points.len() - 1)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0f64;
        let mut index = start;
        for i in start + 1..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                index = i;
            }
        }

        if max_dist > epsilon {
            keep[index] = true;
            ranges.push((start, index));
            ranges.push((index, end));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

/// Distance from `p` to the line through `a` and `b`. Falls back to the
/// point distance when `a` and `b` coincide.
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return f64::from(a.distance(p));
    }
    ((dy * f64::from(p.x - a.x)) - (dx * f64::from(p.y - a.y))).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::shoelace_area;

    /// Dense point chain tracing the outline of an axis-aligned rectangle.
    fn rect_contour(x0: f32, y0: f32, x1: f32, y1: f32) -> PageContour {
        let mut points = Vec::new();
        let step = 2.0f32;
        let mut x = x0;
        while x < x1 {
            points.push(Point::new(x, y0));
            x += step;
        }
        let mut y = y0;
        while y < y1 {
            points.push(Point::new(x1, y));
            y += step;
        }
        let mut x = x1;
        while x > x0 {
            points.push(Point::new(x, y1));
            x -= step;
        }
        let mut y = y1;
        while y > y0 {
            points.push(Point::new(x0, y));
            y -= step;
        }
        let area = shoelace_area(&points);
        PageContour { points, area }
    }

    #[test]
    fn rectangle_simplifies_to_four_vertices() {
        let contour = rect_contour(50.0, 50.0, 750.0, 550.0);
        let epsilon = 0.02 * contour.perimeter();
        let approx = simplify_closed(&contour.points, epsilon);
        assert_eq!(approx.len(), 4, "got {approx:?}");
    }

    #[test]
    fn selects_page_quad_from_rectangle_contour() {
        let contour = rect_contour(50.0, 50.0, 750.0, 550.0);
        let (quad, fallback) = select_quad(&[contour], 800, 600, &RectifyConfig::default());
        assert!(!fallback);
        assert!(quad.is_convex());
        assert!((quad.area() - 350_000.0).abs() < 5_000.0);
    }

    #[test]
    fn no_contours_falls_back_to_full_frame() {
        let (quad, fallback) = select_quad(&[], 800, 600, &RectifyConfig::default());
        assert!(fallback);
        assert_eq!(quad, Quad::full_frame(800, 600));
    }

    #[test]
    fn undersized_quad_falls_back() {
        // A 40x30 rectangle covers 0.25% of an 800x600 frame, well under
        // the 10% floor.
        let contour = rect_contour(100.0, 100.0, 140.0, 130.0);
        let (quad, fallback) = select_quad(&[contour], 800, 600, &RectifyConfig::default());
        assert!(fallback);
        assert_eq!(quad, Quad::full_frame(800, 600));
    }

    #[test]
    fn non_quad_contour_falls_back() {
        // A triangle never simplifies to four vertices.
        let points = vec![
            Point::new(100.0, 100.0),
            Point::new(700.0, 100.0),
            Point::new(400.0, 500.0),
        ];
        let area = shoelace_area(&points);
        let contour = PageContour { points, area };
        let (_, fallback) = select_quad(&[contour], 800, 600, &RectifyConfig::default());
        assert!(fallback);
    }

    #[test]
    fn rejected_candidate_does_not_stop_the_scan() {
        // The top-ranked contour is a triangle and never simplifies to four
        // vertices; the scan must continue to the rectangle below it.
        let triangle = PageContour {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(790.0, 0.0),
                Point::new(400.0, 590.0),
            ],
            area: shoelace_area(&[
                Point::new(0.0, 0.0),
                Point::new(790.0, 0.0),
                Point::new(400.0, 590.0),
            ]),
        };
        let page = rect_contour(100.0, 100.0, 700.0, 500.0);

        let (quad, fallback) =
            select_quad(&[triangle, page], 800, 600, &RectifyConfig::default());
        assert!(!fallback);
        assert!((quad.area() - 600.0 * 400.0).abs() < 10_000.0);
    }

    #[test]
    fn long_jittered_chain_collapses_to_endpoints() {
        // Thousands of points wobbling below the tolerance reduce to the
        // chord, however long the chain is.
        let points: Vec<Point> = (0..5_000)
            .map(|i| {
                let jitter = if i % 2 == 0 { 0.2 } else { -0.2 };
                Point::new(i as f32, jitter)
            })
            .collect();
        let simplified = rdp(&points, 1.0);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0], points[0]);
        assert_eq!(simplified[1], points[4_999]);
    }

    #[test]
    fn long_sawtooth_chain_keeps_every_tooth() {
        // Every vertex deviates beyond the tolerance, so the work-list
        // splits once per point; this must finish without exhausting the
        // stack regardless of chain length.
        let points: Vec<Point> = (0..5_000)
            .map(|i| Point::new(i as f32, if i % 2 == 0 { 0.0 } else { 5.0 }))
            .collect();
        let simplified = rdp(&points, 1.0);
        assert_eq!(simplified.len(), points.len());
    }

    #[test]
    fn simplify_keeps_small_polygons_untouched() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(simplify_closed(&square, 1.0), square);
    }
}
