// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering stage — assigning the TL/TR/BR/BL labels that the
// perspective warp depends on.

use stavescan_core::{Corners, Quad};
use tracing::{debug, instrument};

/// Assign corner labels to the four vertices of a page boundary.
///
/// Labels follow the coordinate-sum heuristic: with `s = x + y` and
/// `d = y - x`, the top-left corner minimises `s`, the bottom-right
/// maximises `s`, the top-right minimises `d`, and the bottom-left
/// maximises `d`.
///
/// Ties are broken deterministically by index order: each extreme is the
/// first vertex attaining it, found by strict comparison while scanning
/// the vertices in their stored order. When the four winning indices are
/// not distinct (a degenerate quad, e.g. one rotated exactly 45 degrees
/// or with coincident vertices) no labelling is meaningful and `None` is
/// returned; the caller decides how to recover.
#[instrument(skip(quad))]
pub fn order_corners(quad: &Quad) -> Option<Corners> {
    let points = quad.points();

    let mut tl = 0usize;
    let mut br = 0usize;
    let mut tr = 0usize;
    let mut bl = 0usize;

    for (i, p) in points.iter().enumerate() {
        let s = p.x + p.y;
        let d = p.y - p.x;
        if s < points[tl].x + points[tl].y {
            tl = i;
        }
        if s > points[br].x + points[br].y {
            br = i;
        }
        if d < points[tr].y - points[tr].x {
            tr = i;
        }
        if d > points[bl].y - points[bl].x {
            bl = i;
        }
    }

    let mut seen = [tl, br, tr, bl];
    seen.sort_unstable();
    if seen.windows(2).any(|w| w[0] == w[1]) {
        debug!(?tl, ?br, ?tr, ?bl, "Corner labels collide; quad is degenerate");
        return None;
    }

    Some(Corners {
        top_left: points[tl],
        top_right: points[tr],
        bottom_right: points[br],
        bottom_left: points[bl],
    })
}
