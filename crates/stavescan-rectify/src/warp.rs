// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification stage — warping the labelled page boundary
// onto an axis-aligned rectangle.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use stavescan_core::{Corners, Result, StavescanError};
use tracing::{debug, info, instrument};

/// Warp the region bounded by `corners` onto a flat, axis-aligned page.
///
/// The output width is the longer of the two horizontal page edges and
/// the output height the longer of the two vertical edges, so the warp
/// never squeezes the page below its largest observed extent. The four
/// source corners map to the output corners `(0,0)`, `(w-1,0)`,
/// `(w-1,h-1)`, `(0,h-1)`; pixels outside the source quad are filled
/// with black.
///
/// # Errors
///
/// Returns [`StavescanError::Geometry`] when either output dimension is
/// zero or the corner geometry admits no projective transform. This is
/// the only hard failure in the rectification pipeline.
#[instrument(skip(image, corners))]
pub fn rectify_perspective(image: &DynamicImage, corners: &Corners) -> Result<RgbImage> {
    let width_bottom = corners.bottom_right.distance(corners.bottom_left);
    let width_top = corners.top_right.distance(corners.top_left);
    let width = width_bottom.max(width_top).round() as u32;

    let height_right = corners.top_right.distance(corners.bottom_right);
    let height_left = corners.top_left.distance(corners.bottom_left);
    let height = height_right.max(height_left).round() as u32;

    if width == 0 || height == 0 {
        return Err(StavescanError::Geometry(format!(
            "computed page dimensions {width}x{height} are degenerate"
        )));
    }
    debug!(width, height, "Output page dimensions computed");

    let src = corners.as_array().map(|p| (p.x, p.y));
    let dest = [
        (0.0, 0.0),
        ((width - 1) as f32, 0.0),
        ((width - 1) as f32, (height - 1) as f32),
        (0.0, (height - 1) as f32),
    ];

    let projection = Projection::from_control_points(src, dest).ok_or_else(|| {
        StavescanError::Geometry(format!(
            "no projective transform exists for corners {corners:?}"
        ))
    })?;

    let rgb = image.to_rgb8();
    let mut output = RgbImage::new(width, height);
    warp_into(
        &rgb,
        &projection,
        Interpolation::Bilinear,
        Rgb([0u8, 0, 0]),
        &mut output,
    );

    info!(width, height, "Perspective warp applied");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use stavescan_core::{Point, Quad};

    use crate::corners::order_corners;

    fn full_frame_corners(width: u32, height: u32) -> Corners {
        order_corners(&Quad::full_frame(width, height)).unwrap()
    }

    #[test]
    fn axis_aligned_warp_preserves_dimensions() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            100,
            80,
            Luma([200u8]),
        ));
        let out = rectify_perspective(&img, &full_frame_corners(100, 80)).unwrap();
        assert_eq!(out.dimensions(), (100, 80));
    }

    #[test]
    fn axis_aligned_warp_preserves_content() {
        // Dark frame with a bright block; after an identity-shaped warp the
        // block must still sit in the same place.
        let mut gray = image::GrayImage::from_pixel(100, 100, Luma([10u8]));
        for y in 40..60 {
            for x in 40..60 {
                gray.put_pixel(x, y, Luma([250u8]));
            }
        }
        let img = DynamicImage::ImageLuma8(gray);
        let out = rectify_perspective(&img, &full_frame_corners(100, 100)).unwrap();

        assert!(out.get_pixel(50, 50).0[0] > 200);
        assert!(out.get_pixel(10, 10).0[0] < 60);
    }

    #[test]
    fn cropping_warp_outputs_quad_extent() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            800,
            600,
            Luma([128u8]),
        ));
        let corners = Corners {
            top_left: Point::new(50.0, 50.0),
            top_right: Point::new(750.0, 50.0),
            bottom_right: Point::new(750.0, 550.0),
            bottom_left: Point::new(50.0, 550.0),
        };
        let out = rectify_perspective(&img, &corners).unwrap();
        assert_eq!(out.dimensions(), (700, 500));
    }

    #[test]
    fn coincident_corners_are_a_geometry_error() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(10, 10, Luma([0u8])));
        let p = Point::new(5.0, 5.0);
        let corners = Corners {
            top_left: p,
            top_right: p,
            bottom_right: p,
            bottom_left: p,
        };
        assert!(matches!(
            rectify_perspective(&img, &corners),
            Err(StavescanError::Geometry(_))
        ));
    }

    #[test]
    fn unit_square_page_is_a_geometry_error() {
        // A 1x1 extent rounds to a single output pixel, which leaves no
        // room for a projective mapping.
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(1, 1, Luma([0u8])));
        let corners = full_frame_corners(1, 1);
        assert!(matches!(
            rectify_perspective(&img, &corners),
            Err(StavescanError::Geometry(_))
        ));
    }
}
