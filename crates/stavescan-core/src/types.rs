// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Stavescan page rectifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one rectification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub Uuid);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 2-D point in image coordinates (pixels from the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Four vertices of a candidate page boundary, in traversal order but with
/// no fixed starting corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    pub const fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    /// The quad covering the entire `width` × `height` frame, used as the
    /// fallback when no page boundary is detected.
    pub fn full_frame(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self([
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ])
    }

    pub const fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Enclosed area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let mut area = 0.0f64;
        for i in 0..4 {
            let j = (i + 1) % 4;
            area += f64::from(self.0[i].x) * f64::from(self.0[j].y);
            area -= f64::from(self.0[j].x) * f64::from(self.0[i].y);
        }
        area.abs() / 2.0
    }

    /// Whether the four vertices form a strictly convex quadrilateral.
    ///
    /// The cross product of each pair of consecutive edges must carry the
    /// same sign; a zero cross product (collinear vertices) is treated as
    /// non-convex.
    pub fn is_convex(&self) -> bool {
        let mut sign = 0.0f64;
        for i in 0..4 {
            let a = self.0[i];
            let b = self.0[(i + 1) % 4];
            let c = self.0[(i + 2) % 4];
            let cross = f64::from(b.x - a.x) * f64::from(c.y - b.y)
                - f64::from(b.y - a.y) * f64::from(c.x - b.x);
            if cross == 0.0 {
                return false;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// The four corners of a page boundary with fixed labels. Once
/// constructed the ordering never changes for the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Corners {
    /// Corners in TL, TR, BR, BL order.
    pub const fn as_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Supported input raster encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    Png,
    Jpeg,
    Tiff,
}

impl PageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// Artifact kinds produced by the downstream score collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFormat {
    MusicXml,
    Midi,
    Wav,
}

impl ScoreFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::MusicXml => "application/vnd.recordare.musicxml+xml",
            Self::Midi => "audio/midi",
            Self::Wav => "audio/wav",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::MusicXml => "musicxml",
            Self::Midi => "mid",
            Self::Wav => "wav",
        }
    }
}

/// Observability record for one rectification run.
///
/// The pipeline itself keeps no state between invocations; this report is
/// the only artifact besides the output raster, and it exists so callers
/// can log fallback engagement and trace a scan end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectifyReport {
    pub scan_id: ScanId,
    pub created_at: DateTime<Utc>,
    /// SHA-256 hex digest of the input bytes, when the input arrived as
    /// encoded bytes rather than a decoded raster.
    pub source_digest: Option<String>,
    pub source_width: u32,
    pub source_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    /// The page boundary the warp was computed from.
    pub corners: Corners,
    /// True when no page boundary was detected and the full frame was
    /// rectified instead. A designed behaviour, not a failure.
    pub used_fallback: bool,
}
