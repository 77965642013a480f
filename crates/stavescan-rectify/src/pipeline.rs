// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The end-to-end rectification pipeline: photo in, flat binarized page
// and a run report out.

use chrono::Utc;
use image::{DynamicImage, GrayImage, ImageFormat};
use sha2::{Digest, Sha256};
use stavescan_core::{
    Corners, Quad, RectifyConfig, RectifyReport, Result, ScanId, StavescanError,
};
use tracing::{info, instrument, warn};

use crate::binarize::binarize;
use crate::contour::extract_contours;
use crate::corners::order_corners;
use crate::edges::detect_edges;
use crate::quad::select_quad;
use crate::warp::rectify_perspective;

/// Rectifies a photographed sheet-music page.
///
/// Holds the source photo and the pipeline configuration; [`rectify`]
/// runs the whole chain. The rectifier keeps no state between runs and
/// no global path configuration: inputs and outputs are always passed
/// explicitly.
///
/// ```ignore
/// let page = PageRectifier::open("photo.jpg")?.rectify()?;
/// page.save("scanned_output.png")?;
/// ```
///
/// [`rectify`]: PageRectifier::rectify
#[derive(Debug)]
pub struct PageRectifier {
    /// The source photo (kept as `DynamicImage` for flexibility).
    image: DynamicImage,
    /// Pipeline tuning parameters.
    config: RectifyConfig,
    /// SHA-256 of the encoded input, when it arrived as bytes.
    source_digest: Option<String>,
}

impl PageRectifier {
    // -- Construction ---------------------------------------------------------

    /// Create a rectifier from raw encoded bytes (JPEG, PNG, TIFF, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(StavescanError::InputRead("input is empty".into()));
        }
        let image = image::load_from_memory(data).map_err(|err| {
            StavescanError::InputRead(format!("failed to decode page photo: {err}"))
        })?;
        let digest = hex::encode(Sha256::digest(data));
        info!(
            width = image.width(),
            height = image.height(),
            digest = %digest,
            "Page photo decoded"
        );
        Ok(Self {
            image,
            config: RectifyConfig::default(),
            source_digest: Some(digest),
        })
    }

    /// Create a rectifier from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref()).map_err(|err| {
            StavescanError::InputRead(format!(
                "failed to read {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_bytes(&data)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image,
            config: RectifyConfig::default(),
            source_digest: None,
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: RectifyConfig) -> Self {
        self.config = config;
        self
    }

    // -- Pipeline -------------------------------------------------------------

    /// Run the full rectification chain:
    ///
    /// 1. Grayscale conversion, Gaussian blur, Canny edge detection
    /// 2. Contour extraction, ranked by enclosed area
    /// 3. Page boundary selection with full-frame fallback
    /// 4. Corner labelling (TL/TR/BR/BL)
    /// 5. Perspective warp onto an axis-aligned page
    /// 6. Adaptive binarization
    ///
    /// # Errors
    ///
    /// Returns [`StavescanError::InvalidConfig`] when the configuration is
    /// inconsistent and [`StavescanError::Geometry`] when the page
    /// dimensions degenerate. A missing page boundary is not an error;
    /// the full frame is rectified instead and the report says so.
    #[instrument(skip(self))]
    pub fn rectify(&self) -> Result<RectifiedPage> {
        self.config.validate()?;

        let (source_width, source_height) = (self.image.width(), self.image.height());

        // Boundary detection needs room for a blur kernel and an interior;
        // below that the full frame is the only sensible boundary.
        let (boundary, mut used_fallback) = if source_width < 3 || source_height < 3 {
            warn!(
                source_width,
                source_height,
                "Image too small for boundary detection; using the full frame"
            );
            (Quad::full_frame(source_width, source_height), true)
        } else {
            let gray = self.image.to_luma8();
            let edge_map = detect_edges(&gray, &self.config);
            let contours = extract_contours(&edge_map);
            select_quad(&contours, source_width, source_height, &self.config)
        };

        let corners = match order_corners(&boundary) {
            Some(c) => c,
            None if !used_fallback => {
                // A detected boundary whose corners cannot be labelled is
                // treated like no boundary at all.
                warn!("Detected boundary has no distinct corner labels; using the full frame");
                used_fallback = true;
                self.full_frame_corners(source_width, source_height)?
            }
            None => self.full_frame_corners(source_width, source_height)?,
        };

        let warped = rectify_perspective(&self.image, &corners)?;
        let (output_width, output_height) = warped.dimensions();

        let warped_gray = DynamicImage::ImageRgb8(warped).to_luma8();
        let page = binarize(
            &warped_gray,
            self.config.threshold_block_size,
            self.config.threshold_offset,
        );

        let report = RectifyReport {
            scan_id: ScanId::new(),
            created_at: Utc::now(),
            source_digest: self.source_digest.clone(),
            source_width,
            source_height,
            output_width,
            output_height,
            corners,
            used_fallback,
        };
        info!(
            scan_id = %report.scan_id,
            output_width,
            output_height,
            used_fallback,
            "Rectification complete"
        );

        Ok(RectifiedPage { page, report })
    }

    fn full_frame_corners(&self, width: u32, height: u32) -> Result<Corners> {
        order_corners(&Quad::full_frame(width, height)).ok_or_else(|| {
            StavescanError::Geometry(format!(
                "frame {width}x{height} has no orderable corners"
            ))
        })
    }
}

/// The output of one rectification run: the flattened, binarized page
/// plus the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct RectifiedPage {
    /// Strictly black-and-white page image.
    pub page: GrayImage,
    /// What happened during the run.
    pub report: RectifyReport,
}

impl RectifiedPage {
    /// Encode the page as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        DynamicImage::ImageLuma8(self.page.clone())
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| StavescanError::Write(format!("PNG encoding failed: {err}")))?;
        Ok(buffer)
    }

    /// Write the page to a file. The format is inferred from the file
    /// extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.page.save(path.as_ref()).map_err(|err| {
            StavescanError::Write(format!(
                "failed to save page to {}: {err}",
                path.as_ref().display()
            ))
        })
    }
}
