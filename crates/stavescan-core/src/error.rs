// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Stavescan.

use thiserror::Error;

/// Top-level error type for all Stavescan operations.
#[derive(Debug, Error)]
pub enum StavescanError {
    // -- Rectification errors --
    #[error("input image unreadable: {0}")]
    InputRead(String),

    #[error("degenerate page geometry: {0}")]
    Geometry(String),

    #[error("output image could not be written: {0}")]
    Write(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Score collaborator errors --
    #[error("music recognition failed: {0}")]
    Omr(String),

    #[error("score conversion failed: {0}")]
    ScoreConversion(String),

    #[error("audio synthesis failed: {0}")]
    Synthesis(String),

    #[error("no backend available for this operation")]
    BackendUnavailable,

    // -- I/O and serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StavescanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_error_display() {
        let err = StavescanError::Geometry("destination width is 0".into());
        assert_eq!(
            err.to_string(),
            "degenerate page geometry: destination width is 0"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StavescanError = io.into();
        assert!(matches!(err, StavescanError::Io(_)));
    }
}
