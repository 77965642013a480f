// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for musicians, not engineers.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity levels drive how a frontend presents the message.

use crate::error::StavescanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Passing problem — retrying may succeed.
    Transient,
    /// User must do something (re-take the photo, free disk space).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — wrong format, internal bug.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the caller should auto-retry.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `StavescanError` into a `HumanError` a non-technical user can act on.
pub fn humanize_error(err: &StavescanError) -> HumanError {
    match err {
        // -- Rectification errors --
        StavescanError::InputRead(detail) => HumanError {
            message: "This photo couldn't be opened.".into(),
            suggestion: format!(
                "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StavescanError::Geometry(_) => HumanError {
            message: "We couldn't straighten this photo.".into(),
            suggestion: "The page in the photo is too small or too distorted. Try taking the photo again, holding the camera square above the page.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StavescanError::Write(detail) => HumanError {
            message: "The cleaned-up image couldn't be saved.".into(),
            suggestion: format!(
                "Check that the destination folder exists and your device has free space, then try again. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        StavescanError::InvalidConfig(detail) => HumanError {
            message: "One of the processing settings doesn't make sense.".into(),
            suggestion: format!("Reset the settings to their defaults and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Score collaborator errors --
        StavescanError::Omr(_) => HumanError {
            message: "The notes couldn't be read from this scan.".into(),
            suggestion: "Try scanning again with better lighting, making sure the staves are sharp and fill the frame.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        StavescanError::ScoreConversion(_) => HumanError {
            message: "The score couldn't be converted.".into(),
            suggestion: "The recognised score may contain notation we can't convert yet. Try a simpler page, or export the score as-is.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        StavescanError::Synthesis(_) => HumanError {
            message: "The audio couldn't be generated.".into(),
            suggestion: "Try again. If this keeps happening, a different playback engine may need to be installed.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        StavescanError::BackendUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Music recognition and playback need an engine that isn't installed here.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- I/O and serialization --
        StavescanError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        StavescanError::Serialization(_) => HumanError {
            message: "An internal data problem occurred.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
