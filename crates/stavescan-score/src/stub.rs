// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub engines for builds where no OMR or synthesis backend is installed.
//
// Every trait method returns `BackendUnavailable` — real implementations
// bind to external engines (Audiveris, FluidSynth, TiMidity) at the
// application layer.

use stavescan_core::error::{Result, StavescanError};

use crate::traits::{AudioSynthesizer, OmrEngine, ScoreConverter};

/// No-op engine set returned when no backend is configured.
pub struct StubEngines;

impl OmrEngine for StubEngines {
    fn recognize(&self, _page_png: &[u8]) -> Result<Vec<u8>> {
        tracing::warn!("OmrEngine::recognize called on stub engines");
        Err(StavescanError::BackendUnavailable)
    }
}

impl ScoreConverter for StubEngines {
    fn to_midi(&self, _musicxml: &[u8]) -> Result<Vec<u8>> {
        tracing::warn!("ScoreConverter::to_midi called on stub engines");
        Err(StavescanError::BackendUnavailable)
    }
}

impl AudioSynthesizer for StubEngines {
    fn name(&self) -> &str {
        "stub"
    }

    fn synthesize(&self, _midi: &[u8]) -> Result<Vec<u8>> {
        tracing::warn!("AudioSynthesizer::synthesize called on stub engines");
        Err(StavescanError::BackendUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SynthesizerChain;
    use stavescan_core::ScoreFormat;

    #[test]
    fn stub_engines_are_unavailable() {
        let stub = StubEngines;
        assert!(matches!(
            stub.recognize(b"png"),
            Err(StavescanError::BackendUnavailable)
        ));
        assert!(matches!(
            stub.to_midi(b"<score/>"),
            Err(StavescanError::BackendUnavailable)
        ));
        assert!(matches!(
            stub.synthesize(b"MThd"),
            Err(StavescanError::BackendUnavailable)
        ));
    }

    #[test]
    fn stage_artifact_formats() {
        let stub = StubEngines;
        assert_eq!(OmrEngine::output_format(&stub), ScoreFormat::MusicXml);
        assert_eq!(ScoreConverter::output_format(&stub), ScoreFormat::Midi);
        assert_eq!(AudioSynthesizer::output_format(&stub), ScoreFormat::Wav);

        assert_eq!(ScoreFormat::MusicXml.extension(), "musicxml");
        assert_eq!(ScoreFormat::Midi.mime_type(), "audio/midi");
        assert_eq!(ScoreFormat::Wav.extension(), "wav");
    }

    #[test]
    fn chain_of_stubs_exhausts() {
        let chain = SynthesizerChain::new().push(Box::new(StubEngines));
        assert!(matches!(
            chain.synthesize(b"MThd"),
            Err(StavescanError::Synthesis(_))
        ));
    }
}
