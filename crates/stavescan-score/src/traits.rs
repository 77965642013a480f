// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine-agnostic trait definitions for the score pipeline.
//
// Rectified pages flow OMR -> score conversion -> synthesis. Each stage
// is a trait so engines can be swapped or absent; environments without a
// given engine return `StavescanError::BackendUnavailable` from the stub
// implementation.

use stavescan_core::ScoreFormat;
use stavescan_core::error::{Result, StavescanError};
use tracing::{info, warn};

/// Optical music recognition: a rectified page image in, a score out.
pub trait OmrEngine {
    /// Artifact kind produced by [`recognize`](OmrEngine::recognize).
    fn output_format(&self) -> ScoreFormat {
        ScoreFormat::MusicXml
    }

    /// Recognise the music on a binarized page (PNG bytes) and return the
    /// score as MusicXML bytes.
    fn recognize(&self, page_png: &[u8]) -> Result<Vec<u8>>;
}

/// Convert recognised scores between notation and playback formats.
pub trait ScoreConverter {
    /// Artifact kind produced by [`to_midi`](ScoreConverter::to_midi).
    fn output_format(&self) -> ScoreFormat {
        ScoreFormat::Midi
    }

    /// Convert a MusicXML score to a standard MIDI file.
    fn to_midi(&self, musicxml: &[u8]) -> Result<Vec<u8>>;
}

/// Render a MIDI score to audio.
pub trait AudioSynthesizer {
    /// Engine name used in logs and fallback reporting.
    fn name(&self) -> &str;

    /// Artifact kind produced by [`synthesize`](AudioSynthesizer::synthesize).
    fn output_format(&self) -> ScoreFormat {
        ScoreFormat::Wav
    }

    /// Synthesize WAV audio from a standard MIDI file.
    fn synthesize(&self, midi: &[u8]) -> Result<Vec<u8>>;
}

/// An ordered chain of synthesizers tried until one succeeds.
///
/// Synthesis engines are the flakiest part of the score pipeline (missing
/// soundfonts, absent system packages), so playback is attempted against
/// each registered engine in order. A failure is logged and the next
/// engine is tried; only exhausting the whole chain is an error.
pub struct SynthesizerChain {
    engines: Vec<Box<dyn AudioSynthesizer>>,
}

impl SynthesizerChain {
    pub fn new() -> Self {
        Self { engines: Vec::new() }
    }

    /// Append an engine to the end of the chain.
    pub fn push(mut self, engine: Box<dyn AudioSynthesizer>) -> Self {
        self.engines.push(engine);
        self
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Try each engine in registration order and return the first
    /// successful rendering.
    ///
    /// # Errors
    ///
    /// Returns [`StavescanError::BackendUnavailable`] when the chain is
    /// empty and [`StavescanError::Synthesis`] when every engine fails.
    pub fn synthesize(&self, midi: &[u8]) -> Result<Vec<u8>> {
        if self.engines.is_empty() {
            return Err(StavescanError::BackendUnavailable);
        }

        let mut failures = Vec::new();
        for engine in &self.engines {
            match engine.synthesize(midi) {
                Ok(wav) => {
                    info!(
                        engine = engine.name(),
                        format = engine.output_format().extension(),
                        "Audio synthesis succeeded"
                    );
                    return Ok(wav);
                }
                Err(err) => {
                    warn!(engine = engine.name(), %err, "Synthesizer failed; trying next");
                    failures.push(format!("{}: {err}", engine.name()));
                }
            }
        }

        Err(StavescanError::Synthesis(format!(
            "all synthesizers failed ({})",
            failures.join("; ")
        )))
    }
}

impl Default for SynthesizerChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSynth {
        name: &'static str,
        output: Option<Vec<u8>>,
    }

    impl AudioSynthesizer for FixedSynth {
        fn name(&self) -> &str {
            self.name
        }

        fn synthesize(&self, _midi: &[u8]) -> Result<Vec<u8>> {
            self.output
                .clone()
                .ok_or_else(|| StavescanError::Synthesis(format!("{} broke", self.name)))
        }
    }

    #[test]
    fn empty_chain_reports_no_backend() {
        let chain = SynthesizerChain::new();
        assert!(matches!(
            chain.synthesize(b"MThd"),
            Err(StavescanError::BackendUnavailable)
        ));
    }

    #[test]
    fn first_working_engine_wins() {
        let chain = SynthesizerChain::new()
            .push(Box::new(FixedSynth {
                name: "first",
                output: Some(vec![1]),
            }))
            .push(Box::new(FixedSynth {
                name: "second",
                output: Some(vec![2]),
            }));
        assert_eq!(chain.synthesize(b"MThd").unwrap(), vec![1]);
    }

    #[test]
    fn failure_falls_through_to_next_engine() {
        let chain = SynthesizerChain::new()
            .push(Box::new(FixedSynth {
                name: "broken",
                output: None,
            }))
            .push(Box::new(FixedSynth {
                name: "working",
                output: Some(vec![7]),
            }));
        assert_eq!(chain.synthesize(b"MThd").unwrap(), vec![7]);
    }

    #[test]
    fn exhausted_chain_names_every_failure() {
        let chain = SynthesizerChain::new()
            .push(Box::new(FixedSynth {
                name: "alpha",
                output: None,
            }))
            .push(Box::new(FixedSynth {
                name: "beta",
                output: None,
            }));
        match chain.synthesize(b"MThd") {
            Err(StavescanError::Synthesis(detail)) => {
                assert!(detail.contains("alpha"));
                assert!(detail.contains("beta"));
            }
            other => panic!("expected synthesis failure, got {other:?}"),
        }
    }
}
