// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stavescan — downstream score collaborators.
//
// The rectifier hands a flat page image to this crate's interfaces:
// optical music recognition, score conversion, and audio synthesis.
// Engine bindings live behind traits so the pipeline stays testable
// without any engine installed.

pub mod stub;
pub mod traits;

pub use stub::StubEngines;
pub use traits::{AudioSynthesizer, OmrEngine, ScoreConverter, SynthesizerChain};
