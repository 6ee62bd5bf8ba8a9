//! # Tessitura
//!
//! A music-information-retrieval feature-extraction library: time-domain
//! framing, spectral transforms, onset detection, spectral shape features,
//! mel-frequency cepstral coefficients, and chroma/chord matching.
//!
//! Callers load audio (or bring their own samples), frame it, transform
//! frames into spectra, and request derived quantities:
//!
//! ```text
//! samples -> SampleBuffer -> frames -> SpectrumBuffer -> { spectral, mfcc, pitch }
//! ```
//!
//! Onset detection works on the sample buffer directly (energy path) or on
//! the per-frame spectra (flux path), and the resulting indices can re-slice
//! the buffer into event-aligned segments.
//!
//! ## Quick start
//!
//! ```
//! use tessitura::{SampleBuffer, features::onset, transform};
//!
//! // One second of a 440 Hz tone with a silent lead-in
//! let samples: Vec<f32> = (0..44100)
//!     .map(|i| {
//!         if i < 22050 {
//!             0.0
//!         } else {
//!             (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5
//!         }
//!     })
//!     .collect();
//! let buffer = SampleBuffer::new(samples, 44100)?;
//!
//! let onsets = onset::onsets_by_energy(&buffer, 512)?;
//! assert!(!onsets.is_empty());
//!
//! let spectrum = transform::forward_fft(&buffer)?;
//! assert_eq!(spectrum.len(), 22051);
//! # Ok::<(), tessitura::ExtractionError>(())
//! ```
//!
//! The core is purely computational and single-threaded: every operation is
//! a deterministic, synchronous function over buffers already in memory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod transform;

pub use buffer::{SampleBuffer, SampleFormat, SpectrumBuffer};
pub use config::OnsetConfig;
pub use error::ExtractionError;
pub use features::onset::{detect_onsets, OnsetMethod};
pub use features::pitch::ChordMatch;
