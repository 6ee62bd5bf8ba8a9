//! Feature extraction modules
//!
//! - Short-time energy and derivatives
//! - Spectral flux
//! - Onset detection (energy and flux paths over a shared peak picker)
//! - Spectral shape features
//! - Mel-frequency cepstral coefficients
//! - Pitch, chroma and chord matching

pub mod energy;
pub mod flux;
pub mod mfcc;
pub mod onset;
pub mod pitch;
pub mod spectral;
