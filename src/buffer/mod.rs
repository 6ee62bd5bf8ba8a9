//! Data model: sample buffers, spectrum buffers and window functions
//!
//! The buffer types carry their metadata (sample rate, channel count, format
//! tag) explicitly; every slicing or transform operation returns a new value
//! with the metadata copied forward.

pub mod sample;
pub mod spectrum;
pub mod window;

pub use sample::{SampleBuffer, SampleFormat};
pub use spectrum::SpectrumBuffer;
pub use window::{hamming, hann, WindowFn};
