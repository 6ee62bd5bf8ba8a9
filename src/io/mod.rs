//! Audio I/O
//!
//! WAV loading into [`crate::buffer::SampleBuffer`] using hound. Compressed
//! formats, resampling and playback are left to external tooling.

pub mod loader;

pub use loader::load_wav;
