//! Time-domain sample buffer and framing
//!
//! `SampleBuffer` is the crate's time-domain value type: a single channel of
//! floating-point samples tagged with its sample rate, channel count and
//! source sample format. Every derived view (frame, onset slice) owns its own
//! backing storage and carries the metadata forward explicitly.

use crate::buffer::window::WindowFn;
use crate::error::ExtractionError;

/// Source sample format tag
///
/// Informational only; all processing happens on normalized `f32` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// 32-bit float samples
    Float32,
    /// 16-bit integer samples
    Int16,
    /// 24-bit integer samples
    Int24,
    /// 32-bit integer samples
    Int32,
}

/// A single channel of audio samples with its metadata
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    format: SampleFormat,
}

impl SampleBuffer {
    /// Create a buffer of float samples at the given sample rate
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if `sample_rate` is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, ExtractionError> {
        Self::with_format(samples, sample_rate, SampleFormat::Float32)
    }

    /// Create a buffer carrying an explicit source-format tag
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if `sample_rate` is zero.
    pub fn with_format(
        samples: Vec<f32>,
        sample_rate: u32,
        format: SampleFormat,
    ) -> Result<Self, ExtractionError> {
        if sample_rate == 0 {
            return Err(ExtractionError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels: 1,
            format,
        })
    }

    /// The samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count (fixed at 1; multi-channel input is reduced on load)
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Source sample format tag
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// New buffer with the given samples and this buffer's metadata
    pub(crate) fn derive(&self, samples: Vec<f32>) -> SampleBuffer {
        SampleBuffer {
            samples,
            sample_rate: self.sample_rate,
            channels: self.channels,
            format: self.format,
        }
    }

    /// Root-mean-squared amplitude
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = self.samples.iter().map(|&x| x * x).sum();
        (sum_sq / self.samples.len() as f32).sqrt()
    }

    /// Zero-crossing rate: sign changes per sample
    pub fn zcr(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let crossings = self
            .samples
            .windows(2)
            .filter(|pair| pair[0] * pair[1] < 0.0)
            .count();
        crossings as f32 / self.samples.len() as f32
    }

    /// Split into consecutive, non-overlapping frames of `frame_size` samples
    ///
    /// The cursor advances by exactly `frame_size` per frame, so the last
    /// frame may be shorter than `frame_size`. Without a window the slices
    /// are returned unmodified (the short tail unpadded). With a window,
    /// every frame is multiplied element-wise by the window's weights, and a
    /// short tail is zero-padded up to `frame_size` first. Metadata is copied
    /// onto every frame.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if `frame_size` is zero.
    pub fn frames(
        &self,
        frame_size: usize,
        window: Option<WindowFn>,
    ) -> Result<Vec<SampleBuffer>, ExtractionError> {
        if frame_size == 0 {
            return Err(ExtractionError::InvalidInput(
                "Frame size must be > 0".to_string(),
            ));
        }

        log::debug!(
            "Framing {} samples into frames of {} ({} window)",
            self.samples.len(),
            frame_size,
            if window.is_some() { "with" } else { "no" }
        );

        let weights = window.map(|w| w(frame_size));

        let mut frames = Vec::with_capacity(self.samples.len().div_ceil(frame_size));
        let mut start = 0;
        while start < self.samples.len() {
            let end = (start + frame_size).min(self.samples.len());
            let mut frame: Vec<f32> = self.samples[start..end].to_vec();

            if let Some(weights) = &weights {
                frame.resize(frame_size, 0.0);
                for (sample, weight) in frame.iter_mut().zip(weights.iter()) {
                    *sample *= *weight;
                }
            }

            frames.push(self.derive(frame));
            start += frame_size;
        }

        Ok(frames)
    }

    /// Slice the buffer at consecutive onset positions
    ///
    /// For M onset indices, returns the M-1 slices between consecutive
    /// onsets; fewer than two onsets yield no slices. Indices are sorted
    /// ascending and clamped to the buffer length before slicing, so the
    /// discovery-ordered output of the peak picker can be passed in
    /// directly.
    pub fn frames_from_onsets(&self, onsets: &[usize]) -> Vec<SampleBuffer> {
        let mut bounds: Vec<usize> = onsets
            .iter()
            .map(|&i| i.min(self.samples.len()))
            .collect();
        bounds.sort_unstable();

        bounds
            .windows(2)
            .map(|pair| self.derive(self.samples[pair[0]..pair[1]].to_vec()))
            .collect()
    }
}
