//! Frequency-domain spectrum buffer
//!
//! `SpectrumBuffer` holds one frame's complex frequency-domain coefficients
//! together with the sample rate of the time-domain signal it was computed
//! from; the sample rate is what converts a bin index into Hz. Spectra are
//! produced by the transform layer and never mutated afterwards.

use rustfft::num_complex::Complex;

use crate::error::ExtractionError;

/// Complex frequency-domain coefficients with their originating sample rate
#[derive(Debug, Clone)]
pub struct SpectrumBuffer {
    bins: Vec<Complex<f32>>,
    sample_rate: u32,
}

impl SpectrumBuffer {
    /// Create a spectrum from complex bins and the source sample rate
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if `bins` is empty or
    /// `sample_rate` is zero.
    pub fn new(bins: Vec<Complex<f32>>, sample_rate: u32) -> Result<Self, ExtractionError> {
        if bins.is_empty() {
            return Err(ExtractionError::InvalidInput(
                "Spectrum must have at least one bin".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(ExtractionError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        Ok(Self { bins, sample_rate })
    }

    /// Create a spectrum from real-valued coefficients (imaginary parts zero)
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if `values` is empty or
    /// `sample_rate` is zero.
    pub fn from_real(values: Vec<f32>, sample_rate: u32) -> Result<Self, ExtractionError> {
        Self::new(
            values.into_iter().map(|v| Complex::new(v, 0.0)).collect(),
            sample_rate,
        )
    }

    /// The complex bins
    pub fn bins(&self) -> &[Complex<f32>] {
        &self.bins
    }

    /// Sample rate of the originating time-domain signal, in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the spectrum holds no bins (never true for transform output)
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Center frequency of bin `i` in Hz: `i * (rate / 2) / len`
    pub fn bin_frequency(&self, i: usize) -> f32 {
        i as f32 * (self.sample_rate as f32 / 2.0) / self.bins.len() as f32
    }

    /// Magnitude of bin `i`
    pub fn magnitude(&self, i: usize) -> f32 {
        self.bins[i].norm()
    }

    /// Magnitudes of all bins
    pub fn magnitudes(&self) -> Vec<f32> {
        self.bins.iter().map(|b| b.norm()).collect()
    }
}
