//! Transforms between the time and frequency domains
//!
//! Forward/inverse real-input FFT, orthonormal DCT-II/DCT-III, and a naive
//! constant-Q transform. All transforms carry the sample rate of their input
//! through to the output unchanged; no other metadata crosses the transform
//! boundary.

use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;

use crate::buffer::{SampleBuffer, SpectrumBuffer};
use crate::error::ExtractionError;

/// Forward FFT of a real-valued buffer
///
/// Real-input optimization: for N time samples the result holds the
/// N/2 + 1 non-negative-frequency bins. The sample rate is carried onto
/// the spectrum.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the buffer is empty.
pub fn forward_fft(buffer: &SampleBuffer) -> Result<SpectrumBuffer, ExtractionError> {
    if buffer.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "Cannot transform an empty buffer".to_string(),
        ));
    }

    let n = buffer.len();
    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);

    let mut input = buffer.samples().to_vec();
    let mut output = fft.make_output_vec();
    fft.process(&mut input, &mut output)
        .map_err(|e| ExtractionError::NumericalError(format!("FFT failed: {}", e)))?;

    SpectrumBuffer::new(output, buffer.sample_rate())
}

/// Inverse FFT of a spectrum produced by [`forward_fft`]
///
/// Reconstructs `2 * (bins - 1)` time samples from `bins` frequency bins,
/// so the round trip is exact (within float tolerance) for even-length
/// inputs. The sample rate is carried onto the buffer.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the spectrum holds fewer than
/// two bins.
pub fn inverse_fft(spectrum: &SpectrumBuffer) -> Result<SampleBuffer, ExtractionError> {
    let bins = spectrum.len();
    if bins < 2 {
        return Err(ExtractionError::InvalidInput(
            "Inverse FFT needs at least two bins".to_string(),
        ));
    }

    let n = 2 * (bins - 1);
    let mut planner = RealFftPlanner::<f32>::new();
    let ifft = planner.plan_fft_inverse(n);

    let mut input = spectrum.bins().to_vec();
    // A real-signal spectrum has purely real DC and Nyquist bins; force that
    // so numerically dirty inputs cannot poison the inverse.
    input[0].im = 0.0;
    input[bins - 1].im = 0.0;

    let mut output = ifft.make_output_vec();
    ifft.process(&mut input, &mut output)
        .map_err(|e| ExtractionError::NumericalError(format!("Inverse FFT failed: {}", e)))?;

    // realfft leaves the inverse unnormalized
    let scale = 1.0 / n as f32;
    for sample in &mut output {
        *sample *= scale;
    }

    SampleBuffer::new(output, spectrum.sample_rate())
}

/// Forward orthonormal DCT-II of a buffer
///
/// Same length as the input, sample rate carried onto the spectrum (the
/// output coefficients are real; they are stored with zero imaginary parts).
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the buffer is empty.
pub fn forward_dct(buffer: &SampleBuffer) -> Result<SpectrumBuffer, ExtractionError> {
    if buffer.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "Cannot transform an empty buffer".to_string(),
        ));
    }
    SpectrumBuffer::from_real(dct_ii(buffer.samples()), buffer.sample_rate())
}

/// Inverse orthonormal DCT (DCT-III) of a spectrum produced by [`forward_dct`]
///
/// Same length as the input, sample rate carried onto the buffer. Only the
/// real parts of the bins participate.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the spectrum is empty.
pub fn inverse_dct(spectrum: &SpectrumBuffer) -> Result<SampleBuffer, ExtractionError> {
    if spectrum.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "Cannot transform an empty spectrum".to_string(),
        ));
    }
    let coefficients: Vec<f32> = spectrum.bins().iter().map(|b| b.re).collect();
    SampleBuffer::new(dct_iii(&coefficients), spectrum.sample_rate())
}

/// Naive constant-Q transform
///
/// Computes `y[k] = scale(k) * sum_n x[n] * cos(pi * (2n+1) * k / (2N))`
/// with `scale(0) = sqrt(1/N)` and `scale(k>0) = sqrt(2/N)` as an O(N^2)
/// double loop. The formula coincides with the orthonormal DCT-II, but this
/// is an independent code path; callers must not assume bit-identical output
/// to [`forward_dct`].
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the buffer is empty.
pub fn constant_q(buffer: &SampleBuffer) -> Result<Vec<f32>, ExtractionError> {
    if buffer.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "Cannot transform an empty buffer".to_string(),
        ));
    }

    let samples = buffer.samples();
    let n = samples.len();
    let scale_0 = (1.0 / n as f32).sqrt();
    let scale_k = (2.0 / n as f32).sqrt();

    let mut output = vec![0.0f32; n];
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (i, &x) in samples.iter().enumerate() {
            let angle =
                std::f32::consts::PI * ((2 * i + 1) * k) as f32 / (2.0 * n as f32);
            acc += x * angle.cos();
        }
        *out = acc * if k == 0 { scale_0 } else { scale_k };
    }

    Ok(output)
}

/// Orthonormal DCT-II over a real sequence
pub(crate) fn dct_ii(input: &[f32]) -> Vec<f32> {
    let n = input.len();
    let scale_0 = (1.0 / n as f32).sqrt();
    let scale_k = (2.0 / n as f32).sqrt();

    (0..n)
        .map(|k| {
            let sum: f32 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    x * (std::f32::consts::PI * ((2 * i + 1) * k) as f32
                        / (2.0 * n as f32))
                        .cos()
                })
                .sum();
            sum * if k == 0 { scale_0 } else { scale_k }
        })
        .collect()
}

/// Orthonormal DCT-III (the inverse of [`dct_ii`]) over a real sequence
pub(crate) fn dct_iii(input: &[f32]) -> Vec<f32> {
    let n = input.len();
    let scale_0 = (1.0 / n as f32).sqrt();
    let scale_k = (2.0 / n as f32).sqrt();

    (0..n)
        .map(|i| {
            input
                .iter()
                .enumerate()
                .map(|(k, &coeff)| {
                    let scale = if k == 0 { scale_0 } else { scale_k };
                    scale
                        * coeff
                        * (std::f32::consts::PI * ((2 * i + 1) * k) as f32
                            / (2.0 * n as f32))
                            .cos()
                })
                .sum()
        })
        .collect()
}
