//! Short-time energy and its derivatives
//!
//! Energy is computed over a sliding, stride-1 Hamming-weighted window (as
//! opposed to the non-overlapping stride of framing). The derivative
//! variants difference the energy (or its log) and run the squared
//! differences through the same windowed-average procedure.

use crate::buffer::window::hamming;
use crate::error::ExtractionError;

/// Conventional window size for the energy functions
pub const DEFAULT_ENERGY_WINDOW: usize = 256;

/// Short-time energy over a sliding window
///
/// For each output index i:
/// `e[i] = (1/W) * sum_j data[i+j]^2 * hamming[j]` over `[i, i+W)`.
/// Output length is `data.len() - window_size`.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `window_size` is zero or the
/// input is not longer than the window.
pub fn energy(samples: &[f32], window_size: usize) -> Result<Vec<f32>, ExtractionError> {
    windowed_square_average(samples, window_size)
}

/// Windowed derivative of the short-time energy
///
/// First-differences [`energy`], then applies the same sliding
/// windowed-average procedure to the squared differences.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if either pass has too little
/// data for the window.
pub fn d_energy(samples: &[f32], window_size: usize) -> Result<Vec<f32>, ExtractionError> {
    let e = energy(samples, window_size)?;
    let diff: Vec<f32> = e.windows(2).map(|pair| pair[1] - pair[0]).collect();
    windowed_square_average(&diff, window_size)
}

/// Windowed derivative of the log of the short-time energy
///
/// Same as [`d_energy`] but differences `ln(energy)` instead of the raw
/// energy.
///
/// # Errors
///
/// Returns `ExtractionError::SilentInput` if any energy value is zero or
/// negative (the log would be non-finite), and
/// `ExtractionError::InvalidInput` on shape errors.
pub fn d_log_energy(samples: &[f32], window_size: usize) -> Result<Vec<f32>, ExtractionError> {
    let e = energy(samples, window_size)?;

    let mut log_e = Vec::with_capacity(e.len());
    for &v in &e {
        if v <= 0.0 {
            return Err(ExtractionError::SilentInput(
                "Log energy is undefined over silent regions".to_string(),
            ));
        }
        log_e.push(v.ln());
    }

    let diff: Vec<f32> = log_e.windows(2).map(|pair| pair[1] - pair[0]).collect();
    windowed_square_average(&diff, window_size)
}

/// Hamming-weighted average of squared values over a sliding stride-1 window
fn windowed_square_average(
    data: &[f32],
    window_size: usize,
) -> Result<Vec<f32>, ExtractionError> {
    if window_size == 0 {
        return Err(ExtractionError::InvalidInput(
            "Window size must be > 0".to_string(),
        ));
    }
    if data.len() <= window_size {
        return Err(ExtractionError::InvalidInput(format!(
            "Input length ({}) must exceed the window size ({})",
            data.len(),
            window_size
        )));
    }

    let weights = hamming(window_size);
    let squared: Vec<f32> = data.iter().map(|&x| x * x).collect();

    let n = data.len() - window_size;
    log::debug!(
        "Windowed energy: {} values from {} samples (window {})",
        n,
        data.len(),
        window_size
    );

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let weighted: f32 = squared[i..i + window_size]
            .iter()
            .zip(weights.iter())
            .map(|(&p, &w)| p * w)
            .sum();
        out.push(weighted / window_size as f32);
    }

    Ok(out)
}
