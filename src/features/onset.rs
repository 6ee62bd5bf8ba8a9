//! Onset detection
//!
//! Two detection paths over a shared peak picker:
//! - energy: windowed energy derivative of the raw samples
//! - flux: rectified spectral flux over per-frame spectra
//!
//! The peak picker compares windowed maxima against the global average of
//! the detection curve and reports indices in discovery order; the detector
//! entry points sort their results ascending before returning them.

use crate::buffer::SampleBuffer;
use crate::config::OnsetConfig;
use crate::error::ExtractionError;
use crate::features::energy::d_energy;
use crate::features::flux::spectral_flux;
use crate::transform::forward_fft;

/// Peak-picking window over the energy derivative
pub const ENERGY_PEAK_WINDOW: usize = 2048;

/// Peak-picking window over the spectral-flux curve
pub const FLUX_PEAK_WINDOW: usize = 10;

/// Onset detection method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnsetMethod {
    /// Time-domain energy derivative
    Energy,
    /// Rectified spectral flux over framed spectra
    Flux,
}

/// Find peaks above the global average of a detection curve
///
/// Computes the average of the whole sequence, then scans it with a window
/// advancing by half its size. For each window position the position of the
/// window's maximum is appended (in discovery order) when the maximum
/// exceeds the global average and the absolute index has not been recorded
/// yet; the 50% overlap means the same peak can be examined twice, hence the
/// de-duplication. Deterministic for a fixed input.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `window_size` is less than 2
/// (the half-window slide would not advance).
pub fn peaks_above_average(
    data: &[f32],
    window_size: usize,
) -> Result<Vec<usize>, ExtractionError> {
    if window_size < 2 {
        return Err(ExtractionError::InvalidInput(
            "Peak window must be >= 2".to_string(),
        ));
    }
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let average = data.iter().sum::<f32>() / data.len() as f32;
    let slide = window_size / 2;

    let mut peaks: Vec<usize> = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let end = (start + window_size).min(data.len());

        // First occurrence of the window maximum
        let mut max_pos = 0;
        let mut max_val = data[start];
        for (i, &v) in data[start..end].iter().enumerate() {
            if v > max_val {
                max_val = v;
                max_pos = i;
            }
        }

        let index = start + max_pos;
        if max_val > average && !peaks.contains(&index) {
            peaks.push(index);
        }

        start += slide;
    }

    Ok(peaks)
}

/// Detect onsets from the windowed energy derivative
///
/// Computes [`d_energy`] with the given frame size as its window, then
/// peak-picks with a window of [`ENERGY_PEAK_WINDOW`]. Returns onset sample
/// indices sorted ascending, all within `[0, buffer.len())`.
///
/// # Errors
///
/// Propagates shape errors from the energy pass (the buffer must be longer
/// than twice the frame size plus one).
pub fn onsets_by_energy(
    buffer: &SampleBuffer,
    frame_size: usize,
) -> Result<Vec<usize>, ExtractionError> {
    onsets_by_energy_with(buffer, frame_size, ENERGY_PEAK_WINDOW)
}

fn onsets_by_energy_with(
    buffer: &SampleBuffer,
    frame_size: usize,
    peak_window: usize,
) -> Result<Vec<usize>, ExtractionError> {
    let detection = d_energy(buffer.samples(), frame_size)?;
    let mut onsets = peaks_above_average(&detection, peak_window)?;
    onsets.sort_unstable();

    log::debug!(
        "Energy onset detection: {} onsets from {} samples (frame {})",
        onsets.len(),
        buffer.len(),
        frame_size
    );
    Ok(onsets)
}

/// Detect onsets from rectified spectral flux
///
/// Frames the buffer without a window, computes the spectrum of every frame,
/// runs rectified [`spectral_flux`], peak-picks with a window of
/// [`FLUX_PEAK_WINDOW`], and scales every peak index by `frame_size` to map
/// back into the sample domain. Scaled indices past the end of the buffer
/// are dropped so every returned index lies within `[0, buffer.len())`;
/// results are sorted ascending.
///
/// # Errors
///
/// Propagates framing, transform and flux errors.
pub fn onsets_by_flux(
    buffer: &SampleBuffer,
    frame_size: usize,
) -> Result<Vec<usize>, ExtractionError> {
    onsets_by_flux_with(buffer, frame_size, FLUX_PEAK_WINDOW)
}

fn onsets_by_flux_with(
    buffer: &SampleBuffer,
    frame_size: usize,
    peak_window: usize,
) -> Result<Vec<usize>, ExtractionError> {
    let frames = buffer.frames(frame_size, None)?;

    let spectra = frames
        .iter()
        .map(forward_fft)
        .collect::<Result<Vec<_>, _>>()?;

    let flux = spectral_flux(&spectra, true)?;
    let peaks = peaks_above_average(&flux, peak_window)?;

    let mut onsets: Vec<usize> = peaks
        .iter()
        .map(|&p| p * frame_size)
        .filter(|&sample| sample < buffer.len())
        .collect();
    onsets.sort_unstable();

    log::debug!(
        "Flux onset detection: {} onsets from {} frames of {}",
        onsets.len(),
        frames.len(),
        frame_size
    );
    Ok(onsets)
}

/// Detect onsets with the given method and configuration
///
/// Convenience dispatcher over [`onsets_by_energy`] and [`onsets_by_flux`]
/// using the frame sizes and peak windows from `config`.
///
/// # Errors
///
/// Propagates the selected detector's errors.
pub fn detect_onsets(
    buffer: &SampleBuffer,
    method: OnsetMethod,
    config: &OnsetConfig,
) -> Result<Vec<usize>, ExtractionError> {
    match method {
        OnsetMethod::Energy => {
            onsets_by_energy_with(buffer, config.energy_frame_size, config.energy_peak_window)
        }
        OnsetMethod::Flux => {
            onsets_by_flux_with(buffer, config.flux_frame_size, config.flux_peak_window)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4-on-floor kick pattern: exponential-decay bursts at the beat interval
    fn kick_pattern(duration_seconds: f32, bpm: f32, sample_rate: f32) -> Vec<f32> {
        let num_samples = (duration_seconds * sample_rate) as usize;
        let mut samples = vec![0.0f32; num_samples];

        let beat_interval = (60.0 / bpm * sample_rate) as usize;
        let kick_samples = (0.1 * sample_rate) as usize;

        let mut pos = 0;
        while pos < num_samples {
            for i in 0..kick_samples.min(num_samples - pos) {
                let t = i as f32 / kick_samples as f32;
                samples[pos + i] = (-t * 5.0).exp() * 0.8;
            }
            pos += beat_interval;
        }

        samples
    }

    #[test]
    fn test_peaks_above_average_basic() {
        let mut data = vec![0.1f32; 64];
        data[20] = 5.0;
        data[45] = 3.0;

        let peaks = peaks_above_average(&data, 16).unwrap();
        assert!(peaks.contains(&20));
        assert!(peaks.contains(&45));
    }

    #[test]
    fn test_peaks_deterministic() {
        let data: Vec<f32> = (0..500).map(|i| ((i * 37) % 91) as f32 / 91.0).collect();
        let first = peaks_above_average(&data, 32).unwrap();
        let second = peaks_above_average(&data, 32).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_peaks_deduplicated_across_overlap() {
        // A single dominant peak is seen by two overlapping windows but
        // recorded once
        let mut data = vec![0.0f32; 32];
        data[10] = 1.0;
        let peaks = peaks_above_average(&data, 16).unwrap();
        assert_eq!(peaks, vec![10]);
    }

    #[test]
    fn test_peaks_flat_data_yields_none() {
        // max == average everywhere, never strictly above
        let data = vec![0.5f32; 128];
        let peaks = peaks_above_average(&data, 16).unwrap();
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_peaks_tiny_window_rejected() {
        assert!(peaks_above_average(&[1.0, 2.0], 1).is_err());
        assert!(peaks_above_average(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_peaks_empty_data() {
        assert!(peaks_above_average(&[], 16).unwrap().is_empty());
    }

    #[test]
    fn test_onsets_by_energy_kick_pattern() {
        let samples = kick_pattern(4.0, 120.0, 44100.0);
        let len = samples.len();
        let buffer = SampleBuffer::new(samples, 44100).unwrap();

        let onsets = onsets_by_energy(&buffer, 512).unwrap();
        assert!(!onsets.is_empty(), "kick pattern should produce onsets");
        assert!(onsets.windows(2).all(|w| w[0] < w[1]), "sorted ascending");
        assert!(onsets.iter().all(|&o| o < len), "indices in bounds");
    }

    #[test]
    fn test_onsets_by_energy_too_short_fails() {
        let buffer = SampleBuffer::new(vec![0.5; 600], 44100).unwrap();
        assert!(onsets_by_energy(&buffer, 512).is_err());
    }

    #[test]
    fn test_onsets_by_flux_bounds_and_order() {
        let samples = kick_pattern(4.0, 120.0, 44100.0);
        let len = samples.len();
        let buffer = SampleBuffer::new(samples, 44100).unwrap();

        let onsets = onsets_by_flux(&buffer, 1024).unwrap();
        assert!(onsets.iter().all(|&o| o < len), "indices in bounds");
        assert!(onsets.windows(2).all(|w| w[0] < w[1]), "sorted ascending");
    }

    #[test]
    fn test_detect_onsets_dispatch() {
        let samples = kick_pattern(4.0, 120.0, 44100.0);
        let buffer = SampleBuffer::new(samples, 44100).unwrap();
        let config = OnsetConfig::default();

        let by_energy = detect_onsets(&buffer, OnsetMethod::Energy, &config).unwrap();
        assert_eq!(by_energy, onsets_by_energy(&buffer, 512).unwrap());

        let by_flux = detect_onsets(&buffer, OnsetMethod::Flux, &config).unwrap();
        assert_eq!(by_flux, onsets_by_flux(&buffer, 1024).unwrap());
    }
}
