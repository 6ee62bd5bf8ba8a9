//! Mel-frequency cepstral coefficients
//!
//! Two computation paths:
//! - [`mfcc`]: direct summation of a single coefficient over a 48-band
//!   triangular mel filterbank with tabulated center frequencies
//! - [`mfcc2`]: the full cepstrum at once, from a geometrically spaced
//!   filterbank followed by a log and an orthonormal DCT-II

use rustfft::num_complex::Complex;

use crate::buffer::SpectrumBuffer;
use crate::error::ExtractionError;
use crate::transform::dct_ii;

/// Default filter count for the direct method
pub const DEFAULT_MFCC_FILTERS: usize = 48;

/// Default filter count for the vectorized method
pub const DEFAULT_MFCC2_FILTERS: usize = 32;

/// The m-th mel-frequency cepstral coefficient, by direct summation
///
/// `result = norm(m) * sum_l log(sum_k |X[k]| * H_l(k)) * cos((m*pi/L) * (l - 0.5))`
/// over filter bands `l` in `[1, num_filters]`, where `H_l` is a triangular
/// filter around the l-th mel center frequency. The inner log is skipped
/// (the band contributes its raw 0) when the accumulated magnitude is not
/// positive.
///
/// Returns the sentinel value `0.0` — not a valid coefficient — when
/// `m >= num_filters`; the reference defines no behavior for that case.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `num_filters` is zero.
pub fn mfcc(
    spectrum: &SpectrumBuffer,
    m: usize,
    num_filters: usize,
) -> Result<f32, ExtractionError> {
    if num_filters == 0 {
        return Err(ExtractionError::InvalidInput(
            "Filter count must be > 0".to_string(),
        ));
    }
    if m >= num_filters {
        return Ok(0.0);
    }

    let bin_count = spectrum.len();
    let sample_rate = spectrum.sample_rate() as f32;

    let mut outer_sum = 0.0f32;
    for filter_band in 1..=num_filters {
        let mut inner_sum = 0.0f32;
        for frequency_band in 0..bin_count.saturating_sub(1) {
            inner_sum += spectrum.magnitude(frequency_band)
                * filter_parameter(bin_count, frequency_band, filter_band, sample_rate);
        }

        if inner_sum > 0.0 {
            inner_sum = inner_sum.ln();
        }

        outer_sum += inner_sum
            * ((m as f32 * std::f32::consts::PI / num_filters as f32)
                * (filter_band as f32 - 0.5))
                .cos();
    }

    Ok(normalization_factor(num_filters, m) * outer_sum)
}

/// Vectorized MFCC: the full cepstrum in one pass
///
/// Builds a filterbank of `num_filters` bands with center frequencies
/// geometrically spaced by `2^(1/6)` starting at 110 Hz, takes the log of
/// each band's output, and applies an orthonormal DCT-II across the bands.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `num_filters` is zero, and
/// `ExtractionError::SilentInput` if any band's output is not positive (its
/// log would be non-finite).
pub fn mfcc2(
    spectrum: &SpectrumBuffer,
    num_filters: usize,
) -> Result<Vec<f32>, ExtractionError> {
    let bands = filterbank(spectrum, num_filters)?;

    let mut log_bands = Vec::with_capacity(bands.len());
    for &band in &bands {
        if band <= 0.0 {
            return Err(ExtractionError::SilentInput(
                "Filterbank output must be positive to take its log".to_string(),
            ));
        }
        log_bands.push(band.ln());
    }

    Ok(dct_ii(&log_bands))
}

/// Filterbank outputs for [`mfcc2`]: band magnitudes at geometrically spaced
/// center frequencies
pub fn filterbank(
    spectrum: &SpectrumBuffer,
    num_filters: usize,
) -> Result<Vec<f32>, ExtractionError> {
    if num_filters == 0 {
        return Err(ExtractionError::InvalidInput(
            "Filter count must be > 0".to_string(),
        ));
    }

    let ratio = 2.0f32.powf(1.0 / 6.0);
    let mut f2 = 110.0f32;
    let mut f1 = f2 / ratio;
    let mut f3 = f2 * ratio;

    log::debug!(
        "Building {}-band filterbank over {} bins at {} Hz",
        num_filters,
        spectrum.len(),
        spectrum.sample_rate()
    );

    let mut bands = Vec::with_capacity(num_filters);
    for _ in 0..num_filters {
        bands.push(band_output(spectrum, f1, f2, f3).norm());
        f1 = f2;
        f2 = f3;
        f3 *= ratio;
    }

    Ok(bands)
}

/// Triangular-ish band accumulation between `f1 < f2 < f3`; bins past the
/// end of the spectrum contribute nothing
fn band_output(spectrum: &SpectrumBuffer, f1: f32, f2: f32, f3: f32) -> Complex<f32> {
    let n = spectrum.len();
    let sample_rate = spectrum.sample_rate() as f32;

    let b1 = (n as f32 * f1 / sample_rate) as usize;
    let b2 = (n as f32 * f2 / sample_rate) as usize;
    let b3 = (n as f32 * f3 / sample_rate) as usize;

    let mut y = if b2 < n {
        spectrum.bins()[b2]
    } else {
        Complex::new(0.0, 0.0)
    };

    for b in b1..b2.min(n) {
        y += spectrum.bins()[b] * ((b - b1) as f32 / (b2 - b1) as f32);
    }
    for b in (b2 + 1)..b3.min(n) {
        y += spectrum.bins()[b] * (1.0 - (b - b2) as f32 / (b3 - b2) as f32);
    }

    y
}

/// `sqrt(1/L)` for the zeroth coefficient, `sqrt(2/L)` otherwise
fn normalization_factor(num_filters: usize, m: usize) -> f32 {
    if m == 0 {
        (1.0 / num_filters as f32).sqrt()
    } else {
        (2.0 / num_filters as f32).sqrt()
    }
}

/// Triangular filter response of band `filter_band` at spectrum bin
/// `frequency_band`
///
/// Zero outside `[fc(l-1), fc(l+1))`, rising linearly up to `fc(l)`, falling
/// linearly after, scaled by the band-dependent magnitude factor.
fn filter_parameter(
    bin_count: usize,
    frequency_band: usize,
    filter_band: usize,
    sample_rate: f32,
) -> f32 {
    let boundary = frequency_band as f32 * sample_rate / bin_count as f32;
    let prev_center = center_frequency(filter_band - 1);
    let this_center = center_frequency(filter_band);
    let next_center = center_frequency(filter_band + 1);

    if boundary >= prev_center && boundary < this_center {
        let rising = (boundary - prev_center) / (this_center - prev_center);
        rising * magnitude_factor(filter_band)
    } else if boundary >= this_center && boundary < next_center {
        let falling = (boundary - next_center) / (this_center - next_center);
        falling * magnitude_factor(filter_band)
    } else {
        0.0
    }
}

/// Band-dependent filter slope scale: 0.015 for the linearly spaced bands,
/// `2 / (fc(l+1) - fc(l-1))` above
fn magnitude_factor(filter_band: usize) -> f32 {
    if (1..=14).contains(&filter_band) {
        0.015
    } else {
        2.0 / (center_frequency(filter_band + 1) - center_frequency(filter_band - 1))
    }
}

/// Mel-scale center frequency of filter band `l`: linear at 200/3 Hz per
/// band up to band 14, geometric with ratio 1.0711703 above
fn center_frequency(filter_band: usize) -> f32 {
    if filter_band == 0 {
        0.0
    } else if filter_band <= 14 {
        200.0 * filter_band as f32 / 3.0
    } else {
        1.0711703f32.powi(filter_band as i32 - 14) * 1073.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broadband_spectrum(len: usize) -> SpectrumBuffer {
        SpectrumBuffer::from_real(vec![1.0f32; len], 44100).unwrap()
    }

    #[test]
    fn test_center_frequencies() {
        assert_eq!(center_frequency(0), 0.0);
        assert!((center_frequency(1) - 200.0 / 3.0).abs() < 1e-3);
        assert!((center_frequency(14) - 2800.0 / 3.0).abs() < 1e-2);
        // First geometric band: 1.0711703^1 * 1073.4
        assert!((center_frequency(15) - 1.0711703 * 1073.4).abs() < 1e-1);
        // Centers increase monotonically
        for l in 1..48 {
            assert!(center_frequency(l + 1) > center_frequency(l));
        }
    }

    #[test]
    fn test_mfcc_sentinel_for_out_of_range_coefficient() {
        let spectrum = broadband_spectrum(1024);
        assert_eq!(mfcc(&spectrum, 48, 48).unwrap(), 0.0);
        assert_eq!(mfcc(&spectrum, 100, 48).unwrap(), 0.0);
    }

    #[test]
    fn test_mfcc_finite_on_broadband_spectrum() {
        let spectrum = broadband_spectrum(2049);
        for m in 0..4 {
            let coeff = mfcc(&spectrum, m, 48).unwrap();
            assert!(coeff.is_finite(), "coefficient {} not finite", m);
        }
    }

    #[test]
    fn test_mfcc_zero_filters_rejected() {
        let spectrum = broadband_spectrum(64);
        assert!(mfcc(&spectrum, 0, 0).is_err());
    }

    #[test]
    fn test_filter_parameter_triangle_shape() {
        // For band 2 the response rises from fc(1) to fc(2) and falls to
        // fc(3); sample a rising-edge and a falling-edge bin
        let n = 2048usize;
        let sr = 44100.0f32;
        let rising_bin = (n as f32 * 100.0 / sr) as usize; // ~100 Hz, between fc(1)=66.7 and fc(2)=133.3
        let falling_bin = (n as f32 * 166.0 / sr) as usize; // between fc(2) and fc(3)=200

        let rising = filter_parameter(n, rising_bin, 2, sr);
        let falling = filter_parameter(n, falling_bin, 2, sr);
        assert!(rising > 0.0);
        assert!(falling > 0.0);

        // Outside the support the response is zero
        let outside_bin = (n as f32 * 400.0 / sr) as usize;
        assert_eq!(filter_parameter(n, outside_bin, 2, sr), 0.0);
    }

    #[test]
    fn test_filterbank_band_count() {
        let spectrum = broadband_spectrum(2049);
        let bands = filterbank(&spectrum, 32).unwrap();
        assert_eq!(bands.len(), 32);
        assert!(bands.iter().all(|&b| b >= 0.0));
    }

    #[test]
    fn test_mfcc2_full_cepstrum() {
        let spectrum = broadband_spectrum(2049);
        let cepstrum = mfcc2(&spectrum, 32).unwrap();
        assert_eq!(cepstrum.len(), 32);
        assert!(cepstrum.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_mfcc2_rejects_silent_spectrum() {
        let silent = SpectrumBuffer::from_real(vec![0.0f32; 2049], 44100).unwrap();
        match mfcc2(&silent, 32) {
            Err(ExtractionError::SilentInput(_)) => {}
            other => panic!("expected SilentInput, got {:?}", other),
        }
    }
}
