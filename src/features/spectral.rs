//! Spectral shape features
//!
//! Centroid, spread, crest, flatness, rolloff, spectral mean and the
//! standardized moments, all computed over the bin magnitudes of a
//! [`SpectrumBuffer`]. The ratio-based features are undefined on an
//! all-zero spectrum and fail with `SilentInput` instead of producing NaN.

use crate::buffer::SpectrumBuffer;
use crate::error::ExtractionError;

/// Fraction of total magnitude below the rolloff frequency
const ROLLOFF_THRESHOLD: f32 = 0.85;

fn magnitude_sum(spectrum: &SpectrumBuffer, feature: &str) -> Result<f32, ExtractionError> {
    let sum: f32 = spectrum.bins().iter().map(|b| b.norm()).sum();
    if sum <= 0.0 {
        return Err(ExtractionError::SilentInput(format!(
            "{} is undefined for an all-zero spectrum",
            feature
        )));
    }
    Ok(sum)
}

/// Spectral centroid: magnitude-weighted mean frequency
///
/// The "center of gravity" of the spectrum, loosely related to perceived
/// brightness.
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum.
pub fn centroid(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let denominator = magnitude_sum(spectrum, "Centroid")?;
    let numerator: f32 = (0..spectrum.len())
        .map(|i| spectrum.bin_frequency(i) * spectrum.magnitude(i))
        .sum();
    Ok(numerator / denominator)
}

/// Spectral spread: magnitude-weighted standard deviation around the centroid
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum.
pub fn spread(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let center = centroid(spectrum)?;
    let denominator = magnitude_sum(spectrum, "Spread")?;
    let numerator: f32 = (0..spectrum.len())
        .map(|i| {
            let deviation = spectrum.bin_frequency(i) - center;
            deviation * deviation * spectrum.magnitude(i)
        })
        .sum();
    Ok((numerator / denominator).sqrt())
}

/// Spectral crest: ratio of the maximum magnitude to the magnitude sum
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum.
pub fn crest(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let sum = magnitude_sum(spectrum, "Crest")?;
    let max = spectrum
        .bins()
        .iter()
        .map(|b| b.norm())
        .fold(0.0f32, f32::max);
    Ok(max / sum)
}

/// Spectral flatness: geometric over arithmetic mean of the magnitudes
///
/// A flatness near 1 indicates a noise-like spectrum, near 0 a tonal one.
/// Any zero-magnitude bin drives the geometric mean (and the flatness) to 0.
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum.
pub fn flatness(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let arithmetic_mean = magnitude_sum(spectrum, "Flatness")? / spectrum.len() as f32;

    let geometric_mean = if spectrum.bins().iter().any(|b| b.norm() <= 0.0) {
        0.0
    } else {
        let log_mean: f32 = spectrum.bins().iter().map(|b| b.norm().ln()).sum::<f32>()
            / spectrum.len() as f32;
        log_mean.exp()
    };

    Ok(geometric_mean / arithmetic_mean)
}

/// Spectral rolloff: the lowest frequency below which 85% of the total
/// magnitude is contained
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum.
pub fn rolloff(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let total = magnitude_sum(spectrum, "Rolloff")?;
    let threshold = ROLLOFF_THRESHOLD * total;

    let mut cumulative = 0.0f32;
    for i in 0..spectrum.len() {
        cumulative += spectrum.magnitude(i);
        if cumulative > threshold {
            return Ok(spectrum.bin_frequency(i));
        }
    }
    // Unreachable for a non-silent spectrum: the full sum exceeds 85% of
    // itself at the latest on the final bin
    Ok(spectrum.bin_frequency(spectrum.len() - 1))
}

/// Spectral mean: average bin magnitude
pub fn spectral_mean(spectrum: &SpectrumBuffer) -> f32 {
    spectrum.bins().iter().map(|b| b.norm()).sum::<f32>() / spectrum.len() as f32
}

/// Spectral variance: population variance of the bin magnitudes
pub fn variance(spectrum: &SpectrumBuffer) -> f32 {
    let mean = spectral_mean(spectrum);
    spectrum
        .bins()
        .iter()
        .map(|b| {
            let deviation = b.norm() - mean;
            deviation * deviation
        })
        .sum::<f32>()
        / spectrum.len() as f32
}

/// Spectral skewness: third standardized moment of the bin magnitudes
///
/// # Errors
///
/// `ExtractionError::NumericalError` when the magnitudes have zero variance.
pub fn skewness(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let (m2, m3, _) = central_moments(spectrum)?;
    Ok(m3 / m2.powf(1.5))
}

/// Spectral kurtosis: excess kurtosis (fourth standardized moment minus 3)
/// of the bin magnitudes
///
/// # Errors
///
/// `ExtractionError::NumericalError` when the magnitudes have zero variance.
pub fn kurtosis(spectrum: &SpectrumBuffer) -> Result<f32, ExtractionError> {
    let (m2, _, m4) = central_moments(spectrum)?;
    Ok(m4 / (m2 * m2) - 3.0)
}

/// Second, third and fourth central moments of the bin magnitudes
fn central_moments(spectrum: &SpectrumBuffer) -> Result<(f32, f32, f32), ExtractionError> {
    let mean = spectral_mean(spectrum);
    let n = spectrum.len() as f32;

    let mut m2 = 0.0f32;
    let mut m3 = 0.0f32;
    let mut m4 = 0.0f32;
    for bin in spectrum.bins() {
        let d = bin.norm() - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    if m2 <= 0.0 {
        return Err(ExtractionError::NumericalError(
            "Standardized moments are undefined for zero-variance magnitudes".to_string(),
        ));
    }
    Ok((m2, m3, m4))
}
