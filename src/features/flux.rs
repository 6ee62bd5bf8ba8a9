//! Spectral flux between consecutive spectra
//!
//! Frame-to-frame change in spectral magnitude, used as an onset-detection
//! cue. This implementation preserves the reference's cumulative-append
//! output shape: one running-total value is appended per bin, so the output
//! length equals the sum of the spectra's bin counts, not the number of
//! spectrum pairs. The flux-based onset detector depends on that shape;
//! do not "fix" it to one scalar per pair.

use crate::buffer::SpectrumBuffer;
use crate::error::ExtractionError;

/// Spectral flux over a sequence of spectra
///
/// For the first spectrum the running total of bin magnitudes is appended
/// per bin. For each subsequent spectrum the running total of
/// `|current[j]| - |previous[j]|` is appended per bin, with negative per-bin
/// differences clamped to zero when `rectify` is set.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `spectra` is empty or a
/// spectrum has more bins than its predecessor.
pub fn spectral_flux(
    spectra: &[SpectrumBuffer],
    rectify: bool,
) -> Result<Vec<f32>, ExtractionError> {
    let first = spectra.first().ok_or_else(|| {
        ExtractionError::InvalidInput("Spectral flux needs at least one spectrum".to_string())
    })?;

    let total_bins: usize = spectra.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(total_bins);

    log::debug!(
        "Computing spectral flux over {} spectra ({} bins total, rectify={})",
        spectra.len(),
        total_bins,
        rectify
    );

    let mut flux = 0.0f32;
    for bin in first.bins() {
        flux += bin.norm();
        out.push(flux);
    }

    for pair in spectra.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.len() > previous.len() {
            return Err(ExtractionError::InvalidInput(format!(
                "Spectrum has {} bins but its predecessor only {}",
                current.len(),
                previous.len()
            )));
        }

        let mut flux = 0.0f32;
        for (j, bin) in current.bins().iter().enumerate() {
            let mut diff = bin.norm() - previous.magnitude(j);
            if rectify && diff < 0.0 {
                diff = 0.0;
            }
            flux += diff;
            out.push(flux);
        }
    }

    Ok(out)
}
