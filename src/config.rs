//! Configuration parameters for onset detection

use serde::{Deserialize, Serialize};

/// Onset detection configuration parameters
///
/// The defaults are the reference parameter set: an energy-based detector
/// working on a 512-sample analysis window with a 2048-wide peak picker, and
/// a flux-based detector working on 1024-sample frames with a 10-wide peak
/// picker over the flux curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnsetConfig {
    /// Analysis window for the energy derivative (default: 512)
    pub energy_frame_size: usize,

    /// Peak-picking window over the energy derivative (default: 2048)
    pub energy_peak_window: usize,

    /// Frame size for the per-frame spectra of the flux path (default: 1024)
    pub flux_frame_size: usize,

    /// Peak-picking window over the spectral-flux curve (default: 10)
    pub flux_peak_window: usize,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            energy_frame_size: 512,
            energy_peak_window: 2048,
            flux_frame_size: 1024,
            flux_peak_window: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_parameters() {
        let config = OnsetConfig::default();
        assert_eq!(config.energy_frame_size, 512);
        assert_eq!(config.energy_peak_window, 2048);
        assert_eq!(config.flux_frame_size, 1024);
        assert_eq!(config.flux_peak_window, 10);
    }
}
