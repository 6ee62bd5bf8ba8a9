//! Window functions
//!
//! Tapering weight sequences applied before/within transforms to reduce edge
//! artifacts. A window function is a pure mapping from a length to that many
//! non-negative weights; windows are shared by framing and the energy
//! analyzer.

/// A window function: maps a length to that many non-negative weights
pub type WindowFn = fn(usize) -> Vec<f32>;

/// Hamming window of the given length
///
/// `w[i] = 0.54 - 0.46 * cos(2 * pi * i / (len - 1))`, with the degenerate
/// lengths 0 and 1 yielding `[]` and `[1.0]`.
pub fn hamming(len: usize) -> Vec<f32> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![1.0];
    }

    let denom = (len - 1) as f32;
    (0..len)
        .map(|i| 0.54 - 0.46 * (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
        .collect()
}

/// Hann window of the given length
///
/// `w[i] = 0.5 - 0.5 * cos(2 * pi * i / (len - 1))`, with the degenerate
/// lengths 0 and 1 yielding `[]` and `[1.0]`.
pub fn hann(len: usize) -> Vec<f32> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![1.0];
    }

    let denom = (len - 1) as f32;
    (0..len)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
        .collect()
}
