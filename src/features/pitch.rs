//! Pitch, chroma and chord matching
//!
//! Frequency-to-MIDI mapping, 12-bin chroma extraction, and naive
//! template-based chord matching against a fixed dictionary of the 24
//! major/minor triads.

use serde::{Deserialize, Serialize};

use crate::buffer::SpectrumBuffer;
use crate::error::ExtractionError;

/// A chord template: name, binary pitch-class vector, root key and mode
#[derive(Debug, Clone)]
pub struct ChordTemplate {
    /// Chord name ("C", "Cm", "F#", ...)
    pub name: &'static str,
    /// Binary pitch-class vector (C, C#, ..., B)
    pub vector: [f32; 12],
    /// Root pitch class (0 = C, ..., 11 = B)
    pub key: u8,
    /// True for major, false for minor
    pub major: bool,
}

/// The result of matching a chroma vector against the chord dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordMatch {
    /// Name of the best-matching template, empty if nothing matched
    pub name: String,
    /// Cosine similarity of the best match, 0 if nothing matched
    pub score: f32,
}

/// The 24 major/minor triad templates (12 keys x 2 modes)
pub const CHORD_TEMPLATES: [ChordTemplate; 24] = [
    ChordTemplate { name: "C", vector: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], key: 0, major: true },
    ChordTemplate { name: "Cm", vector: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], key: 0, major: false },
    ChordTemplate { name: "C#", vector: [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], key: 1, major: true },
    ChordTemplate { name: "C#m", vector: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], key: 1, major: false },
    ChordTemplate { name: "D", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 2, major: true },
    ChordTemplate { name: "Dm", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 2, major: false },
    ChordTemplate { name: "Eb", vector: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0], key: 3, major: true },
    ChordTemplate { name: "Ebm", vector: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], key: 3, major: false },
    ChordTemplate { name: "E", vector: [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0], key: 4, major: true },
    ChordTemplate { name: "Em", vector: [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], key: 4, major: false },
    ChordTemplate { name: "F", vector: [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 5, major: true },
    ChordTemplate { name: "Fm", vector: [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], key: 5, major: false },
    ChordTemplate { name: "F#", vector: [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], key: 6, major: true },
    ChordTemplate { name: "F#m", vector: [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 6, major: false },
    ChordTemplate { name: "G", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], key: 7, major: true },
    ChordTemplate { name: "Gm", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0], key: 7, major: false },
    ChordTemplate { name: "Ab", vector: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], key: 8, major: true },
    ChordTemplate { name: "Abm", vector: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0], key: 8, major: false },
    ChordTemplate { name: "A", vector: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 9, major: true },
    ChordTemplate { name: "Am", vector: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], key: 9, major: false },
    ChordTemplate { name: "Bb", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0], key: 10, major: true },
    ChordTemplate { name: "Bbm", vector: [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0], key: 10, major: false },
    ChordTemplate { name: "B", vector: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0], key: 11, major: true },
    ChordTemplate { name: "Bm", vector: [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0], key: 11, major: false },
];

/// Convert a frequency in Hz to its nearest MIDI pitch number (60 = middle C)
pub fn frequency_to_midi(frequency: f32) -> i32 {
    (69.0 + 12.0 * (frequency / 440.0).log2()).round() as i32
}

/// 12-bin chroma vector of a spectrum, normalized by its maximum element
///
/// Each bin's magnitude is accumulated into the pitch class of its center
/// frequency (bin 0, at 0 Hz, maps to pitch 0). The returned vector's
/// maximum element is 1.0.
///
/// # Errors
///
/// `ExtractionError::SilentInput` on an all-zero spectrum (the
/// normalization would divide by zero).
pub fn chroma(spectrum: &SpectrumBuffer) -> Result<[f32; 12], ExtractionError> {
    let mut vector = [0.0f32; 12];

    for i in 0..spectrum.len() {
        let frequency = spectrum.bin_frequency(i);
        let pitch = if frequency != 0.0 {
            frequency_to_midi(frequency)
        } else {
            0
        };
        let pitch_class = pitch.rem_euclid(12) as usize;
        vector[pitch_class] += spectrum.magnitude(i);
    }

    let max = vector.iter().copied().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return Err(ExtractionError::SilentInput(
            "Chroma normalization is undefined for an all-zero spectrum".to_string(),
        ));
    }
    for class in &mut vector {
        *class /= max;
    }

    Ok(vector)
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, 0 when either vector is zero
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|&x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|&y| y * y).sum::<f32>().sqrt();

    let denominator = mag_a * mag_b;
    if denominator <= 0.0 {
        return 0.0;
    }
    dot / denominator
}

/// Best chord-template match for a chroma vector
///
/// Compares against all 24 templates by cosine similarity; returns the name
/// and score of the best match, or an empty name with score 0 when no
/// template scores above 0.
pub fn match_chord(chroma: &[f32; 12]) -> ChordMatch {
    let mut best = ChordMatch {
        name: String::new(),
        score: 0.0,
    };

    for template in &CHORD_TEMPLATES {
        let score = cosine_similarity(chroma, &template.vector);
        if score > best.score {
            best.score = score;
            best.name = template.name.to_string();
        }
    }

    best
}

/// Naive pitch estimate: the MIDI pitch of the largest-magnitude bin
///
/// # Errors
///
/// `ExtractionError::SilentInput` when the spectrum has no positive-
/// magnitude bin, or the peak sits at 0 Hz (no pitch to report).
pub fn naive_pitch(spectrum: &SpectrumBuffer) -> Result<i32, ExtractionError> {
    let mut peak_bin = 0;
    let mut peak_magnitude = 0.0f32;
    for i in 0..spectrum.len() {
        let magnitude = spectrum.magnitude(i);
        if magnitude > peak_magnitude {
            peak_magnitude = magnitude;
            peak_bin = i;
        }
    }

    let frequency = spectrum.bin_frequency(peak_bin);
    if peak_magnitude <= 0.0 || frequency <= 0.0 {
        return Err(ExtractionError::SilentInput(
            "Pitch is undefined for a silent or DC-only spectrum".to_string(),
        ));
    }

    Ok(frequency_to_midi(frequency))
}
