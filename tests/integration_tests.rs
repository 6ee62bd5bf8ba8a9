//! End-to-end tests over the full extraction pipeline

use tessitura::features::{mfcc, onset, pitch, spectral};
use tessitura::{transform, OnsetConfig, OnsetMethod, SampleBuffer};

/// Mix of sines at the given frequencies, constant amplitude
fn tone_mix(duration_seconds: f32, sample_rate: f32, freqs: &[f32]) -> Vec<f32> {
    let num_samples = (duration_seconds * sample_rate) as usize;
    let scale = 0.8 / freqs.len() as f32;
    (0..num_samples)
        .map(|i| {
            freqs
                .iter()
                .map(|&f| (i as f32 * f * 2.0 * std::f32::consts::PI / sample_rate).sin())
                .sum::<f32>()
                * scale
        })
        .collect()
}

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
fn test_onsets_reslice_the_buffer() {
    let samples = kick_pattern(4.0, 120.0, 44100.0);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let onsets = onset::detect_onsets(&buffer, OnsetMethod::Energy, &OnsetConfig::default())
        .unwrap();
    assert!(!onsets.is_empty());
    assert!(onsets.iter().all(|&o| o < buffer.len()));

    let segments = buffer.frames_from_onsets(&onsets);
    assert_eq!(segments.len(), onsets.len() - 1);
    let total: usize = segments.iter().map(|s| s.len()).sum();
    assert!(total <= buffer.len());
    for segment in &segments {
        assert_eq!(segment.sample_rate(), 44100);
    }
}

#[test]
fn test_flux_onsets_within_bounds() {
    let samples = kick_pattern(4.0, 120.0, 44100.0);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let onsets = onset::detect_onsets(&buffer, OnsetMethod::Flux, &OnsetConfig::default())
        .unwrap();
    assert!(onsets.iter().all(|&o| o < buffer.len()));
    assert!(onsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_framed_spectra_feed_spectral_features() {
    let samples = tone_mix(1.0, 44100.0, &[440.0]);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let frames = buffer.frames(2048, Some(tessitura::buffer::hamming)).unwrap();
    for frame in frames.iter().take(8) {
        let spectrum = transform::forward_fft(frame).unwrap();
        assert_eq!(spectrum.len(), 1025);

        // Tight numeric checks live in the unit tests; here we assert the
        // features are well-defined over real FFT output
        let c = spectral::centroid(&spectrum).unwrap();
        assert!(c > 0.0 && c < 22050.0, "centroid was {}", c);

        let r = spectral::rolloff(&spectrum).unwrap();
        assert!(r >= 0.0 && r <= 22050.0, "rolloff was {}", r);

        assert!(spectral::crest(&spectrum).unwrap() > 0.0);
        assert!(spectral::spread(&spectrum).unwrap().is_finite());
        assert!(spectral::flatness(&spectrum).unwrap().is_finite());
    }
}

#[test]
fn test_chord_sequence_from_triad() {
    // C major triad: C4, E4, G4
    let samples = tone_mix(1.0, 44100.0, &[261.63, 329.63, 392.0]);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let frames = buffer.frames(8192, Some(tessitura::buffer::hamming)).unwrap();
    let spectrum = transform::forward_fft(&frames[0]).unwrap();
    let chroma = pitch::chroma(&spectrum).unwrap();
    let chord = pitch::match_chord(&chroma);

    assert_eq!(chord.name, "C");
    assert!(chord.score > 0.9, "score was {}", chord.score);
}

#[test]
fn test_naive_pitch_of_tone() {
    let samples = tone_mix(0.5, 44100.0, &[440.0]);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let frames = buffer.frames(4096, Some(tessitura::buffer::hamming)).unwrap();
    let spectrum = transform::forward_fft(&frames[0]).unwrap();
    assert_eq!(pitch::naive_pitch(&spectrum).unwrap(), 69);
}

#[test]
fn test_mfcc_over_framed_audio() {
    let samples = tone_mix(0.5, 44100.0, &[220.0, 440.0, 880.0]);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let frames = buffer.frames(4096, Some(tessitura::buffer::hamming)).unwrap();
    let spectrum = transform::forward_fft(&frames[0]).unwrap();

    for m in 0..4 {
        assert!(mfcc::mfcc(&spectrum, m, 48).unwrap().is_finite());
    }
    // Sentinel for an out-of-range coefficient index
    assert_eq!(mfcc::mfcc(&spectrum, 48, 48).unwrap(), 0.0);
}

#[test]
fn test_transform_round_trips() {
    let samples = tone_mix(0.1, 44100.0, &[440.0, 1000.0]);
    let buffer = SampleBuffer::new(samples, 44100).unwrap();

    let restored = transform::inverse_fft(&transform::forward_fft(&buffer).unwrap()).unwrap();
    assert_eq!(restored.len(), buffer.len());
    for (a, b) in buffer.samples().iter().zip(restored.samples()) {
        assert!((a - b).abs() < 1e-4);
    }

    let frames = buffer.frames(256, None).unwrap();
    let restored = transform::inverse_dct(&transform::forward_dct(&frames[0]).unwrap()).unwrap();
    for (a, b) in frames[0].samples().iter().zip(restored.samples()) {
        assert!((a - b).abs() < 1e-3);
    }
}
