//! WAV file loading
//!
//! Decodes a WAV file into a mono [`SampleBuffer`] with samples normalized
//! to [-1, 1]. Multi-channel files are reduced to their first channel; the
//! source bit depth is kept on the buffer as an informational tag.

use std::path::Path;

use crate::buffer::{SampleBuffer, SampleFormat};
use crate::error::ExtractionError;

/// Load a WAV file as a single-channel sample buffer
///
/// Integer samples are scaled by `2^(bits-1)` into [-1, 1]; float samples
/// are taken as-is. Only the first channel of multi-channel files is kept.
///
/// # Errors
///
/// Returns `ExtractionError::DecodingError` if the file cannot be opened or
/// decoded.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<SampleBuffer, ExtractionError> {
    let mut reader = hound::WavReader::open(path.as_ref())
        .map_err(|e| ExtractionError::DecodingError(e.to_string()))?;
    let spec = reader.spec();

    log::debug!(
        "Loading WAV: {} Hz, {} channels, {} bits ({:?})",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let channels = spec.channels.max(1) as usize;

    let (samples, format) = match spec.sample_format {
        hound::SampleFormat::Float => {
            let samples = reader
                .samples::<f32>()
                .step_by(channels)
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| ExtractionError::DecodingError(e.to_string()))?;
            (samples, SampleFormat::Float32)
        }
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            let samples = reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| ExtractionError::DecodingError(e.to_string()))?;
            let format = match spec.bits_per_sample {
                16 => SampleFormat::Int16,
                24 => SampleFormat::Int24,
                _ => SampleFormat::Int32,
            };
            (samples, format)
        }
    };

    SampleBuffer::with_format(samples, spec.sample_rate, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..2205i32 {
            let value = ((i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 22050.0).sin()
                * 16000.0) as i16;
            for channel in 0..channels {
                // Second channel silent, to prove the first is kept
                writer
                    .write_sample(if channel == 0 { value } else { 0 })
                    .unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_mono_wav() {
        let dir = std::env::temp_dir();
        let path = dir.join("tessitura_loader_mono.wav");
        write_test_wav(&path, 1);

        let buffer = load_wav(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 22050);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.format(), SampleFormat::Int16);
        assert_eq!(buffer.len(), 2205);
        assert!(buffer.samples().iter().all(|&s| s.abs() <= 1.0));
        assert!(buffer.rms() > 0.1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_stereo_keeps_first_channel() {
        let dir = std::env::temp_dir();
        let path = dir.join("tessitura_loader_stereo.wav");
        write_test_wav(&path, 2);

        let buffer = load_wav(&path).unwrap();
        assert_eq!(buffer.len(), 2205);
        // The signal lives in channel 0; a channel mix-down would halve it
        assert!(buffer.rms() > 0.1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        match load_wav("/nonexistent/path/audio.wav") {
            Err(ExtractionError::DecodingError(_)) => {}
            other => panic!("expected DecodingError, got {:?}", other),
        }
    }
}
