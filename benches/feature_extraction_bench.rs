//! Performance benchmarks for feature extraction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessitura::features::onset;
use tessitura::{transform, SampleBuffer};

fn synthetic_audio(seconds: usize) -> SampleBuffer {
    let samples: Vec<f32> = (0..44100 * seconds)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect();
    SampleBuffer::new(samples, 44100).unwrap()
}

fn bench_energy_onsets(c: &mut Criterion) {
    let buffer = synthetic_audio(30);
    c.bench_function("onsets_by_energy_30s", |b| {
        b.iter(|| {
            let _ = onset::onsets_by_energy(black_box(&buffer), black_box(512));
        });
    });
}

fn bench_forward_fft(c: &mut Criterion) {
    let buffer = synthetic_audio(1);
    let frames = buffer.frames(2048, None).unwrap();
    c.bench_function("forward_fft_2048", |b| {
        b.iter(|| {
            for frame in &frames {
                let _ = transform::forward_fft(black_box(frame));
            }
        });
    });
}

criterion_group!(benches, bench_energy_onsets, bench_forward_fft);
criterion_main!(benches);
