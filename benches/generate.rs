use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emotion_art::{generate_art, EmotionVector, RenderParameters, Style};

fn bench_styles(c: &mut Criterion) {
    let emotions = EmotionVector::new([("joy", 0.7), ("calm", 0.3)]).unwrap();
    let mut group = c.benchmark_group("generate_256");
    group.sample_size(20);
    for style in Style::ALL {
        let params = RenderParameters::new(style)
            .with_complexity(5)
            .with_size(256, 256)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(style), &params, |b, params| {
            b.iter(|| generate_art(black_box(&emotions), params).unwrap())
        });
    }
    group.finish();
}

fn bench_mandala_complexity(c: &mut Criterion) {
    let emotions = EmotionVector::single("hope", 0.9).unwrap();
    let mut group = c.benchmark_group("mandala_complexity");
    for complexity in [1, 5, 10] {
        let params = RenderParameters::new(Style::Mandala)
            .with_complexity(complexity)
            .with_size(512, 512);
        group.bench_with_input(BenchmarkId::from_parameter(complexity), &params, |b, params| {
            b.iter(|| generate_art(black_box(&emotions), params).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_styles, bench_mandala_complexity);
criterion_main!(benches);
