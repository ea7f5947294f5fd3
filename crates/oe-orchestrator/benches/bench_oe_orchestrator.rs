use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oe_core::{EngineConfig, Script};
use oe_orchestrator::{
    add_randomness, generate_originality_report, OriginalityEngine, VariantRewriter,
};
use oe_variant::VariantEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn script(segments: usize) -> Script {
    let texts: Vec<String> = (0..segments)
        .map(|i| format!("大家好，第{i}段。接下来聊聊咖啡豆的烘焙，总而言之非常重要。"))
        .collect();
    Script::from_texts("bench", &texts, 4.0)
}

fn bench_passes(c: &mut Criterion) {
    let s = script(40);
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("add_randomness_40_segments", |b| {
        b.iter(|| black_box(add_randomness(black_box(&s), &mut rng)))
    });
    c.bench_function("report_40_segments", |b| {
        b.iter(|| black_box(generate_originality_report(black_box(&s), Vec::new())))
    });
}

fn bench_process(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = EngineConfig {
        enforce_uniqueness: false,
        auto_fix: true,
        ..EngineConfig::default()
    };
    let engine = OriginalityEngine::in_memory(config)
        .unwrap()
        .with_variant_engine(VariantEngine::with_seed(3));
    let rewriter = VariantRewriter::smart(VariantEngine::with_seed(5));
    let s = script(20);
    c.bench_function("process_20_segments_auto_fix", |b| {
        b.iter(|| rt.block_on(engine.process(black_box(&s), &rewriter)).unwrap())
    });
}

criterion_group!(benches, bench_passes, bench_process);
criterion_main!(benches);
