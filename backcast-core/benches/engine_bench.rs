//! Criterion benchmarks for the engine hot paths.
//!
//! 1. Full bar loop (strategy evaluation + broker + equity accounting)
//! 2. Indicator precompute batch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use backcast_core::domain::Bar;
use backcast_core::engine::{run_strategy, BarFeed, EngineConfig};
use backcast_core::indicators::{Atr, Bollinger, Donchian, Ema, Indicator, Sma};
use backcast_core::registry::{ParameterSet, StrategyRegistry};

fn make_bars(n: usize) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                symbol: "BENCH".to_string(),
                timestamp: base + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn bench_bar_loop(c: &mut Criterion) {
    let registry = StrategyRegistry::new();
    let mut group = c.benchmark_group("bar_loop");

    for &n in &[500_usize, 2000] {
        let feeds = [BarFeed::new("BENCH", make_bars(n))];
        let strategy = registry
            .build("SmaCrossStrategy", &ParameterSet::new())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("sma_cross", n), &n, |b, _| {
            b.iter(|| {
                let result =
                    run_strategy(&*strategy, black_box(&feeds), &EngineConfig::default());
                black_box(result.unwrap().final_equity)
            })
        });
    }

    group.finish();
}

fn bench_indicator_precompute(c: &mut Criterion) {
    let bars = make_bars(2000);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(20)),
        Box::new(Ema::new(26)),
        Box::new(Atr::new(14)),
        Box::new(Bollinger::upper(20, 2.0)),
        Box::new(Donchian::upper(20)),
    ];

    c.bench_function("indicator_precompute_batch", |b| {
        b.iter(|| {
            for indicator in &indicators {
                black_box(indicator.compute(black_box(&bars)));
            }
        })
    });
}

criterion_group!(benches, bench_bar_loop, bench_indicator_precompute);
criterion_main!(benches);
