use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use trip_summary::{CacheConfig, EvictionPolicy, RawPlan, SummaryCache, SummaryProcessor};

const AIRPORTS: [&str; 8] = ["BKK", "CNX", "HKT", "NRT", "ICN", "SIN", "HKG", "TPE"];
const CARRIERS: [&str; 6] = ["TG", "FD", "NH", "KE", "SQ", "CX"];
const AIRCRAFT: [&str; 5] = ["320", "321", "359", "77W", "788"];

fn random_segment(rng: &mut impl Rng, from: &str, to: &str) -> Value {
    let carrier = CARRIERS.choose(rng).unwrap();
    let hours = rng.gen_range(1..8);
    let minutes = rng.gen_range(0..60);
    json!({
        "departure": { "iataCode": from, "at": format!("2025-06-11T{:02}:00:00", rng.gen_range(0..6)) },
        "arrival": { "iataCode": to, "at": format!("2025-06-11T{:02}:{:02}:00", 10 + hours, minutes) },
        "carrierCode": carrier,
        "number": rng.gen_range(100..999).to_string(),
        "aircraft": { "code": AIRCRAFT.choose(rng).unwrap() },
        "duration": format!("PT{}H{}M", hours, minutes)
    })
}

// Round trip with up to two stops each way, a split hotel stay and a transfer
fn random_plan(rng: &mut impl Rng) -> RawPlan {
    let mut stops: Vec<&str> = AIRPORTS.choose_multiple(rng, 4).copied().collect();
    stops.truncate(rng.gen_range(2..=4));

    let outbound: Vec<Value> = stops
        .windows(2)
        .map(|pair| random_segment(&mut *rng, pair[0], pair[1]))
        .collect();
    let inbound: Vec<Value> = stops
        .iter()
        .rev()
        .collect::<Vec<_>>()
        .windows(2)
        .map(|pair| random_segment(&mut *rng, pair[0], pair[1]))
        .collect();

    let hotel = format!("hotel{}", rng.gen_range(0..20));
    let value = json!({
        "currency": "THB",
        "flight": { "price_total": rng.gen_range(5000..40000), "outbound": outbound, "inbound": inbound },
        "hotel": {
            "segments": [
                { "hotelName": hotel, "cityCode": stops[stops.len() - 1], "nights": rng.gen_range(1..4), "price_total": rng.gen_range(1000..9000) },
                { "hotelName": hotel, "cityCode": stops[stops.len() - 1], "nights": 1, "price_total": "2,500" }
            ]
        },
        "transport": { "type": "car_rental", "data": { "provider": "Hertz", "price": rng.gen_range(500..3000) } },
        "travel": { "flights": { "outbound": [{}, {}], "inbound": [{}] } }
    });

    serde_json::from_value(value).unwrap()
}

pub fn summary_benchmark(c: &mut Criterion) {
    let processor = SummaryProcessor::new();
    let mut rng = thread_rng();
    let plans: Vec<RawPlan> = (0..64).map(|_| random_plan(&mut rng)).collect();

    c.bench_function("summarize_plan", |b| {
        b.iter(|| {
            let plan = plans.choose(&mut thread_rng()).unwrap();
            black_box(processor.summarize(black_box(plan), None))
        })
    });
}

pub fn cached_summary_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_summary");
    let processor = Arc::new(SummaryProcessor::new());
    let mut rng = thread_rng();
    let plans: Arc<Vec<RawPlan>> = Arc::new((0..64).map(|_| random_plan(&mut rng)).collect());

    // Capacity below, at and above the working set
    for max_entries in [16usize, 64, 256].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_entries),
            max_entries,
            |b, &max_entries| {
                b.iter(|| {
                    let cache = Arc::new(SummaryCache::new(CacheConfig {
                        max_entries,
                        default_ttl_seconds: 300,
                        eviction_policy: EvictionPolicy::LeastRecentlyUsed,
                    }));

                    let handles: Vec<_> = (0..4)
                        .map(|_| {
                            let cache = Arc::clone(&cache);
                            let processor = Arc::clone(&processor);
                            let plans = Arc::clone(&plans);
                            thread::spawn(move || {
                                let mut rng = thread_rng();
                                for _ in 0..250 {
                                    let plan = plans.choose(&mut rng).unwrap();
                                    black_box(cache.summarize(&processor, plan, None));
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }

                    black_box(cache.stats())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, summary_benchmark, cached_summary_benchmark);
criterion_main!(benches);
