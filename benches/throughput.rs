use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use tripstore::{
    config::StoreConfig,
    core::store::TripStore,
    persist::memory::MemorySlot,
    trip::{TripDraft, TripPatch},
    types::{Category, CategoryFilter, SortKey},
};

fn draft(i: u64) -> TripDraft {
    TripDraft {
        destination: format!("City {i}"),
        duration: 1 + (i % 14) as u32,
        start_date: NaiveDate::from_ymd_opt(2026, 1 + (i % 12) as u32, 1),
        budget: 100.0 + (i % 5000) as f64,
        category: Category::ALL[(i % 6) as usize],
        ..TripDraft::default()
    }
}

fn seeded(n: u64, cache_views: bool) -> TripStore {
    let config = StoreConfig {
        cache_views,
        ..StoreConfig::default()
    };
    let mut store = TripStore::load(Box::new(MemorySlot::new()), config);
    for i in 0..n {
        let _ = store.add(draft(i)).expect("add");
    }
    store
}

fn bench_adds(c: &mut Criterion) {
    c.bench_function("store_add_500", |b| {
        b.iter(|| seeded(500, false));
    });
}

fn bench_note_edits(c: &mut Criterion) {
    c.bench_function("store_edit_notes_500", |b| {
        b.iter(|| {
            let mut store = seeded(500, false);
            let ids: Vec<_> = store.trips().iter().map(|t| t.id).collect();
            for id in ids {
                let _ = store
                    .edit(
                        id,
                        TripPatch {
                            notes: Some("booked".to_string()),
                            ..TripPatch::default()
                        },
                    )
                    .expect("edit");
            }
        });
    });
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_vs_view");
    let plain = seeded(2000, false);
    let mut cached = seeded(2000, true);

    for sort in [SortKey::Destination, SortKey::BudgetLow] {
        group.bench_with_input(BenchmarkId::new("query", format!("{sort:?}")), &sort, |b, &sort| {
            b.iter(|| plain.query(CategoryFilter::All, sort).len());
        });
        group.bench_with_input(BenchmarkId::new("view", format!("{sort:?}")), &sort, |b, &sort| {
            b.iter(|| cached.view(CategoryFilter::All, sort).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adds, bench_note_edits, bench_queries);
criterion_main!(benches);
