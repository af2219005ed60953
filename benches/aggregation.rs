use chrono::{Datelike, Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_core::core::aggregation::{
    compute_overall_totals, compute_period_totals, distinct_categories, filter_and_sort,
};
use finance_core::domain::{
    CategoryFilter, FilterState, MonthFilter, TransactionKind, TransactionRecord,
};

const CATEGORIES: [&str; 6] = [
    "Casa",
    "Mercado",
    "Lazer",
    "Transporte",
    "Saude",
    "Educacao",
];

fn build_records(count: usize) -> Vec<TransactionRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start + Duration::days((idx % 1095) as i64);
            let kind = if idx % 4 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            TransactionRecord {
                id: format!("txn-{}", idx),
                kind,
                description: format!("Record {}", idx),
                value: 10.0 + (idx % 250) as f64,
                date,
                year: date.year(),
                month: date.month(),
                category: match kind {
                    TransactionKind::Expense => {
                        Some(CATEGORIES[idx % CATEGORIES.len()].to_string())
                    }
                    TransactionKind::Income => None,
                },
                created_at: None,
            }
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let records = build_records(black_box(10_000));
    let filter = FilterState::new(2024, MonthFilter::Month(6), CategoryFilter::All);
    let by_category = filter.clone().with_category(CategoryFilter::from("Lazer"));

    c.bench_function("overall_totals_10k", |b| {
        b.iter(|| black_box(compute_overall_totals(&records)))
    });

    c.bench_function("period_totals_10k", |b| {
        b.iter(|| black_box(compute_period_totals(&records, &filter)))
    });

    c.bench_function("filter_and_sort_category_10k", |b| {
        b.iter(|| black_box(filter_and_sort(&records, &by_category)))
    });

    c.bench_function("distinct_categories_10k", |b| {
        b.iter(|| black_box(distinct_categories(&records)))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
