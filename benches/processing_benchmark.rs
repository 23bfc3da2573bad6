use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use arrow::record_batch::RecordBatch;
use emdat_processor::models::frame::text_batch;
use emdat_processor::utils::headers::canonicalize_headers;
use emdat_processor::utils::numeric::parse_number;
use emdat_processor::CleaningPipeline;

const ISO_CODES: [&str; 6] = ["HTI", "IDN", "XXK", "USA", "CIV", "ZZZ"];
const TYPES: [&str; 4] = ["Earthquake", "Flood", "Storm", "Drought"];

// Synthetic raw extract with the columns every stage touches
fn create_raw_batch(rows: usize) -> RecordBatch {
    let text = |f: &dyn Fn(usize) -> Option<String>| -> Vec<Option<String>> {
        (0..rows).map(f).collect()
    };

    text_batch(&[
        (
            "DisNo.",
            text(&|i| Some(format!("{}-{:04}-{}", 1990 + i % 30, i % 10000, ISO_CODES[i % 6]))),
        ),
        ("Historic", text(&|i| Some(if i % 3 == 0 { "Yes" } else { "No" }.into()))),
        ("Disaster Group", text(&|_| Some("Natural".into()))),
        ("Disaster Type", text(&|i| Some(TYPES[i % 4].into()))),
        ("External IDs", text(&|i| (i % 5 == 0).then(|| "GLIDE".into()))),
        ("ISO", text(&|i| Some(ISO_CODES[i % 6].into()))),
        ("Country", text(&|_| Some("raw".into()))),
        ("Start Year", text(&|i| Some((1990 + i % 30).to_string()))),
        ("Start Month", text(&|i| (i % 7 != 0).then(|| (1 + i % 12).to_string()))),
        ("Start Day", text(&|i| Some((1 + i % 28).to_string()))),
        ("End Year", text(&|i| Some((1990 + i % 30).to_string()))),
        ("End Month", text(&|i| Some((1 + i % 12).to_string()))),
        ("End Day", text(&|i| Some((1 + (i + 3) % 28).to_string()))),
        ("Total Deaths", text(&|i| Some(format!("{}", i * 7 % 5000)))),
        ("Total Affected", text(&|i| Some(format!("{} {:03}", i % 900 + 1, i % 1000)))),
        (
            "Total Damage ('000 US$)",
            text(&|i| if i % 4 == 0 { Some("N/A".into()) } else { Some(format!("{},{:03}", i % 999 + 1, i % 1000)) }),
        ),
        ("CPI", text(&|_| Some("80.1".into()))),
    ])
    .unwrap()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning_pipeline");
    let pipeline = CleaningPipeline::new();

    for rows in [1_000, 10_000, 25_000] {
        let raw = create_raw_batch(rows);
        group.bench_with_input(BenchmarkId::new("run", rows), &raw, |b, raw| {
            b.iter(|| pipeline.run(black_box(raw)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let values = ["222570", "1,234,567", "1 234", "1.234,5", "N/A", "", "8000000"];
    c.bench_function("parse_number", |b| {
        b.iter(|| {
            for v in &values {
                black_box(parse_number(black_box(v)));
            }
        })
    });

    let headers = [
        "DisNo.",
        "Start Year",
        "No. Injured",
        "OFDA/BHA Response",
        "Total Damage ('000 US$)",
        "Total Damage, Adjusted ('000 US$)",
    ];
    c.bench_function("canonicalize_headers", |b| {
        b.iter(|| canonicalize_headers(black_box(headers)))
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_parsing);
criterion_main!(benches);
