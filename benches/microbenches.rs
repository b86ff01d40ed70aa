//! Criterion microbenches for markupconv parsing and writing.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - internalCSV parsing and writing
//! - Pascal VOC XML parsing and rendering
//! - Regrouping interleaved records by image

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::path::Path;

use markupconv::ir::io_internal_csv::{from_internal_csv_str, to_internal_csv_string};
use markupconv::ir::io_voc_xml::{from_voc_xml_str, to_voc_xml_string};
use markupconv::ir::{BBox, Record, RecordSet};

const CSV_FIXTURE: &str = include_str!("../tests/fixtures/csv_dataset/markup.csv");
const VOC_FIXTURE: &str = include_str!("../tests/fixtures/voc_dataset/markup.xml");

/// A dataset of `images` images with 8 boxes each, rows interleaved.
fn synthetic_records(images: usize) -> Vec<Record> {
    let labels = ["person", "car", "dog", "cat"];
    (0..8)
        .flat_map(|box_idx| {
            (0..images).map(move |img_idx| {
                let offset = (box_idx * 10) as i64;
                Record::new(
                    format!("img_{img_idx:05}"),
                    640,
                    480,
                    labels[box_idx % labels.len()],
                    BBox::new(offset, offset, offset + 50, offset + 40),
                )
            })
        })
        .collect()
}

fn bench_csv_parse(c: &mut Criterion) {
    let large = to_internal_csv_string(&RecordSet::from_records(synthetic_records(500)))
        .expect("Failed to render synthetic CSV");

    let mut group = c.benchmark_group("csv_parse");

    group.throughput(Throughput::Bytes(CSV_FIXTURE.len() as u64));
    group.bench_function("from_internal_csv_str/fixture", |b| {
        b.iter(|| {
            let records = from_internal_csv_str(black_box(CSV_FIXTURE)).unwrap();
            black_box(records)
        })
    });

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("from_internal_csv_str/4000_rows", |b| {
        b.iter(|| {
            let records = from_internal_csv_str(black_box(&large)).unwrap();
            black_box(records)
        })
    });

    group.finish();
}

fn bench_csv_write(c: &mut Criterion) {
    let records = RecordSet::from_records(synthetic_records(500));

    let mut group = c.benchmark_group("csv_write");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("to_internal_csv_string", |b| {
        b.iter(|| {
            let csv = to_internal_csv_string(black_box(&records)).unwrap();
            black_box(csv)
        })
    });

    group.finish();
}

fn bench_voc(c: &mut Criterion) {
    let records = RecordSet::from_records(synthetic_records(500));
    let large = to_voc_xml_string(&records, Path::new("/data/out"))
        .expect("Failed to render synthetic VOC");

    let mut group = c.benchmark_group("voc");

    group.throughput(Throughput::Bytes(VOC_FIXTURE.len() as u64));
    group.bench_function("from_voc_xml_str/fixture", |b| {
        b.iter(|| {
            let records = from_voc_xml_str(black_box(VOC_FIXTURE)).unwrap();
            black_box(records)
        })
    });

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("from_voc_xml_str/500_images", |b| {
        b.iter(|| {
            let records = from_voc_xml_str(black_box(&large)).unwrap();
            black_box(records)
        })
    });

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("to_voc_xml_string/500_images", |b| {
        b.iter(|| {
            let xml = to_voc_xml_string(black_box(&records), Path::new("/data/out")).unwrap();
            black_box(xml)
        })
    });

    group.finish();
}

/// Rows arrive interleaved, so every image's run has to be gathered.
fn bench_regroup(c: &mut Criterion) {
    let rows = synthetic_records(500);

    let mut group = c.benchmark_group("record_set");
    group.throughput(Throughput::Elements(rows.len() as u64));

    group.bench_function("from_records/interleaved", |b| {
        b.iter(|| {
            let set = RecordSet::from_records(black_box(rows.clone()));
            black_box(set)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_csv_parse,
    bench_csv_write,
    bench_voc,
    bench_regroup
);
criterion_main!(benches);
