#![allow(dead_code)]

use markupconv::ir::{BBox, Record, RecordSet};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Image names: any printable text without `,` or the characters that
/// delimit directories and extensions. Includes `""` and surrounding spaces.
pub fn arb_filename() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[^,./\\\p{C}]{0,12}",
        Just(String::new()),
        Just(" img 1 ".to_string()),
        Just("\"quoted\"".to_string()),
    ]
}

/// Labels: any printable text without `,`, including `""`, surrounding
/// whitespace, quotes and XML metacharacters.
pub fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[^,\p{C}]{0,12}",
        Just(String::new()),
        Just("  cat ".to_string()),
        Just("\"big\" dog".to_string()),
        Just("salt & <pepper>".to_string()),
        Just("it's".to_string()),
    ]
}

/// The order the internal reader lists image files in.
pub fn internal_file_order(records: &RecordSet) -> RecordSet {
    let mut sorted = records.records().to_vec();
    sorted.sort_by_cached_key(|record| format!("{}.json", record.filename));
    RecordSet::from_records(sorted)
}

pub fn arb_bbox() -> impl Strategy<Value = BBox> {
    (
        -10_000i64..10_000,
        -10_000i64..10_000,
        -10_000i64..10_000,
        -10_000i64..10_000,
    )
        .prop_map(|(x_min, y_min, x_max, y_max)| BBox::new(x_min, y_min, x_max, y_max))
}

/// Record sets with consistent per-image sizes, up to `max_images` images
/// and `max_boxes` boxes per image.
pub fn arb_record_set(max_images: usize, max_boxes: usize) -> BoxedStrategy<RecordSet> {
    prop::collection::btree_map(
        arb_filename(),
        (
            0u32..5000,
            0u32..5000,
            prop::collection::vec((arb_label(), arb_bbox()), 1..=max_boxes),
        ),
        0..=max_images,
    )
    .prop_map(|images| {
        let records = images
            .into_iter()
            .flat_map(|(filename, (width, height, boxes))| {
                boxes.into_iter().map(move |(label, bbox)| {
                    Record::new(filename.clone(), width, height, label, bbox)
                })
            })
            .collect();
        RecordSet::from_records(records)
    })
    .boxed()
}

/// Record sets with zero sizes, the only sizes the internal layout can
/// restore without image files.
pub fn arb_unsized_record_set(max_images: usize, max_boxes: usize) -> BoxedStrategy<RecordSet> {
    arb_record_set(max_images, max_boxes)
        .prop_map(|set| {
            set.into_records()
                .into_iter()
                .map(|r| Record::new(r.filename, 0, 0, r.label, r.bbox))
                .collect()
        })
        .boxed()
}

/// Raw records in arbitrary order, with image names drawn from a small pool
/// so that the same image appears in non-adjacent positions.
pub fn arb_shuffled_records(max_records: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["a", "b", "c", "d"]),
            arb_label(),
            arb_bbox(),
        ),
        0..=max_records,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(filename, label, bbox)| Record::new(filename, 10, 10, label, bbox))
            .collect()
    })
}
