//! Integration tests for the internal layout.

use std::fs;
use std::path::Path;

use markupconv::ir::io_internal::{read_internal_dir, read_meta_labels, write_internal_dir};
use markupconv::ir::{BBox, Record, RecordSet};

mod common;
use common::{create_img1_internal_dataset, write_bmp};

fn create_sample_dataset(root: &Path) {
    fs::create_dir_all(root.join("markup")).expect("create markup dir");

    fs::write(
        root.join("markup/b.json"),
        r#"[{"x":1,"y":2,"x1":3,"y1":4,"label":"dog"}]"#,
    )
    .expect("write b");
    fs::write(
        root.join("markup/a.json"),
        r#"[{"x":0,"y":0,"x1":9,"y1":9,"label":"cat"},{"x":2,"y":2,"x1":5,"y1":5,"label":"bird"}]"#,
    )
    .expect("write a");
    fs::write(root.join("markup/broken.json"), r#"[{"x":1}]"#).expect("write broken");

    write_bmp(&root.join("images/a.jpg"), 64, 48);
    // b.jpg is intentionally missing.
}

#[test]
fn read_internal_sizes_images_and_skips_broken_files() {
    let temp = tempfile::tempdir().expect("create temp dir");
    create_sample_dataset(temp.path());

    let records = read_internal_dir(temp.path()).expect("read internal dataset");

    assert_eq!(records.len(), 3);
    assert_eq!(records.image_count(), 2);

    let a: Vec<_> = records.iter().filter(|r| r.filename == "a").collect();
    assert_eq!(a.len(), 2);
    assert!(a.iter().all(|r| (r.width, r.height) == (64, 48)));
    assert_eq!(a[0].label, "cat");
    assert_eq!(a[1].label, "bird");

    let b: Vec<_> = records.iter().filter(|r| r.filename == "b").collect();
    assert_eq!(b.len(), 1);
    assert_eq!((b[0].width, b[0].height), (0, 0));
    assert_eq!(b[0].bbox, BBox::new(1, 2, 3, 4));

    assert!(records.iter().all(|r| r.filename != "broken"));
}

#[test]
fn img1_example_reads_two_boxes() {
    let temp = tempfile::tempdir().expect("create temp dir");
    create_img1_internal_dataset(temp.path());

    let records = read_internal_dir(temp.path()).expect("read internal dataset");
    let expected = vec![
        Record::new("img1", 300, 200, "cat", BBox::new(10, 10, 50, 60)),
        Record::new("img1", 300, 200, "dog", BBox::new(5, 5, 20, 20)),
    ];
    assert_eq!(records.records(), expected.as_slice());
}

#[test]
fn write_then_read_preserves_records() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = RecordSet::from_records(vec![
        Record::new("x", 0, 0, "person", BBox::new(1, 1, 10, 10)),
        Record::new("x", 0, 0, "car", BBox::new(2, 2, 20, 20)),
        Record::new("y", 0, 0, "person", BBox::new(-5, 3, 4, 4)),
    ]);

    let labels = write_internal_dir(temp.path(), &records).expect("write internal");
    assert_eq!(labels.into_vec(), vec!["person", "car"]);

    let restored = read_internal_dir(temp.path()).expect("read internal");
    assert_eq!(restored, records);
}

#[test]
fn meta_lists_each_label_once_in_first_seen_order() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = RecordSet::from_records(vec![
        Record::new("a", 1, 1, "zebra", BBox::default()),
        Record::new("b", 1, 1, "ant", BBox::default()),
        Record::new("b", 1, 1, "zebra", BBox::default()),
        Record::new("c", 1, 1, "moth", BBox::default()),
    ]);

    write_internal_dir(temp.path(), &records).expect("write internal");

    assert_eq!(
        read_meta_labels(temp.path()).expect("read meta"),
        vec!["zebra", "ant", "moth"]
    );
    let meta = fs::read_to_string(temp.path().join("meta.json")).expect("read meta.json");
    assert_eq!(meta, r#"{"labels":["zebra","ant","moth"]}"#);
}

#[test]
fn rewrite_leaves_stale_per_image_files() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let first = RecordSet::from_records(vec![Record::new("old", 1, 1, "a", BBox::default())]);
    let second = RecordSet::from_records(vec![Record::new("new", 1, 1, "a", BBox::default())]);

    write_internal_dir(temp.path(), &first).expect("first write");
    write_internal_dir(temp.path(), &second).expect("second write");

    assert!(temp.path().join("markup/old.json").is_file());
    assert!(temp.path().join("markup/new.json").is_file());
}
