//! Integration tests for the single-document Pascal VOC layout.

use std::fs;
use std::path::Path;

use markupconv::ir::io_voc_xml::{from_voc_xml_str, read_voc_xml, write_voc_xml};
use markupconv::ir::{BBox, Record, RecordSet};

#[test]
fn read_voc_fixture() {
    let records = read_voc_xml(Path::new("tests/fixtures/voc_dataset")).expect("read voc fixture");

    assert_eq!(
        records.records(),
        &[
            Record::new("img1", 300, 200, "cat", BBox::new(10, 10, 50, 60)),
            Record::new("img1", 300, 200, "dog", BBox::new(5, 5, 20, 20)),
        ]
    );
}

#[test]
fn missing_markup_xml_yields_empty_dataset() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = read_voc_xml(temp.path()).expect("missing file is not an error");
    assert!(records.is_empty());
}

#[test]
fn malformed_xml_is_an_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::write(temp.path().join("markup.xml"), "<annotations><annotation>").expect("write xml");

    assert!(read_voc_xml(temp.path()).is_err());
}

#[test]
fn write_produces_one_annotation_per_image() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = RecordSet::from_records(vec![
        Record::new("a", 100, 50, "cat", BBox::new(1, 2, 30, 40)),
        Record::new("b", 0, 0, "dog", BBox::new(3, 4, 5, 6)),
        Record::new("a", 100, 50, "dog", BBox::new(31, 4, 80, 45)),
    ]);

    write_voc_xml(temp.path(), &records).expect("write voc");
    let xml = fs::read_to_string(temp.path().join("markup.xml")).expect("read xml");

    assert_eq!(xml.matches("<annotation>").count(), 2);
    assert_eq!(xml.matches("<object>").count(), 3);
    assert!(xml.contains("<filename>a.jpg</filename>"));
    assert!(xml.contains("<database>ORI_Markup</database>"));
    assert!(xml.contains("<depth>3</depth>"));
    assert!(xml.contains("<pose>Unspecified</pose>"));

    let expected_path = temp.path().join("images").join("a.jpg");
    assert!(xml.contains(&format!("<path>{}</path>", expected_path.display())));

    let restored = read_voc_xml(temp.path()).expect("read voc");
    assert_eq!(restored, records);
}

#[test]
fn labels_are_escaped_and_restored() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = RecordSet::from_records(vec![Record::new(
        "a",
        1,
        1,
        "salt & <pepper>",
        BBox::new(0, 0, 1, 1),
    )]);

    write_voc_xml(temp.path(), &records).expect("write voc");
    let xml = fs::read_to_string(temp.path().join("markup.xml")).expect("read xml");
    assert!(xml.contains("<name>salt &amp; &lt;pepper&gt;</name>"));

    let restored = read_voc_xml(temp.path()).expect("read voc");
    assert_eq!(restored.records()[0].label, "salt & <pepper>");
}

#[test]
fn annotation_without_objects_contributes_nothing() {
    let xml = r#"<annotations>
  <annotation>
    <filename>empty.jpg</filename>
    <size><width>10</width><height>10</height><depth>3</depth></size>
  </annotation>
</annotations>"#;

    let records = from_voc_xml_str(xml).expect("parse");
    assert!(records.is_empty());
}

#[test]
fn missing_size_is_an_error() {
    let xml = r#"<annotations>
  <annotation>
    <filename>a.jpg</filename>
    <object><name>cat</name><bndbox><xmin>0</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox></object>
  </annotation>
</annotations>"#;

    let err = from_voc_xml_str(xml).unwrap_err();
    assert!(err.to_string().contains("missing <size>"));
}

#[test]
fn fractional_coordinates_are_rejected() {
    let xml = r#"<annotations>
  <annotation>
    <filename>a.jpg</filename>
    <size><width>10</width><height>10</height></size>
    <object><name>cat</name><bndbox><xmin>0.5</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox></object>
  </annotation>
</annotations>"#;

    assert!(from_voc_xml_str(xml).is_err());
}

#[test]
fn free_text_names_survive_write_and_read() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let records = RecordSet::from_records(vec![
        Record::new(" padded ", 10, 10, " cat ", BBox::new(0, 0, 1, 1)),
        Record::new(" padded ", 10, 10, "", BBox::new(1, 1, 2, 2)),
        Record::new("", 0, 0, "   ", BBox::new(2, 2, 3, 3)),
    ]);

    write_voc_xml(temp.path(), &records).expect("write voc");
    let restored = read_voc_xml(temp.path()).expect("read voc");

    assert_eq!(restored, records);
}
