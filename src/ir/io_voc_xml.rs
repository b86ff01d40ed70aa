//! Pascal VOC XML reader and writer.
//!
//! Unlike the one-file-per-image VOC layout, this layout keeps the whole
//! dataset in a single `markup.xml` whose `<annotations>` root holds one
//! `<annotation>` per image:
//!
//! ```text
//! <annotations>
//!   <annotation>
//!     <folder>images</folder>
//!     <filename>img1.jpg</filename>
//!     <path>/out/images/img1.jpg</path>
//!     <source><database>ORI_Markup</database></source>
//!     <size><width>300</width><height>200</height><depth>3</depth></size>
//!     <segmented>0</segmented>
//!     <object>
//!       <name>cat</name><pose>Unspecified</pose>
//!       <truncated>0</truncated><difficult>0</difficult>
//!       <bndbox><xmin>10</xmin><ymin>10</ymin><xmax>50</xmax><ymax>60</ymax></bndbox>
//!     </object>
//!   </annotation>
//! </annotations>
//! ```

use std::fmt::{self, Write as _};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::error;
use roxmltree::Node;

use super::layout::{image_file_name, image_id, image_path, IMAGES_DIR, VOC_FILE};
use super::model::{ImageGroup, Record, RecordSet};
use super::BBox;
use crate::error::MarkupError;

/// Value of `<source><database>` in written documents.
pub const DATABASE_NAME: &str = "ORI_Markup";
/// Channel count written to `<depth>`; the IR does not track it.
pub const IMAGE_DEPTH: u32 = 3;

/// Reads `markup.xml` from the dataset rooted at `path`.
///
/// A missing `markup.xml` is logged and yields an empty record set.
///
/// # Errors
/// Returns an error if the document is not well-formed XML or any
/// `<annotation>` lacks a mandatory element (`filename`, `size/width`,
/// `size/height`, `object/name`, or a `bndbox` coordinate).
pub fn read_voc_xml(path: &Path) -> Result<RecordSet, MarkupError> {
    let xml_path = path.join(VOC_FILE);
    let xml = match fs::read_to_string(&xml_path) {
        Ok(xml) => xml,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            error!("Missing required file: {}", xml_path.display());
            return Ok(RecordSet::new());
        }
        Err(err) => return Err(MarkupError::Io(err)),
    };

    parse_voc_xml_str(&xml, &xml_path)
}

/// Writes `records` as `markup.xml` under `path`.
///
/// `<path>` elements point at `<path>/images/<filename>.jpg`.
pub fn write_voc_xml(path: &Path, records: &RecordSet) -> Result<(), MarkupError> {
    let xml_path = path.join(VOC_FILE);
    let xml = render_voc_xml(records, path).map_err(|_| MarkupError::VocWriteError {
        path: xml_path.clone(),
        message: "failed to format XML document".to_string(),
    })?;

    fs::write(&xml_path, xml).map_err(MarkupError::Io)
}

/// Parses a VOC document from a UTF-8 string.
///
/// Useful for testing and fuzzing without file I/O.
pub fn from_voc_xml_str(xml: &str) -> Result<RecordSet, MarkupError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parses a VOC document from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<RecordSet, MarkupError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| MarkupError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

/// Renders `records` as a VOC document string.
///
/// `output_root` is the dataset root used to build `<path>` elements.
pub fn to_voc_xml_string(records: &RecordSet, output_root: &Path) -> Result<String, MarkupError> {
    render_voc_xml(records, output_root).map_err(|_| MarkupError::VocWriteError {
        path: PathBuf::from("<string>"),
        message: "failed to format XML document".to_string(),
    })
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<RecordSet, MarkupError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| MarkupError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let root = document.root_element();
    let annotations: Vec<Node<'_, '_>> = match root.tag_name().name() {
        "annotation" => vec![root],
        _ => root
            .children()
            .filter(|node| node.is_element() && node.tag_name().name() == "annotation")
            .collect(),
    };

    let mut records = Vec::new();
    for annotation in annotations {
        parse_annotation(annotation, path, &mut records)?;
    }

    Ok(RecordSet::from_records(records))
}

fn parse_annotation(
    annotation: Node<'_, '_>,
    path: &Path,
    records: &mut Vec<Record>,
) -> Result<(), MarkupError> {
    let raw_filename = required_child_verbatim(annotation, "filename", path, "<annotation>")?;
    let filename = image_id(&raw_filename);

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required_u32(size, "width", path, "<size>")?;
    let height = parse_required_u32(size, "height", path, "<size>")?;

    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_verbatim(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let bbox = BBox::new(
            parse_required_coord(bndbox, "xmin", path)?,
            parse_required_coord(bndbox, "ymin", path)?,
            parse_required_coord(bndbox, "xmax", path)?,
            parse_required_coord(bndbox, "ymax", path)?,
        );

        records.push(Record::new(filename, width, height, name, bbox));
    }

    Ok(())
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, MarkupError> {
    child_element(node, tag).ok_or_else(|| MarkupError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, MarkupError> {
    optional_child_text(node, tag).ok_or_else(|| MarkupError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

/// Free-text element content, untrimmed. A present but empty element is `""`.
fn required_child_verbatim(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, MarkupError> {
    let child = required_child_element(node, tag, path, context)?;
    Ok(child.text().unwrap_or_default().to_owned())
}

fn parse_required_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, MarkupError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u32>().map_err(|_| MarkupError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
    })
}

/// Coordinates are integers; `12.0` is accepted, `12.5` is not.
fn parse_required_coord(node: Node<'_, '_>, tag: &str, path: &Path) -> Result<i64, MarkupError> {
    let raw = required_child_text(node, tag, path, "<bndbox>")?;
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(MarkupError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!("invalid <{tag}> value '{raw}' in <bndbox>; expected an integer"),
        }),
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn render_voc_xml(records: &RecordSet, output_root: &Path) -> Result<String, fmt::Error> {
    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
    writeln!(xml, "<annotations>")?;
    for group in records.groups() {
        render_annotation(&mut xml, &group, output_root)?;
    }
    writeln!(xml, "</annotations>")?;

    Ok(xml)
}

fn render_annotation(
    xml: &mut String,
    group: &ImageGroup<'_>,
    output_root: &Path,
) -> fmt::Result {
    let file_name = image_file_name(group.filename);
    let full_path = image_path(output_root, group.filename);

    writeln!(xml, "  <annotation>")?;
    writeln!(xml, "    <folder>{IMAGES_DIR}</folder>")?;
    writeln!(xml, "    <filename>{}</filename>", xml_escape(&file_name))?;
    writeln!(
        xml,
        "    <path>{}</path>",
        xml_escape(&full_path.to_string_lossy())
    )?;
    writeln!(xml, "    <source>")?;
    writeln!(xml, "      <database>{DATABASE_NAME}</database>")?;
    writeln!(xml, "    </source>")?;
    writeln!(xml, "    <size>")?;
    writeln!(xml, "      <width>{}</width>", group.width)?;
    writeln!(xml, "      <height>{}</height>", group.height)?;
    writeln!(xml, "      <depth>{IMAGE_DEPTH}</depth>")?;
    writeln!(xml, "    </size>")?;
    writeln!(xml, "    <segmented>0</segmented>")?;

    for record in group.records {
        writeln!(xml, "    <object>")?;
        writeln!(xml, "      <name>{}</name>", xml_escape(&record.label))?;
        writeln!(xml, "      <pose>Unspecified</pose>")?;
        writeln!(xml, "      <truncated>0</truncated>")?;
        writeln!(xml, "      <difficult>0</difficult>")?;
        writeln!(xml, "      <bndbox>")?;
        writeln!(xml, "        <xmin>{}</xmin>", record.bbox.x_min)?;
        writeln!(xml, "        <ymin>{}</ymin>", record.bbox.y_min)?;
        writeln!(xml, "        <xmax>{}</xmax>", record.bbox.x_max)?;
        writeln!(xml, "        <ymax>{}</ymax>", record.bbox.y_max)?;
        writeln!(xml, "      </bndbox>")?;
        writeln!(xml, "    </object>")?;
    }

    writeln!(xml, "  </annotation>")
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
