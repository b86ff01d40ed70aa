//! On-disk naming shared by the readers and writers.

use std::path::{Path, PathBuf};

/// Directory holding the image files of every layout.
pub const IMAGES_DIR: &str = "images";
/// Directory holding per-image JSON files of the internal layout.
pub const MARKUP_DIR: &str = "markup";
/// Label inventory file of the internal layout.
pub const META_FILE: &str = "meta.json";
/// Table file of the internalCSV layout.
pub const CSV_FILE: &str = "markup.csv";
/// Document file of the pascalVOC layout.
pub const VOC_FILE: &str = "markup.xml";
/// Extension assumed for every image.
pub const IMAGE_EXTENSION: &str = "jpg";

/// `images/<filename>.jpg`, relative to the dataset root.
pub fn relative_image_path(filename: &str) -> String {
    format!("{IMAGES_DIR}/{}", image_file_name(filename))
}

/// `<filename>.jpg`.
pub fn image_file_name(filename: &str) -> String {
    format!("{filename}.{IMAGE_EXTENSION}")
}

/// `<root>/images/<filename>.jpg`.
pub fn image_path(root: &Path, filename: &str) -> PathBuf {
    root.join(IMAGES_DIR).join(image_file_name(filename))
}

/// Turns `dir/sub/name.ext` into `name`.
///
/// Only the last extension is removed, so `a.b.jpg` becomes `a.b`.
pub fn image_id(raw: &str) -> &str {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match base.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => base,
    }
}
