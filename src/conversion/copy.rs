//! Image directory duplication.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{info, warn};
use walkdir::WalkDir;

use crate::error::MarkupError;
use crate::ir::layout::IMAGES_DIR;

/// What [`copy_images`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Files copied.
    pub files: usize,
    /// False when the input dataset had no `images/` directory.
    pub source_found: bool,
}

/// Copies `<input_root>/images` to `<output_root>/images` recursively.
///
/// Any existing `<output_root>/images` is removed first. A missing source
/// directory is logged and leaves the output untouched.
pub fn copy_images(
    input_root: &Path,
    output_root: &Path,
    progress: &ProgressBar,
) -> Result<CopySummary, MarkupError> {
    let source = input_root.join(IMAGES_DIR);
    let target = output_root.join(IMAGES_DIR);

    if !source.is_dir() {
        warn!("No image directory at {}; skipping image copy", source.display());
        return Ok(CopySummary::default());
    }

    if target.exists() {
        fs::remove_dir_all(&target).map_err(MarkupError::Io)?;
    }
    fs::create_dir_all(&target).map_err(MarkupError::Io)?;

    let entries = collect_entries(&source)?;
    let file_count = entries.iter().filter(|(_, is_dir)| !is_dir).count();
    progress.set_length(file_count as u64);

    let mut files = 0usize;
    for (rel_path, is_dir) in entries {
        let destination = target.join(&rel_path);
        if is_dir {
            fs::create_dir_all(&destination).map_err(MarkupError::Io)?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(MarkupError::Io)?;
        }
        fs::copy(source.join(&rel_path), &destination).map_err(MarkupError::Io)?;
        files += 1;
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Copied {} image file(s) to {}", files, target.display());

    Ok(CopySummary {
        files,
        source_found: true,
    })
}

/// Lists everything under `root` as (relative path, is_dir), parents first.
fn collect_entries(root: &Path) -> Result<Vec<(PathBuf, bool)>, MarkupError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| MarkupError::Io(source.into()))?;
        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        entries.push((rel_path, entry.file_type().is_dir()));
    }

    Ok(entries)
}
