//! Image dimension lookup.
//!
//! Only the image header is decoded; pixel data is never touched.

use std::path::Path;

use log::error;

use crate::error::MarkupError;

/// Reads `(width, height)` from an image file's header.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), MarkupError> {
    let size = imagesize::size(path).map_err(|source| MarkupError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size
        .width
        .try_into()
        .map_err(|_| MarkupError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("image width {} does not fit in u32", size.width),
        })?;

    let height: u32 = size
        .height
        .try_into()
        .map_err(|_| MarkupError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("image height {} does not fit in u32", size.height),
        })?;

    Ok((width, height))
}

/// Like [`read_image_dimensions`], but logs failures and returns `(0, 0)`.
pub fn dimensions_or_unknown(path: &Path) -> (u32, u32) {
    match read_image_dimensions(path) {
        Ok(dims) => dims,
        Err(err) => {
            error!("{err}");
            (0, 0)
        }
    }
}
