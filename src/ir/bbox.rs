//! Bounding box type in canonical XYXY pixel format.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in absolute pixel coordinates
/// (x_min, y_min, x_max, y_max).
///
/// Note: This type does NOT enforce that min <= max. Boxes are carried
/// through conversions exactly as they were read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Returns true if min <= max on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
}
