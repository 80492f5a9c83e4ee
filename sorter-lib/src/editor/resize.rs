//! Column resize session

use crate::model::ColumnModel;
use crate::model::MIN_COLUMN_WIDTH;

use super::capture::CaptureGuard;

/// An in-progress column-width drag.
///
/// Holds the viewport listener registration for as long as it lives.
#[derive(Debug)]
pub(crate) struct ResizeSession {
    /// Index of the column being resized.
    pub index: usize,
    /// Pointer x at the start of the drag.
    pub start_x: i32,
    /// Column width at the start of the drag.
    pub start_width: u32,
    _capture: CaptureGuard,
}

impl ResizeSession {
    pub fn new(index: usize, start_x: i32, start_width: u32, capture: CaptureGuard) -> Self {
        Self {
            index,
            start_x,
            start_width,
            _capture: capture,
        }
    }

    /// Width implied by the pointer being at `pointer_x`, floored at the minimum.
    pub fn width_at(&self, pointer_x: i32) -> u32 {
        let delta = i64::from(pointer_x) - i64::from(self.start_x);
        let width = (i64::from(self.start_width) + delta).max(i64::from(MIN_COLUMN_WIDTH));
        u32::try_from(width).unwrap_or(u32::MAX)
    }
}

/// Returns a new column sequence where only `index` has the given width.
pub fn with_column_width(columns: &[ColumnModel], index: usize, width_px: u32) -> Vec<ColumnModel> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, col)| if idx == index { col.with_width(width_px) } else { col.clone() })
        .collect()
}
