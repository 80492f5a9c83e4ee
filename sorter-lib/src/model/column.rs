//! Column model

use serde::Serialize;

/// Width below which a column cannot be resized.
pub const MIN_COLUMN_WIDTH: u32 = 80;

/// Width given to columns that have no recorded width.
pub const DEFAULT_COLUMN_WIDTH: u32 = 140;

/// One displayed field of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnModel {
    /// Field spec the column displays.
    pub field_key: String,
    /// Header label.
    pub label: String,
    /// Current width in pixels.
    pub width_px: u32,
}

impl ColumnModel {
    /// Creates a column with the default width.
    pub fn new(field_key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            label: label.into(),
            width_px: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Returns a copy of this column with a different width.
    pub fn with_width(&self, width_px: u32) -> Self {
        Self {
            width_px,
            ..self.clone()
        }
    }

    /// Returns the recorded width, or the default if none was recorded.
    pub fn effective_width(&self) -> u32 {
        if self.width_px == 0 {
            DEFAULT_COLUMN_WIDTH
        } else {
            self.width_px
        }
    }
}

/// Width of one column, as the renderer consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWidth {
    /// Field spec of the column.
    pub key: String,
    /// Width in pixels.
    pub width_px: u32,
}

impl ColumnWidth {
    /// Returns the inline style the host applies to the column.
    pub fn style(&self) -> String {
        format!("width:{}px;", self.width_px)
    }
}
