//! Row model

use serde::Serialize;

use super::ColumnModel;
use super::RecordId;
use super::SourceRecord;
use super::Value;

/// One resolved cell of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Field spec of the column the cell belongs to.
    pub field_key: String,
    /// Resolved value; unresolvable specs hold [`Value::empty`].
    pub value: Value,
}

/// One child record as shown in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowModel {
    /// Stable identity; the only field sent back on save.
    pub id: RecordId,
    /// Sort value as delivered by the source.
    pub order_value: Value,
    /// 1-based position in the current sequence.
    pub display_order: usize,
    /// Cells aligned to the column order.
    pub cells: Vec<Cell>,
}

impl RowModel {
    /// Builds a row from a source record.
    pub fn from_record(
        id: RecordId,
        record: &SourceRecord,
        order_field: &str,
        columns: &[ColumnModel],
        display_order: usize,
    ) -> Self {
        Self {
            id,
            order_value: record.resolve(order_field),
            display_order,
            cells: columns
                .iter()
                .map(|col| Cell {
                    field_key: col.field_key.clone(),
                    value: record.resolve(&col.field_key),
                })
                .collect(),
        }
    }

    /// Returns the cell for a field spec.
    pub fn cell(&self, field_key: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.field_key == field_key)
    }
}

/// Rewrites `display_order` so rows are numbered 1..=n in sequence order.
pub fn renumber(rows: Vec<RowModel>) -> Vec<RowModel> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| RowModel {
            display_order: idx + 1,
            ..row
        })
        .collect()
}
