//! Editor state

use serde::Serialize;

use crate::model::ColumnModel;
use crate::model::ColumnWidth;
use crate::model::RecordId;
use crate::model::RowModel;

const DEFAULT_CARD_TITLE: &str = "Sort Records";

/// Everything the renderer needs to draw the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// A load or save is in flight.
    pub is_loading: bool,
    /// Message of the last failed load.
    pub error_message: Option<String>,
    /// Display label of the child type.
    pub object_label: Option<String>,
    /// Columns, in display order.
    pub columns: Vec<ColumnModel>,
    /// Rows, in current order.
    pub rows: Vec<RowModel>,
}

/// Which of the mutually exclusive views to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// Spinner; hides stale rows and errors.
    Loading,
    /// Inline error panel.
    Error(&'a str),
    /// Loaded, but there are no rows.
    Empty,
    /// The table.
    Table,
}

impl EditorState {
    /// Returns the view to show.
    pub fn view(&self) -> View<'_> {
        if self.is_loading {
            View::Loading
        } else if let Some(message) = &self.error_message {
            View::Error(message)
        } else if self.rows.is_empty() {
            View::Empty
        } else {
            View::Table
        }
    }

    /// Returns `true` if there are rows to show.
    pub fn has_items(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Returns the card title.
    pub fn card_title(&self) -> String {
        match self.object_label.as_deref() {
            Some(label) if !label.is_empty() => format!("Sort {label}"),
            _ => DEFAULT_CARD_TITLE.to_string(),
        }
    }

    /// Returns the width of every column.
    pub fn column_widths(&self) -> Vec<ColumnWidth> {
        self.columns
            .iter()
            .map(|col| ColumnWidth {
                key: col.field_key.clone(),
                width_px: col.effective_width(),
            })
            .collect()
    }

    /// Returns the row ids in current order.
    pub fn ordered_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::model::DEFAULT_COLUMN_WIDTH;
    use crate::model::Value;

    fn row(id: &str) -> RowModel {
        RowModel {
            id: id.into(),
            order_value: Value::Null,
            display_order: 1,
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_loading_hides_everything_else() {
        let state = EditorState {
            is_loading: true,
            error_message: Some("boom".into()),
            rows: vec![row("a1")],
            ..EditorState::default()
        };
        assert_eq!(state.view(), View::Loading);
    }

    #[test]
    fn test_error_hides_stale_rows() {
        let state = EditorState {
            error_message: Some("boom".into()),
            rows: vec![row("a1")],
            ..EditorState::default()
        };
        assert_eq!(state.view(), View::Error("boom"));
    }

    #[test]
    fn test_empty_and_table_views() {
        let mut state = EditorState::default();
        assert_eq!(state.view(), View::Empty);
        state.rows.push(row("a1"));
        assert_eq!(state.view(), View::Table);
        assert!(state.has_items());
    }

    #[test]
    fn test_card_title() {
        let mut state = EditorState::default();
        assert_eq!(state.card_title(), "Sort Records");
        state.object_label = Some("Line Item".into());
        assert_eq!(state.card_title(), "Sort Line Item");
    }

    #[test]
    fn test_column_widths_fall_back_to_default() {
        let state = EditorState {
            columns: vec![
                ColumnModel::new("Name", "Name").with_width(0),
                ColumnModel::new("Amount__c", "Amount").with_width(220),
            ],
            ..EditorState::default()
        };
        let widths = state.column_widths();
        assert_eq!(widths[0].width_px, DEFAULT_COLUMN_WIDTH);
        assert_eq!(widths[1].style(), "width:220px;");
    }

    #[test]
    fn test_snapshot_writes_decimals_as_numbers() {
        let mut amount_row = row("a1");
        amount_row.cells.push(Cell {
            field_key: "Amount__c".into(),
            value: Value::Decimal("1250.5".parse().unwrap()),
        });
        let state = EditorState {
            object_label: Some("Line Item".into()),
            rows: vec![amount_row],
            ..EditorState::default()
        };

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"isLoading":false,"errorMessage":null,"objectLabel":"Line Item","columns":[],"rows":[{"id":"a1","orderValue":null,"displayOrder":1,"cells":[{"fieldKey":"Amount__c","value":1250.5}]}]}"#
        );
    }
}
