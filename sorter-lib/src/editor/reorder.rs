//! Row reordering

use crate::model::RowModel;
use crate::model::renumber;

/// Moves the row at `from` so it sits at `to` in the resulting sequence.
///
/// The row is removed first and then inserted into the shortened sequence;
/// a `to` past the end appends. Display orders are renumbered from 1.
/// Returns `None` when nothing moves (`from == to` or `from` out of range).
pub fn move_row(rows: &[RowModel], from: usize, to: usize) -> Option<Vec<RowModel>> {
    if from == to || from >= rows.len() {
        return None;
    }
    let mut items = rows.to_vec();
    let moved = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, moved);
    Some(renumber(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn rows(ids: &[&str]) -> Vec<RowModel> {
        renumber(
            ids.iter()
                .map(|id| RowModel {
                    id: (*id).into(),
                    order_value: Value::Null,
                    display_order: 0,
                    cells: Vec::new(),
                })
                .collect(),
        )
    }

    fn ids(rows: &[RowModel]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    fn orders(rows: &[RowModel]) -> Vec<usize> {
        rows.iter().map(|r| r.display_order).collect()
    }

    #[test]
    fn test_move_up() {
        let moved = move_row(&rows(&["A", "B", "C", "D"]), 2, 0).unwrap();
        assert_eq!(ids(&moved), vec!["C", "A", "B", "D"]);
        assert_eq!(orders(&moved), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_move_down_inserts_into_shortened_list() {
        let moved = move_row(&rows(&["A", "B", "C", "D"]), 0, 2).unwrap();
        assert_eq!(ids(&moved), vec!["B", "C", "A", "D"]);
        let moved = move_row(&rows(&["A", "B", "C", "D"]), 1, 3).unwrap();
        assert_eq!(ids(&moved), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn test_target_past_end_appends() {
        let moved = move_row(&rows(&["A", "B", "C"]), 0, 10).unwrap();
        assert_eq!(ids(&moved), vec!["B", "C", "A"]);
        assert_eq!(orders(&moved), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_move() {
        let list = rows(&["A", "B"]);
        assert!(move_row(&list, 1, 1).is_none());
        assert!(move_row(&list, 5, 0).is_none());
    }

    #[test]
    fn test_every_pair_matches_remove_then_insert() {
        let list = rows(&["A", "B", "C", "D", "E"]);
        for from in 0..list.len() {
            for to in 0..list.len() {
                if from == to {
                    continue;
                }
                let mut expected = ids(&list);
                let item = expected.remove(from);
                expected.insert(to, item);

                let moved = move_row(&list, from, to).unwrap();
                assert_eq!(ids(&moved), expected, "from {from} to {to}");
                assert_eq!(orders(&moved), vec![1, 2, 3, 4, 5]);
            }
        }
    }
}
