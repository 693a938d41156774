use crate::models::{CellValue, Record};

/// Zips each row against the header by position.
///
/// Cells past the header are dropped, missing cells become `""`.
pub fn project_records(header: &[String], rows: &[Vec<CellValue>]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            let mut record = Record::with_capacity(header.len());
            for (idx, label) in header.iter().enumerate() {
                let value = match row.get(idx) {
                    Some(cell) if !cell.is_empty() => cell.clone(),
                    _ => CellValue::Text(String::new()),
                };
                record.insert(label.clone(), value);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_empty_cells_become_empty_strings() {
        let rows = vec![vec![CellValue::Int(1), CellValue::Empty]];
        let records = project_records(&header(&["Код", "Назва"]), &rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Код"), Some(&CellValue::Int(1)));
        assert_eq!(records[0].get("Назва"), Some(&text("")));
    }

    #[test]
    fn test_short_rows_are_filled_and_long_rows_truncated() {
        let rows = vec![
            vec![text("a")],
            vec![text("b"), text("c"), text("extra")],
        ];
        let records = project_records(&header(&["x", "y"]), &rows);

        assert_eq!(records[0].get("y"), Some(&text("")));
        assert_eq!(records[1].keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(records[1].get("y"), Some(&text("c")));
    }

    #[test]
    fn test_keys_follow_header_order() {
        let rows = vec![vec![text("1"), text("2"), text("3")]];
        let records = project_records(&header(&["c", "a", "b"]), &rows);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_rows_no_records() {
        assert!(project_records(&header(&["a"]), &[]).is_empty());
    }
}
