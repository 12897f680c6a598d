//! Rendering ranked results as CSV-shaped tables.

use crate::error::{ExtractError, Result};
use crate::types::{OutputTable, Ranked, RankedList};

/// Build the output table for a set of ranked results.
pub fn build_table(ranked: &Ranked) -> OutputTable {
    match ranked {
        Ranked::Global(list) => global_table(list),
        Ranked::PerColumn(columns) => per_column_table(columns),
    }
}

/// One `[word, count]` row per entry, no header.
pub fn global_table(ranked: &RankedList) -> OutputTable {
    OutputTable {
        header: None,
        rows: ranked
            .iter()
            .map(|(word, count)| vec![word.clone(), count.to_string()])
            .collect(),
    }
}

/// A `column_1..column_N` header followed by `word:count` cells, rank by rank.
///
/// Columns with fewer entries than the longest one are padded with empty
/// cells, so every row has exactly one cell per column. With no columns at
/// all the table is empty.
pub fn per_column_table(columns: &[RankedList]) -> OutputTable {
    if columns.is_empty() {
        return OutputTable::default();
    }

    let header = (1..=columns.len())
        .map(|n| format!("column_{n}"))
        .collect();

    let max_len = columns.iter().map(Vec::len).max().unwrap_or(0);
    let rows = (0..max_len)
        .map(|rank| {
            columns
                .iter()
                .map(|list| {
                    list.get(rank)
                        .map(|(word, count)| composite_cell(word, *count))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    OutputTable {
        header: Some(header),
        rows,
    }
}

/// Render a `word:count` cell.
pub fn composite_cell(word: &str, count: usize) -> String {
    format!("{word}:{count}")
}

/// Split a `word:count` cell. The count follows the last colon.
pub fn parse_composite_cell(cell: &str) -> Option<(&str, usize)> {
    let (word, count) = cell.rsplit_once(':')?;
    Some((word, count.parse().ok()?))
}

/// Encode a table as UTF-8 CSV with standard quoting.
pub fn to_csv_bytes(table: &OutputTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for record in table.records() {
        writer
            .write_record(record)
            .map_err(|e| ExtractError::Encode(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExtractError::Encode(e.to_string()))
}

/// Encode a table as a CSV string.
pub fn to_csv_string(table: &OutputTable) -> Result<String> {
    let bytes = to_csv_bytes(table)?;
    String::from_utf8(bytes).map_err(|e| ExtractError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(entries: &[(&str, usize)]) -> RankedList {
        entries.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_global_table_rows() {
        let table = global_table(&list(&[("dogs", 2), ("cats", 1)]));
        assert_eq!(table.header, None);
        assert_eq!(
            table.rows,
            vec![
                vec!["dogs".to_string(), "2".to_string()],
                vec!["cats".to_string(), "1".to_string()],
            ]
        );
        assert_eq!(to_csv_string(&table).unwrap(), "dogs,2\ncats,1\n");
    }

    #[test]
    fn test_per_column_table_is_padded() {
        let columns = vec![
            list(&[("apple", 2)]),
            list(&[("orange", 1), ("banana", 1)]),
        ];
        let table = per_column_table(&columns);

        assert_eq!(
            to_csv_string(&table).unwrap(),
            "column_1,column_2\napple:2,orange:1\n,banana:1\n"
        );
        for row in &table.rows {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn test_per_column_without_words_has_header_only() {
        let table = per_column_table(&[vec![], vec![]]);
        assert_eq!(to_csv_string(&table).unwrap(), "column_1,column_2\n");
    }

    #[test]
    fn test_no_columns_is_empty() {
        let table = per_column_table(&[]);
        assert!(table.is_empty());
        assert_eq!(to_csv_string(&table).unwrap(), "");
    }

    #[test]
    fn test_fields_are_quoted() {
        let table = global_table(&list(&[("say \"cheese\"", 3), ("multi\nline", 1)]));
        assert_eq!(
            to_csv_string(&table).unwrap(),
            "\"say \"\"cheese\"\"\",3\n\"multi\nline\",1\n"
        );
    }

    #[test]
    fn test_parse_composite_cell() {
        assert_eq!(parse_composite_cell("apple:2"), Some(("apple", 2)));
        assert_eq!(parse_composite_cell("http://site:7"), Some(("http://site", 7)));
        assert_eq!(parse_composite_cell(""), None);
        assert_eq!(parse_composite_cell("apple:x"), None);
    }
}
