use std::collections::HashMap;

use crate::{
    data::CellValue,
    error::{ImportError, ImportResult},
};

/// Case-insensitive header name to zero-based column index lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Indexes a header row left to right. Blank cells are skipped and a
    /// repeated name points at its last occurrence.
    pub fn from_row(row: &[CellValue]) -> Self {
        let mut by_name = HashMap::new();
        for (idx, cell) in row.iter().enumerate() {
            if let Some(name) = cell.trimmed_text() {
                by_name.insert(fold_name(&name), idx);
            }
        }
        HeaderIndex { by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.by_name.get(&fold_name(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Splits rows into the 1-based `header_row` and the data rows after it.
pub fn split_at_header(
    rows: &[Vec<CellValue>],
    header_row: usize,
) -> ImportResult<(&[CellValue], &[Vec<CellValue>])> {
    if header_row < 1 || header_row > rows.len() {
        return Err(ImportError::configuration(format!(
            "header_row {header_row} is out of range. Source has only {} row(s).",
            rows.len()
        )));
    }
    let header = &rows[header_row - 1];
    Ok((header.as_slice(), &rows[header_row..]))
}
