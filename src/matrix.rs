//! Row matrix loading.
//!
//! Turns a delimited-text file or a spreadsheet sheet into a [`RowMatrix`]:
//! a rectangular grid of [`CellValue`]s. Rows from either source are padded
//! with [`CellValue::Null`] to the widest row seen, so positional lookups
//! never fall off the end of a short row.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, NaiveTime};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    data::CellValue,
    error::{ImportError, ImportResult},
    io_utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Delimited,
    Spreadsheet,
}

impl SourceKind {
    pub fn detect(path: &Path) -> Self {
        if io_utils::is_delimited_path(path) {
            SourceKind::Delimited
        } else {
            SourceKind::Spreadsheet
        }
    }
}

/// Which sheet of a workbook to read. Indexes are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    Name(String),
    Index(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(1)
    }
}

impl SheetSelector {
    /// A sheet name takes precedence over an index; with neither, the first sheet is used.
    pub fn resolve(name: Option<&str>, index: Option<usize>) -> ImportResult<Self> {
        if let Some(name) = name {
            return Ok(SheetSelector::Name(name.to_string()));
        }
        match index {
            Some(0) => Err(ImportError::configuration(
                "Sheet index must be 1 or greater",
            )),
            Some(n) => Ok(SheetSelector::Index(n)),
            None => Ok(SheetSelector::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub sheet: SheetSelector,
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            sheet: SheetSelector::default(),
            delimiter: None,
            encoding: encoding_rs::UTF_8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMatrix {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl RowMatrix {
    /// Pads every row to the widest row's length.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }
        RowMatrix { rows, width }
    }

    /// Keeps only rows holding at least one non-blank cell.
    pub fn from_range(range: &Range<Data>) -> Self {
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.is_blank()))
            .collect();
        Self::from_rows(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

pub fn load(path: &Path, options: &LoadOptions) -> ImportResult<RowMatrix> {
    if !path.exists() {
        return Err(ImportError::source_read(format!(
            "Source file {path:?} not found"
        )));
    }
    let matrix = match SourceKind::detect(path) {
        SourceKind::Delimited => load_delimited(path, options)?,
        SourceKind::Spreadsheet => load_spreadsheet(path, &options.sheet)?,
    };
    info!(
        "Loaded {} row(s) x {} column(s) from {:?}",
        matrix.row_count(),
        matrix.width(),
        path
    );
    Ok(matrix)
}

fn load_delimited(path: &Path, options: &LoadOptions) -> ImportResult<RowMatrix> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    debug!(
        "Reading delimited text with delimiter '{}' and encoding {}",
        crate::printable_delimiter(delimiter),
        options.encoding.name()
    );
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|err| {
            ImportError::source_read(format!("Reading record {} of {path:?}: {err}", idx + 1))
        })?;
        let fields = io_utils::decode_record(&record, options.encoding)?;
        rows.push(fields.into_iter().map(CellValue::Text).collect());
    }
    Ok(RowMatrix::from_rows(rows))
}

fn load_spreadsheet(path: &Path, selector: &SheetSelector) -> ImportResult<RowMatrix> {
    let mut workbook = open_workbook_auto(path).map_err(|err| {
        ImportError::source_read(format!("Opening workbook {path:?}: {err}"))
    })?;
    let sheet_names = workbook.sheet_names();
    let sheet_name = select_sheet(&sheet_names, selector)?;
    debug!("Reading sheet '{sheet_name}' from {path:?}");
    let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
        ImportError::source_read(format!("Reading sheet '{sheet_name}' of {path:?}: {err}"))
    })?;
    Ok(RowMatrix::from_range(&range))
}

fn select_sheet(sheet_names: &[String], selector: &SheetSelector) -> ImportResult<String> {
    match selector {
        SheetSelector::Name(name) => sheet_names
            .iter()
            .find(|candidate| *candidate == name)
            .or_else(|| {
                sheet_names
                    .iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .cloned()
            .ok_or_else(|| ImportError::source_read(format!("Sheet '{name}' not found"))),
        SheetSelector::Index(index) => index
            .checked_sub(1)
            .and_then(|idx| sheet_names.get(idx))
            .cloned()
            .ok_or_else(|| {
                ImportError::source_read(format!(
                    "Sheet index {index} not found (workbook has {} sheet(s))",
                    sheet_names.len()
                ))
            }),
    }
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Text(i.to_string()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Text(format_datetime(&value)),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

fn format_datetime(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
