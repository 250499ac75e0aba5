use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert CSV and spreadsheet rows into SQL INSERT statements",
    long_about = None
)]
pub struct Cli {
    /// Input file (.csv/.tsv are read as delimited text, anything else as a spreadsheet)
    pub input: PathBuf,
    /// Destination .sql file ('-' writes to stdout)
    #[arg(long = "sql-file")]
    pub sql_file: PathBuf,
    /// Target table name, emitted verbatim
    #[arg(long)]
    pub table: String,
    /// JSON or YAML column mapping (defaults to one column per header)
    #[arg(long)]
    pub mapping: Option<PathBuf>,
    /// Worksheet name; takes precedence over --sheet-index
    #[arg(long)]
    pub sheet: Option<String>,
    /// 1-based worksheet index (defaults to the first sheet)
    #[arg(long = "sheet-index")]
    pub sheet_index: Option<usize>,
    /// Print the first few statements instead of writing the SQL file
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// Delimiter for delimited text (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
