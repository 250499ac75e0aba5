//! End-to-end conversion: mapping + row matrix → `INSERT` statements.
//!
//! [`generate_statements`] is the pure pipeline (header split, header
//! indexing, column resolution, formatting, emission). [`execute`] wires it
//! to the command line: it loads the mapping and the source, then either
//! prints a short dry-run preview or writes every statement to the
//! destination. All statements are built before the destination is opened,
//! so a failed run never leaves a partial file behind.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    cli::Cli,
    error::{ImportError, ImportResult},
    header::{self, HeaderIndex},
    io_utils,
    mapping::MappingSpec,
    matrix::{self, LoadOptions, RowMatrix, SheetSelector},
    resolve::{self, ResolutionPlan},
    sql,
};

/// Number of statements shown by a dry run.
pub const DRY_RUN_LIMIT: usize = 5;

/// Builds one statement per data row, optionally stopping after `limit` rows.
pub fn generate_statements(
    mapping: &MappingSpec,
    matrix: &RowMatrix,
    table: &str,
    limit: Option<usize>,
) -> ImportResult<Vec<String>> {
    if table.trim().is_empty() {
        return Err(ImportError::configuration("Table name must not be blank"));
    }
    let (header_row, data_rows) = header::split_at_header(matrix.rows(), mapping.header_row())?;
    let headers = HeaderIndex::from_row(header_row);
    if headers.is_empty() {
        warn!("Header row {} has no column names", mapping.header_row());
    } else {
        debug!("Indexed {} header column(s)", headers.len());
    }
    let plan = ResolutionPlan::new(mapping, &headers);
    let data_rows = match limit {
        Some(limit) => &data_rows[..limit.min(data_rows.len())],
        None => data_rows,
    };
    let resolved = resolve::resolve_rows(&plan, data_rows);
    Ok(sql::emit_statements(
        table,
        &mapping.output_columns(),
        &resolved,
    ))
}

pub fn execute(args: &Cli) -> Result<()> {
    if args.table.trim().is_empty() {
        return Err(ImportError::configuration("--table must not be blank").into());
    }
    info!("Loading: {}", args.input.display());

    let Some(mapping_path) = &args.mapping else {
        return Err(ImportError::configuration(
            "Mapping file must contain a 'columns' section (pass --mapping)",
        )
        .into());
    };
    let mapping = MappingSpec::load(mapping_path)?;
    let options = LoadOptions {
        sheet: SheetSelector::resolve(args.sheet.as_deref(), args.sheet_index)?,
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    let matrix = matrix::load(&args.input, &options)?;

    if args.dry_run {
        let statements =
            generate_statements(&mapping, &matrix, &args.table, Some(DRY_RUN_LIMIT))?;
        println!(
            "Dry run enabled. Showing first {} statement(s):\n",
            statements.len()
        );
        for statement in &statements {
            println!("{statement}");
        }
        return Ok(());
    }

    let statements = generate_statements(&mapping, &matrix, &args.table, None)?;
    info!(
        "Writing {} INSERT statement(s) to {}",
        statements.len(),
        args.sql_file.display()
    );
    write_statements(&args.sql_file, &statements)?;
    info!("SQL file generation complete.");
    Ok(())
}

pub fn write_statements(path: &Path, statements: &[String]) -> Result<()> {
    let mut writer = io_utils::open_output_writer(path)?;
    for statement in statements {
        writeln!(writer, "{statement}").with_context(|| format!("Writing to {path:?}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing output {path:?}"))
}
