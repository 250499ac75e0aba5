//! SQL literal formatting and `INSERT` statement assembly.
//!
//! Statements are dialect-agnostic: identifiers are emitted verbatim and every
//! non-blank value becomes a single-quoted string literal with embedded quotes
//! doubled. Blank or missing values become an unquoted `NULL`.

use std::borrow::Cow;

use itertools::Itertools;

use crate::{data::CellValue, resolve::Resolved};

pub const NULL_LITERAL: &str = "NULL";

pub fn format_literal(value: Resolved<'_>) -> Cow<'static, str> {
    match value.and_then(CellValue::trimmed_text) {
        Some(text) => Cow::Owned(quote(&text)),
        None => Cow::Borrowed(NULL_LITERAL),
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            quoted.push('\'');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

pub fn build_insert<S, V>(table: &str, columns: &[S], values: &[V]) -> String
where
    S: AsRef<str>,
    V: AsRef<str>,
{
    format!(
        "INSERT INTO {table} ({}) VALUES ({});",
        columns.iter().map(|item| item.as_ref()).join(", "),
        values.iter().map(|item| item.as_ref()).join(", ")
    )
}

/// One statement per resolved row, in row order.
pub fn emit_statements<S>(table: &str, columns: &[S], rows: &[Vec<Resolved<'_>>]) -> Vec<String>
where
    S: AsRef<str>,
{
    rows.iter()
        .map(|row| {
            let values = row
                .iter()
                .map(|value| format_literal(*value))
                .collect::<Vec<_>>();
            build_insert(table, columns, &values)
        })
        .collect()
}
