//! Column mapping model.
//!
//! A mapping declares the output columns of the generated statements, in
//! order, and for each one the candidate input columns to read from plus an
//! optional default. Mappings are read from JSON, or YAML when the file ends
//! in `.yaml`/`.yml`:
//!
//! ```json
//! {
//!   "header_row": 1,
//!   "columns": {
//!     "name":   { "sources": ["First", "Name"] },
//!     "status": { "sources": ["Status"], "default": "unknown" }
//!   }
//! }
//! ```
//!
//! Field names are matched case-insensitively and `headerRow` is accepted as
//! an alias of `header_row`.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

use crate::{
    data::CellValue,
    error::{ImportError, ImportResult},
};

/// Header row used when the mapping does not configure one.
pub const DEFAULT_HEADER_ROW: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub sources: Vec<String>,
    /// `None` when no default is configured; `Some(CellValue::Null)` for an explicit `null`.
    pub default: Option<CellValue>,
}

impl ColumnSpec {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSpec {
            sources: sources.into_iter().map(Into::into).collect(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<CellValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingSpec {
    header_row: Option<usize>,
    columns: IndexMap<String, ColumnSpec>,
}

#[derive(Debug, Deserialize)]
struct RawMapping {
    #[serde(default)]
    header_row: Option<i64>,
    #[serde(default)]
    columns: Option<IndexMap<String, Option<RawColumn>>>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    default: Option<JsonValue>,
}

// Keeps an explicit `null` as `Some(Value::Null)` so it stays distinguishable from an absent key.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl MappingSpec {
    pub fn new(
        header_row: Option<usize>,
        columns: IndexMap<String, ColumnSpec>,
    ) -> ImportResult<Self> {
        if let Some(row) = header_row {
            validate_header_row(row as i64)?;
        }
        if columns.is_empty() {
            return Err(ImportError::configuration(
                "Mapping must contain a non-empty 'columns' section",
            ));
        }
        Ok(MappingSpec {
            header_row,
            columns,
        })
    }

    pub fn load(path: &Path) -> ImportResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            ImportError::configuration(format!("Unable to read mapping file {path:?}: {err}"))
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
        );
        if is_yaml {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }

    pub fn from_json_str(input: &str) -> ImportResult<Self> {
        let value: JsonValue = serde_json::from_str(input)
            .map_err(|err| ImportError::configuration(format!("Invalid mapping JSON: {err}")))?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(input: &str) -> ImportResult<Self> {
        let value: JsonValue = serde_yaml::from_str(input)
            .map_err(|err| ImportError::configuration(format!("Invalid mapping YAML: {err}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: JsonValue) -> ImportResult<Self> {
        let normalized = normalize_mapping_keys(value)?;
        let raw: RawMapping = serde_json::from_value(normalized)
            .map_err(|err| ImportError::configuration(format!("Invalid mapping: {err}")))?;

        let header_row = raw.header_row.map(validate_header_row).transpose()?;

        let raw_columns = raw.columns.unwrap_or_default();
        let mut columns = IndexMap::with_capacity(raw_columns.len());
        for (name, column) in raw_columns {
            let Some(sources) = column.as_ref().and_then(|c| c.sources.clone()) else {
                return Err(ImportError::configuration(format!(
                    "Column '{name}' must contain a 'sources' list"
                )));
            };
            let default = column
                .and_then(|c| c.default)
                .map(|value| default_to_cell(&name, value))
                .transpose()?;
            columns.insert(name, ColumnSpec { sources, default });
        }

        Self::new(header_row, columns)
    }

    /// The effective 1-based header row.
    pub fn header_row(&self) -> usize {
        self.header_row.unwrap_or(DEFAULT_HEADER_ROW)
    }

    pub fn configured_header_row(&self) -> Option<usize> {
        self.header_row
    }

    pub fn columns(&self) -> &IndexMap<String, ColumnSpec> {
        &self.columns
    }

    pub fn output_columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }
}

fn validate_header_row(row: i64) -> ImportResult<usize> {
    if row < 1 {
        return Err(ImportError::configuration(format!(
            "header_row must be 1 or greater (got {row})"
        )));
    }
    usize::try_from(row)
        .map_err(|_| ImportError::configuration(format!("header_row {row} is too large")))
}

fn default_to_cell(column: &str, value: JsonValue) -> ImportResult<CellValue> {
    match value {
        JsonValue::Null => Ok(CellValue::Null),
        JsonValue::String(s) => Ok(CellValue::Text(s)),
        JsonValue::Bool(b) => Ok(CellValue::Boolean(b)),
        // Keeps the payload's own digits, so `1.50` is not rewritten as `1.5`.
        JsonValue::Number(n) => Ok(CellValue::Text(n.to_string())),
        JsonValue::Array(_) | JsonValue::Object(_) => Err(ImportError::configuration(format!(
            "Default for column '{column}' must be a string, number, boolean, or null"
        ))),
    }
}

/// Folds case variants and the `headerRow` alias into the canonical field
/// names. When both header row spellings appear, the later one wins.
fn normalize_mapping_keys(value: JsonValue) -> ImportResult<JsonValue> {
    let JsonValue::Object(entries) = value else {
        return Err(ImportError::configuration("Mapping must be an object"));
    };
    let mut normalized = Map::new();
    for (key, value) in entries {
        match key.to_ascii_lowercase().as_str() {
            "header_row" | "headerrow" => {
                normalized.insert("header_row".to_string(), value);
            }
            "columns" => {
                normalized.insert("columns".to_string(), normalize_columns(value));
            }
            _ => debug!("Ignoring unknown mapping key '{key}'"),
        }
    }
    Ok(JsonValue::Object(normalized))
}

fn normalize_columns(value: JsonValue) -> JsonValue {
    let JsonValue::Object(columns) = value else {
        return value;
    };
    let columns = columns
        .into_iter()
        .map(|(name, spec)| {
            let spec = match spec {
                JsonValue::Object(fields) => {
                    let mut canonical = Map::new();
                    for (field, value) in fields {
                        match field.to_ascii_lowercase().as_str() {
                            "sources" => {
                                canonical.insert("sources".to_string(), value);
                            }
                            "default" => {
                                canonical.insert("default".to_string(), value);
                            }
                            _ => debug!("Ignoring unknown key '{field}' on column '{name}'"),
                        }
                    }
                    JsonValue::Object(canonical)
                }
                other => other,
            };
            (name, spec)
        })
        .collect();
    JsonValue::Object(columns)
}
