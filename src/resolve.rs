//! Column resolution.
//!
//! For every data row and every output column, the candidate sources are
//! tried in declaration order and the first non-blank cell wins. When no
//! source yields a value the column default is used, which may itself be
//! absent. Missing source columns are never an error: they are reported once
//! while the plan is built and skipped for every row.

use log::warn;

use crate::{data::CellValue, header::HeaderIndex, mapping::MappingSpec};

/// A resolved value: `None` when neither a source nor a default supplied one.
pub type Resolved<'a> = Option<&'a CellValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan<'m> {
    /// Header positions of the sources that exist, in priority order.
    pub source_indices: Vec<usize>,
    pub default: Option<&'m CellValue>,
}

impl<'m> ColumnPlan<'m> {
    pub fn resolve<'a>(&'a self, row: &'a [CellValue]) -> Resolved<'a> {
        self.source_indices
            .iter()
            .filter_map(|&idx| row.get(idx))
            .find(|cell| !cell.is_blank())
            .or(self.default)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionPlan<'m> {
    columns: Vec<ColumnPlan<'m>>,
}

impl<'m> ResolutionPlan<'m> {
    pub fn new(mapping: &'m MappingSpec, headers: &HeaderIndex) -> Self {
        let columns = mapping
            .columns()
            .iter()
            .map(|(name, spec)| {
                let source_indices = spec
                    .sources
                    .iter()
                    .filter_map(|source| {
                        let found = headers.lookup(source);
                        if found.is_none() {
                            warn!(
                                "Source column '{source}' for output column '{name}' not found in header row"
                            );
                        }
                        found
                    })
                    .collect();
                ColumnPlan {
                    source_indices,
                    default: spec.default.as_ref(),
                }
            })
            .collect();
        ResolutionPlan { columns }
    }

    pub fn columns(&self) -> &[ColumnPlan<'m>] {
        &self.columns
    }

    /// One value per output column, in declaration order.
    pub fn resolve_row<'a>(&'a self, row: &'a [CellValue]) -> Vec<Resolved<'a>> {
        self.columns.iter().map(|column| column.resolve(row)).collect()
    }
}

pub fn resolve_rows<'a>(
    plan: &'a ResolutionPlan<'_>,
    rows: &'a [Vec<CellValue>],
) -> Vec<Vec<Resolved<'a>>> {
    rows.iter().map(|row| plan.resolve_row(row)).collect()
}
