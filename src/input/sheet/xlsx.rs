use std::path::Path;

use anyhow::Context;
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use log::debug;

use crate::input::sheet::RawRow;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other
            .as_string()
            .unwrap_or_else(|| other.to_string())
            .trim()
            .to_string(),
    }
}

/// Reads an XLSX export. Without an explicit `sheet_name` the first
/// worksheet of the workbook is used.
pub fn read_rows(path: &Path, sheet_name: Option<&str>) -> anyhow::Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open sheet `{}`", path.display()))?;

    let name = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .with_context(|| format!("workbook `{}` has no worksheets", path.display()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("worksheet `{}` not found in `{}`", name, path.display()))?;

    let rows = range
        .rows()
        .map(|row| {
            let cell = |index: usize| row.get(index).map(cell_text).unwrap_or_default();

            RawRow {
                date: cell(0),
                topic: cell(1),
                description: cell(2),
                hours: cell(3),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "read {} rows from worksheet `{}` of `{}`",
        rows.len(),
        name,
        path.display()
    );

    Ok(rows)
}
