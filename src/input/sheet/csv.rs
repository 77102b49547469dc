use std::path::Path;

use anyhow::Context;
use log::debug;

use crate::input::sheet::RawRow;

/// Reads a CSV export. The file is treated as headerless: a header line,
/// if present, has no parsable date in column A and falls out through the
/// normal row skipping.
pub fn read_rows(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open sheet `{}`", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read sheet `{}`", path.display()))?;

        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        rows.push(RawRow {
            date: field(0),
            topic: field(1),
            description: field(2),
            hours: field(3),
        });
    }

    debug!("read {} rows from `{}`", rows.len(), path.display());

    Ok(rows)
}
