use std::path::Path;

use crate::utils::PathExt;

mod csv;
mod xlsx;

/// One spreadsheet row, untyped. Column A is the date, column B the topic,
/// column C the description and column D the hours; further columns are
/// ignored and missing cells are read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub topic: String,
    pub description: String,
    pub hours: String,
}

impl RawRow {
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        topic: impl Into<String>,
        description: impl Into<String>,
        hours: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            topic: topic.into(),
            description: description.into(),
            hours: hours.into(),
        }
    }
}

/// Reads all rows from the exported sheet, dispatching on the file
/// extension. `sheet_name` selects the worksheet of an XLSX workbook and
/// is ignored for CSV files.
pub fn read_rows(path: &Path, sheet_name: Option<&str>) -> anyhow::Result<Vec<RawRow>> {
    if path.has_extension("xlsx") {
        xlsx::read_rows(path, sheet_name)
    } else {
        csv::read_rows(path)
    }
}
