use log::debug;
use serde::Serialize;

use crate::input::sheet::RawRow;
use crate::input::{parse_date, DateFormat};
use crate::latex_string::LatexString;
use crate::time::{Date, Hours, Period};

/// One billable unit of work, parsed from a sheet row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItem {
    date: Date,
    topic: String,
    description: String,
    hours: Hours,
}

impl WorkItem {
    #[must_use]
    pub fn new(
        date: Date,
        topic: impl Into<String>,
        description: impl Into<String>,
        hours: Hours,
    ) -> Self {
        Self {
            date,
            topic: topic.into(),
            description: description.into(),
            hours,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn hours(&self) -> Hours {
        self.hours
    }

    /// One row of the invoice table, with the free-text cells escaped.
    #[must_use]
    pub fn latex_row(&self) -> String {
        format!(
            "{} & {} & {} & {} \\\\",
            self.date,
            LatexString::escape(&self.topic),
            LatexString::escape(&self.description),
            self.hours
        )
    }
}

/// The aggregation result for one billed period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    items: Vec<WorkItem>,
    total_hours: Hours,
    skipped_dates: usize,
    skipped_hours: usize,
}

impl Summary {
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn total_hours(&self) -> Hours {
        self.total_hours
    }

    /// Rows dropped because their date matched no accepted format.
    pub fn skipped_dates(&self) -> usize {
        self.skipped_dates
    }

    /// Rows dropped because their hours were unparsable or negative.
    pub fn skipped_hours(&self) -> usize {
        self.skipped_hours
    }

    pub fn skipped(&self) -> usize {
        self.skipped_dates + self.skipped_hours
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `[WORK_ITEMS]` replacement: one table line per item.
    #[must_use]
    pub fn latex_rows(&self) -> String {
        self.items
            .iter()
            .map(WorkItem::latex_row)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Filters the raw rows to the billed period and sums their hours.
///
/// Dates are parsed with the first matching format from `formats`; rows
/// whose date does not parse, or does not fall into the period, or whose
/// hours are unparsable or negative, are dropped. Dropped rows only
/// affect the skip counts, never the run. The order of the remaining
/// rows is preserved.
#[must_use]
pub fn summarize(rows: &[RawRow], period: &Period, formats: &[DateFormat]) -> Summary {
    let mut items = Vec::new();
    let mut skipped_dates = 0;
    let mut skipped_hours = 0;

    for row in rows {
        let Some(date) = parse_date(&row.date, formats) else {
            debug!("skipping row with unparsable date: \"{}\"", row.date);
            skipped_dates += 1;
            continue;
        };

        if !period.contains(date) {
            continue;
        }

        let hours = match row.hours.parse::<Hours>() {
            Ok(hours) => hours,
            Err(e) => {
                debug!("skipping row of {}: {}", date, e);
                skipped_hours += 1;
                continue;
            }
        };

        items.push(WorkItem::new(
            date,
            row.topic.trim(),
            row.description.trim(),
            hours,
        ));
    }

    let total_hours = items.iter().map(WorkItem::hours).sum();

    Summary {
        items,
        total_hours,
        skipped_dates,
        skipped_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;
    use crate::time::{Month, Year};

    fn raw(date: &str, topic: &str, hours: &str) -> RawRow {
        RawRow::new(date, topic, "desc", hours)
    }

    #[test]
    fn test_filters_to_target_month() {
        let rows = [
            raw("2025-01-05", "A", "3.5"),
            raw("2025-02-01", "B", "2"),
            raw("2025-01-20", "C", "1.5"),
        ];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(summary.items().len(), 2);
        assert_eq!(summary.total_hours(), Hours::new(5.0).unwrap());
        assert_eq!(summary.skipped(), 0);

        // original row order is preserved
        assert_eq!(summary.items()[0].topic(), "A");
        assert_eq!(summary.items()[1].topic(), "C");
        assert_eq!(summary.items()[0].date(), date!(2025:01:05));
    }

    #[test]
    fn test_unparsable_date_is_skipped() {
        let rows = [
            raw("not-a-date", "A", "3.5"),
            raw("2025-01-20", "B", "1.5"),
        ];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(summary.items().len(), 1);
        assert_eq!(summary.skipped_dates(), 1);
        assert_eq!(summary.total_hours(), Hours::new(1.5).unwrap());
    }

    #[test]
    fn test_bad_hours_are_skipped() {
        let rows = [
            raw("2025-01-05", "A", "many"),
            raw("2025-01-06", "B", "-2"),
            raw("2025-01-07", "C", "4"),
        ];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(summary.items().len(), 1);
        assert_eq!(summary.skipped_hours(), 2);
        assert_eq!(summary.total_hours(), Hours::new(4.0).unwrap());
    }

    #[test]
    fn test_empty_month_is_not_an_error() {
        let rows = [raw("2025-01-05", "A", "3.5")];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::June),
            &DateFormat::DEFAULT,
        );

        assert!(summary.is_empty());
        assert_eq!(summary.total_hours(), Hours::zero());
        assert_eq!(summary.skipped(), 0);
    }

    #[test]
    fn test_custom_period_spans_months() {
        let rows = [
            raw("2025-01-10", "A", "1"),
            raw("2025-02-10", "B", "2"),
            raw("2025-03-10", "C", "4"),
        ];

        let period = Period::new(date!(2025:01:15), date!(2025:02:28)).unwrap();
        let summary = summarize(&rows, &period, &DateFormat::DEFAULT);

        assert_eq!(summary.items().len(), 1);
        assert_eq!(summary.items()[0].topic(), "B");
    }

    #[test]
    fn test_mixed_date_formats() {
        let rows = [
            raw("2025-01-05", "A", "1"),
            raw("01/20/2025", "B", "2"),
            raw("2025-01-21 09:15:00", "C", "4"),
        ];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(summary.items().len(), 3);
        assert_eq!(summary.total_hours(), Hours::new(7.0).unwrap());
    }

    #[test]
    fn test_header_row_falls_through() {
        let rows = [
            raw("Date", "Topic", "Hours"),
            raw("2025-01-05", "A", "3.5"),
        ];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(summary.items().len(), 1);
        assert_eq!(summary.skipped_dates(), 1);
    }

    #[test]
    fn test_latex_rows() {
        let rows = [raw("2025-01-05", "R&D", "3.5")];

        let summary = summarize(
            &rows,
            &Period::month(Year::new(2025), Month::January),
            &DateFormat::DEFAULT,
        );

        assert_eq!(
            summary.latex_rows(),
            "2025-01-05 & R\\&D & desc & 3.5 \\\\"
        );
    }
}
