//! Aggregation behavior across the csv reader, the accepted date formats
//! and the billed period.

use invoice_sheet::date;
use invoice_sheet::input::sheet;
use invoice_sheet::invoice::summarize;
use invoice_sheet::time::Hours;

use pretty_assertions::assert_eq;

mod common;

use common::Workspace;

const SHEET: &str = concat!(
    "2025-01-05,A,first item,3.5\n",
    "2025-02-01,B,other month,2\n",
    "2025-01-20,C,second item,1.5\n",
);

#[test]
fn test_target_month_filter_and_total() {
    let workspace = Workspace::new();

    let mut builder = workspace.builder(SHEET, "");
    builder.reference_date(date!(2025:02:03));
    let config = builder.build().expect("config should build");

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert_eq!(summary.items().len(), 2);
    assert_eq!(summary.total_hours(), Hours::new(5.0).unwrap());

    // input order is preserved
    assert_eq!(summary.items()[0].topic(), "A");
    assert_eq!(summary.items()[1].topic(), "C");
}

#[test]
fn test_unparsable_rows_are_counted_not_fatal() {
    let workspace = Workspace::new();

    let sheet_data = concat!(
        "Date,Topic,Description,Hours\n",
        "2025-01-05,A,ok,3.5\n",
        "not-a-date,B,bad date,2\n",
        "2025-01-06,C,bad hours,lots\n",
    );

    let mut builder = workspace.builder(sheet_data, "");
    builder.reference_date(date!(2025:02:03));
    let config = builder.build().expect("config should build");

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert_eq!(summary.items().len(), 1);
    // the header row counts as one unparsable date
    assert_eq!(summary.skipped_dates(), 2);
    assert_eq!(summary.skipped_hours(), 1);
    assert_eq!(summary.total_hours(), Hours::new(3.5).unwrap());
}

#[test]
fn test_month_without_rows_is_empty() {
    let workspace = Workspace::new();

    let mut builder = workspace.builder(SHEET, "");
    builder.reference_date(date!(2025:07:01));
    let config = builder.build().expect("config should build");

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert!(summary.is_empty());
    assert_eq!(summary.total_hours(), Hours::zero());
}

#[test]
fn test_configured_period_spans_months() {
    let workspace = Workspace::new();

    let extra = concat!(
        ",\"period_from\": \"2025-01-10\",\n",
        "  \"period_to\": \"2025-02-10\"",
    );

    let mut builder = workspace.builder(SHEET, extra);
    builder.reference_date(date!(2025:03:01));
    let config = builder.build().expect("config should build");

    assert_eq!(config.period().start(), date!(2025:01:10));
    assert_eq!(config.period().end(), date!(2025:02:10));

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    // 2025-01-20 and 2025-02-01 fall into the window, 2025-01-05 does not
    assert_eq!(summary.items().len(), 2);
    assert_eq!(summary.total_hours(), Hours::new(3.5).unwrap());
}

#[test]
fn test_same_month_period_covers_the_whole_month() {
    let workspace = Workspace::new();

    let extra = concat!(
        ",\"period_from\": \"2025-01-01\",\n",
        "  \"period_to\": \"2025-01-01\"",
    );

    let mut builder = workspace.builder(SHEET, extra);
    builder.reference_date(date!(2025:03:01));
    let config = builder.build().expect("config should build");

    assert_eq!(config.period().end(), date!(2025:01:31));

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert_eq!(summary.items().len(), 2);
}

#[test]
fn test_month_flag_overrides_configured_period() {
    let workspace = Workspace::new();

    let extra = concat!(
        ",\"period_from\": \"2025-01-01\",\n",
        "  \"period_to\": \"2025-01-31\"",
    );

    let mut builder = workspace.builder(SHEET, extra);
    builder
        .reference_date(date!(2025:03:01))
        .month(invoice_sheet::time::Year::new(2025), invoice_sheet::time::Month::February);
    let config = builder.build().expect("config should build");

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert_eq!(summary.items().len(), 1);
    assert_eq!(summary.items()[0].topic(), "B");
}

#[test]
fn test_day_first_date_formats() {
    let workspace = Workspace::new();

    let sheet_data = concat!(
        "05/01/2025,A,day first,3\n",
        "20/01/2025,B,day first,1\n",
    );

    let extra = ",\"date_formats\": [\"day-month-year\", \"year-month-day\"]";

    let mut builder = workspace.builder(sheet_data, extra);
    builder.reference_date(date!(2025:02:03));
    let config = builder.build().expect("config should build");

    let rows = sheet::read_rows(config.sheet(), config.sheet_name()).expect("csv should read");
    let summary = summarize(&rows, config.period(), config.date_formats());

    assert_eq!(summary.items().len(), 2);
    assert_eq!(summary.total_hours(), Hours::new(4.0).unwrap());
}
