use serde::Deserialize;

use crate::time::{Date, Month, Year};
use crate::utils::StrExt;

/// One accepted spelling of a sheet date. Sheets come from different
/// exports, so parsing tries an ordered list of formats and the first
/// successful one wins; a row matching none of them is skipped.
///
/// Every format also tolerates a trailing time of day separated by a
/// space, e.g. `"2025-08-01 10:30:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// `2025-08-01`
    YearMonthDay,
    /// `08/01/2025`
    MonthDayYear,
    /// `01/08/2025`
    DayMonthYear,
}

impl DateFormat {
    /// The default attempt order. `month/day/year` is tried before
    /// `day/month/year`; sheets using day-first dates list
    /// `day-month-year` earlier in the `date_formats` config key.
    pub const DEFAULT: [Self; 3] = [Self::YearMonthDay, Self::MonthDayYear, Self::DayMonthYear];

    const fn separator(&self) -> &'static str {
        match self {
            Self::YearMonthDay => "-",
            Self::MonthDayYear | Self::DayMonthYear => "/",
        }
    }

    pub fn parse(&self, input: &str) -> Option<Date> {
        // ignore a time-of-day part
        let input = input.trim();
        let input = input.split_exact::<2>(" ")[0]?;

        let [Some(first), Some(second), Some(third)] = input.split_exact::<3>(self.separator())
        else {
            return None;
        };

        let (year, month, day) = match self {
            Self::YearMonthDay => (first, second, third),
            Self::MonthDayYear => (third, first, second),
            Self::DayMonthYear => (third, second, first),
        };

        let year = Year::new(year.parse().ok()?);
        let month = Month::try_from(month.parse::<usize>().ok()?).ok()?;
        let day = day.parse().ok()?;

        Date::new(year, month, day).ok()
    }
}

/// Tries each format in order, first match wins.
#[must_use]
pub fn parse_date(input: &str, formats: &[DateFormat]) -> Option<Date> {
    formats.iter().find_map(|format| format.parse(input))
}
