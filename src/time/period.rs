use core::fmt;

use thiserror::Error;

use crate::time::{Date, Month, Year};

/// The inclusive date range an invoice bills for. By default this is the
/// full month preceding the reference date, but a custom range can be
/// configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: Date,
    end: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("period start {start} is after period end {end}")]
pub struct InvalidPeriod {
    start: Date,
    end: Date,
}

impl Period {
    pub fn new(start: Date, end: Date) -> Result<Self, InvalidPeriod> {
        if start > end {
            return Err(InvalidPeriod { start, end });
        }

        Ok(Self { start, end })
    }

    /// The whole given month, first day through last day.
    #[must_use]
    pub const fn month(year: Year, month: Month) -> Self {
        Self {
            start: Date::first_day(year, month),
            end: Date::last_day(year, month),
        }
    }

    /// The whole month preceding the reference date.
    #[must_use]
    pub const fn month_before(reference: Date) -> Self {
        let first = reference.previous_month();
        Self::month(first.year(), first.month())
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    #[must_use]
    pub fn is_single_month(&self) -> bool {
        self.start.year() == self.end.year() && self.start.month() == self.end.month()
    }

    /// The human-readable name of the billed period, used for the
    /// `[LAST_MONTH]` token and the invoice folder: `"January 2025"` when
    /// the period stays within one month, otherwise both endpoints.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_single_month() {
            format!("{} {:04}", self.start.month().name(), self.start.year())
        } else {
            format!("{} - {}", self.start.long_format(), self.end.long_format())
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_month_before() {
        assert_eq!(
            Period::month_before(date!(2025:02:15)),
            Period::month(Year::new(2025), Month::January)
        );

        // year rollover
        assert_eq!(
            Period::month_before(date!(2025:01:15)),
            Period::month(Year::new(2024), Month::December)
        );
    }

    #[test]
    fn test_contains() {
        let period = Period::month(Year::new(2025), Month::January);

        assert!(period.contains(date!(2025:01:01)));
        assert!(period.contains(date!(2025:01:31)));
        assert!(!period.contains(date!(2025:02:01)));
        assert!(!period.contains(date!(2024:12:31)));
    }

    #[test]
    fn test_rejects_reversed() {
        assert!(Period::new(date!(2025:02:01), date!(2025:01:01)).is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(
            Period::month(Year::new(2024), Month::December).label(),
            "December 2024"
        );

        assert_eq!(
            Period::new(date!(2025:01:15), date!(2025:02:14)).unwrap().label(),
            "January 15, 2025 - February 14, 2025"
        );
    }
}
