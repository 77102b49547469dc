use core::fmt;
use core::ops::Add;
use core::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::time::{Month, Year};
use crate::utils::StrExt;

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        const _YEAR: $crate::time::Year = $crate::time::Year::new($year);
        static_assertions::const_assert!($month >= 1 && $month <= 12);

        const _MONTH: $crate::time::Month = $crate::time::Month::new($month);

        // validate the day
        static_assertions::const_assert!($day != 0);
        static_assertions::const_assert!($day <= _YEAR.number_of_days_in_month(_MONTH));

        unsafe { $crate::time::Date::new_unchecked(_YEAR, _MONTH, $day) }
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Date {
    year: Year,
    month: Month,
    day: usize,
}

impl Date {
    pub fn new(year: impl Into<Year>, month: Month, day: usize) -> Result<Self, InvalidDate> {
        let year = year.into();
        if year.number_of_days_in_month(month) < day || day == 0 {
            return Err(InvalidDate::InvalidDay { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    #[doc(hidden)]
    #[must_use]
    pub const unsafe fn new_unchecked(year: Year, month: Month, day: usize) -> Self {
        Self { year, month, day }
    }

    /// Returns the date of the first day as a date in the month.
    #[must_use]
    pub const fn first_day(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: 1,
        }
    }

    /// Returns the date of the last day as a date in the month.
    #[must_use]
    pub const fn last_day(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: year.number_of_days_in_month(month),
        }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> usize {
        self.day
    }

    /// Moves the date forward by the given number of calendar days.
    #[must_use]
    pub fn add_days(self, days: usize) -> Self {
        let mut year = self.year();
        let mut month = self.month();
        let mut day = self.day() + days;

        while day > year.number_of_days_in_month(month) {
            day -= year.number_of_days_in_month(month);
            if month == Month::December {
                year = year.next();
            }
            month = month.next();
        }

        Self { year, month, day }
    }

    /// The first day of the month preceding this date's month. January
    /// rolls over into December of the previous year.
    #[must_use]
    pub const fn previous_month(&self) -> Self {
        let year = match self.month {
            Month::January => self.year.prev(),
            _ => self.year,
        };

        Self::first_day(year, self.month.prev())
    }

    /// The long form used on invoices, for example `"January 01, 2025"`.
    #[must_use]
    pub fn long_format(&self) -> String {
        format!(
            "{} {:02}, {:04}",
            self.month().name(),
            self.day(),
            self.year()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not a valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year:04}-{month:02}")]
    InvalidDay {
        year: Year,
        month: Month,
        day: usize,
    },
}

impl Add<usize> for Date {
    type Output = Self;

    fn add(self, days: usize) -> Self::Output {
        self.add_days(days)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.as_usize(),
            self.month.as_usize(),
            self.day
        )
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

fn parse_or_err(input: &str) -> Result<usize, InvalidDate> {
    input
        .parse::<usize>()
        .map_err(|_| InvalidDate::ParseDateError {
            input: input.to_string(),
        })
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if let [Some(year), Some(month), Some(day)] = string.split_exact::<3>("-") {
            let year = Year::new(parse_or_err(year)?);
            let month =
                Month::try_from(parse_or_err(month)?).map_err(|_| InvalidDate::ParseDateError {
                    input: string.to_string(),
                })?;
            let day = parse_or_err(day)?;

            Self::new(year, month, day)
        } else {
            Err(InvalidDate::ParseDateError {
                input: string.to_string(),
            })
        }
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}
