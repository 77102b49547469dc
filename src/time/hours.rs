use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A non-negative amount of billable hours, as read from the hours column
/// of the sheet (decimal, e.g. `3.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Hours(f64);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidHours {
    #[error("\"{input}\" is not a number of hours")]
    ParseHoursError { input: String },
    #[error("hours must not be negative, got {value}")]
    Negative { value: f64 },
}

impl Hours {
    pub fn new(value: f64) -> Result<Self, InvalidHours> {
        if !value.is_finite() {
            return Err(InvalidHours::ParseHoursError {
                input: value.to_string(),
            });
        }

        if value < 0.0 {
            return Err(InvalidHours::Negative { value });
        }

        Ok(Self(value))
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }

    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Hours {
    type Err = InvalidHours;

    /// Accepts what time tracking sheets commonly contain: surrounding
    /// whitespace, a trailing `h` and a decimal comma.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let trimmed = string.trim();
        let trimmed = trimmed
            .strip_suffix(['h', 'H'])
            .map_or(trimmed, str::trim_end);

        let value = trimmed
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| InvalidHours::ParseHoursError {
                input: string.to_string(),
            })?;

        Self::new(value)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Hours {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl Add for Hours {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!("3.5".parse::<Hours>(), Ok(Hours(3.5)));
        assert_eq!(" 2 ".parse::<Hours>(), Ok(Hours(2.0)));
        assert_eq!("1,5".parse::<Hours>(), Ok(Hours(1.5)));
        assert_eq!("8h".parse::<Hours>(), Ok(Hours(8.0)));
        assert_eq!("0".parse::<Hours>(), Ok(Hours(0.0)));
    }

    #[test]
    fn test_parse_rejects() {
        assert!("".parse::<Hours>().is_err());
        assert!("abc".parse::<Hours>().is_err());
        assert!("NaN".parse::<Hours>().is_err());

        assert_eq!(
            "-2".parse::<Hours>(),
            Err(InvalidHours::Negative { value: -2.0 })
        );
    }

    #[test]
    fn test_sum() {
        let total: Hours = [Hours(3.5), Hours(2.0), Hours(1.5)].into_iter().sum();
        assert_eq!(total, Hours(7.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Hours(5.0).to_string(), "5");
        assert_eq!(Hours(3.5).to_string(), "3.5");
    }
}
