use time::OffsetDateTime;

mod date;
pub use date::*;
mod hours;
pub use hours::*;
mod month;
pub use month::*;
mod period;
pub use period::*;
mod year;
pub use year::*;

/// Returns the current local date, falling back to UTC when the local
/// offset cannot be determined (for example in threaded test runners).
#[must_use]
pub fn today() -> Date {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    Date::new(
        Year::new(now.year() as usize),
        Month::new(now.month() as usize),
        now.day() as usize,
    )
    .expect("the current date is a valid date")
}
