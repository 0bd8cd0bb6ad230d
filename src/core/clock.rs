use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant and the caller's local calendar date.
pub trait Clock: Send {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in the caller's local time zone.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch; never negative.
    fn now_ms(&self) -> u64 {
        u64::try_from(self.now().timestamp_millis()).unwrap_or(0)
    }
}

/// Operating-system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Renders a creation date the way `en-US` short dates read, e.g. `6/1/2025`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
