// Time source for task ids and creation dates

use chrono::{Local, NaiveDate, Utc};

/// Creation dates use the Turkish (tr-TR) short date: day.month.year, zero padded
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Source of the current time
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;

    /// Today's date in the local timezone
    fn today(&self) -> NaiveDate;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a given instant, for tests and demos
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now_ms: i64,
    pub today: NaiveDate,
}

impl FixedClock {
    pub fn new(now_ms: i64, today: NaiveDate) -> Self {
        Self { now_ms, today }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Format a creation date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_now_ms() {
        let ts = SystemClock.now_ms();
        // Should be reasonable timestamp (after year 2020)
        assert!(ts > 1_600_000_000_000);
    }

    #[test]
    fn test_format_date_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05.03.2024");

        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(format_date(date), "15.10.2026");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(1000, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(clock.now_ms(), 1000);
        assert_eq!(format_date(clock.today()), "02.01.2024");
    }
}
