//! Serial date systems
//!
//! Spreadsheets store dates as a serial number: the integer part counts
//! days from an origin, the fractional part is the elapsed fraction of a
//! 24-hour day. Two origins are in use.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

const SECONDS_PER_DAY: i64 = 86_400;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days between the two origins (1904-01-01 is serial 1462 in the 1900 system)
pub const DATE_SYSTEM_OFFSET_DAYS: i64 = 1462;

/// Beyond this chrono cannot represent the date anyway
const MAX_SERIAL_DAYS: i64 = 90_000_000;

/// The anchor and day-counting convention for serial dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateSystem {
    /// Serial 1 is 1900-01-01, and serial 60 is the fictitious 1900-02-29
    #[default]
    V1900,
    /// Serial 0 is 1904-01-01, no leap-day quirk
    V1904,
}

impl DateSystem {
    /// Select the system from a workbook's `date1904` flag
    pub fn from_date1904_flag(date1904: bool) -> Self {
        if date1904 {
            DateSystem::V1904
        } else {
            DateSystem::V1900
        }
    }

    /// Whether this is the 1904 system
    pub fn is_1904(&self) -> bool {
        matches!(self, DateSystem::V1904)
    }

    /// Convert a serial number to a date-time
    ///
    /// Returns `None` for negative or non-finite serials and for serials
    /// beyond the representable calendar. The time of day is rounded to the
    /// nearest second.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use gridbook_core::DateSystem;
    ///
    /// let dt = DateSystem::V1904.to_datetime(1.5).unwrap();
    /// assert_eq!(dt, NaiveDate::from_ymd_opt(1904, 1, 2).unwrap().and_hms_opt(12, 0, 0).unwrap());
    /// ```
    pub fn to_datetime(&self, serial: f64) -> Option<NaiveDateTime> {
        if !serial.is_finite() || serial < 0.0 {
            return None;
        }

        let whole = serial.floor();
        let days = whole as i64;
        if days > MAX_SERIAL_DAYS {
            return None;
        }

        let millis = ((serial - whole) * MILLIS_PER_DAY + 0.5) as i64;
        let seconds = (millis + 500) / 1000;

        self.date_from_days(days)?
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::seconds(seconds))
    }

    /// Convert a date-time back to its serial number
    pub fn to_serial(&self, dt: NaiveDateTime) -> f64 {
        let mut days = (dt.date() - self.origin()).num_days();
        // Dates from 1900-03-01 on sit one serial later because of the
        // fictitious 1900-02-29.
        if *self == DateSystem::V1900 && days >= 60 {
            days += 1;
        }
        let seconds = dt.num_seconds_from_midnight() as f64;
        days as f64 + seconds / SECONDS_PER_DAY as f64
    }

    fn origin(&self) -> NaiveDate {
        match self {
            DateSystem::V1900 => NaiveDate::from_ymd_opt(1899, 12, 31),
            DateSystem::V1904 => NaiveDate::from_ymd_opt(1904, 1, 1),
        }
        .unwrap_or_default()
    }

    fn date_from_days(&self, days: i64) -> Option<NaiveDate> {
        let adjusted = match self {
            // Serial 60 has no real date, it lands on 1900-03-01 together with 61
            DateSystem::V1900 if days >= 61 => days - 1,
            _ => days,
        };
        self.origin().checked_add_signed(Duration::days(adjusted))
    }
}
