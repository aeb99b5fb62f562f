//! Excel serial date conversion
//!
//! Spreadsheets store dates as serial numbers: whole days since a base date,
//! with the fractional part holding the time of day.
//!
//! Notes:
//! - In the 1900 date system serial 1 is 1900-01-01 and Excel includes the
//!   historical "1900 leap year" bug, inserting a non-existent 1900-02-29 as
//!   serial 60. That day collapses onto 1900-02-28 here.
//! - In the 1904 date system serial 0 is 1904-01-01.

use chrono::{Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a serial number to a naive date-time.
///
/// Returns `None` for negative, non-finite, or out-of-range serials.
///
/// ```
/// use sheetdoc_core::date::serial_to_datetime;
///
/// let dt = serial_to_datetime(45292.5, false).unwrap();
/// assert_eq!(dt.to_string(), "2024-01-01 12:00:00");
/// ```
pub fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.floor();
    if days > i32::MAX as f64 {
        return None;
    }
    let days = days as i64;
    let millis = ((serial - serial.floor()) * MILLIS_PER_DAY).round() as i64;

    let date = if date_1904 {
        excel1904_date_from_serial(days)?
    } else {
        excel1900_date_from_serial(days)?
    };

    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

fn excel1904_date_from_serial(serial: i64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1904, 1, 1)?;
    base.checked_add_signed(Duration::days(serial))
}

fn excel1900_date_from_serial(serial: i64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    let adjusted = if serial >= 60 { serial - 1 } else { serial };
    base.checked_add_signed(Duration::days(adjusted))
}
