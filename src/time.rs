//! Clock-time and calendar-date handling.
//!
//! Only the fixed-width forms `HH:MM` and `DD/MM/YYYY` are accepted. Everything
//! here is pure; "now" lives in [`crate::clock`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid time: {0}")]
    InvalidTime(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Checks that `text` has the exact shape of `pattern`, where `9` stands for an
/// ASCII digit and every other byte must match literally.
fn has_shape(text: &str, pattern: &str) -> bool {
    text.len() == pattern.len()
        && text.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'9' => c.is_ascii_digit(),
            _ => c == p,
        })
}

pub fn parse_clock_time(text: &str) -> Result<NaiveTime, TimeError> {
    if !has_shape(text, "99:99") {
        return Err(TimeError::InvalidTime(text.to_string()));
    }
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| TimeError::InvalidTime(text.to_string()))
}

pub fn parse_date(text: &str) -> Result<NaiveDate, TimeError> {
    if !has_shape(text, "99/99/9999") {
        return Err(TimeError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|_| TimeError::InvalidDate(text.to_string()))
}

pub fn combine(date: NaiveDate, clock: NaiveTime) -> NaiveDateTime {
    date.and_time(clock)
}

/// `end - start` in whole minutes. Negative when `end` precedes `start`.
pub fn duration_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_accepts_24h() {
        let t = parse_clock_time("23:59").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(parse_clock_time("00:00").is_ok());
    }

    #[test]
    fn clock_time_rejects_out_of_range() {
        assert_eq!(parse_clock_time("24:00"), Err(TimeError::InvalidTime("24:00".into())));
        assert!(parse_clock_time("12:60").is_err());
    }

    #[test]
    fn clock_time_rejects_malformed() {
        for bad in ["9:00", "09:0", "0900", "09-00", "ab:cd", "09:00 ", "", "+9:00"] {
            assert!(parse_clock_time(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn date_accepts_dd_mm_yyyy() {
        let d = parse_date("29/02/2028").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn date_rejects_impossible_and_malformed() {
        for bad in ["31/02/2030", "29/02/2029", "1/1/2030", "2030/01/01", "01-01-2030", "00/01/2030", "01/13/2030"] {
            assert_eq!(parse_date(bad), Err(TimeError::InvalidDate(bad.into())), "{bad:?}");
        }
    }

    #[test]
    fn combine_orders_by_date_then_clock() {
        let d1 = parse_date("01/01/2030").unwrap();
        let d2 = parse_date("02/01/2030").unwrap();
        let late = combine(d1, parse_clock_time("23:00").unwrap());
        let early_next = combine(d2, parse_clock_time("01:00").unwrap());
        assert!(late < early_next);
        assert_eq!(duration_minutes(late, early_next), 120);
    }

    #[test]
    fn duration_in_minutes() {
        let d = parse_date("01/01/2030").unwrap();
        let s = combine(d, parse_clock_time("09:00").unwrap());
        let e = combine(d, parse_clock_time("11:01").unwrap());
        assert_eq!(duration_minutes(s, e), 121);
        assert_eq!(duration_minutes(e, s), -121);
    }
}
