use crate::limits::{CENTURY, YEAR_FLOOR};
use crate::model::{BookingDate, Minutes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Not of the form `HH:MM`.
    MalformedTime(String),
    /// Not of the form `DD/MM/YY`.
    MalformedDate(String),
    /// Not of the form `HH:MM-HH:MM`.
    MalformedRange(String),
    OutOfRange(&'static str),
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::MalformedTime(s) => write!(f, "time must be HH:MM, got {s:?}"),
            ClockError::MalformedDate(s) => write!(f, "date must be DD/MM/YY, got {s:?}"),
            ClockError::MalformedRange(s) => write!(f, "time must be HH:MM-HH:MM, got {s:?}"),
            ClockError::OutOfRange(what) => write!(f, "{what} out of range"),
        }
    }
}

impl std::error::Error for ClockError {}

/// Parse two ASCII digits.
fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

/// `"HH:MM"` → minutes since midnight.
pub fn to_minutes(time: &str) -> Result<Minutes, ClockError> {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(ClockError::MalformedTime(time.to_string()));
    }
    let (Some(hour), Some(minute)) = (two_digits(&bytes[0..2]), two_digits(&bytes[3..5])) else {
        return Err(ClockError::MalformedTime(time.to_string()));
    };
    if hour >= 24 {
        return Err(ClockError::OutOfRange("hour"));
    }
    if minute >= 60 {
        return Err(ClockError::OutOfRange("minute"));
    }
    Ok(hour * 60 + minute)
}

/// Minutes since midnight → `"HH:MM"`.
pub fn format_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open overlap of `[start_a, end_a)` and `[start_b, end_b)`.
pub fn overlaps(start_a: Minutes, end_a: Minutes, start_b: Minutes, end_b: Minutes) -> bool {
    start_a < end_b && start_b < end_a
}

/// `"DD/MM/YY"` → a range-checked date in the 2000s.
pub fn parse_date(date: &str) -> Result<BookingDate, ClockError> {
    let bytes = date.as_bytes();
    if bytes.len() != 8 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(ClockError::MalformedDate(date.to_string()));
    }
    let (Some(day), Some(month), Some(year)) = (
        two_digits(&bytes[0..2]),
        two_digits(&bytes[3..5]),
        two_digits(&bytes[6..8]),
    ) else {
        return Err(ClockError::MalformedDate(date.to_string()));
    };
    // Two digits always fit: day/month < 100, year < 100.
    BookingDate::new(day as u8, month as u8, CENTURY + year as u16)
}

/// `"HH:MM-HH:MM"` → `(start, end)` minutes. Ordering is not checked here.
pub fn parse_time_range(range: &str) -> Result<(Minutes, Minutes), ClockError> {
    let bytes = range.as_bytes();
    if bytes.len() != 11 || bytes[2] != b':' || bytes[5] != b'-' || bytes[8] != b':' {
        return Err(ClockError::MalformedRange(range.to_string()));
    }
    let (Some(start), Some(end)) = (range.get(0..5), range.get(6..11)) else {
        return Err(ClockError::MalformedRange(range.to_string()));
    };
    Ok((to_minutes(start)?, to_minutes(end)?))
}

pub(crate) fn check_date_parts(day: u8, month: u8, year: u16) -> Result<(), ClockError> {
    if !(1..=31).contains(&day) {
        return Err(ClockError::OutOfRange("day"));
    }
    if !(1..=12).contains(&month) {
        return Err(ClockError::OutOfRange("month"));
    }
    if year <= YEAR_FLOOR {
        return Err(ClockError::OutOfRange("year"));
    }
    Ok(())
}
