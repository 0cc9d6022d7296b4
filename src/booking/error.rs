use ulid::Ulid;

use crate::clock::{self, ClockError};
use crate::model::{BookingDate, Minutes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    InvalidDateFormat(ClockError),
    InvalidTimeFormat(ClockError),
    InvalidMember,
    /// Misaligned with the timeslots, outside opening hours, or start >= end.
    InvalidBookingFormat {
        timeslot: Minutes,
        opening: Minutes,
        closing: Minutes,
    },
    InvalidBookingDuration {
        requested: Minutes,
        max: Minutes,
    },
    /// The member already holds a booking on this resource that day.
    BookingLimitExceeded(BookingDate),
    /// Overlaps the booking with this id.
    TimeSlotUnavailable(Ulid),
    NotFound(Ulid),
    LimitExceeded(&'static str),
}

impl BookingError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            BookingError::InvalidDateFormat(_) => "invalid_date_format",
            BookingError::InvalidTimeFormat(_) => "invalid_time_format",
            BookingError::InvalidMember => "invalid_member",
            BookingError::InvalidBookingFormat { .. } => "invalid_booking_format",
            BookingError::InvalidBookingDuration { .. } => "invalid_booking_duration",
            BookingError::BookingLimitExceeded(_) => "booking_limit_exceeded",
            BookingError::TimeSlotUnavailable(_) => "time_slot_unavailable",
            BookingError::NotFound(_) => "not_found",
            BookingError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::InvalidDateFormat(e) => write!(f, "invalid date: {e}"),
            BookingError::InvalidTimeFormat(e) => write!(f, "invalid time: {e}"),
            BookingError::InvalidMember => write!(f, "member must not be empty"),
            BookingError::InvalidBookingFormat {
                timeslot,
                opening,
                closing,
            } => write!(
                f,
                "booking must align with {timeslot}-minute timeslots and be within operating hours ({} - {})",
                clock::format_minutes(*opening),
                clock::format_minutes(*closing)
            ),
            BookingError::InvalidBookingDuration { requested, max } => {
                write!(f, "booking of {requested} minutes exceeds the {max}-minute maximum")
            }
            BookingError::BookingLimitExceeded(date) => {
                write!(f, "member already has a booking for this resource on {date}")
            }
            BookingError::TimeSlotUnavailable(id) => {
                write!(f, "time slot already booked (booking {id})")
            }
            BookingError::NotFound(id) => write!(f, "booking not found: {id}"),
            BookingError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for BookingError {}
