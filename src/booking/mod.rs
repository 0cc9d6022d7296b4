mod availability;
mod conflict;
mod error;

pub use availability::{free_windows, merge_overlapping, subtract_intervals};
pub use error::BookingError;

use tracing::debug;
use ulid::Ulid;

use crate::clock;
use crate::limits::*;
use crate::model::*;

use conflict::{check_daily_limit, check_duration, check_format, check_no_conflict};

/// A reservation request that has passed input parsing but none of the
/// booking rules yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub member: String,
    pub date: BookingDate,
    pub start: Minutes,
    pub end: Minutes,
}

impl Candidate {
    /// Parse `"DD/MM/YY"` and `"HH:MM-HH:MM"`. Date errors win over time
    /// errors, which win over a blank member.
    pub fn parse(member: &str, date: &str, time: &str) -> Result<Self, BookingError> {
        let date = clock::parse_date(date).map_err(BookingError::InvalidDateFormat)?;
        let (start, end) = clock::parse_time_range(time).map_err(BookingError::InvalidTimeFormat)?;
        if member.trim().is_empty() {
            return Err(BookingError::InvalidMember);
        }
        Ok(Self {
            member: member.to_string(),
            date,
            start,
            end,
        })
    }
}

/// Admits bookings onto resources. Holds policy only, no state of its own.
#[derive(Debug, Clone)]
pub struct BookingValidator {
    max_duration: Minutes,
}

impl Default for BookingValidator {
    fn default() -> Self {
        Self::new(MAX_BOOKING_MINUTES)
    }
}

impl BookingValidator {
    pub fn new(max_duration: Minutes) -> Self {
        Self { max_duration }
    }

    /// Parse the kiosk's date and time strings, then [`admit`](Self::admit).
    pub fn try_admit(
        &self,
        rs: &mut Resource,
        member: &str,
        date: &str,
        time: &str,
    ) -> Result<Booking, BookingError> {
        let candidate = Candidate::parse(member, date, time).inspect_err(|e| record_rejection(rs, e))?;
        self.admit(rs, candidate)
    }

    /// Run the booking rules in order (format, duration, daily limit,
    /// conflict) and append the booking only if all pass.
    pub fn admit(&self, rs: &mut Resource, candidate: Candidate) -> Result<Booking, BookingError> {
        let result = self.check(rs, &candidate);
        let span = match result {
            Ok(span) => span,
            Err(e) => {
                record_rejection(rs, &e);
                return Err(e);
            }
        };

        let booking = Booking {
            id: Ulid::new(),
            member: candidate.member,
            date: candidate.date,
            span,
        };
        rs.push_booking(booking.clone());
        metrics::counter!(crate::observability::BOOKINGS_ADMITTED_TOTAL).increment(1);
        debug!(
            resource = rs.name(),
            member = %booking.member,
            date = %booking.date,
            span = %booking.span,
            id = %booking.id,
            "booking admitted"
        );
        Ok(booking)
    }

    /// The four booking rules in order, then the storage guards that only
    /// apply to an otherwise admissible booking.
    fn check(&self, rs: &Resource, candidate: &Candidate) -> Result<Span, BookingError> {
        let span = check_format(rs, candidate)?;
        check_duration(&span, self.max_duration)?;
        check_daily_limit(rs, candidate)?;
        check_no_conflict(rs, &candidate.date, &span)?;
        if candidate.member.trim().is_empty() {
            return Err(BookingError::InvalidMember);
        }
        if rs.bookings().len() >= MAX_BOOKINGS_PER_RESOURCE {
            return Err(BookingError::LimitExceeded("too many bookings on resource"));
        }
        Ok(span)
    }

    /// Remove a booking by id, returning it.
    pub fn cancel(&self, rs: &mut Resource, id: Ulid) -> Result<Booking, BookingError> {
        let booking = rs.remove_booking(id).ok_or(BookingError::NotFound(id))?;
        metrics::counter!(crate::observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
        debug!(resource = rs.name(), id = %id, "booking cancelled");
        Ok(booking)
    }
}

fn record_rejection(rs: &Resource, e: &BookingError) {
    metrics::counter!(crate::observability::BOOKINGS_REJECTED_TOTAL, "reason" => e.reason())
        .increment(1);
    debug!(resource = rs.name(), reason = e.reason(), "booking rejected: {e}");
}
