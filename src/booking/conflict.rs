use crate::model::*;

use super::{BookingError, Candidate};

/// True if `t` lies on a timeslot boundary counted from opening time.
fn on_slot_boundary(rs: &Resource, t: Minutes) -> bool {
    t >= rs.opening() && (t - rs.opening()) % rs.timeslot() == 0
}

/// Check 1: slot alignment, opening hours and ordering. Returns the span on success.
pub(crate) fn check_format(rs: &Resource, candidate: &Candidate) -> Result<Span, BookingError> {
    let (start, end) = (candidate.start, candidate.end);
    let aligned = on_slot_boundary(rs, start) && on_slot_boundary(rs, end);
    let within_hours = start >= rs.opening() && end <= rs.closing();
    if !aligned || !within_hours || start >= end {
        return Err(BookingError::InvalidBookingFormat {
            timeslot: rs.timeslot(),
            opening: rs.opening(),
            closing: rs.closing(),
        });
    }
    Ok(Span::new(start, end))
}

/// Check 2: duration cap.
pub(crate) fn check_duration(span: &Span, max: Minutes) -> Result<(), BookingError> {
    if span.duration() > max {
        return Err(BookingError::InvalidBookingDuration {
            requested: span.duration(),
            max,
        });
    }
    Ok(())
}

/// Check 3: one booking per member per resource per day, whatever the time.
pub(crate) fn check_daily_limit(rs: &Resource, candidate: &Candidate) -> Result<(), BookingError> {
    if rs.booking_for(&candidate.member, &candidate.date).is_some() {
        return Err(BookingError::BookingLimitExceeded(candidate.date));
    }
    Ok(())
}

/// Check 4: no same-day booking may overlap the candidate span.
pub(crate) fn check_no_conflict(rs: &Resource, date: &BookingDate, span: &Span) -> Result<(), BookingError> {
    for booking in rs.bookings().iter().filter(|b| b.date == *date) {
        if booking.span.overlaps(span) {
            return Err(BookingError::TimeSlotUnavailable(booking.id));
        }
    }
    Ok(())
}
