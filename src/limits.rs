use crate::model::Minutes;

/// Longest booking a member may hold, in minutes.
pub const MAX_BOOKING_MINUTES: Minutes = 120;

/// Bookings must be for a year strictly after this one.
pub const YEAR_FLOOR: u16 = 2024;

/// Two-digit years are offset from this century.
pub const CENTURY: u16 = 2000;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// A timeslot can be at most one full day.
pub const MAX_TIMESLOT_MINUTES: Minutes = MINUTES_PER_DAY;

pub const MAX_NAME_LEN: usize = 128;

/// Upper bound for either grid dimension.
pub const MAX_GRID_DIM: usize = 512;

pub const MAX_BOOKINGS_PER_RESOURCE: usize = 10_000;

pub const MAX_COMMAND_LEN: usize = 1024;
