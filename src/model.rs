use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::clock::{self, ClockError};
use crate::limits::*;

/// Minutes since midnight: the only time-of-day type.
pub type Minutes = u32;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Minutes,
    pub end: Minutes,
}

impl Span {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        clock::overlaps(self.start, self.end, other.start, other.end)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", clock::format_minutes(self.start), clock::format_minutes(self.end))
    }
}

/// A grid cell, `(row, col)` from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Calendar day of a booking. Fields are range-checked individually only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl BookingDate {
    pub fn new(day: u8, month: u8, year: u16) -> Result<Self, ClockError> {
        clock::check_date_parts(day, month, year)?;
        Ok(Self { day, month, year })
    }
}

impl std::fmt::Display for BookingDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}/{:02}", self.day, self.month, self.year % 100)
    }
}

/// An accepted reservation. Only the booking validator creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Ulid,
    pub member: String,
    pub date: BookingDate,
    pub span: Span,
}

/// A catalogued item shelved at a single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub title: String,
    pub author: String,
    pub kind: String,
    pub coord: Coord,
}

impl Media {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        kind: impl Into<String>,
        coord: Coord,
    ) -> Result<Self, ModelError> {
        let title = title.into();
        check_name(&title)?;
        Ok(Self {
            title,
            author: author.into(),
            kind: kind.into(),
            coord,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    MissingField(&'static str),
    EmptyName,
    NameTooLong(usize),
    Clock {
        field: &'static str,
        source: ClockError,
    },
    ClosingNotAfterOpening {
        opening: Minutes,
        closing: Minutes,
    },
    InvalidTimeslot(Minutes),
    NoCoordinates,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::MissingField(field) => write!(f, "missing field: {field}"),
            ModelError::EmptyName => write!(f, "name must not be empty"),
            ModelError::NameTooLong(len) => {
                write!(f, "name too long: {len} bytes (max {MAX_NAME_LEN})")
            }
            ModelError::Clock { field, source } => write!(f, "{field}: {source}"),
            ModelError::ClosingNotAfterOpening { opening, closing } => write!(
                f,
                "closing time {} must be after opening time {}",
                clock::format_minutes(*closing),
                clock::format_minutes(*opening)
            ),
            ModelError::InvalidTimeslot(len) => write!(
                f,
                "timeslot length {len} must be between 1 and {MAX_TIMESLOT_MINUTES} minutes"
            ),
            ModelError::NoCoordinates => write!(f, "resource must occupy at least one cell"),
        }
    }
}

impl std::error::Error for ModelError {}

fn check_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ModelError::NameTooLong(name.len()));
    }
    Ok(())
}

/// A bookable room or pod. Configuration is fixed at build time; only the
/// booking list changes afterwards.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    opening: Minutes,
    closing: Minutes,
    timeslot: Minutes,
    coords: Vec<Coord>,
    /// Accepted bookings in admission order.
    bookings: Vec<Booking>,
}

impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opening(&self) -> Minutes {
        self.opening
    }

    pub fn closing(&self) -> Minutes {
        self.closing
    }

    pub fn timeslot(&self) -> Minutes {
        self.timeslot
    }

    pub fn opening_hours(&self) -> Span {
        Span::new(self.opening, self.closing)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// The member's booking on `date`, if any. There is at most one.
    pub fn booking_for(&self, member: &str, date: &BookingDate) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.member == member && b.date == *date)
    }

    /// Bookings on `date`, sorted by start time.
    pub fn bookings_on(&self, date: &BookingDate) -> Vec<&Booking> {
        let mut day: Vec<&Booking> = self.bookings.iter().filter(|b| b.date == *date).collect();
        day.sort_by_key(|b| b.span.start);
        day
    }

    pub(crate) fn push_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Remove booking by id.
    pub(crate) fn remove_booking(&mut self, id: Ulid) -> Option<Booking> {
        let pos = self.bookings.iter().position(|b| b.id == id)?;
        Some(self.bookings.remove(pos))
    }
}

/// Collects resource configuration; `build` validates all of it.
#[derive(Debug, Default, Clone)]
pub struct ResourceBuilder {
    name: Option<String>,
    opening: Option<String>,
    closing: Option<String>,
    timeslot: Option<Minutes>,
    coords: Vec<Coord>,
}

impl ResourceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Opening time as `HH:MM`.
    pub fn opening(mut self, opening: impl Into<String>) -> Self {
        self.opening = Some(opening.into());
        self
    }

    /// Closing time as `HH:MM`.
    pub fn closing(mut self, closing: impl Into<String>) -> Self {
        self.closing = Some(closing.into());
        self
    }

    pub fn timeslot(mut self, minutes: Minutes) -> Self {
        self.timeslot = Some(minutes);
        self
    }

    pub fn coord(mut self, coord: Coord) -> Self {
        self.coords.push(coord);
        self
    }

    pub fn coords(mut self, coords: impl IntoIterator<Item = Coord>) -> Self {
        self.coords.extend(coords);
        self
    }

    pub fn build(self) -> Result<Resource, ModelError> {
        let name = self.name.ok_or(ModelError::MissingField("name"))?;
        check_name(&name)?;

        let opening = self.opening.ok_or(ModelError::MissingField("opening"))?;
        let opening = clock::to_minutes(&opening)
            .map_err(|source| ModelError::Clock { field: "opening", source })?;
        let closing = self.closing.ok_or(ModelError::MissingField("closing"))?;
        let closing = clock::to_minutes(&closing)
            .map_err(|source| ModelError::Clock { field: "closing", source })?;
        if opening >= closing {
            return Err(ModelError::ClosingNotAfterOpening { opening, closing });
        }

        let timeslot = self.timeslot.ok_or(ModelError::MissingField("timeslot"))?;
        if timeslot == 0 || timeslot > MAX_TIMESLOT_MINUTES {
            return Err(ModelError::InvalidTimeslot(timeslot));
        }

        if self.coords.is_empty() {
            return Err(ModelError::NoCoordinates);
        }

        Ok(Resource {
            name,
            opening,
            closing,
            timeslot,
            coords: self.coords,
            bookings: Vec::new(),
        })
    }
}
