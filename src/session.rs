use std::time::Instant;

use tracing::{debug, info, warn};

use crate::booking::{self, BookingError, BookingValidator};
use crate::clock;
use crate::command::{self, Command};
use crate::config::KioskConfig;
use crate::library::{Library, LibraryError};
use crate::map::{Path, RouteError, SearchStrategy};
use crate::model::{BookingDate, Resource};
use crate::observability;

/// Text shown to the member for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub ok: bool,
    /// The member asked to leave.
    pub quit: bool,
}

impl Reply {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: true,
            quit: false,
        }
    }

    fn err(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: false,
            quit: false,
        }
    }
}

/// One kiosk: a library plus the booking policy and route strategy it runs
/// with. Commands execute one at a time.
pub struct Session {
    library: Library,
    validator: BookingValidator,
    strategy: SearchStrategy,
}

impl Session {
    pub fn new(library: Library, validator: BookingValidator, strategy: SearchStrategy) -> Self {
        info!(library = library.name(), strategy = strategy.label(), "session started");
        Self {
            library,
            validator,
            strategy,
        }
    }

    pub fn with_config(library: Library, config: &KioskConfig) -> Self {
        Self::new(
            library,
            BookingValidator::new(config.max_booking_minutes),
            config.search,
        )
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Parse and run one input line. Blank lines produce an empty reply.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::ok("");
        }
        match command::parse_command(line) {
            Ok(cmd) => self.execute(cmd),
            Err(e) => {
                metrics::counter!(observability::COMMANDS_TOTAL, "command" => "invalid", "status" => "error")
                    .increment(1);
                warn!("rejected input: {e}");
                Reply::err(format!("Error: {e}"))
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Reply {
        let label = observability::command_label(&cmd);
        let start = Instant::now();
        let reply = self.run(cmd);
        let elapsed = start.elapsed().as_secs_f64();

        let status = if reply.ok { "ok" } else { "error" };
        metrics::counter!(observability::COMMANDS_TOTAL, "command" => label, "status" => status)
            .increment(1);
        metrics::histogram!(observability::COMMAND_DURATION_SECONDS, "command" => label)
            .record(elapsed);
        if reply.ok {
            debug!(command = label, "command executed");
        } else {
            warn!(command = label, "command failed: {}", reply.text);
        }
        reply
    }

    fn run(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Map => Reply::ok(format!(
                "=== Library Map ===\n{}===================\n",
                self.library.map().render()
            )),
            Command::Legend => Reply::ok(self.library.map().render_legend()),
            Command::ListMedia => {
                if self.library.media().is_empty() {
                    return Reply::ok("No media in this library.\n");
                }
                let mut out = String::new();
                for m in self.library.media() {
                    out.push_str(&format!("{} by {} ({}) at {}\n", m.title, m.author, m.kind, m.coord));
                }
                Reply::ok(out)
            }
            Command::ListResources => {
                if self.library.resources().is_empty() {
                    return Reply::ok("No resources in this library.\n");
                }
                let mut out = String::new();
                for r in self.library.resources() {
                    out.push_str(&format!(
                        "{}: open {}, {}-minute timeslots\n",
                        r.name(),
                        r.opening_hours(),
                        r.timeslot()
                    ));
                }
                Reply::ok(out)
            }
            Command::FindMedia { title } => {
                let route = self.library.route_to_media(&title, self.strategy);
                self.route_reply(route, "media")
            }
            Command::FindResource { name } => {
                let route = self.library.route_to_resource(&name, self.strategy);
                self.route_reply(route, "resource")
            }
            Command::Book {
                resource,
                member,
                date,
                time,
            } => match self.library.book(&self.validator, &resource, &member, &date, &time) {
                Ok(b) => Reply::ok(format!(
                    "Booked {resource} for {} on {} from {}.\nBooking id: {}\n",
                    b.member, b.date, b.span, b.id
                )),
                Err(e) => Reply::err(format!("Booking failed: {e}\n")),
            },
            Command::Booking {
                resource,
                member,
                date,
            } => {
                let (rs, date) = match self.day_lookup(&resource, &date) {
                    Ok(found) => found,
                    Err(e) => return Reply::err(format!("Error: {e}\n")),
                };
                match rs.booking_for(&member, &date) {
                    Some(b) => Reply::ok(format!("{}\nBooking id: {}\n", b.span, b.id)),
                    None => Reply::ok(format!("No booking for {member} on {date}.\n")),
                }
            }
            Command::Bookings { resource, date } => {
                let (rs, date) = match self.day_lookup(&resource, &date) {
                    Ok(found) => found,
                    Err(e) => return Reply::err(format!("Error: {e}\n")),
                };
                let day = rs.bookings_on(&date);
                if day.is_empty() {
                    return Reply::ok("No bookings for this date.\n");
                }
                let mut out = String::new();
                for b in day {
                    out.push_str(&format!("Booked from: {}\n", b.span));
                }
                Reply::ok(out)
            }
            Command::Free { resource, date } => {
                let (rs, date) = match self.day_lookup(&resource, &date) {
                    Ok(found) => found,
                    Err(e) => return Reply::err(format!("Error: {e}\n")),
                };
                let windows = booking::free_windows(rs, &date);
                if windows.is_empty() {
                    return Reply::ok("Fully booked on this date.\n");
                }
                let mut out = String::new();
                for w in windows {
                    out.push_str(&format!("Free from: {w}\n"));
                }
                Reply::ok(out)
            }
            Command::Cancel { resource, id } => {
                match self.library.cancel(&self.validator, &resource, id) {
                    Ok(b) => Reply::ok(format!(
                        "Cancelled booking {} for {} on {} ({}).\n",
                        b.id, b.member, b.date, b.span
                    )),
                    Err(e) => Reply::err(format!("Cancel failed: {e}\n")),
                }
            }
            Command::Help => Reply::ok(command::HELP),
            Command::Quit => Reply {
                text: "Goodbye!\n".to_string(),
                ok: true,
                quit: true,
            },
        }
    }

    fn day_lookup(
        &self,
        resource: &str,
        date: &str,
    ) -> Result<(&Resource, BookingDate), LibraryError> {
        let rs = self
            .library
            .find_resource(resource)
            .ok_or_else(|| LibraryError::UnknownResource(resource.to_string()))?;
        let date = clock::parse_date(date).map_err(BookingError::InvalidDateFormat)?;
        Ok((rs, date))
    }

    fn route_reply(&self, route: Result<Path, LibraryError>, what: &str) -> Reply {
        match route {
            Ok(path) => Reply::ok(format!(
                "Path to {what}:\n{}",
                self.library.map().render_path(&path)
            )),
            Err(LibraryError::Route(RouteError::NotPlaced)) => {
                Reply::err(format!("This {what} is not in the map!\n"))
            }
            Err(LibraryError::Route(RouteError::Unreachable)) => {
                Reply::err(format!("There's no way to get to this {what}!\n"))
            }
            Err(e) => Reply::err(format!("Error: {e}\n")),
        }
    }
}
