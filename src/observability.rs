use std::net::SocketAddr;

use crate::command::Command;

// ── RED metrics (command-driven) ────────────────────────────────

/// Counter: kiosk commands executed. Labels: command, status.
pub const COMMANDS_TOTAL: &str = "kiosk_commands_total";

/// Histogram: command latency in seconds. Labels: command.
pub const COMMAND_DURATION_SECONDS: &str = "kiosk_command_duration_seconds";

// ── Booking outcomes ────────────────────────────────────────────

/// Counter: bookings admitted.
pub const BOOKINGS_ADMITTED_TOTAL: &str = "kiosk_bookings_admitted_total";

/// Counter: bookings rejected. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "kiosk_bookings_rejected_total";

/// Counter: bookings cancelled.
pub const BOOKINGS_CANCELLED_TOTAL: &str = "kiosk_bookings_cancelled_total";

// ── Routing ─────────────────────────────────────────────────────

/// Counter: route requests. Labels: outcome (found, not_placed, unreachable).
pub const ROUTES_TOTAL: &str = "kiosk_routes_total";

/// Histogram: steps in each route found. Labels: strategy.
pub const ROUTE_LENGTH: &str = "kiosk_route_length";

/// Install the Prometheus exporter on `port`. No-op if port is None. A
/// failed install is logged and the kiosk carries on without metrics.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    if let Err(e) = metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        tracing::error!("failed to install Prometheus metrics exporter: {e}");
        return;
    }
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::Map => "map",
        Command::Legend => "legend",
        Command::ListMedia => "media",
        Command::ListResources => "resources",
        Command::FindMedia { .. } => "find_media",
        Command::FindResource { .. } => "find_resource",
        Command::Book { .. } => "book",
        Command::Booking { .. } => "booking",
        Command::Bookings { .. } => "bookings",
        Command::Free { .. } => "free",
        Command::Cancel { .. } => "cancel",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}
