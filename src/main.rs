use std::io::{self, BufRead, Write};

use tracing::info;

use kiosk::config::KioskConfig;
use kiosk::layout::LibraryLayout;
use kiosk::session::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout is the kiosk display; logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = KioskConfig::from_env()?;
    kiosk::observability::init(config.metrics_port);

    let layout = match &config.layout {
        Some(path) => LibraryLayout::load(path)?,
        None => LibraryLayout::builtin(),
    };
    let library = layout.into_library()?;
    info!("kiosk ready: {}", library.name());
    info!("  search: {}", config.search.label());
    info!("  max booking: {} minutes", config.max_booking_minutes);
    info!(
        "  metrics: {}",
        config
            .metrics_port
            .map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics"))
    );

    let mut session = Session::with_config(library, &config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "Welcome to {}. Type 'help' for commands.", session.library().name())?;
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let reply = session.handle_line(&line?);
        write!(stdout, "{}", reply.text)?;
        if reply.quit {
            break;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    info!("kiosk shut down");
    Ok(())
}
