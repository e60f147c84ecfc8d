use std::io::{self, Write};

pub const MISSING_INPUT: &str = "Please enter both source and destination.";
pub const NO_ROUTES: &str = "No routes found.";
pub const FETCH_FAILED: &str = "Something went wrong while fetching routes.";

/// User-facing, blocking-style notifications.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Collects alerts in order. Useful when the caller decides how to show them.
impl Notifier for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Prints alerts on a terminal stream (stderr by default).
pub struct ConsoleNotifier<W: Write = io::Stderr> {
    out: W,
}

impl ConsoleNotifier {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "! {}", message) {
            log::warn!("Could not show alert \"{}\": {}", message, e);
        }
    }
}
