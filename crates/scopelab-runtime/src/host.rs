//! Output seam for the illustrations.

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};

/// Receives everything the illustrations make visible.
pub trait Host {
    /// A line of console output.
    fn log(&self, line: &str);

    /// A user-facing notification. Hosts may block until it is dismissed.
    fn alert(&self, message: &str);
}

/// Writes log lines to stdout and alerts to stderr.
///
/// Write errors are ignored, so a closed pipe (`scopelab | head -1`) ends
/// output quietly instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct StdHost {
    blocking: bool,
}

impl StdHost {
    /// Alerts block when stdin is a terminal.
    pub fn new() -> Self {
        Self {
            blocking: io::stdin().is_terminal(),
        }
    }

    /// Whether to wait for Enter on stdin after each alert, like a modal
    /// dialog.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }
}

impl Default for StdHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for StdHost {
    fn log(&self, line: &str) {
        write_line(&mut io::stdout().lock(), line);
    }

    /// Frames the message on stderr. When the host is blocking, waits for
    /// Enter before returning.
    fn alert(&self, message: &str) {
        let mut err = io::stderr().lock();
        if self.blocking {
            let mut stdin = io::stdin().lock();
            write_alert(&mut err, message, Some(&mut stdin as &mut dyn BufRead));
        } else {
            write_alert(&mut err, message, None);
        }
    }
}

fn write_line(out: &mut impl Write, line: &str) {
    let _ = writeln!(out, "{line}");
}

fn write_alert(out: &mut impl Write, message: &str, dismiss: Option<&mut dyn BufRead>) {
    let rule = "-".repeat(message.chars().count() + 2);
    let _ = writeln!(out, "+{rule}+\n| {message} |\n+{rule}+");

    if let Some(input) = dismiss {
        let _ = write!(out, "press Enter to dismiss ");
        let _ = out.flush();
        let mut line = String::new();
        let _ = input.read_line(&mut line);
    }
}

/// Something a [`RecordingHost`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Log(String),
    Alert(String),
}

/// Keeps every event in order instead of printing it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: RefCell<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Log(line) => Some(line.clone()),
                HostEvent::Alert(_) => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Alert(message) => Some(message.clone()),
                HostEvent::Log(_) => None,
            })
            .collect()
    }

    /// All events as text, one per line, alerts marked with `[alert]`.
    pub fn transcript(&self) -> String {
        self.events
            .borrow()
            .iter()
            .map(|e| match e {
                HostEvent::Log(line) => line.clone(),
                HostEvent::Alert(message) => format!("[alert] {message}"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Host for RecordingHost {
    fn log(&self, line: &str) {
        self.events.borrow_mut().push(HostEvent::Log(line.to_string()));
    }

    fn alert(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(HostEvent::Alert(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_closed_output_does_not_panic() {
        write_line(&mut ClosedPipe, "var i = 3");
        write_alert(&mut ClosedPipe, "Message is Hi mom", None);
    }

    #[test]
    fn test_alert_is_framed() {
        let mut out = Vec::new();
        write_alert(&mut out, "Hi", None);

        assert_eq!(String::from_utf8(out).unwrap(), "+----+\n| Hi |\n+----+\n");
    }

    #[test]
    fn test_blocking_alert_waits_for_a_line() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"\nleft over".to_vec());
        write_alert(&mut out, "Hi", Some(&mut input as &mut dyn BufRead));

        assert!(String::from_utf8(out).unwrap().ends_with("press Enter to dismiss "));
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn test_blocking_can_be_overridden() {
        assert!(StdHost::new().blocking(true).blocking);
        assert!(!StdHost::new().blocking(false).blocking);
    }

    #[test]
    fn test_recording_keeps_order() {
        let host = RecordingHost::new();
        host.log("3");
        host.alert("Message is Hi mom");
        host.log("4");

        assert_eq!(host.logs(), vec!["3", "4"]);
        assert_eq!(host.alerts(), vec!["Message is Hi mom"]);
        assert_eq!(host.transcript(), "3\n[alert] Message is Hi mom\n4");
        assert_eq!(host.events().len(), 3);
    }
}
