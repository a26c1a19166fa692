pub mod log;
pub mod webhook;

pub use log::LogNotifier;
pub use webhook::WebhookNotifier;

use std::fmt;

use serde::Deserialize;

/// How urgent a monitor event is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for monitor events: progress at Info, the aggregate
/// violation alert at Warning, per-vehicle fetch problems at Error.
///
/// Implementations must swallow their own delivery failures; a broken
/// channel must never stop the polling loop.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

/// Delivers every event to each registered notifier, in order
#[derive(Default)]
pub struct FanoutNotifier {
    targets: Vec<Box<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: Box<dyn Notifier>) {
        self.targets.push(target);
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        for target in &self.targets {
            target.notify(severity, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<(Severity, String)>>>);

    impl Notifier for Recorder {
        fn notify(&self, severity: Severity, message: &str) {
            self.0.lock().unwrap().push((severity, message.to_string()));
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_severity_parses_lowercase() {
        let parsed: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
        assert_eq!(parsed.to_string(), "warning");
    }

    #[test]
    fn test_fanout_delivers_to_every_target() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let mut fanout = FanoutNotifier::new();
        fanout.push(Box::new(Recorder(Arc::clone(&first))));
        fanout.push(Box::new(Recorder(Arc::clone(&second))));

        fanout.notify(Severity::Warning, "vehicle 3 is out of bounds");

        for events in [&first, &second] {
            let events = events.lock().unwrap();
            assert_eq!(events.len(), 1);
            assert_eq!(
                events[0],
                (Severity::Warning, "vehicle 3 is out of bounds".to_string())
            );
        }
    }
}
