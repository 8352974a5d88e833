//! Observability for cellquery
//!
//! Structured one-line JSON logs on stderr, keyed by typed events.
//!
//! ```ignore
//! use cellquery::observability::{log_event, Event};
//!
//! log_event(Event::QueryDispatched, &[("metric", "employeeCount")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::BatchBegin, &[("metrics", "2")]);
        log_event(Event::QueryFailed, &[]);
    }
}
