//! Result reporting: console, report file and JSON

pub mod console;
pub mod file;
pub mod json;

pub use console::ConsoleReporter;
pub use file::FileReporter;

use std::time::Duration;

/// Fractional milliseconds, as shown in reports
pub(crate) fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
