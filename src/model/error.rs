// File: ./src/model/error.rs
// Error and diagnostic types shared by the recurrence compiler and the normalizer.
use chrono::NaiveDateTime;
use std::fmt;

/// Why a recurrence phrase could not be compiled into a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The text after "annually on" named neither a month nor a day.
    UnparsableDate(String),
    /// A month/day pair that no calendar contains (e.g. February 30).
    DayOutOfRange { month: u32, day: u32 },
    /// "every 0 weeks", or a count too large to represent.
    InvalidInterval(String),
    /// The rrule engine rejected the compiled rule.
    Expansion(String),
}

impl fmt::Display for RecurrenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceError::UnparsableDate(text) => {
                write!(f, "Could not read an annual date from '{}'", text.trim())
            }
            RecurrenceError::DayOutOfRange { month, day } => {
                write!(f, "Day {} does not exist in month {}", day, month)
            }
            RecurrenceError::InvalidInterval(raw) => {
                write!(f, "Invalid recurrence interval '{}'", raw)
            }
            RecurrenceError::Expansion(msg) => write!(f, "Recurrence rule rejected: {}", msg),
        }
    }
}

impl std::error::Error for RecurrenceError {}

/// Why a directive block could not become an event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    MissingField(&'static str),
    InvalidDate {
        field: &'static str,
        value: String,
    },
    InvalidTime {
        field: &'static str,
        value: String,
    },
    /// End is not strictly after start.
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    UnknownCalendar {
        name: String,
        available: Vec<String>,
    },
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::MissingField(field) => {
                write!(f, "Missing required field '{}'", field)
            }
            NormalizationError::InvalidDate { field, value } => {
                write!(f, "Invalid date in '{}': '{}'", field, value)
            }
            NormalizationError::InvalidTime { field, value } => {
                write!(f, "Invalid time in '{}': '{}'", field, value)
            }
            NormalizationError::InvalidTimeRange { start, end } => write!(
                f,
                "End time ({}) must be after start time ({})",
                end.format("%Y-%m-%d %H:%M"),
                start.format("%Y-%m-%d %H:%M")
            ),
            NormalizationError::UnknownCalendar { name, available } => {
                if available.is_empty() {
                    write!(f, "Calendar '{}' not found. No calendars are configured.", name)
                } else {
                    write!(
                        f,
                        "Calendar '{}' not found. Available: {}",
                        name,
                        available.join(", ")
                    )
                }
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

/// Something the normalizer dropped or ignored while still producing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    RecurrenceDropped(RecurrenceError),
    UnknownColor(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RecurrenceDropped(err) => {
                write!(f, "Recurrence ignored: {}", err)
            }
            Diagnostic::UnknownColor(name) => {
                write!(f, "Unknown color '{}', using the calendar default", name)
            }
        }
    }
}
