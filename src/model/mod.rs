// File: ./src/model/mod.rs
pub mod adapter;
pub mod dates;
pub mod error;
pub mod item;
pub mod normalizer;
pub mod parser;
pub mod recurrence;

pub use adapter::{EventPayload, TimePayload};
pub use error::{Diagnostic, NormalizationError, RecurrenceError};
pub use item::{AnchorTime, CalendarListEntry, EventInstant, EventRecord};
pub use normalizer::{BlockResult, NormalizeOptions, NormalizedEvent, Normalizer, Selection};
pub use recurrence::{Frequency, RecurrenceSpec};
