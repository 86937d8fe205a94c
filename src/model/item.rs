// File: ./src/model/item.rs
use crate::model::recurrence::RecurrenceSpec;
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    offset::LocalResult,
};
use serde::{Deserialize, Serialize};

/// One calendar the user can pick by its friendly name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarListEntry {
    pub name: String,
    pub id: String,
}

impl CalendarListEntry {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

// --- ANCHOR ---

/// The reference "now" that every relative expression resolves against.
/// Supplied by the caller and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTime(DateTime<FixedOffset>);

impl AnchorTime {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// The current wall-clock time in the process's local offset.
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    /// Interprets a naive date-time in the process's local zone.
    /// Ambiguous local times pick the earlier instant; nonexistent ones (DST gaps) fall back to UTC.
    pub fn from_local(naive: NaiveDateTime) -> Self {
        let local = match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(a, b) => a.min(b),
            LocalResult::None => Utc.from_utc_datetime(&naive).with_timezone(&Local),
        };
        Self(local.fixed_offset())
    }

    /// Midnight of `date` at UTC. Handy when only the calendar date matters.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// The anchor's UTC offset rendered as `+HH:MM`.
    pub fn offset_label(&self) -> String {
        self.0.format("%:z").to_string()
    }

    /// The host's IANA zone name (e.g. `Europe/Brussels`). Falls back to
    /// [`offset_label`](Self::offset_label) when the host zone can't be read.
    pub fn zone_label(&self) -> String {
        match iana_time_zone::get_timezone() {
            Ok(name) => name,
            Err(e) => {
                let offset = self.offset_label();
                log::warn!("Failed to get local time zone ({}), using {}", e, offset);
                offset
            }
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for AnchorTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.fixed_offset())
    }
}

// --- EVENT ---

/// A wall-clock date-time paired with the timezone label it should be read in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInstant {
    pub date_time: NaiveDateTime,
    pub time_zone: String,
}

impl EventInstant {
    pub fn new(date_time: NaiveDateTime, time_zone: impl Into<String>) -> Self {
        Self {
            date_time,
            time_zone: time_zone.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.date_time.time()
    }
}

/// A validated event, ready to hand to a calendar service exactly once.
///
/// Only the normalizer builds these, so `end > start` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    title: String,
    description: String,
    location: String,
    start: EventInstant,
    end: EventInstant,
    end_date: NaiveDate,
    recurrence: Option<RecurrenceSpec>,
    color_id: Option<String>,
    calendar_id: String,
}

impl EventRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        title: String,
        description: String,
        location: String,
        start: EventInstant,
        end: EventInstant,
        end_date: NaiveDate,
        recurrence: Option<RecurrenceSpec>,
        color_id: Option<String>,
        calendar_id: String,
    ) -> Self {
        debug_assert!(end.date_time > start.date_time);
        Self {
            title,
            description,
            location,
            start,
            end,
            end_date,
            recurrence,
            color_id,
            calendar_id,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn start(&self) -> &EventInstant {
        &self.start
    }

    pub fn end(&self) -> &EventInstant {
        &self.end
    }

    /// Last calendar date of the series. Feeds the recurrence UNTIL.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn recurrence(&self) -> Option<&RecurrenceSpec> {
        self.recurrence.as_ref()
    }

    /// The compiled `RRULE:` line, if the event repeats.
    pub fn recurrence_rule(&self) -> Option<String> {
        self.recurrence.as_ref().map(RecurrenceSpec::to_rule_string)
    }

    pub fn color_id(&self) -> Option<&str> {
        self.color_id.as_deref()
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}
