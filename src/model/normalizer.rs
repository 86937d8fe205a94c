// File: ./src/model/normalizer.rs
// Turns directive blocks into validated event records.
use crate::calendars::resolve_calendar_id;
use crate::color_utils::EventColor;
use crate::model::dates;
use crate::model::error::{Diagnostic, NormalizationError};
use crate::model::item::{AnchorTime, CalendarListEntry, EventInstant, EventRecord};
use crate::model::parser::{
    DirectiveBlock, parse_calendar_date, parse_for_duration, parse_fuzzy_time, split_blocks,
};
use crate::model::recurrence::{self, RecurrenceSpec};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const FIELD_TITLE: &str = "Title";
pub const FIELD_SUMMARY: &str = "Summary";
pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_LOCATION: &str = "Location";
pub const FIELD_START_DATE: &str = "Start Date";
pub const FIELD_START_TIME: &str = "Start Time";
pub const FIELD_END_TIME: &str = "End Time";
pub const FIELD_END_DATE: &str = "End Date";
pub const FIELD_RECURRING: &str = "Recurring";

/// Defaults applied to fields a block leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub default_calendar_id: String,
    /// `None` uses the host's IANA zone name, or the anchor's `+HH:MM` offset
    /// when that can't be read.
    pub timezone_label: Option<String>,
    pub default_start_time: NaiveTime,
    pub default_duration: Duration,
    /// Series length used when a block has no End Date.
    pub default_series_span: Duration,
    pub default_title: String,
    pub default_description: String,
    pub default_location: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_calendar_id: "primary".to_string(),
            timezone_label: None,
            default_start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
            default_duration: Duration::hours(1),
            default_series_span: Duration::days(365),
            default_title: "Untitled Event".to_string(),
            default_description: "Not provided".to_string(),
            default_location: "Not specified".to_string(),
        }
    }
}

/// Friendly names the caller picked for this batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub color: Option<String>,
    pub calendar: Option<String>,
}

impl Selection {
    pub fn new(color: Option<String>, calendar: Option<String>) -> Self {
        Self { color, calendar }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub record: EventRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome for one block of a multi-event payload. `index` counts non-blank blocks from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    pub index: usize,
    pub outcome: Result<NormalizedEvent, NormalizationError>,
}

impl BlockResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Stateless apart from its configuration, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    anchor: AnchorTime,
    options: NormalizeOptions,
    calendars: Vec<CalendarListEntry>,
    time_zone: String,
}

impl Normalizer {
    pub fn new(anchor: AnchorTime, options: NormalizeOptions) -> Self {
        let time_zone = match &options.timezone_label {
            Some(label) => label.clone(),
            None => anchor.zone_label(),
        };
        Self {
            anchor,
            options,
            calendars: Vec::new(),
            time_zone,
        }
    }

    /// Calendars that a friendly calendar name may resolve to.
    pub fn with_calendars(mut self, calendars: Vec<CalendarListEntry>) -> Self {
        self.calendars = calendars;
        self
    }

    /// Zone label stamped on every start and end.
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    pub fn anchor(&self) -> &AnchorTime {
        &self.anchor
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn normalize(
        &self,
        raw: &str,
        selection: &Selection,
    ) -> Result<EventRecord, NormalizationError> {
        self.normalize_detailed(raw, selection).map(|n| n.record)
    }

    /// Same as [`Normalizer::normalize`], but also reports what was silently dropped.
    pub fn normalize_detailed(
        &self,
        raw: &str,
        selection: &Selection,
    ) -> Result<NormalizedEvent, NormalizationError> {
        let block = DirectiveBlock::parse(raw);
        self.normalize_block(&block, selection)
    }

    /// Normalizes every block of a `---`-separated payload. One bad block does not stop the rest.
    pub fn normalize_payload(&self, payload: &str, selection: &Selection) -> Vec<BlockResult> {
        split_blocks(payload)
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let outcome = self.normalize_detailed(raw, selection);
                if let Err(e) = &outcome {
                    log::debug!("Block {} rejected: {}", index, e);
                }
                BlockResult { index, outcome }
            })
            .collect()
    }

    pub fn normalize_block(
        &self,
        block: &DirectiveBlock,
        selection: &Selection,
    ) -> Result<NormalizedEvent, NormalizationError> {
        let mut diagnostics = Vec::new();

        let start_date = match block.get(FIELD_START_DATE) {
            Some(value) => self.parse_date_field(FIELD_START_DATE, value)?,
            None => return Err(NormalizationError::MissingField(FIELD_START_DATE)),
        };
        let end_date = self.resolve_end_date(block, start_date)?;

        let start_time = match block.get(FIELD_START_TIME) {
            Some(value) => parse_time_field(FIELD_START_TIME, value)?,
            None => self.options.default_start_time,
        };
        let start = start_date.and_time(start_time);
        let end = match block.get(FIELD_END_TIME) {
            Some(value) => start_date.and_time(parse_time_field(FIELD_END_TIME, value)?),
            None => add_or_saturate(start, self.options.default_duration),
        };
        if end <= start {
            return Err(NormalizationError::InvalidTimeRange { start, end });
        }

        let time_zone = self.time_zone.clone();

        let recurrence = self.compile_recurrence(block, end_date, &mut diagnostics);
        let color_id = resolve_color(selection.color.as_deref(), &mut diagnostics);
        let calendar_id = self.resolve_calendar(selection.calendar.as_deref())?;

        let title = block
            .get(FIELD_TITLE)
            .unwrap_or(self.options.default_title.as_str())
            .to_string();
        let description = block
            .get(FIELD_SUMMARY)
            .or_else(|| block.get(FIELD_DESCRIPTION))
            .unwrap_or(self.options.default_description.as_str())
            .to_string();
        let location = block
            .get(FIELD_LOCATION)
            .unwrap_or(self.options.default_location.as_str())
            .to_string();

        log::debug!(
            "Normalized '{}' {} -> {} ({})",
            title,
            start,
            end,
            time_zone
        );

        let record = EventRecord::new(
            title,
            description,
            location,
            EventInstant::new(start, time_zone.clone()),
            EventInstant::new(end, time_zone),
            end_date,
            recurrence,
            color_id,
            calendar_id,
        );
        Ok(NormalizedEvent {
            record,
            diagnostics,
        })
    }

    /// Strict `YYYY-MM-DD` first, then the relative forms ("tomorrow", "next friday").
    fn parse_date_field(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<NaiveDate, NormalizationError> {
        parse_calendar_date(value)
            .or_else(|| dates::try_resolve(value, &self.anchor))
            .ok_or_else(|| NormalizationError::InvalidDate {
                field,
                value: value.to_string(),
            })
    }

    fn resolve_end_date(
        &self,
        block: &DirectiveBlock,
        start_date: NaiveDate,
    ) -> Result<NaiveDate, NormalizationError> {
        let invalid = |value: &str| NormalizationError::InvalidDate {
            field: FIELD_END_DATE,
            value: value.to_string(),
        };

        match block.get(FIELD_END_DATE) {
            None => start_date
                .checked_add_signed(self.options.default_series_span)
                .ok_or_else(|| invalid("")),
            Some(value) if value.to_lowercase().contains("for") => {
                match parse_for_duration(value) {
                    Some(span) => start_date
                        .checked_add_signed(span)
                        .ok_or_else(|| invalid(value)),
                    // No recognizable span; the value has to stand on its own as a date.
                    None => self.parse_date_field(FIELD_END_DATE, value),
                }
            }
            Some(value) => self.parse_date_field(FIELD_END_DATE, value),
        }
    }

    fn compile_recurrence(
        &self,
        block: &DirectiveBlock,
        end_date: NaiveDate,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<RecurrenceSpec> {
        let text = block.get(FIELD_RECURRING)?;
        if !text.to_lowercase().contains("yes") {
            return None;
        }
        match recurrence::compile(text, Some(end_date), self.anchor.date()) {
            Ok(spec) => Some(spec),
            Err(e) => {
                log::debug!("Dropping recurrence '{}': {}", text, e);
                diagnostics.push(Diagnostic::RecurrenceDropped(e));
                None
            }
        }
    }

    fn resolve_calendar(&self, name: Option<&str>) -> Result<String, NormalizationError> {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(self.options.default_calendar_id.clone());
        };
        resolve_calendar_id(name, &self.calendars)
            .map(str::to_string)
            .ok_or_else(|| NormalizationError::UnknownCalendar {
                name: name.to_string(),
                available: self.calendars.iter().map(|c| c.name.clone()).collect(),
            })
    }
}

fn parse_time_field(field: &'static str, value: &str) -> Result<NaiveTime, NormalizationError> {
    parse_fuzzy_time(value).ok_or_else(|| NormalizationError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

fn add_or_saturate(start: NaiveDateTime, span: Duration) -> NaiveDateTime {
    start.checked_add_signed(span).unwrap_or(NaiveDateTime::MAX)
}

fn resolve_color(name: Option<&str>, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    match EventColor::from_name(name) {
        Some(color) => color.id().map(str::to_string),
        None => {
            log::debug!("Unknown color '{}', leaving event color unset", name);
            diagnostics.push(Diagnostic::UnknownColor(name.to_string()));
            None
        }
    }
}
