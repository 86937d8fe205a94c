// File: src/model/adapter.rs
// Converts event records into the JSON shape calendar services accept on insert.
use crate::model::item::{EventInstant, EventRecord};
use serde::Serialize;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePayload {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: TimePayload,
    pub end: TimePayload,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
}

impl From<&EventInstant> for TimePayload {
    fn from(instant: &EventInstant) -> Self {
        Self {
            date_time: instant.date_time.format(DATE_TIME_FORMAT).to_string(),
            time_zone: instant.time_zone.clone(),
        }
    }
}

impl EventRecord {
    pub fn to_payload(&self) -> EventPayload {
        EventPayload {
            summary: self.title().to_string(),
            description: self.description().to_string(),
            location: self.location().to_string(),
            start: self.start().into(),
            end: self.end().into(),
            recurrence: self.recurrence_rule().into_iter().collect(),
            color_id: self.color_id().map(str::to_string),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.to_payload())
    }
}
