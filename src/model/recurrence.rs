// File: ./src/model/recurrence.rs
// Compiles free-text recurrence phrases into RFC 5545 RRULE strings.
use crate::model::dates::{WEEKDAY_NAMES, parse_weekday_name, weekday_code};
use crate::model::error::RecurrenceError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use regex::Regex;
use rrule::RRuleSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Frequency {
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Maps an interval unit ("week", "months", ...) to its frequency.
    pub fn from_unit(unit: &str) -> Option<Self> {
        let s = unit.to_lowercase();
        if s.starts_with('w') {
            Some(Frequency::Weekly)
        } else if s.starts_with("mo") {
            Some(Frequency::Monthly)
        } else if s.starts_with('y') {
            Some(Frequency::Yearly)
        } else {
            None
        }
    }
}

/// A structured recurrence rule. Serializes in a fixed order:
/// FREQ, INTERVAL, BYMONTH, BYMONTHDAY, BYDAY, UNTIL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub frequency: Frequency,
    pub interval: u32,
    pub by_weekday: Vec<Weekday>,
    pub by_month: Option<u32>,
    pub by_month_day: Option<u32>,
    pub until: Option<DateTime<Utc>>,
}

impl Default for RecurrenceSpec {
    fn default() -> Self {
        Self {
            frequency: Frequency::Weekly,
            interval: 1,
            by_weekday: Vec::new(),
            by_month: None,
            by_month_day: None,
            until: None,
        }
    }
}

impl RecurrenceSpec {
    /// The rule without the `RRULE:` prefix.
    pub fn rule_body(&self) -> String {
        let mut parts = vec![
            format!("FREQ={}", self.frequency),
            format!("INTERVAL={}", self.interval),
        ];
        if let Some(month) = self.by_month {
            parts.push(format!("BYMONTH={}", month));
        }
        if let Some(day) = self.by_month_day {
            parts.push(format!("BYMONTHDAY={}", day));
        }
        if !self.by_weekday.is_empty() {
            let days: Vec<&str> = self.by_weekday.iter().map(|d| weekday_code(*d)).collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }
        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        }
        parts.join(";")
    }

    pub fn to_rule_string(&self) -> String {
        format!("RRULE:{}", self.rule_body())
    }

    /// Expands the first `limit` occurrences of this rule starting at `start` (read as UTC).
    pub fn occurrences(
        &self,
        start: NaiveDateTime,
        limit: u16,
    ) -> Result<Vec<NaiveDateTime>, RecurrenceError> {
        let source = format!(
            "DTSTART:{}\n{}",
            start.format("%Y%m%dT%H%M%SZ"),
            self.to_rule_string()
        );
        let set =
            RRuleSet::from_str(&source).map_err(|e| RecurrenceError::Expansion(e.to_string()))?;
        Ok(set
            .into_iter()
            .take(limit as usize)
            .map(|d| d.to_utc().naive_utc())
            .collect())
    }
}

impl fmt::Display for RecurrenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rule_string())
    }
}

// --- PATTERNS ---

fn annual_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)annually\s+on\s+([\w\s]+)").expect("valid regex"))
}

fn weekday_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let alternation = WEEKDAY_NAMES.join("|");
        Regex::new(&format!("(?i)({})", alternation)).expect("valid regex")
    })
}

fn interval_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)every\s+(\d+)?\s*(weeks?|months?|years?)").expect("valid regex")
    })
}

fn parse_month_name(s: &str) -> Option<u32> {
    let month = match s {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Reads a month and day out of loose words like "July 20th" or "the 3rd of march".
/// Whichever part is missing comes from `reference`.
fn parse_month_day(text: &str, reference: NaiveDate) -> Result<(u32, u32), RecurrenceError> {
    let mut month = None;
    let mut day = None;

    for word in text.split_whitespace() {
        let lower = word.to_lowercase();
        if month.is_none()
            && let Some(m) = parse_month_name(&lower)
        {
            month = Some(m);
            continue;
        }
        let digits = ["st", "nd", "rd", "th"]
            .iter()
            .find_map(|suffix| lower.strip_suffix(suffix))
            .unwrap_or(&lower);
        if day.is_none()
            && digits.len() <= 2
            && let Ok(n) = digits.parse::<u32>()
            && (1..=31).contains(&n)
        {
            day = Some(n);
        }
    }

    if month.is_none() && day.is_none() {
        return Err(RecurrenceError::UnparsableDate(text.to_string()));
    }

    let month = month.unwrap_or(reference.month());
    let day = day.unwrap_or(reference.day());
    if NaiveDate::from_ymd_opt(reference.year(), month, day).is_none() {
        return Err(RecurrenceError::DayOutOfRange { month, day });
    }
    Ok((month, day))
}

fn end_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(last_second).and_utc()
}

/// Compiles a recurrence phrase.
///
/// Three independent passes run in order, and the interval pass overwrites the
/// frequency chosen by the annual pass ("annually on July 20 every 3 months" is MONTHLY).
/// `reference` supplies the month or day that an annual phrase leaves out.
pub fn compile(
    text: &str,
    until: Option<NaiveDate>,
    reference: NaiveDate,
) -> Result<RecurrenceSpec, RecurrenceError> {
    log::debug!("Compiling recurrence from: {}", text);
    let mut spec = RecurrenceSpec::default();

    if let Some(caps) = annual_regex().captures(text) {
        let (month, day) = parse_month_day(&caps[1], reference)?;
        spec.frequency = Frequency::Yearly;
        spec.by_month = Some(month);
        spec.by_month_day = Some(day);
    }

    // Every mention counts, duplicates included.
    spec.by_weekday = weekday_regex()
        .find_iter(text)
        .filter_map(|m| parse_weekday_name(m.as_str()))
        .collect();

    if let Some(caps) = interval_regex().captures(text) {
        if let Some(count) = caps.get(1) {
            let raw = count.as_str();
            let interval = raw
                .parse::<u32>()
                .map_err(|_| RecurrenceError::InvalidInterval(raw.to_string()))?;
            if interval == 0 {
                return Err(RecurrenceError::InvalidInterval(raw.to_string()));
            }
            spec.interval = interval;
        } else {
            spec.interval = 1;
        }
        if let Some(freq) = Frequency::from_unit(&caps[2]) {
            spec.frequency = freq;
        }
    }

    spec.until = until.map(end_of_day_utc);
    log::debug!("Compiled recurrence: {}", spec);
    Ok(spec)
}

/// Compiles a recurrence phrase, logging and discarding any failure.
pub fn compile_lenient(
    text: &str,
    until: Option<NaiveDate>,
    reference: NaiveDate,
) -> Option<RecurrenceSpec> {
    match compile(text, until, reference) {
        Ok(spec) => Some(spec),
        Err(e) => {
            log::warn!("Dropping recurrence '{}': {}", text, e);
            None
        }
    }
}
