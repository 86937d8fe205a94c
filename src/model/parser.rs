// File: ./src/model/parser.rs
// Splits "Key: Value" directive payloads and reads the loose date/time/duration values in them.
use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

pub const BLOCK_DELIMITER: &str = "---";
pub const FIELD_SEPARATOR: &str = ": ";

/// Splits a payload on the block delimiter. Blocks that are blank after trimming are skipped.
pub fn split_blocks(payload: &str) -> Vec<&str> {
    payload
        .split(BLOCK_DELIMITER)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}

/// The "Key: Value" lines of one event description.
///
/// Keys keep the position of their first appearance; a repeated key overwrites the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveBlock {
    fields: Vec<(String, String)>,
}

impl DirectiveBlock {
    /// Lines without the `": "` separator are ignored. Only the first separator splits,
    /// so values may themselves contain `": "`.
    pub fn parse(text: &str) -> Self {
        let mut block = Self::default();
        for line in text.lines() {
            if let Some((key, value)) = line.split_once(FIELD_SEPARATOR) {
                block.insert(key.trim(), value.trim());
            }
        }
        block
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        } else {
            self.fields.push((key.to_string(), value.to_string()));
        }
    }

    /// The value for `key`, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).filter(|v| !v.is_empty())
    }

    /// The value for `key` exactly as written, empty or not.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// --- VALUES ---

/// Strict `YYYY-MM-DD`.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parses a single time token: `3pm`, `3:30am`, `15:00`, `09:00:30`.
pub fn parse_time_string(s: &str) -> Option<NaiveTime> {
    let lower = s.to_lowercase();

    // Helper for 12h
    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = lower.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = lower.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    let mut parts = lower.split(':');
    let h = parts.next()?.parse::<u32>().ok()?;
    let m = parts.next()?.parse::<u32>().ok()?;
    let sec = match parts.next() {
        Some(s) => s.parse::<u32>().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(h, m, sec)
}

/// Finds a time of day anywhere in loose text ("around 3 pm", "9:00 A.M.", "noon").
pub fn parse_fuzzy_time(text: &str) -> Option<NaiveTime> {
    let cleaned = text
        .to_lowercase()
        .replace("a.m.", "am")
        .replace("p.m.", "pm");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, ',' | ';' | '.' | '(' | ')')))
        .filter(|t| !t.is_empty())
        .collect();

    for (i, token) in tokens.iter().enumerate() {
        if let Some(next) = tokens.get(i + 1)
            && matches!(*next, "am" | "pm")
            && let Some(t) = parse_time_string(&format!("{}{}", token, next))
        {
            return Some(t);
        }
        if let Some(t) = parse_time_string(token) {
            return Some(t);
        }
        match *token {
            "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
            "midnight" => return Some(NaiveTime::MIN),
            _ => {}
        }
    }

    // A lone hour ("15") is read as 24h.
    if let [only] = tokens.as_slice()
        && let Ok(h) = only.parse::<u32>()
    {
        return NaiveTime::from_hms_opt(h, 0, 0);
    }

    None
}

pub fn parse_english_number(s: &str) -> Option<u32> {
    match s.to_lowercase().as_str() {
        "one" | "a" | "an" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<u32>().ok(),
    }
}

/// Unit of a "for N units" span. Months and years are fixed-length approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanUnit {
    Day,
    Week,
    Month,
    Year,
}

impl SpanUnit {
    pub fn from_word(u: &str) -> Option<Self> {
        let s = u.to_lowercase();
        if s.starts_with('d') {
            Some(SpanUnit::Day)
        } else if s.starts_with('w') {
            Some(SpanUnit::Week)
        } else if s.starts_with("mo") {
            Some(SpanUnit::Month)
        } else if s.starts_with('y') {
            Some(SpanUnit::Year)
        } else {
            None
        }
    }

    pub fn days(self) -> i64 {
        match self {
            SpanUnit::Day => 1,
            SpanUnit::Week => 7,
            SpanUnit::Month => 30,
            SpanUnit::Year => 365,
        }
    }
}

fn span_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)\bfor\s+(\d+|[a-z]+)\s+(days?|weeks?|months?|years?)\b")
            .expect("valid regex")
    })
}

/// Reads "for 2 months", "for two weeks" into a day count (30-day months, 365-day years).
/// Spans too large for a `Duration` read as no span at all.
pub fn parse_for_duration(text: &str) -> Option<Duration> {
    let caps = span_regex().captures(text)?;
    let count = parse_english_number(&caps[1])?;
    let unit = SpanUnit::from_word(&caps[2])?;
    let days = i64::from(count).checked_mul(unit.days())?;
    Duration::try_days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_string_forms() {
        assert_eq!(parse_time_string("3pm"), Some(t(15, 0)));
        assert_eq!(parse_time_string("12am"), Some(t(0, 0)));
        assert_eq!(parse_time_string("12:30pm"), Some(t(12, 30)));
        assert_eq!(parse_time_string("15:00"), Some(t(15, 0)));
        assert_eq!(
            parse_time_string("09:00:30"),
            NaiveTime::from_hms_opt(9, 0, 30)
        );
        assert_eq!(parse_time_string("13pm"), None);
        assert_eq!(parse_time_string("25:00"), None);
        assert_eq!(parse_time_string("1:2:3:4"), None);
    }

    #[test]
    fn test_fuzzy_time_in_text() {
        assert_eq!(parse_fuzzy_time("3:00 PM"), Some(t(15, 0)));
        assert_eq!(parse_fuzzy_time("9 a.m."), Some(t(9, 0)));
        assert_eq!(parse_fuzzy_time("around 4pm, maybe"), Some(t(16, 0)));
        assert_eq!(parse_fuzzy_time("noon"), Some(t(12, 0)));
        assert_eq!(parse_fuzzy_time("15"), Some(t(15, 0)));
        assert_eq!(parse_fuzzy_time("sometime later"), None);
        assert_eq!(parse_fuzzy_time("24"), None);
    }

    #[test]
    fn test_for_duration() {
        assert_eq!(parse_for_duration("for 2 months"), Some(Duration::days(60)));
        assert_eq!(parse_for_duration("For three Weeks"), Some(Duration::days(21)));
        assert_eq!(parse_for_duration("for 1 year"), Some(Duration::days(365)));
        assert_eq!(parse_for_duration("for a while"), None);
        assert_eq!(parse_for_duration("forever"), None);
    }

    #[test]
    fn test_for_duration_out_of_range() {
        assert_eq!(parse_for_duration("for 999999999 years"), None);
        assert_eq!(parse_for_duration("for 4294967295 months"), None);
        // Past u32, the count itself does not parse.
        assert_eq!(parse_for_duration("for 4294967296 days"), None);
        // Large but representable.
        assert_eq!(
            parse_for_duration("for 100000 years"),
            Some(Duration::days(36_500_000))
        );
    }

    #[test]
    fn test_block_overwrite_keeps_first_position() {
        let block = DirectiveBlock::parse("Title: A\nLocation: Here\nTitle: B\nnoise line");
        assert_eq!(block.get("Title"), Some("B"));
        assert_eq!(block.keys().collect::<Vec<_>>(), vec!["Title", "Location"]);
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let block = DirectiveBlock::parse("Title: \nLocation: x");
        assert_eq!(block.raw("Title"), Some(""));
        assert_eq!(block.get("Title"), None);
    }
}
