// File: ./src/model/dates.rs
// Resolves loose relative day expressions ("tomorrow", "next friday") against an anchor.
use crate::model::item::AnchorTime;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Full English weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Matches a full weekday name, ignoring case and surrounding whitespace.
pub fn parse_weekday_name(s: &str) -> Option<Weekday> {
    let lower = s.trim().to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .position(|name| *name == lower)
        .map(|idx| WEEKDAYS[idx])
}

/// Two-letter iCalendar weekday code (MO, TU, ...).
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

// Days from `from` forward to the next `target`, 0 when they coincide.
fn days_ahead(target: Weekday, from: Weekday) -> i64 {
    let t = target.num_days_from_monday() as i64;
    let f = from.num_days_from_monday() as i64;
    (t - f + 7) % 7
}

/// Resolves `expression` if it is one of the recognized relative forms.
///
/// Recognized: `today`, `tomorrow`, `this <weekday>`, `next <weekday>`, `<weekday>`.
/// `this` and a bare weekday never land on the anchor day itself; `next` always
/// skips at least one full week.
pub fn try_resolve(expression: &str, anchor: &AnchorTime) -> Option<NaiveDate> {
    let text = expression.trim().to_lowercase();
    let today = anchor.date();

    match text.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_signed(Duration::days(1)),
        _ => {}
    }

    for prefix in ["this", "next"] {
        if let Some(rest) = text.strip_prefix(prefix)
            && let Some(target) = parse_weekday_name(rest)
        {
            let mut delta = days_ahead(target, today.weekday());
            if prefix == "next" || delta == 0 {
                delta += 7;
            }
            return today.checked_add_signed(Duration::days(delta));
        }
    }

    if let Some(target) = parse_weekday_name(&text) {
        let delta = match days_ahead(target, today.weekday()) {
            0 => 7,
            d => d,
        };
        return today.checked_add_signed(Duration::days(delta));
    }

    None
}

/// Like [`try_resolve`], but anything unrecognized resolves to the anchor's date.
pub fn resolve(expression: &str, anchor: &AnchorTime) -> NaiveDate {
    try_resolve(expression, anchor).unwrap_or_else(|| {
        log::debug!(
            "Unrecognized relative date '{}', using anchor date",
            expression
        );
        anchor.date()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_ahead_wraps() {
        assert_eq!(days_ahead(Weekday::Mon, Weekday::Wed), 5);
        assert_eq!(days_ahead(Weekday::Fri, Weekday::Wed), 2);
        assert_eq!(days_ahead(Weekday::Wed, Weekday::Wed), 0);
    }

    #[test]
    fn test_weekday_name_is_exact() {
        assert_eq!(parse_weekday_name("  FRIDAY "), Some(Weekday::Fri));
        assert_eq!(parse_weekday_name("fri"), None);
        assert_eq!(parse_weekday_name("fridays"), None);
    }
}
