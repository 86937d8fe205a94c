// Tests for mapping friendly color and calendar names to service ids.
use anyhow::Result;
use calscribe::calendars::{
    CalendarDirectory, StaticCalendarDirectory, lookup_calendar_id, resolve_calendar_id,
};
use calscribe::color_utils::{EventColor, color_id};
use calscribe::model::CalendarListEntry;
use strum::IntoEnumIterator;

#[test]
fn test_color_table() {
    let expected = [
        ("Default", None),
        ("Lavender", Some("1")),
        ("Sage", Some("2")),
        ("Grape", Some("3")),
        ("Flamingo", Some("4")),
        ("Banana", Some("5")),
        ("Tangerine", Some("6")),
        ("Peacock", Some("7")),
        ("Graphite", Some("8")),
        ("Blueberry", Some("9")),
        ("Basil", Some("10")),
        ("Tomato", Some("11")),
    ];
    for (name, id) in expected {
        assert_eq!(color_id(name), id, "color {}", name);
    }
    assert_eq!(EventColor::iter().count(), expected.len());
    assert_eq!(EventColor::names()[0], "Default");
}

#[test]
fn test_color_names_ignore_case_and_padding() {
    assert_eq!(color_id("tomato"), Some("11"));
    assert_eq!(color_id("  PEACOCK "), Some("7"));
    assert_eq!(EventColor::from_name("basil"), Some(EventColor::Basil));
}

#[test]
fn test_unknown_color() {
    assert_eq!(color_id("Chartreuse"), None);
    assert_eq!(color_id(""), None);
    assert_eq!(EventColor::from_name("Chartreuse"), None);
}

fn entries() -> Vec<CalendarListEntry> {
    vec![
        CalendarListEntry::new("Work", "work-id"),
        CalendarListEntry::new("Family", "family-id"),
        CalendarListEntry::new("Work", "shadowed-id"),
    ]
}

#[test]
fn test_calendar_exact_match_first_wins() {
    let calendars = entries();
    assert_eq!(resolve_calendar_id("Work", &calendars), Some("work-id"));
    assert_eq!(resolve_calendar_id("Family", &calendars), Some("family-id"));
    assert_eq!(resolve_calendar_id("work", &calendars), None);
    assert_eq!(resolve_calendar_id("Holidays", &calendars), None);
    assert_eq!(resolve_calendar_id("Work", &[]), None);
}

#[test]
fn test_lookup_through_directory() -> Result<()> {
    let directory = StaticCalendarDirectory::new(entries());
    assert_eq!(
        lookup_calendar_id(&directory, "Family")?,
        Some("family-id".to_string())
    );
    assert_eq!(lookup_calendar_id(&directory, "Holidays")?, None);
    Ok(())
}

struct OfflineDirectory;

impl CalendarDirectory for OfflineDirectory {
    fn calendars(&self) -> Result<Vec<CalendarListEntry>> {
        Err(anyhow::anyhow!("calendar service unreachable"))
    }
}

#[test]
fn test_directory_failure_propagates() {
    let err = lookup_calendar_id(&OfflineDirectory, "Work").unwrap_err();
    assert!(err.to_string().contains("unreachable"));
}
