// Tests for config loading, defaults, and conversion into normalizer options.
use calscribe::calendars::{CalendarDirectory, StaticCalendarDirectory};
use calscribe::config::Config;
use calscribe::context::{AppContext, TestContext};
use calscribe::model::{AnchorTime, CalendarListEntry, Normalizer, Selection};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::fs;

#[test]
fn test_missing_config_is_detected() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));

    let config = Config::load_or_default(&ctx).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.default_calendar, "Calendar Assistant Calendar");
    assert_eq!(config.default_calendar_id, "primary");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(
        &path,
        r#"
timezone_label = "America/New_York"
default_start_time = "9:30"

[[calendars]]
name = "Work"
id = "work@group.calendar"
"#,
    )
    .unwrap();

    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.timezone_label.as_deref(), Some("America/New_York"));
    assert_eq!(config.default_duration_mins, 60);
    assert_eq!(config.default_series_days, 365);
    assert_eq!(
        config.calendars,
        vec![CalendarListEntry::new("Work", "work@group.calendar")]
    );

    let options = config.normalize_options().unwrap();
    assert_eq!(
        options.default_start_time,
        NaiveTime::from_hms_opt(9, 30, 0).unwrap()
    );
    assert_eq!(options.default_duration, Duration::minutes(60));
    assert_eq!(options.default_series_span, Duration::days(365));
}

#[test]
fn test_broken_file_is_not_missing() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "default_duration_mins = \"lots\"").unwrap();

    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(Config::load_or_default(&ctx).is_err());
}

#[test]
fn test_save_then_load() {
    let ctx = TestContext::new();
    let config = Config {
        default_color: Some("Sage".to_string()),
        default_duration_mins: 45,
        calendars: vec![CalendarListEntry::new("Family", "family@group.calendar")],
        ..Config::default()
    };
    config.save(&ctx).unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded, config);
    assert!(Config::get_path_string(&ctx).unwrap().ends_with("config.toml"));
}

#[test]
fn test_bad_option_values() {
    let config = Config {
        default_start_time: "teatime".to_string(),
        ..Config::default()
    };
    assert!(config.normalize_options().is_err());

    let config = Config {
        default_duration_mins: 0,
        ..Config::default()
    };
    assert!(config.normalize_options().is_err());
}

#[test]
fn test_directory_includes_default_calendar() {
    let config = Config {
        calendars: vec![CalendarListEntry::new("Work", "work-id")],
        ..Config::default()
    };
    let listed = StaticCalendarDirectory::from_config(&config)
        .calendars()
        .unwrap();
    assert_eq!(
        listed,
        vec![
            CalendarListEntry::new("Work", "work-id"),
            CalendarListEntry::new("Calendar Assistant Calendar", "primary"),
        ]
    );

    // An explicit entry under the default name is not duplicated.
    let config = Config {
        calendars: vec![CalendarListEntry::new(
            "Calendar Assistant Calendar",
            "assistant-id",
        )],
        ..Config::default()
    };
    let listed = StaticCalendarDirectory::from_config(&config)
        .calendars()
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn test_config_drives_normalizer() {
    let config = Config {
        default_start_time: "10:00".to_string(),
        default_duration_mins: 30,
        default_series_days: 30,
        default_title: "Busy".to_string(),
        timezone_label: Some("UTC".to_string()),
        calendars: vec![CalendarListEntry::new("Work", "work-id")],
        ..Config::default()
    };
    let calendars = StaticCalendarDirectory::from_config(&config)
        .calendars()
        .unwrap();
    let anchor = AnchorTime::at_date(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
    let normalizer =
        Normalizer::new(anchor, config.normalize_options().unwrap()).with_calendars(calendars);

    let record = normalizer
        .normalize(
            "Start Date: 2025-01-10",
            &Selection::new(None, Some("Work".to_string())),
        )
        .unwrap();
    assert_eq!(record.title(), "Busy");
    assert_eq!(record.start().time().to_string(), "10:00:00");
    assert_eq!(record.end().time().to_string(), "10:30:00");
    assert_eq!(record.start().time_zone, "UTC");
    assert_eq!(record.end_date(), NaiveDate::from_ymd_opt(2025, 2, 9).unwrap());
    assert_eq!(record.calendar_id(), "work-id");

    let record = normalizer
        .normalize(
            "Start Date: 2025-01-10",
            &Selection::new(None, Some("Calendar Assistant Calendar".to_string())),
        )
        .unwrap();
    assert_eq!(record.calendar_id(), "primary");
}
