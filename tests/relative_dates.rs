// Tests for relative day expressions ("tomorrow", "this friday", "next monday").
use calscribe::model::AnchorTime;
use calscribe::model::dates::{WEEKDAY_NAMES, resolve, try_resolve};
use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// 2025-01-10 is a Friday.
fn friday_anchor() -> AnchorTime {
    AnchorTime::at_date(d(2025, 1, 10))
}

// 2025-01-08 is a Wednesday.
fn wednesday_anchor() -> AnchorTime {
    AnchorTime::at_date(d(2025, 1, 8))
}

#[test]
fn test_today_and_tomorrow() {
    let anchor = friday_anchor();
    assert_eq!(resolve("today", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("tomorrow", &anchor), d(2025, 1, 11));
    assert_eq!(resolve("  TOMORROW ", &anchor), d(2025, 1, 11));
}

#[test]
fn test_tomorrow_crosses_year() {
    let anchor = AnchorTime::at_date(d(2024, 12, 31));
    assert_eq!(resolve("tomorrow", &anchor), d(2025, 1, 1));
}

#[test]
fn test_this_weekday_skips_today() {
    let anchor = friday_anchor();
    assert_eq!(resolve("this friday", &anchor), d(2025, 1, 17));
    assert_eq!(resolve("this saturday", &anchor), d(2025, 1, 11));
    assert_eq!(resolve("this monday", &anchor), d(2025, 1, 13));
}

#[test]
fn test_next_weekday_adds_a_week() {
    let anchor = friday_anchor();
    assert_eq!(resolve("next friday", &anchor), d(2025, 1, 17));
    assert_eq!(resolve("next saturday", &anchor), d(2025, 1, 18));
    assert_eq!(resolve("Next Monday", &anchor), d(2025, 1, 20));

    let anchor = wednesday_anchor();
    assert_eq!(resolve("this friday", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("next friday", &anchor), d(2025, 1, 17));
}

#[test]
fn test_bare_weekday() {
    let anchor = wednesday_anchor();
    assert_eq!(resolve("friday", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("Monday", &anchor), d(2025, 1, 13));
    // Same weekday as the anchor means a week out.
    assert_eq!(resolve("wednesday", &anchor), d(2025, 1, 15));
}

#[test]
fn test_unknown_falls_back_to_anchor() {
    let anchor = friday_anchor();
    assert_eq!(resolve("sometime soon", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("next week", &anchor), d(2025, 1, 10));
    assert_eq!(resolve("this fri", &anchor), d(2025, 1, 10));

    assert_eq!(try_resolve("sometime soon", &anchor), None);
    assert_eq!(try_resolve("2025-02-01", &anchor), None);
}

#[test]
fn test_anchor_offset_decides_the_day() {
    // 23:30 on Friday at UTC+2 is still Friday locally.
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let anchor = AnchorTime::from(tz.with_ymd_and_hms(2025, 1, 10, 23, 30, 0).unwrap());
    assert_eq!(anchor.date(), d(2025, 1, 10));
    assert_eq!(anchor.offset_label(), "+02:00");
    assert_eq!(resolve("tomorrow", &anchor), d(2025, 1, 11));
}

#[test]
fn test_results_never_before_anchor() {
    for offset in 0..14 {
        let base = d(2025, 3, 1) + chrono::Duration::days(offset);
        let anchor = AnchorTime::at_date(base);
        for name in WEEKDAY_NAMES {
            let bare = resolve(name, &anchor);
            let this = resolve(&format!("this {}", name), &anchor);
            let next = resolve(&format!("next {}", name), &anchor);

            assert!(bare > base && bare <= base + chrono::Duration::days(7));
            assert_eq!(bare, this);
            assert_eq!(next.weekday(), bare.weekday());
            assert!(next >= base + chrono::Duration::days(7));
            assert!(next <= base + chrono::Duration::days(13));
            if base.weekday() == bare.weekday() {
                assert_eq!(next, this);
            } else {
                assert_eq!(next - this, chrono::Duration::days(7));
            }
        }
    }
}
