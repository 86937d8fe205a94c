// File: ./src/calendars.rs
// Friendly calendar names and where they come from.
use crate::config::Config;
use crate::model::item::CalendarListEntry;
use anyhow::Result;

/// A source of calendars the user can target by name.
///
/// Implementations may hit the network, so listing is fallible.
pub trait CalendarDirectory: Send + Sync {
    fn calendars(&self) -> Result<Vec<CalendarListEntry>>;
}

/// A fixed list, usually built from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendarDirectory {
    entries: Vec<CalendarListEntry>,
}

impl StaticCalendarDirectory {
    pub fn new(entries: Vec<CalendarListEntry>) -> Self {
        Self { entries }
    }

    /// Configured calendars, plus the default calendar when no entry already carries its name.
    pub fn from_config(config: &Config) -> Self {
        let mut entries = config.calendars.clone();
        if !entries.iter().any(|c| c.name == config.default_calendar) {
            entries.push(CalendarListEntry::new(
                config.default_calendar.clone(),
                config.default_calendar_id.clone(),
            ));
        }
        Self { entries }
    }
}

impl CalendarDirectory for StaticCalendarDirectory {
    fn calendars(&self) -> Result<Vec<CalendarListEntry>> {
        Ok(self.entries.clone())
    }
}

/// Exact, case-sensitive name match. The first entry with that name wins.
pub fn resolve_calendar_id<'a>(name: &str, calendars: &'a [CalendarListEntry]) -> Option<&'a str> {
    calendars
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id.as_str())
}

/// Looks `name` up in whatever `directory` currently lists.
pub fn lookup_calendar_id(directory: &dyn CalendarDirectory, name: &str) -> Result<Option<String>> {
    let calendars = directory.calendars()?;
    Ok(resolve_calendar_id(name, &calendars).map(str::to_string))
}
