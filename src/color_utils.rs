//calscribe/src/color_utils.rs

// Friendly event color names and the calendar service's numeric color ids.
// No terminal or GUI dependencies, so core logic and tests can use it directly.

use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The fixed event color palette. `Default` means "use the calendar's own color".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum EventColor {
    #[default]
    Default,
    Lavender,
    Sage,
    Grape,
    Flamingo,
    Banana,
    Tangerine,
    Peacock,
    Graphite,
    Blueberry,
    Basil,
    Tomato,
}

impl EventColor {
    /// Case-insensitive lookup by friendly name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name.trim()).ok()
    }

    /// The service color id, or `None` for [`EventColor::Default`].
    pub fn id(self) -> Option<&'static str> {
        match self {
            EventColor::Default => None,
            EventColor::Lavender => Some("1"),
            EventColor::Sage => Some("2"),
            EventColor::Grape => Some("3"),
            EventColor::Flamingo => Some("4"),
            EventColor::Banana => Some("5"),
            EventColor::Tangerine => Some("6"),
            EventColor::Peacock => Some("7"),
            EventColor::Graphite => Some("8"),
            EventColor::Blueberry => Some("9"),
            EventColor::Basil => Some("10"),
            EventColor::Tomato => Some("11"),
        }
    }

    /// Display swatch for the color, as the service renders it.
    pub fn hex(self) -> Option<&'static str> {
        match self {
            EventColor::Default => None,
            EventColor::Lavender => Some("#7986cb"),
            EventColor::Sage => Some("#33b679"),
            EventColor::Grape => Some("#8e24aa"),
            EventColor::Flamingo => Some("#e67c73"),
            EventColor::Banana => Some("#f6bf26"),
            EventColor::Tangerine => Some("#f4511e"),
            EventColor::Peacock => Some("#039be5"),
            EventColor::Graphite => Some("#616161"),
            EventColor::Blueberry => Some("#3f51b5"),
            EventColor::Basil => Some("#0b8043"),
            EventColor::Tomato => Some("#d50000"),
        }
    }

    pub fn names() -> Vec<String> {
        Self::iter().map(|c| c.to_string()).collect()
    }
}

/// Maps a friendly color name to its id. Unknown names and "Default" both yield `None`.
pub fn color_id(name: &str) -> Option<&'static str> {
    EventColor::from_name(name).and_then(EventColor::id)
}

pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Relative luminance check, used to pick readable text over a swatch.
pub fn is_dark(r: u8, g: u8, b: u8) -> bool {
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    luminance < 140.0
}
