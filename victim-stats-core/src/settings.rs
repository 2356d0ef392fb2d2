//! Per-player display preferences.
//!
//! The host owns storage of these settings; the plugin registers them at load
//! and reads them back (as strings) every time a report is sent.

use tracing::warn;

use crate::distance::DistanceType;

/// Player setting name for the display type.
pub const DISPLAY_TYPE_SETTING: &str = "Display Type";

/// Player setting name for the distance type.
pub const DISTANCE_TYPE_SETTING: &str = "Distance Type";

/// Prefix the host uses to namespace this plugin's player settings.
pub const SETTINGS_PREFIX: &str = "vs";

/// How a player receives their stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    ChatHitgroups = 1,
    Chat = 2,
    MenuHitgroups = 3,
    Menu = 4,
    InteractiveMenu = 5,
}

impl DisplayType {
    pub const ALL: [DisplayType; 5] = [
        DisplayType::ChatHitgroups,
        DisplayType::Chat,
        DisplayType::MenuHitgroups,
        DisplayType::Menu,
        DisplayType::InteractiveMenu,
    ];

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn option_key(self) -> &'static str {
        match self {
            DisplayType::ChatHitgroups => "default_display_type:1",
            DisplayType::Chat => "default_display_type:2",
            DisplayType::MenuHitgroups => "default_display_type:3",
            DisplayType::Menu => "default_display_type:4",
            DisplayType::InteractiveMenu => "default_display_type:5",
        }
    }

    pub fn uses_hitgroups(self) -> bool {
        matches!(self, DisplayType::ChatHitgroups | DisplayType::MenuHitgroups)
    }

    pub fn uses_chat(self) -> bool {
        matches!(self, DisplayType::ChatHitgroups | DisplayType::Chat)
    }
}

/// A player's resolved preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPreferences {
    pub display: DisplayType,
    pub distance: DistanceType,
}

/// Parse a stored display type, falling back to `default` on bad values.
pub fn parse_display_type(raw: Option<&str>, default: DisplayType) -> DisplayType {
    parse_value(raw, DISPLAY_TYPE_SETTING)
        .and_then(DisplayType::from_value)
        .unwrap_or(default)
}

/// Parse a stored distance type, falling back to `default` on bad values.
pub fn parse_distance_type(raw: Option<&str>, default: DistanceType) -> DistanceType {
    parse_value(raw, DISTANCE_TYPE_SETTING)
        .and_then(DistanceType::from_value)
        .unwrap_or(default)
}

fn parse_value(raw: Option<&str>, setting: &str) -> Option<u8> {
    let raw = raw?.trim();
    match raw.parse::<u8>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                target: "victim_stats::config",
                setting,
                value = raw,
                "Setting not set to a number, using default"
            );
            None
        }
    }
}
