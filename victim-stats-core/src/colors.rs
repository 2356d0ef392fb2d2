//! Chat colors.

use std::fmt;

use tracing::warn;

/// Inline chat color code for player names.
pub const NAME_COLOR: &str = "\x04";
/// Inline chat color code resetting to the default text color.
pub const DEFAULT_COLOR: &str = "\x01";
/// Inline chat color code for weapon names.
pub const WEAPON_COLOR: &str = "\x05";
/// Inline chat color code for distances.
pub const DISTANCE_COLOR: &str = "\x04";

/// A color usable in a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatColor {
    /// A raw engine color byte (CS:GO palette).
    Code(u8),
    /// An RGB color, sent as `\x07RRGGBB`.
    Rgb(u8, u8, u8),
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatColor::Code(code) => write!(f, "{}", char::from(*code)),
            ChatColor::Rgb(r, g, b) => write!(f, "\x07{r:02X}{g:02X}{b:02X}"),
        }
    }
}

pub const RED: ChatColor = ChatColor::Rgb(255, 0, 0);
pub const DARK_RED: ChatColor = ChatColor::Rgb(139, 0, 0);
pub const LIGHT_RED: ChatColor = ChatColor::Rgb(255, 102, 102);
pub const BLUE: ChatColor = ChatColor::Rgb(0, 0, 255);
pub const DARK_BLUE: ChatColor = ChatColor::Rgb(0, 0, 139);
pub const LIGHT_BLUE: ChatColor = ChatColor::Rgb(173, 216, 230);
pub const GREEN: ChatColor = ChatColor::Rgb(0, 255, 0);
pub const LIGHT_GREEN: ChatColor = ChatColor::Rgb(144, 238, 144);
pub const OLIVE: ChatColor = ChatColor::Rgb(128, 128, 0);
pub const WHITE: ChatColor = ChatColor::Rgb(255, 255, 255);
pub const GRAY: ChatColor = ChatColor::Rgb(128, 128, 128);
pub const ORANGE: ChatColor = ChatColor::Rgb(255, 165, 0);
pub const PURPLE: ChatColor = ChatColor::Rgb(128, 0, 128);
pub const YELLOW: ChatColor = ChatColor::Rgb(255, 255, 0);

const NAMED: &[(&str, ChatColor)] = &[
    ("RED", RED),
    ("DARK_RED", DARK_RED),
    ("LIGHT_RED", LIGHT_RED),
    ("BLUE", BLUE),
    ("DARK_BLUE", DARK_BLUE),
    ("LIGHT_BLUE", LIGHT_BLUE),
    ("GREEN", GREEN),
    ("LIGHT_GREEN", LIGHT_GREEN),
    ("OLIVE", OLIVE),
    ("WHITE", WHITE),
    ("GRAY", GRAY),
    ("ORANGE", ORANGE),
    ("PURPLE", PURPLE),
    ("YELLOW", YELLOW),
];

/// Look up a named color.
pub fn named(name: &str) -> Option<ChatColor> {
    NAMED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, color)| *color)
}

/// Parse a color cvar value: a color name or `"r,g,b"`.
///
/// Invalid values log a warning and yield [`RED`].
pub fn parse_color(cvar: &str, value: &str) -> ChatColor {
    let value = value.trim();
    if let Some(color) = named(value) {
        return color;
    }
    match parse_rgb(value) {
        Some((r, g, b)) => ChatColor::Rgb(r, g, b),
        None => {
            warn!(
                target: "victim_stats::config",
                cvar,
                value,
                "Cvar not set to a proper value, returning RED instead"
            );
            RED
        }
    }
}

fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let mut parts = value.split(',').map(|part| part.trim().parse::<u8>());
    let color = (parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    parts.next().is_none().then_some(color)
}

/// Colors used for each report section in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionColors {
    pub attacker: ChatColor,
    pub wounded: ChatColor,
    pub killed: ChatColor,
    pub killer: ChatColor,
}

impl SectionColors {
    /// Defaults for the running game. CS:GO only understands its own palette
    /// bytes, other games take RGB.
    pub fn for_game(game: &str) -> Self {
        if game == "csgo" {
            Self {
                attacker: ChatColor::Code(0x0F),
                wounded: ChatColor::Code(0x0C),
                killed: ChatColor::Code(0x0A),
                killer: ChatColor::Code(0x02),
            }
        } else {
            Self {
                attacker: DARK_RED,
                wounded: DARK_BLUE,
                killed: LIGHT_BLUE,
                killer: LIGHT_RED,
            }
        }
    }
}
