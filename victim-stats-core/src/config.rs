//! Server configuration read from host cvars.

use tracing::warn;

use crate::colors::{parse_color, ChatColor, SectionColors};
use crate::distance::DistanceType;
use crate::host::{ConVar, Host, FALLBACK_LANGUAGE};
use crate::settings::DisplayType;
use crate::strings;

pub const DISPLAY_TYPE_CVAR: &str = "vs_default_display_type";
pub const DISTANCE_TYPE_CVAR: &str = "vs_default_distance_type";
pub const ATTACKER_COLOR_CVAR: &str = "vs_attacker_color";
pub const WOUNDED_COLOR_CVAR: &str = "vs_wounded_color";
pub const KILLED_COLOR_CVAR: &str = "vs_killed_color";
pub const KILLER_COLOR_CVAR: &str = "vs_killer_color";

pub const DEFAULT_DISPLAY_TYPE: DisplayType = DisplayType::ChatHitgroups;
pub const DEFAULT_DISTANCE_TYPE: DistanceType = DistanceType::Both;

/// Resolved server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub default_display: DisplayType,
    pub default_distance: DistanceType,
    pub colors: SectionColors,
}

impl Config {
    /// Defaults for `game`, before any cvar is consulted.
    pub fn defaults(game: &str) -> Self {
        Self {
            default_display: DEFAULT_DISPLAY_TYPE,
            default_distance: DEFAULT_DISTANCE_TYPE,
            colors: SectionColors::for_game(game),
        }
    }

    /// Cvars the plugin registers, with option lists translated for the
    /// server console.
    pub fn cvars<H: Host + ?Sized>(host: &H) -> Vec<ConVar> {
        let describe = |key: &str| strings::translate(host, key, FALLBACK_LANGUAGE, &[]);
        let options = |choices: Vec<(u8, &'static str)>| {
            choices
                .into_iter()
                .map(|(value, key)| format!("{value} - {}", describe(key)))
                .collect::<Vec<_>>()
        };

        let mut cvars = vec![
            ConVar {
                name: DISPLAY_TYPE_CVAR.to_string(),
                default: DEFAULT_DISPLAY_TYPE.value().to_string(),
                description: describe(strings::DISPLAY_TYPE_DESCRIPTION),
                options: options(DisplayType::ALL.iter().map(|d| (d.value(), d.option_key())).collect()),
                public: false,
            },
            ConVar {
                name: DISTANCE_TYPE_CVAR.to_string(),
                default: DEFAULT_DISTANCE_TYPE.value().to_string(),
                description: describe(strings::DISTANCE_TYPE_DESCRIPTION),
                options: options(DistanceType::ALL.iter().map(|d| (d.value(), d.option_key())).collect()),
                public: false,
            },
        ];

        for (name, section) in [
            (ATTACKER_COLOR_CVAR, "attackers"),
            (WOUNDED_COLOR_CVAR, "wounded players"),
            (KILLED_COLOR_CVAR, "killed players"),
            (KILLER_COLOR_CVAR, "the killer"),
        ] {
            cvars.push(ConVar {
                name: name.to_string(),
                default: String::new(),
                description: format!(
                    "Chat color for {section}: a color name or \"r,g,b\". Empty uses the game default."
                ),
                options: Vec::new(),
                public: false,
            });
        }

        cvars
    }

    /// Read the current cvar values. Bad values fall back with a warning.
    pub fn from_host<H: Host + ?Sized>(host: &H) -> Self {
        let defaults = Self::defaults(host.game());

        let default_display = numeric_cvar(
            host,
            DISPLAY_TYPE_CVAR,
            defaults.default_display,
            DisplayType::from_value,
        );
        let default_distance = numeric_cvar(
            host,
            DISTANCE_TYPE_CVAR,
            defaults.default_distance,
            DistanceType::from_value,
        );

        let color = |name: &str, fallback: ChatColor| match host.cvar(name) {
            Some(value) if !value.trim().is_empty() => parse_color(name, &value),
            _ => fallback,
        };

        Self {
            default_display,
            default_distance,
            colors: SectionColors {
                attacker: color(ATTACKER_COLOR_CVAR, defaults.colors.attacker),
                wounded: color(WOUNDED_COLOR_CVAR, defaults.colors.wounded),
                killed: color(KILLED_COLOR_CVAR, defaults.colors.killed),
                killer: color(KILLER_COLOR_CVAR, defaults.colors.killer),
            },
        }
    }
}

/// Read a numeric option cvar, warning and using `default` on bad values.
fn numeric_cvar<H: Host + ?Sized, T>(
    host: &H,
    name: &str,
    default: T,
    from_value: fn(u8) -> Option<T>,
) -> T {
    let Some(raw) = host.cvar(name) else {
        return default;
    };
    match raw.trim().parse::<u8>().ok().and_then(from_value) {
        Some(value) => value,
        None => {
            warn!(
                target: "victim_stats::config",
                cvar = name,
                value = raw.as_str(),
                "Cvar not set to a proper value, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{DARK_BLUE, RED};
    use crate::testing::TestHost;

    #[test]
    fn defaults_without_cvars() {
        let host = TestHost::new("orangebox", "cstrike");
        let config = Config::from_host(&host);
        assert_eq!(config, Config::defaults("cstrike"));
    }

    #[test]
    fn reads_cvar_values() {
        let mut host = TestHost::new("csgo", "csgo");
        host.set_cvar(DISPLAY_TYPE_CVAR, "4");
        host.set_cvar(DISTANCE_TYPE_CVAR, "1");
        host.set_cvar(WOUNDED_COLOR_CVAR, "DARK_BLUE");

        let config = Config::from_host(&host);
        assert_eq!(config.default_display, DisplayType::Menu);
        assert_eq!(config.default_distance, DistanceType::Feet);
        assert_eq!(config.colors.wounded, DARK_BLUE);
        assert_eq!(config.colors.killer, ChatColor::Code(0x02));
    }

    #[test]
    fn malformed_values_fall_back() {
        let mut host = TestHost::new("orangebox", "cstrike");
        host.set_cvar(DISPLAY_TYPE_CVAR, "chat please");
        host.set_cvar(DISTANCE_TYPE_CVAR, "7");
        host.set_cvar(KILLER_COLOR_CVAR, "not-a-color");

        let config = Config::from_host(&host);
        assert_eq!(config.default_display, DEFAULT_DISPLAY_TYPE);
        assert_eq!(config.default_distance, DEFAULT_DISTANCE_TYPE);
        assert_eq!(config.colors.killer, RED);
    }

    #[test]
    fn cvar_list_includes_options() {
        let host = TestHost::new("orangebox", "cstrike");
        let cvars = Config::cvars(&host);
        let display = cvars
            .iter()
            .find(|cvar| cvar.name == DISPLAY_TYPE_CVAR)
            .unwrap();
        assert_eq!(display.default, "1");
        assert_eq!(display.options.len(), 5);
        assert_eq!(display.options[0], "1 - Chat with hitgroups");
        assert!(cvars.iter().all(|cvar| cvar.name.starts_with("vs_")));
    }
}
