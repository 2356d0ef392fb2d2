//! Per-round victim stats for shooter game servers.
//!
//! The plugin counts damage given and taken, hitgroups and kills between
//! opposing players during a round, and reports them to each player when
//! they die or when the round ends. Everything engine-specific goes through
//! the [`Host`] trait; [`VictimStats`] is driven by feeding it
//! [`GameEvent`]s.
//!
//! - [`stats`] and [`store`] hold the per-round counters
//! - [`plugin`] classifies events, aggregates and triggers reports
//! - [`report`] renders chat lines and menus
//! - [`config`], [`settings`] and [`colors`] read server and player options

pub mod colors;
pub mod config;
pub mod distance;
pub mod error;
pub mod event;
pub mod host;
pub mod menu;
pub mod plugin;
pub mod report;
pub mod settings;
pub mod stats;
pub mod store;
pub mod strings;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use distance::DistanceType;
pub use error::{Error, Result};
pub use event::{GameEvent, UserId};
pub use host::{ConVar, Host, PlayerInfo, PlayerSetting, SettingOption};
pub use menu::{Menu, MenuItem};
pub use plugin::VictimStats;
pub use report::{KillType, Report, SectionKind};
pub use settings::{DisplayType, PlayerPreferences};
pub use stats::{PlayerDamage, PlayerKill, PlayerStats};
pub use store::StatStore;

/// Display name of the plugin.
pub const NAME: &str = "Victim Stats";

/// Base name used for translation folders and the version cvar.
pub const BASENAME: &str = "victim_stats";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engines the plugin ships translations for.
pub const SUPPORTED_ENGINES: &[&str] = &["csgo", "orangebox", "l4d2", "blade"];

/// Whether the plugin can load on `engine`.
pub fn is_supported_engine(engine: &str) -> bool {
    SUPPORTED_ENGINES.contains(&engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_engines_are_supported() {
        assert!(is_supported_engine("csgo"));
        assert!(is_supported_engine("orangebox"));
        assert!(!is_supported_engine("source2"));
    }
}
