//! The seam between the plugin and the game server hosting it.

use serde::{Deserialize, Serialize};

use crate::event::UserId;
use crate::menu::Menu;

/// Language used when a player has none or a translation is missing.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Snapshot of a connected player as the host sees it right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub userid: UserId,
    /// Entity index; messages are addressed by index.
    pub index: u32,
    pub name: String,
    pub team: u8,
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_health() -> i32 {
    100
}

fn default_alive() -> bool {
    true
}

fn default_language() -> String {
    FALLBACK_LANGUAGE.to_string()
}

/// A server console variable the plugin registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConVar {
    pub name: String,
    pub default: String,
    pub description: String,
    /// Human-readable list of accepted values, shown in the generated config.
    pub options: Vec<String>,
    /// Public cvars are reported to server browsers.
    pub public: bool,
}

/// One choice of a player setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingOption {
    pub name: String,
    pub text: String,
}

/// A per-player setting the plugin registers with the host settings menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSetting {
    pub prefix: String,
    /// Title of the settings group the setting is listed under.
    pub group: String,
    pub name: String,
    pub text: String,
    pub default: String,
    pub options: Vec<SettingOption>,
}

/// Services the hosting game server provides.
///
/// Everything that touches the engine goes through this trait: player state,
/// console variables, player settings, translations and message delivery.
/// Registration failures are reported as plain strings because each host has
/// its own error vocabulary.
pub trait Host {
    /// Engine family (`csgo`, `orangebox`, ...).
    fn engine(&self) -> &str;

    /// Game directory name (`csgo`, `cstrike`, ...).
    fn game(&self) -> &str;

    fn player(&self, userid: UserId) -> Option<PlayerInfo>;

    /// All connected players, bots included.
    fn players(&self) -> Vec<PlayerInfo>;

    fn register_cvar(&mut self, cvar: &ConVar) -> Result<(), String>;

    /// Current string value of a cvar, `None` when it does not exist.
    fn cvar(&self, name: &str) -> Option<String>;

    fn register_setting(&mut self, setting: &PlayerSetting) -> Result<(), String>;

    /// A player's stored value for a registered setting.
    fn player_setting(&self, index: u32, name: &str) -> Option<String>;

    /// Raw (unformatted) translation of `key` in `language`.
    fn translate(&self, key: &str, language: &str) -> Option<String>;

    fn send_chat(&mut self, index: u32, message: &str);

    fn send_menu(&mut self, index: u32, menu: &Menu);
}
