//! A host that runs the plugin without a game server.
//!
//! Players, cvars and settings live in memory. Everything the plugin sends
//! is recorded as a [`Delivery`] so callers can print or inspect it.

pub mod config;
pub mod error;
pub mod output;
pub mod strings;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use victim_stats_core::{ConVar, Host, Menu, PlayerInfo, PlayerSetting, UserId};

pub use config::ServerConfig;
pub use error::{HostError, Result};
pub use output::{render_menu, strip_colors, Delivery};
pub use strings::StringTable;

/// In-memory game server.
#[derive(Debug)]
pub struct ConsoleHost {
    engine: String,
    game: String,
    players: BTreeMap<UserId, PlayerInfo>,
    cvars: HashMap<String, String>,
    registered_cvars: Vec<ConVar>,
    settings: Vec<PlayerSetting>,
    player_settings: HashMap<(u32, String), String>,
    strings: StringTable,
    deliveries: Vec<Delivery>,
}

impl ConsoleHost {
    /// Create a host with the bundled translations.
    pub fn new(engine: impl Into<String>, game: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: engine.into(),
            game: game.into(),
            players: BTreeMap::new(),
            cvars: HashMap::new(),
            registered_cvars: Vec::new(),
            settings: Vec::new(),
            player_settings: HashMap::new(),
            strings: StringTable::bundled()?,
            deliveries: Vec::new(),
        })
    }

    /// Build a host from a server config. Its cvar values take precedence
    /// over the defaults the plugin registers.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let mut host = Self::new(config.engine.clone(), config.game.clone())?;
        host.cvars = config.cvars();
        Ok(host)
    }

    pub fn with_strings(mut self, strings: StringTable) -> Self {
        self.strings.merge(strings);
        self
    }

    pub fn add_player(&mut self, player: PlayerInfo) {
        debug!(userid = player.userid, name = %player.name, "player connected");
        self.players.insert(player.userid, player);
    }

    pub fn remove_player(&mut self, userid: UserId) -> Option<PlayerInfo> {
        self.players.remove(&userid)
    }

    pub fn player_mut(&mut self, userid: UserId) -> Option<&mut PlayerInfo> {
        self.players.get_mut(&userid)
    }

    pub fn set_cvar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cvars.insert(name.into(), value.into());
    }

    pub fn set_player_setting(&mut self, index: u32, name: impl Into<String>, value: impl Into<String>) {
        self.player_settings.insert((index, name.into()), value.into());
    }

    pub fn registered_cvars(&self) -> &[ConVar] {
        &self.registered_cvars
    }

    pub fn registered_settings(&self) -> &[PlayerSetting] {
        &self.settings
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Take everything delivered since the last drain.
    pub fn drain(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }
}

impl Host for ConsoleHost {
    fn engine(&self) -> &str {
        &self.engine
    }

    fn game(&self) -> &str {
        &self.game
    }

    fn player(&self, userid: UserId) -> Option<PlayerInfo> {
        self.players.get(&userid).cloned()
    }

    fn players(&self) -> Vec<PlayerInfo> {
        let mut players: Vec<_> = self.players.values().cloned().collect();
        players.sort_by_key(|player| player.index);
        players
    }

    fn register_cvar(&mut self, cvar: &ConVar) -> std::result::Result<(), String> {
        if self.registered_cvars.iter().any(|c| c.name == cvar.name) {
            return Err(HostError::DuplicateCvar(cvar.name.clone()).to_string());
        }
        self.cvars
            .entry(cvar.name.clone())
            .or_insert_with(|| cvar.default.clone());
        self.registered_cvars.push(cvar.clone());
        Ok(())
    }

    fn cvar(&self, name: &str) -> Option<String> {
        self.cvars.get(name).cloned()
    }

    fn register_setting(&mut self, setting: &PlayerSetting) -> std::result::Result<(), String> {
        if self
            .settings
            .iter()
            .any(|s| s.prefix == setting.prefix && s.name == setting.name)
        {
            return Err(HostError::DuplicateSetting(setting.name.clone()).to_string());
        }
        self.settings.push(setting.clone());
        Ok(())
    }

    fn player_setting(&self, index: u32, name: &str) -> Option<String> {
        self.player_settings
            .get(&(index, name.to_string()))
            .cloned()
            .or_else(|| {
                self.settings
                    .iter()
                    .find(|setting| setting.name == name)
                    .map(|setting| setting.default.clone())
            })
    }

    fn translate(&self, key: &str, language: &str) -> Option<String> {
        self.strings.get(key, language).map(str::to_string)
    }

    fn send_chat(&mut self, index: u32, message: &str) {
        self.deliveries.push(Delivery::Chat {
            index,
            message: message.to_string(),
        });
    }

    fn send_menu(&mut self, index: u32, menu: &Menu) {
        self.deliveries.push(Delivery::Menu {
            index,
            menu: menu.clone(),
        });
    }
}
