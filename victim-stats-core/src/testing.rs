//! Recording host used by unit tests.

use std::collections::HashMap;

use crate::event::UserId;
use crate::host::{ConVar, Host, PlayerInfo, PlayerSetting};
use crate::menu::Menu;

const ENGLISH: &[(&str, &str)] = &[
    (
        "Base",
        "{type_color}{type}{name_color}{name}{damage_color} - {damage} damage{weapon_info}{headshot}{hitgroup_info}",
    ),
    (
        "Base:Weapon",
        " ({weapon_color}{weapon}{at_color} @ {distance_color}{distance}{at_color})",
    ),
    ("Headshot", " HS"),
    (
        "Killer",
        "{type_color}Killed by {name_color}{name}{weapon_info}{headshot} with {health} health left",
    ),
    (
        "Killer:Dead",
        "{type_color}Killed by {name_color}{name}{weapon_info}{headshot}, who is also dead",
    ),
    ("Suicide", "You killed yourself"),
    ("Team Killed", "You were team-killed by {name}"),
    ("Type:Attacker", "Attackers"),
    ("Type:Wounded", "Wounded"),
    ("Type:Killed", "Killed"),
    ("Type:Killer", "Killer"),
    ("Prefix:Attacker", "[Attacker] "),
    ("Prefix:Wounded", "[Wounded] "),
    ("Prefix:Killed", "[Killed] "),
    ("Menu:Title", "Victim Stats"),
    ("Title", "Victim Stats"),
    ("Menu:Back", "Back"),
    ("Hitgroup:0", "Generic"),
    ("Hitgroup:1", "Head"),
    ("Hitgroup:2", "Chest"),
    ("Hitgroup:3", "Stomach"),
    ("default_display_type:1", "Chat with hitgroups"),
    ("default_display_type:2", "Chat"),
];

pub fn player(userid: UserId, index: u32, name: &str, team: u8) -> PlayerInfo {
    PlayerInfo {
        userid,
        index,
        name: name.to_string(),
        team,
        health: 100,
        is_bot: false,
        is_alive: true,
        origin: [0.0, 0.0, 0.0],
        language: "en".to_string(),
    }
}

#[derive(Debug, Default)]
pub struct TestHost {
    engine: String,
    game: String,
    pub players: HashMap<UserId, PlayerInfo>,
    cvars: HashMap<String, String>,
    settings: HashMap<(u32, String), String>,
    translations: HashMap<(String, String), String>,
    pub registered_cvars: Vec<ConVar>,
    pub registered_settings: Vec<PlayerSetting>,
    pub chat: Vec<(u32, String)>,
    pub menus: Vec<(u32, Menu)>,
    pub reject_registrations: bool,
}

impl TestHost {
    pub fn new(engine: &str, game: &str) -> Self {
        let mut host = Self {
            engine: engine.to_string(),
            game: game.to_string(),
            ..Self::default()
        };
        for (key, value) in ENGLISH {
            host.set_translation(key, "en", value);
        }
        host
    }

    pub fn add_player(&mut self, info: PlayerInfo) {
        self.players.insert(info.userid, info);
    }

    pub fn player_mut(&mut self, userid: UserId) -> &mut PlayerInfo {
        self.players.get_mut(&userid).expect("unknown test player")
    }

    pub fn set_cvar(&mut self, name: &str, value: &str) {
        self.cvars.insert(name.to_string(), value.to_string());
    }

    pub fn set_player_setting(&mut self, index: u32, name: &str, value: &str) {
        self.settings
            .insert((index, name.to_string()), value.to_string());
    }

    pub fn set_translation(&mut self, key: &str, language: &str, value: &str) {
        self.translations
            .insert((key.to_string(), language.to_string()), value.to_string());
    }

    pub fn chat_for(&self, index: u32) -> Vec<&str> {
        self.chat
            .iter()
            .filter(|(to, _)| *to == index)
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

impl Host for TestHost {
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

    fn register_cvar(&mut self, cvar: &ConVar) -> Result<(), String> {
        if self.reject_registrations {
            return Err("registrations disabled".to_string());
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

    fn register_setting(&mut self, setting: &PlayerSetting) -> Result<(), String> {
        self.registered_settings.push(setting.clone());
        Ok(())
    }

    fn player_setting(&self, index: u32, name: &str) -> Option<String> {
        self.settings.get(&(index, name.to_string())).cloned().or_else(|| {
            self.registered_settings
                .iter()
                .find(|setting| setting.name == name)
                .map(|setting| setting.default.clone())
        })
    }

    fn translate(&self, key: &str, language: &str) -> Option<String> {
        self.translations
            .get(&(key.to_string(), language.to_string()))
            .cloned()
    }

    fn send_chat(&mut self, index: u32, message: &str) {
        self.chat.push((index, message.to_string()));
    }

    fn send_menu(&mut self, index: u32, menu: &Menu) {
        self.menus.push((index, menu.clone()));
    }
}
