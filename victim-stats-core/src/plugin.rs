//! Event handlers and report delivery.

use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::distance::{self, DistanceType};
use crate::error::{Error, Result};
use crate::event::{GameEvent, UserId, ROUND_END_GAME_COMMENCING, WORLD};
use crate::host::{ConVar, Host, PlayerInfo, PlayerSetting, SettingOption, FALLBACK_LANGUAGE};
use crate::report::{KillType, Report, ReportBuilder, SectionKind, Style};
use crate::settings::{
    parse_display_type, parse_distance_type, DisplayType, PlayerPreferences,
    DISPLAY_TYPE_SETTING, DISTANCE_TYPE_SETTING, SETTINGS_PREFIX,
};
use crate::store::StatStore;
use crate::strings;
use crate::{is_supported_engine, BASENAME, NAME, VERSION};

/// How the two players of an event relate.
#[derive(Debug, Clone, PartialEq)]
enum Encounter {
    /// World damage or the victim hurt themselves.
    SelfInflicted { victim: PlayerInfo },
    Team {
        attacker: PlayerInfo,
        victim: PlayerInfo,
    },
    Opponents {
        attacker: PlayerInfo,
        victim: PlayerInfo,
    },
}

/// The loaded plugin: owns its host and the current round's stats.
pub struct VictimStats<H: Host> {
    host: H,
    config: Config,
    store: StatStore,
    /// Last interactive report per player, kept for menu navigation.
    interactive: HashMap<UserId, (u32, Report)>,
}

impl<H: Host> VictimStats<H> {
    /// Verify the engine, register cvars and player settings, and read the
    /// server configuration.
    pub fn load(mut host: H) -> Result<Self> {
        let engine = host.engine().to_string();
        if !is_supported_engine(&engine) {
            return Err(Error::UnsupportedEngine { engine });
        }

        let mut cvars = vec![ConVar {
            name: format!("{BASENAME}_version"),
            default: VERSION.to_string(),
            description: format!("{NAME} Version"),
            options: Vec::new(),
            public: true,
        }];
        cvars.extend(Config::cvars(&host));
        for cvar in &cvars {
            host.register_cvar(cvar)
                .map_err(|reason| Error::Registration {
                    kind: "cvar",
                    name: cvar.name.clone(),
                    reason,
                })?;
        }

        let config = Config::from_host(&host);
        for setting in player_settings(&host, &config) {
            host.register_setting(&setting)
                .map_err(|reason| Error::Registration {
                    kind: "setting",
                    name: setting.name.clone(),
                    reason,
                })?;
        }

        info!(
            target: "victim_stats::events",
            engine = engine.as_str(),
            game = host.game(),
            version = VERSION,
            "{NAME} loaded"
        );

        Ok(Self {
            host,
            config,
            store: StatStore::new(),
            interactive: HashMap::new(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &StatStore {
        &self.store
    }

    /// Re-read cvars, e.g. after the server config was executed.
    pub fn reload_config(&mut self) {
        self.config = Config::from_host(&self.host);
    }

    /// Dispatch one game event.
    pub fn handle(&mut self, event: &GameEvent) {
        trace!(target: "victim_stats::events", event = event.name(), "Handling event");
        match event {
            GameEvent::PlayerHurt {
                userid,
                attacker,
                dmg_health,
                hitgroup,
            } => self.player_hurt(*userid, *attacker, *dmg_health, *hitgroup),
            GameEvent::PlayerDeath {
                userid,
                attacker,
                headshot,
                weapon,
            } => self.player_death(*userid, *attacker, *headshot, weapon),
            GameEvent::PlayerSpawn { userid } => self.player_spawn(*userid),
            GameEvent::RoundStart => self.round_start(),
            GameEvent::RoundEnd { reason } => self.round_end(*reason),
        }
    }

    fn player_hurt(&mut self, userid: UserId, attacker: UserId, damage: u32, hitgroup: u8) {
        let Some(Encounter::Opponents { attacker, victim }) = self.encounter(userid, attacker)
        else {
            return;
        };

        self.store.record_hit(
            (attacker.userid, &attacker.name),
            (victim.userid, &victim.name),
            damage,
            hitgroup,
        );
        debug!(
            target: "victim_stats::events",
            attacker = attacker.name.as_str(),
            victim = victim.name.as_str(),
            damage,
            hitgroup,
            "Recorded hit"
        );
    }

    fn player_death(&mut self, userid: UserId, attacker: UserId, headshot: bool, weapon: &str) {
        let Some(encounter) = self.encounter(userid, attacker) else {
            return;
        };

        match encounter {
            Encounter::Opponents { attacker, victim } => {
                let distance = distance::between(attacker.origin, victim.origin);
                let weapon = (!weapon.is_empty()).then(|| weapon.to_string());
                self.store.entry(attacker.userid).record_kill(
                    &victim.name,
                    weapon.clone(),
                    headshot,
                    Some(distance),
                );
                debug!(
                    target: "victim_stats::events",
                    attacker = attacker.name.as_str(),
                    victim = victim.name.as_str(),
                    headshot,
                    distance,
                    "Recorded kill"
                );

                self.send_stats(
                    &victim,
                    Some(KillType::Killer {
                        attacker_name: attacker.name,
                        headshot,
                        weapon,
                        distance: Some(distance),
                        health: attacker.health,
                    }),
                );
            }
            Encounter::SelfInflicted { victim } => {
                self.send_stats(&victim, Some(KillType::Suicide));
            }
            Encounter::Team { attacker, victim } => {
                self.send_stats(
                    &victim,
                    Some(KillType::TeamKilled {
                        attacker_name: attacker.name,
                    }),
                );
            }
        }
    }

    fn player_spawn(&mut self, userid: UserId) {
        self.store.remove(userid);
        self.interactive.remove(&userid);
    }

    fn round_start(&mut self) {
        self.store.clear();
        self.interactive.clear();
    }

    fn round_end(&mut self, reason: u32) {
        if reason == ROUND_END_GAME_COMMENCING {
            return;
        }

        for player in self.host.players() {
            if player.is_alive && !player.is_bot {
                self.send_stats(&player, None);
            }
        }
    }

    /// Resolve and classify the players of an event.
    fn encounter(&self, victim: UserId, attacker: UserId) -> Option<Encounter> {
        let Some(victim_info) = self.host.player(victim) else {
            debug!(target: "victim_stats::events", userid = victim, "Unknown victim, ignoring event");
            return None;
        };

        if attacker == WORLD || attacker == victim {
            return Some(Encounter::SelfInflicted {
                victim: victim_info,
            });
        }

        let Some(attacker_info) = self.host.player(attacker) else {
            debug!(target: "victim_stats::events", userid = attacker, "Unknown attacker, ignoring event");
            return None;
        };

        if attacker_info.team == victim_info.team {
            Some(Encounter::Team {
                attacker: attacker_info,
                victim: victim_info,
            })
        } else {
            Some(Encounter::Opponents {
                attacker: attacker_info,
                victim: victim_info,
            })
        }
    }

    /// A player's display preferences, falling back to the server defaults.
    pub fn preferences(&self, index: u32) -> PlayerPreferences {
        PlayerPreferences {
            display: parse_display_type(
                self.host.player_setting(index, DISPLAY_TYPE_SETTING).as_deref(),
                self.config.default_display,
            ),
            distance: parse_distance_type(
                self.host.player_setting(index, DISTANCE_TYPE_SETTING).as_deref(),
                self.config.default_distance,
            ),
        }
    }

    /// Send a player their stats in the display mode they chose.
    pub fn send_stats(&mut self, player: &PlayerInfo, kill_type: Option<KillType>) {
        if player.is_bot {
            return;
        }

        let prefs = self.preferences(player.index);
        let style = if prefs.display.uses_chat() {
            Style::Chat
        } else {
            Style::Menu
        };
        let report = ReportBuilder::new(&self.host, player, prefs, self.config.colors, style)
            .build(self.store.get(player.userid), kill_type.as_ref());

        if report.is_empty() {
            trace!(target: "victim_stats::report", player = player.name.as_str(), "Nothing to report");
            return;
        }

        debug!(
            target: "victim_stats::report",
            player = player.name.as_str(),
            display = prefs.display.value(),
            sections = report.sections.len(),
            "Sending stats"
        );

        match prefs.display {
            DisplayType::ChatHitgroups | DisplayType::Chat => {
                for line in report.chat_lines() {
                    self.host.send_chat(player.index, &line);
                }
            }
            DisplayType::MenuHitgroups | DisplayType::Menu => {
                let menu = report.menu(&self.host);
                self.host.send_menu(player.index, &menu);
            }
            DisplayType::InteractiveMenu => {
                let menu = report.interactive_menu(&self.host);
                self.host.send_menu(player.index, &menu);
                self.interactive
                    .insert(player.userid, (player.index, report));
            }
        }
    }

    /// Handle a selection in the interactive menu. Choice `0` returns to
    /// the top level. Returns whether a menu was sent.
    pub fn on_menu_select(&mut self, userid: UserId, choice: u8) -> bool {
        let Some((index, report)) = self.interactive.get(&userid) else {
            return false;
        };

        let menu = if choice == 0 {
            Some(report.interactive_menu(&self.host))
        } else {
            SectionKind::from_choice(choice)
                .and_then(|kind| report.section_menu(&self.host, kind))
        };

        match menu {
            Some(menu) => {
                let index = *index;
                self.host.send_menu(index, &menu);
                true
            }
            None => false,
        }
    }
}

/// The two player settings, with defaults taken from the server config.
fn player_settings<H: Host + ?Sized>(host: &H, config: &Config) -> Vec<PlayerSetting> {
    let text = |key: &str| strings::translate(host, key, FALLBACK_LANGUAGE, &[]);
    let option = |value: u8, key: &str| SettingOption {
        name: value.to_string(),
        text: text(key),
    };

    vec![
        PlayerSetting {
            prefix: SETTINGS_PREFIX.to_string(),
            group: text(strings::SETTINGS_TITLE),
            name: DISPLAY_TYPE_SETTING.to_string(),
            text: text(strings::DISPLAY_TYPE_TEXT),
            default: config.default_display.value().to_string(),
            options: DisplayType::ALL
                .iter()
                .map(|kind| option(kind.value(), kind.option_key()))
                .collect(),
        },
        PlayerSetting {
            prefix: SETTINGS_PREFIX.to_string(),
            group: text(strings::SETTINGS_TITLE),
            name: DISTANCE_TYPE_SETTING.to_string(),
            text: text(strings::DISTANCE_TYPE_TEXT),
            default: config.default_distance.value().to_string(),
            options: DistanceType::ALL
                .iter()
                .map(|kind| option(kind.value(), kind.option_key()))
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DISPLAY_TYPE_CVAR;
    use crate::menu::MenuItem;
    use crate::stats::hitgroup;
    use crate::testing::{player, TestHost};

    const T: u8 = 2;
    const CT: u8 = 3;

    /// alice (2) and carol (4) are terrorists, bob (3) and dave (5) are CTs.
    fn loaded() -> VictimStats<TestHost> {
        let mut host = TestHost::new("orangebox", "cstrike");
        host.add_player(player(2, 1, "alice", T));
        host.add_player(player(3, 2, "bob", CT));
        host.add_player(player(4, 3, "carol", T));
        host.add_player(player(5, 4, "dave", CT));
        VictimStats::load(host).unwrap()
    }

    fn hurt(userid: UserId, attacker: UserId, dmg_health: u32, hitgroup: u8) -> GameEvent {
        GameEvent::PlayerHurt {
            userid,
            attacker,
            dmg_health,
            hitgroup,
        }
    }

    fn death(userid: UserId, attacker: UserId) -> GameEvent {
        GameEvent::PlayerDeath {
            userid,
            attacker,
            headshot: false,
            weapon: "ak47".to_string(),
        }
    }

    #[test]
    fn unsupported_engine_fails_to_load() {
        let host = TestHost::new("source2", "cs2");
        let err = VictimStats::load(host).err().unwrap();
        assert!(matches!(err, Error::UnsupportedEngine { ref engine } if engine == "source2"));
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn rejected_registration_fails_to_load() {
        let mut host = TestHost::new("csgo", "csgo");
        host.reject_registrations = true;
        let err = VictimStats::load(host).err().unwrap();
        assert!(matches!(err, Error::Registration { kind: "cvar", .. }));
    }

    #[test]
    fn load_registers_cvars_and_settings() {
        let plugin = loaded();
        let host = plugin.host();
        let names: Vec<_> = host.registered_cvars.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"victim_stats_version"));
        assert!(names.contains(&DISPLAY_TYPE_CVAR));
        assert!(host.registered_cvars[0].public);

        assert_eq!(host.registered_settings.len(), 2);
        assert_eq!(host.registered_settings[0].default, "1");
        assert_eq!(host.registered_settings[0].options.len(), 5);
        assert_eq!(host.registered_settings[1].default, "2");
        assert_eq!(host.registered_settings[1].group, "Victim Stats");
    }

    #[test]
    fn damage_between_opponents_sums() {
        let mut plugin = loaded();
        for damage in [27, 13, 100, 1] {
            plugin.handle(&hurt(3, 2, damage, hitgroup::CHEST));
        }

        let given = &plugin.store().get(2).unwrap().given["bob"];
        let taken = &plugin.store().get(3).unwrap().taken["alice"];
        assert_eq!(given.damage, 141);
        assert_eq!(given.hits, 4);
        assert_eq!(given.hitgroups[&hitgroup::CHEST], 4);
        assert_eq!(given, taken);
    }

    #[test]
    fn self_world_and_team_damage_is_ignored() {
        let mut plugin = loaded();
        plugin.handle(&hurt(2, 2, 10, hitgroup::GENERIC));
        plugin.handle(&hurt(2, WORLD, 10, hitgroup::GENERIC));
        plugin.handle(&hurt(2, 4, 10, hitgroup::GENERIC));
        plugin.handle(&hurt(2, 99, 10, hitgroup::GENERIC));
        assert!(plugin.store().is_empty());
    }

    #[test]
    fn kill_counts_once_and_keeps_damage() {
        let mut plugin = loaded();
        plugin.host_mut().player_mut(2).origin = [100.0, 0.0, 0.0];
        plugin.handle(&hurt(3, 2, 60, hitgroup::HEAD));
        plugin.handle(&hurt(3, 2, 40, hitgroup::HEAD));
        plugin.handle(&death(3, 2));

        let stats = plugin.store().get(2).unwrap();
        assert_eq!(stats.killed.len(), 1);
        assert_eq!(stats.killed["bob"].kills, 1);
        assert_eq!(stats.killed["bob"].weapon.as_deref(), Some("ak47"));
        assert_eq!(stats.killed["bob"].distance, Some(100.0));
        assert_eq!(stats.given["bob"].damage, 100);
        assert!(plugin.store().get(3).unwrap().killed.is_empty());
    }

    #[test]
    fn victim_gets_chat_report_on_death() {
        let mut plugin = loaded();
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&hurt(3, 2, 45, hitgroup::STOMACH));
        plugin.host_mut().player_mut(3).health = 55;
        plugin.handle(&death(2, 3));

        let lines = plugin.host().chat_for(1);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[Attacker] "));
        assert!(lines[0].contains("bob"));
        assert!(lines[0].ends_with(" - Chest: 1"));
        assert!(lines[1].contains("[Wounded] "));
        assert!(lines[2].contains("Killed by "));
        assert!(lines[2].contains("with 55 health left"));
        assert!(plugin.host().chat_for(2).is_empty());
    }

    #[test]
    fn suicide_and_team_kill_messages() {
        let mut plugin = loaded();
        plugin.handle(&death(2, WORLD));
        plugin.handle(&death(4, 2));

        assert_eq!(plugin.host().chat_for(1), vec!["You killed yourself"]);
        assert_eq!(
            plugin.host().chat_for(3),
            vec!["You were team-killed by alice"]
        );
        assert!(plugin.store().is_empty());
    }

    #[test]
    fn menu_players_get_a_single_menu() {
        let mut plugin = loaded();
        plugin.host_mut().set_player_setting(1, DISPLAY_TYPE_SETTING, "4");
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&death(2, 3));

        assert!(plugin.host().chat.is_empty());
        let (index, menu) = &plugin.host().menus[0];
        assert_eq!(*index, 1);
        assert_eq!(
            menu.items[0],
            MenuItem::Option {
                choice: 1,
                text: "Attackers".to_string(),
                selectable: false,
            }
        );
        assert_eq!(menu.items[1], MenuItem::Text("  bob - 30 damage".to_string()));
    }

    #[test]
    fn interactive_menu_navigation() {
        let mut plugin = loaded();
        plugin.host_mut().set_player_setting(1, DISPLAY_TYPE_SETTING, "5");
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&death(2, 3));

        assert_eq!(plugin.host().menus[0].1.selectable_choices(), vec![1, 4]);
        assert!(plugin.on_menu_select(2, 1));
        assert_eq!(
            plugin.host().menus[1].1.items[0],
            MenuItem::Text("bob - 30 damage".to_string())
        );
        assert!(!plugin.on_menu_select(2, 2));
        assert!(plugin.on_menu_select(2, 0));
        assert_eq!(plugin.host().menus.len(), 3);

        plugin.handle(&GameEvent::PlayerSpawn { userid: 2 });
        assert!(!plugin.on_menu_select(2, 1));
    }

    #[test]
    fn bots_receive_nothing() {
        let mut plugin = loaded();
        plugin.host_mut().player_mut(2).is_bot = true;
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&death(2, 3));
        assert!(plugin.host().chat.is_empty());
        assert!(plugin.host().menus.is_empty());
        assert_eq!(plugin.store().get(2).unwrap().taken["bob"].damage, 30);
    }

    #[test]
    fn round_start_clears_everything() {
        let mut plugin = loaded();
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&hurt(4, 5, 30, hitgroup::CHEST));
        plugin.handle(&death(2, 3));
        plugin.handle(&GameEvent::RoundStart);
        assert!(plugin.store().is_empty());
    }

    #[test]
    fn spawn_clears_only_that_player() {
        let mut plugin = loaded();
        plugin.handle(&hurt(2, 3, 30, hitgroup::CHEST));
        plugin.handle(&GameEvent::PlayerSpawn { userid: 2 });
        assert!(plugin.store().get(2).is_none());
        assert!(plugin.store().get(3).is_some());
    }

    #[test]
    fn round_end_reports_to_living_humans() {
        let mut plugin = loaded();
        plugin.host_mut().player_mut(4).is_bot = true;
        plugin.handle(&hurt(3, 2, 30, hitgroup::CHEST));
        plugin.handle(&hurt(5, 4, 30, hitgroup::CHEST));
        plugin.handle(&hurt(2, 5, 30, hitgroup::CHEST));
        plugin.host_mut().player_mut(5).is_alive = false;

        plugin.handle(&GameEvent::RoundEnd { reason: 7 });

        assert_eq!(plugin.host().chat_for(1).len(), 2);
        assert_eq!(plugin.host().chat_for(2).len(), 1);
        assert!(plugin.host().chat_for(3).is_empty());
        assert!(plugin.host().chat_for(4).is_empty());
        assert!(plugin
            .host()
            .chat
            .iter()
            .all(|(_, line)| !line.contains("Killed by")));
    }

    #[test]
    fn game_commencing_round_end_is_silent() {
        let mut plugin = loaded();
        plugin.handle(&hurt(3, 2, 30, hitgroup::CHEST));
        plugin.handle(&GameEvent::RoundEnd {
            reason: ROUND_END_GAME_COMMENCING,
        });
        assert!(plugin.host().chat.is_empty());
    }

    #[test]
    fn preferences_fall_back_to_server_defaults() {
        let mut plugin = loaded();
        plugin.host_mut().set_player_setting(1, DISTANCE_TYPE_SETTING, "feet");
        let prefs = plugin.preferences(1);
        assert_eq!(prefs.display, DisplayType::ChatHitgroups);
        assert_eq!(prefs.distance, DistanceType::Both);

        plugin.host_mut().set_cvar(DISPLAY_TYPE_CVAR, "2");
        plugin.reload_config();
        plugin.host_mut().set_player_setting(2, DISPLAY_TYPE_SETTING, "x");
        assert_eq!(plugin.preferences(2).display, DisplayType::Chat);
    }
}
