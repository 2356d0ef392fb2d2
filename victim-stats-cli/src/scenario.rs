//! Recorded rounds fed through the plugin.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context as _, Result};
use console_host::{ConsoleHost, Delivery, ServerConfig, StringTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use victim_stats_core::{GameEvent, Host, PlayerInfo, UserId, VictimStats};

/// A player present for the whole scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPlayer {
    #[serde(flatten)]
    pub info: PlayerInfo,
    /// Stored player settings, e.g. `"Display Type": "3"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, String>,
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Event(GameEvent),
    /// A player picks an entry in the interactive menu.
    Select { select: UserId, choice: u8 },
    /// Change player state between events.
    Update {
        update: UserId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        health: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        origin: Option<[f32; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alive: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        team: Option<u8>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Overrides the engine from the server config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(default)]
    pub players: Vec<ScenarioPlayer>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// A delivery addressed to a named player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub player: String,
    pub delivery: Delivery,
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.delivery {
            Delivery::Chat { .. } => write!(f, "[{}] {}", self.player, self.delivery),
            Delivery::Menu { .. } => {
                write!(f, "[{}] menu:", self.player)?;
                for line in self.delivery.to_string().lines() {
                    write!(f, "\n    {line}")?;
                }
                Ok(())
            }
        }
    }
}

/// Set up a console host for `scenario` and load the plugin on it.
pub fn load_plugin(
    scenario: &Scenario,
    config: &ServerConfig,
    strings: Option<StringTable>,
) -> Result<VictimStats<ConsoleHost>> {
    let mut config = config.clone();
    if let Some(engine) = &scenario.engine {
        config.engine = engine.clone();
    }
    if let Some(game) = &scenario.game {
        config.game = game.clone();
    }

    let mut host = ConsoleHost::from_config(&config).context("failed to set up console host")?;
    if let Some(strings) = strings {
        host = host.with_strings(strings);
    }
    for player in &scenario.players {
        for (name, value) in &player.settings {
            host.set_player_setting(player.info.index, name.clone(), value.clone());
        }
        host.add_player(player.info.clone());
    }

    VictimStats::load(host).context("failed to load plugin")
}

/// Run every step and collect what the plugin sent.
pub fn run(plugin: &mut VictimStats<ConsoleHost>, steps: &[Step]) -> Vec<Output> {
    let mut outputs = Vec::new();
    for step in steps {
        apply(plugin, step);
        let host = plugin.host_mut();
        for delivery in host.drain() {
            let player = host
                .players()
                .into_iter()
                .find(|player| player.index == delivery.index())
                .map(|player| player.name)
                .unwrap_or_else(|| format!("#{}", delivery.index()));
            outputs.push(Output { player, delivery });
        }
    }
    outputs
}

fn apply(plugin: &mut VictimStats<ConsoleHost>, step: &Step) {
    match step {
        Step::Event(event) => {
            // The engine updates life state before firing these.
            match event {
                GameEvent::PlayerDeath { userid, .. } => {
                    if let Some(player) = plugin.host_mut().player_mut(*userid) {
                        player.is_alive = false;
                    }
                }
                GameEvent::PlayerSpawn { userid } => {
                    if let Some(player) = plugin.host_mut().player_mut(*userid) {
                        player.is_alive = true;
                        player.health = 100;
                    }
                }
                _ => {}
            }
            plugin.handle(event);
        }
        Step::Select { select, choice } => {
            if !plugin.on_menu_select(*select, *choice) {
                debug!(userid = select, choice, "Menu selection ignored");
            }
        }
        Step::Update {
            update,
            health,
            origin,
            alive,
            team,
        } => {
            let Some(player) = plugin.host_mut().player_mut(*update) else {
                warn!(userid = update, "Update for unknown player");
                return;
            };
            if let Some(health) = health {
                player.health = *health;
            }
            if let Some(origin) = origin {
                player.origin = *origin;
            }
            if let Some(alive) = alive {
                player.is_alive = *alive;
            }
            if let Some(team) = team {
                player.team = *team;
            }
        }
    }
}
