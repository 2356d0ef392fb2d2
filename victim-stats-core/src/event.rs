//! Game events consumed by the plugin.

use serde::{Deserialize, Serialize};

/// Engine-assigned per-connection player id.
pub type UserId = u32;

/// Attacker id the engine reports for world damage (falls, trigger_hurt).
pub const WORLD: UserId = 0;

/// `round_end` reason sent while the game is commencing (warmup over).
pub const ROUND_END_GAME_COMMENCING: u32 = 15;

/// An event dispatched by the host engine.
///
/// Field names follow the engine's event definitions so host adapters can
/// forward raw events without renaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerHurt {
        userid: UserId,
        #[serde(default)]
        attacker: UserId,
        dmg_health: u32,
        #[serde(default)]
        hitgroup: u8,
    },
    PlayerDeath {
        userid: UserId,
        #[serde(default)]
        attacker: UserId,
        #[serde(default)]
        headshot: bool,
        #[serde(default)]
        weapon: String,
    },
    PlayerSpawn {
        userid: UserId,
    },
    RoundStart,
    RoundEnd {
        #[serde(default)]
        reason: u32,
    },
}

impl GameEvent {
    /// Engine name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PlayerHurt { .. } => "player_hurt",
            GameEvent::PlayerDeath { .. } => "player_death",
            GameEvent::PlayerSpawn { .. } => "player_spawn",
            GameEvent::RoundStart => "round_start",
            GameEvent::RoundEnd { .. } => "round_end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hurt_event_parses_from_engine_fields() {
        let event: GameEvent = serde_json::from_str(
            r#"{"event":"player_hurt","userid":3,"attacker":5,"dmg_health":27,"hitgroup":1}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            GameEvent::PlayerHurt {
                userid: 3,
                attacker: 5,
                dmg_health: 27,
                hitgroup: 1,
            }
        );
        assert_eq!(event.name(), "player_hurt");
    }

    #[test]
    fn death_event_defaults_missing_fields() {
        let event: GameEvent =
            serde_json::from_str(r#"{"event":"player_death","userid":3}"#).unwrap();
        assert_eq!(
            event,
            GameEvent::PlayerDeath {
                userid: 3,
                attacker: WORLD,
                headshot: false,
                weapon: String::new(),
            }
        );
    }

    #[test]
    fn unit_events_parse() {
        let event: GameEvent = serde_json::from_str(r#"{"event":"round_start"}"#).unwrap();
        assert_eq!(event, GameEvent::RoundStart);

        let event: GameEvent = serde_json::from_str(r#"{"event":"round_end"}"#).unwrap();
        assert_eq!(event, GameEvent::RoundEnd { reason: 0 });
    }
}
