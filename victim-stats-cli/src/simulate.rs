//! Randomly generated rounds.

use std::collections::BTreeMap;

use rand::RngCore;
use victim_stats_core::settings::DISPLAY_TYPE_SETTING;
use victim_stats_core::stats::hitgroup;
use victim_stats_core::{GameEvent, PlayerInfo, UserId};

use crate::scenario::{Scenario, ScenarioPlayer, Step};

/// Names for generated players.
mod names {
    pub const PREFIXES: &[&str] = &[
        "Silent", "Rusty", "Lucky", "Grim", "Swift", "Crazy", "Frosty", "Shady", "Bold", "Sneaky",
    ];
    pub const SUFFIXES: &[&str] = &[
        "Hawk", "Viper", "Ghost", "Bear", "Fox", "Wolf", "Cobra", "Raven", "Moose", "Badger",
    ];
    pub const WEAPONS: &[&str] = &[
        "ak47", "m4a1", "awp", "deagle", "usp", "glock", "famas", "galil", "mp5navy", "p90",
    ];
}

const T: u8 = 2;
const CT: u8 = 3;

/// Round end reasons for a team win.
const TERRORISTS_WIN: u32 = 9;
const CTS_WIN: u32 = 8;
const ROUND_DRAW: u32 = 10;

const HITGROUPS: &[u8] = &[
    hitgroup::HEAD,
    hitgroup::CHEST,
    hitgroup::CHEST,
    hitgroup::STOMACH,
    hitgroup::LEFT_ARM,
    hitgroup::RIGHT_ARM,
    hitgroup::LEFT_LEG,
    hitgroup::RIGHT_LEG,
];

/// Exchanges per round before it ends in a draw.
const MAX_EXCHANGES: usize = 40;

fn pick<'a>(rng: &mut dyn RngCore, items: &'a [&'a str]) -> &'a str {
    items[rng.next_u32() as usize % items.len()]
}

fn below(rng: &mut dyn RngCore, bound: u32) -> u32 {
    rng.next_u32() % bound
}

fn random_player_name(rng: &mut dyn RngCore) -> String {
    format!("{}{}", pick(rng, names::PREFIXES), pick(rng, names::SUFFIXES))
}

fn random_origin(rng: &mut dyn RngCore) -> [f32; 3] {
    [
        below(rng, 4000) as f32 - 2000.0,
        below(rng, 4000) as f32 - 2000.0,
        below(rng, 200) as f32,
    ]
}

/// Players alternate teams. Display types cycle through the non-interactive
/// modes since nobody answers menus in a simulation.
fn roster(count: usize, rng: &mut dyn RngCore) -> Vec<ScenarioPlayer> {
    (0..count)
        .map(|i| {
            let mut name = random_player_name(rng);
            name.push_str(&(i + 1).to_string());
            let display = (i % 4 + 1).to_string();
            ScenarioPlayer {
                info: PlayerInfo {
                    userid: i as UserId + 2,
                    index: i as u32 + 1,
                    name,
                    team: if i % 2 == 0 { T } else { CT },
                    health: 100,
                    is_bot: false,
                    is_alive: true,
                    origin: [0.0; 3],
                    language: "en".to_string(),
                },
                settings: BTreeMap::from([(DISPLAY_TYPE_SETTING.to_string(), display)]),
            }
        })
        .collect()
}

struct Fighter {
    userid: UserId,
    team: u8,
    health: i32,
}

/// Generate a scenario of `rounds` rounds between `players` players.
pub fn generate(players: usize, rounds: usize, rng: &mut dyn RngCore) -> Scenario {
    let roster = roster(players.max(2), rng);
    let mut steps = Vec::new();

    for _ in 0..rounds {
        steps.push(Step::Event(GameEvent::RoundStart));
        let mut fighters: Vec<Fighter> = roster
            .iter()
            .map(|player| Fighter {
                userid: player.info.userid,
                team: player.info.team,
                health: 100,
            })
            .collect();
        for fighter in &fighters {
            steps.push(Step::Update {
                update: fighter.userid,
                health: None,
                origin: Some(random_origin(rng)),
                alive: None,
                team: None,
            });
            steps.push(Step::Event(GameEvent::PlayerSpawn {
                userid: fighter.userid,
            }));
        }

        let reason = play_round(&mut fighters, &mut steps, rng);
        steps.push(Step::Event(GameEvent::RoundEnd { reason }));
    }

    Scenario {
        engine: None,
        game: None,
        players: roster,
        steps,
    }
}

fn team_alive(fighters: &[Fighter], team: u8) -> bool {
    fighters.iter().any(|f| f.team == team && f.health > 0)
}

fn play_round(fighters: &mut [Fighter], steps: &mut Vec<Step>, rng: &mut dyn RngCore) -> u32 {
    for _ in 0..MAX_EXCHANGES {
        match (team_alive(fighters, T), team_alive(fighters, CT)) {
            (true, false) => return TERRORISTS_WIN,
            (false, true) => return CTS_WIN,
            (false, false) => return ROUND_DRAW,
            (true, true) => {}
        }

        let alive: Vec<usize> = (0..fighters.len())
            .filter(|&i| fighters[i].health > 0)
            .collect();
        let victim = alive[below(rng, alive.len() as u32) as usize];
        // Mostly enemies; occasionally a teammate or a fall.
        let roll = below(rng, 20);
        let attacker = if roll == 0 {
            None
        } else {
            let candidates: Vec<usize> = alive
                .iter()
                .copied()
                .filter(|&i| i != victim && (roll == 1 || fighters[i].team != fighters[victim].team))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            Some(candidates[below(rng, candidates.len() as u32) as usize])
        };

        let hitgroup = HITGROUPS[below(rng, HITGROUPS.len() as u32) as usize];
        let mut damage = 8 + below(rng, 40) as i32;
        if hitgroup == hitgroup::HEAD {
            damage *= 3;
        }
        let damage = damage.min(fighters[victim].health);
        let attacker_id = attacker.map_or(0, |i| fighters[i].userid);
        let victim_id = fighters[victim].userid;

        fighters[victim].health -= damage;
        steps.push(Step::Update {
            update: victim_id,
            health: Some(fighters[victim].health),
            origin: None,
            alive: None,
            team: None,
        });
        steps.push(Step::Event(GameEvent::PlayerHurt {
            userid: victim_id,
            attacker: attacker_id,
            dmg_health: damage as u32,
            hitgroup: if attacker.is_some() { hitgroup } else { hitgroup::GENERIC },
        }));

        if fighters[victim].health <= 0 {
            steps.push(Step::Event(GameEvent::PlayerDeath {
                userid: victim_id,
                attacker: attacker_id,
                headshot: attacker.is_some() && hitgroup == hitgroup::HEAD,
                weapon: if attacker.is_some() {
                    pick(rng, names::WEAPONS).to_string()
                } else {
                    "world".to_string()
                },
            }));
        }
    }
    ROUND_DRAW
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generated(seed: u64) -> Scenario {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        generate(6, 3, &mut rng)
    }

    #[test]
    fn same_seed_same_scenario() {
        assert_eq!(generated(42), generated(42));
    }

    #[test]
    fn roster_alternates_teams() {
        let scenario = generated(7);
        assert_eq!(scenario.players.len(), 6);
        assert_eq!(scenario.players[0].info.team, T);
        assert_eq!(scenario.players[1].info.team, CT);
        assert_eq!(scenario.players[0].info.index, 1);
        assert_eq!(scenario.players[5].info.userid, 7);
        assert_eq!(scenario.players[4].settings[DISPLAY_TYPE_SETTING], "1");
    }

    #[test]
    fn every_round_starts_and_ends() {
        let scenario = generated(1);
        let count = |wanted: fn(&GameEvent) -> bool| {
            scenario
                .steps
                .iter()
                .filter(|step| matches!(step, Step::Event(event) if wanted(event)))
                .count()
        };
        assert_eq!(count(|e| matches!(e, GameEvent::RoundStart)), 3);
        assert_eq!(count(|e| matches!(e, GameEvent::RoundEnd { .. })), 3);
        assert_eq!(count(|e| matches!(e, GameEvent::PlayerSpawn { .. })), 18);
    }

    #[test]
    fn nobody_dies_twice_in_a_round() {
        let scenario = generated(3);
        let mut dead = Vec::new();
        for step in &scenario.steps {
            match step {
                Step::Event(GameEvent::RoundStart) => dead.clear(),
                Step::Event(GameEvent::PlayerDeath { userid, .. }) => {
                    assert!(!dead.contains(userid));
                    dead.push(*userid);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn too_few_players_still_fight() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let scenario = generate(1, 1, &mut rng);
        assert_eq!(scenario.players.len(), 2);
    }
}
