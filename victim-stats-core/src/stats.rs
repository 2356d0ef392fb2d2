//! Per-round combat counters for a single player.

use std::collections::BTreeMap;

/// Hitgroup ids as reported by the engine.
pub mod hitgroup {
    pub const GENERIC: u8 = 0;
    pub const HEAD: u8 = 1;
    pub const CHEST: u8 = 2;
    pub const STOMACH: u8 = 3;
    pub const LEFT_ARM: u8 = 4;
    pub const RIGHT_ARM: u8 = 5;
    pub const LEFT_LEG: u8 = 6;
    pub const RIGHT_LEG: u8 = 7;
    pub const GEAR: u8 = 10;
}

/// Damage dealt to, or received from, one opponent.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PlayerDamage {
    pub hits: u32,
    pub damage: u32,
    pub hitgroups: BTreeMap<u8, u32>,
}

impl PlayerDamage {
    /// Count a single hit. Counters saturate instead of wrapping.
    pub fn record(&mut self, damage: u32, hitgroup: u8) {
        self.damage = self.damage.saturating_add(damage);
        self.hits = self.hits.saturating_add(1);
        let count = self.hitgroups.entry(hitgroup).or_insert(0);
        *count = count.saturating_add(1);
    }
}

/// The most recent kill of one opponent.
///
/// Only `kills` accumulates; the other fields describe the latest kill.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlayerKill {
    pub kills: u32,
    pub weapon: Option<String>,
    pub headshot: bool,
    pub distance: Option<f64>,
}

impl PlayerKill {
    pub fn record(&mut self, weapon: Option<String>, headshot: bool, distance: Option<f64>) {
        self.kills = self.kills.saturating_add(1);
        self.weapon = weapon;
        self.headshot = headshot;
        self.distance = distance;
    }
}

/// Everything tracked for one player in the current round, keyed by
/// opponent display name.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub given: BTreeMap<String, PlayerDamage>,
    pub taken: BTreeMap<String, PlayerDamage>,
    pub killed: BTreeMap<String, PlayerKill>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_given(&mut self, victim: &str, damage: u32, hitgroup: u8) {
        self.given
            .entry(victim.to_string())
            .or_default()
            .record(damage, hitgroup);
    }

    pub fn record_taken(&mut self, attacker: &str, damage: u32, hitgroup: u8) {
        self.taken
            .entry(attacker.to_string())
            .or_default()
            .record(damage, hitgroup);
    }

    pub fn record_kill(
        &mut self,
        victim: &str,
        weapon: Option<String>,
        headshot: bool,
        distance: Option<f64>,
    ) {
        self.killed
            .entry(victim.to_string())
            .or_default()
            .record(weapon, headshot, distance);
    }

    /// Opponents damaged this round but not killed.
    pub fn wounded(&self) -> impl Iterator<Item = (&String, &PlayerDamage)> {
        self.given
            .iter()
            .filter(|(name, _)| !self.killed.contains_key(*name))
    }

    /// Opponents damaged and killed this round.
    pub fn killed_with_damage(&self) -> impl Iterator<Item = (&String, &PlayerDamage)> {
        self.given
            .iter()
            .filter(|(name, _)| self.killed.contains_key(*name))
    }

    pub fn is_empty(&self) -> bool {
        self.given.is_empty() && self.taken.is_empty() && self.killed.is_empty()
    }
}
