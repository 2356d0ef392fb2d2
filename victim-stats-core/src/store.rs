//! Per-round stat store.

use std::collections::HashMap;

use crate::event::UserId;
use crate::stats::PlayerStats;

/// Stats for every player referenced in the current round.
///
/// Records are created on first access and dropped on spawn or round start.
#[derive(Debug, Clone, Default)]
pub struct StatStore {
    players: HashMap<UserId, PlayerStats>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `userid`, created empty if missing.
    pub fn entry(&mut self, userid: UserId) -> &mut PlayerStats {
        self.players.entry(userid).or_default()
    }

    pub fn get(&self, userid: UserId) -> Option<&PlayerStats> {
        self.players.get(&userid)
    }

    /// Drop one player's record. Missing players are ignored.
    pub fn remove(&mut self, userid: UserId) -> Option<PlayerStats> {
        self.players.remove(&userid)
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Record both sides of one hit between opponents.
    pub fn record_hit(
        &mut self,
        attacker: (UserId, &str),
        victim: (UserId, &str),
        damage: u32,
        hitgroup: u8,
    ) {
        self.entry(attacker.0).record_given(victim.1, damage, hitgroup);
        self.entry(victim.0).record_taken(attacker.1, damage, hitgroup);
    }
}
