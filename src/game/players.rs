use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::coins::CoinSet;
use crate::types::{Landmark, PlayerId};

/// Copies of one establishment owned by a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCard {
    pub total: u32,
    /// Copies closed for renovation; they earn nothing the next time the card triggers.
    pub renovation: u32,
}

impl OwnedCard {
    pub fn active(&self) -> u32 {
        self.total.saturating_sub(self.renovation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub coins: CoinSet,
    pub investment: CoinSet,
    pub establishments: BTreeMap<String, OwnedCard>,
    pub landmarks: BTreeMap<Landmark, bool>,
}

impl PlayerState {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            coins: CoinSet::empty(),
            investment: CoinSet::empty(),
            establishments: BTreeMap::new(),
            landmarks: BTreeMap::new(),
        }
    }

    pub fn owned(&self, card: &str) -> u32 {
        self.establishments.get(card).map_or(0, |owned| owned.total)
    }

    /// Active copies of `card`, clearing any renovation so the suppression
    /// only lasts for this read.
    pub fn take_active(&mut self, card: &str) -> u32 {
        match self.establishments.get_mut(card) {
            Some(owned) => {
                let active = owned.active();
                owned.renovation = 0;
                active
            }
            None => 0,
        }
    }

    pub fn add_establishment(&mut self, card: &str) {
        self.establishments.entry(card.to_string()).or_default().total += 1;
    }

    /// Removes one copy, dropping a renovation marker first if every copy
    /// would otherwise be closed.
    pub fn remove_establishment(&mut self, card: &str) -> bool {
        let Some(owned) = self.establishments.get_mut(card) else {
            return false;
        };
        if owned.total == 0 {
            return false;
        }
        owned.total -= 1;
        owned.renovation = owned.renovation.min(owned.total);
        true
    }

    /// Closes every owned copy of `card`, returning how many were closed.
    pub fn close_for_renovation(&mut self, card: &str) -> u32 {
        match self.establishments.get_mut(card) {
            Some(owned) => {
                owned.renovation = owned.total;
                owned.total
            }
            None => 0,
        }
    }

    pub fn has_landmark(&self, landmark: Landmark) -> bool {
        self.landmarks.get(&landmark).copied().unwrap_or(false)
    }

    pub fn set_landmark(&mut self, landmark: Landmark, built: bool) {
        self.landmarks.insert(landmark, built);
    }

    pub fn built_landmarks(&self, excluded: Option<Landmark>) -> usize {
        self.landmarks
            .iter()
            .filter(|(landmark, built)| **built && Some(**landmark) != excluded)
            .count()
    }

    /// True once every landmark tracked for this player is built.
    pub fn owns_all_landmarks(&self) -> bool {
        !self.landmarks.is_empty() && self.landmarks.values().all(|built| *built)
    }

    pub fn wealth(&self) -> u32 {
        self.coins.total() + self.investment.total()
    }
}

/// Mutable access to two distinct players at once.
pub fn pair_mut(
    players: &mut [PlayerState],
    first: PlayerId,
    second: PlayerId,
) -> Option<(&mut PlayerState, &mut PlayerState)> {
    if first == second || first >= players.len() || second >= players.len() {
        return None;
    }
    if first < second {
        let (head, tail) = players.split_at_mut(second);
        Some((&mut head[first], &mut tail[0]))
    } else {
        let (head, tail) = players.split_at_mut(first);
        Some((&mut tail[0], &mut head[second]))
    }
}

/// Seat order for resolving a roll: the roller first, then counter-clockwise.
pub fn counter_clockwise(num_players: usize, roller: PlayerId) -> impl Iterator<Item = PlayerId> {
    (0..num_players).map(move |offset| (num_players + roller - offset) % num_players)
}
