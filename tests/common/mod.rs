#![allow(dead_code)]

use machikoro_rs::game::{GameConfig, GameState};
use machikoro_rs::players::DecisionProvider;
use machikoro_rs::types::{GameVersion, PlayerId};

/// Answers with canned picks. Cards are tried in order against the
/// candidates; if none match, the first scripted card is returned anyway.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub player: Option<PlayerId>,
    pub cards: Vec<String>,
    pub answer: bool,
}

impl Scripted {
    pub fn player(player: PlayerId) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }

    pub fn cards(mut self, cards: &[&str]) -> Self {
        self.cards = cards.iter().map(|card| card.to_string()).collect();
        self
    }
}

impl DecisionProvider for Scripted {
    fn choose_player(&self, _context: &str, candidates: &[PlayerId]) -> PlayerId {
        self.player
            .or_else(|| candidates.first().copied())
            .unwrap_or_default()
    }

    fn choose_card(&self, _context: &str, candidates: &[String]) -> String {
        self.cards
            .iter()
            .find(|card| candidates.contains(card))
            .or_else(|| self.cards.first())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_default()
    }

    fn confirm(&self, _context: &str) -> bool {
        self.answer
    }
}

pub fn state(version: GameVersion, num_players: usize) -> GameState {
    GameState::new(GameConfig {
        version,
        num_players,
        ..GameConfig::default()
    })
    .expect("valid config")
}

/// Moves `amount` one-coins from the bank to `player`.
pub fn fund(state: &mut GameState, player: PlayerId, amount: u32) {
    for _ in 0..amount {
        let remainder = state.bank.pay(1, &mut state.players[player].coins);
        assert_eq!(remainder, 0, "bank ran out of ones");
    }
}

/// Returns all of `player`'s coins to the bank.
pub fn drain(state: &mut GameState, player: PlayerId) {
    let total = state.players[player].coins.total();
    state.bank.collect(&mut state.players[player].coins, total);
}

pub fn coins(state: &GameState) -> Vec<u32> {
    state.players.iter().map(|p| p.coins.total()).collect()
}
