use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::bank::Bank;
use crate::game::catalog::{
    STARTING_COINS, STARTING_ESTABLISHMENTS, cards_for, landmark_card, landmarks_for,
    supply_policy,
};
use crate::game::effect::EffectContext;
use crate::game::market::Marketplace;
use crate::game::players::PlayerState;
use crate::game::resolver::{RollReport, TurnResolver};
use crate::narrator::Narrator;
use crate::players::DecisionProvider;
use crate::types::{BreakingPolicy, GameVersion, Landmark, PlayerId};

pub const TECH_STARTUP: &str = "Tech Startup";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_players: usize,
    pub version: GameVersion,
    pub seed: u64,
    pub breaking: BreakingPolicy,
    pub turn_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            version: GameVersion::Basic,
            seed: 42,
            breaking: BreakingPolicy::None,
            turn_limit: 1000,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("between 2 and 4 players are supported, got {0}")]
    UnsupportedPlayerCount(usize),
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("{0} is not available in the marketplace")]
    CardUnavailable(String),
    #[error("landmark {0} is already built")]
    LandmarkOwned(Landmark),
    #[error("insufficient coins: have {available}, need {needed}")]
    InsufficientCoins { needed: u32, available: u32 },
    #[error("cannot pay {needed} with the coins at hand")]
    ExactChangeUnavailable { needed: u32 },
}

/// Result of rolling one or two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub dice: (u8, Option<u8>),
    pub doubles: bool,
}

impl DiceRoll {
    pub fn total(&self) -> u8 {
        self.dice.0 + self.dice.1.unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub bank: Bank,
    pub players: Vec<PlayerState>,
    pub market: Marketplace,
    pub landmarks: Vec<Landmark>,
    pub current_player: PlayerId,
    pub turn: u32,
    pub winner: Option<PlayerId>,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        if !(2..=4).contains(&config.num_players) {
            return Err(GameError::UnsupportedPlayerCount(config.num_players));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let market = Marketplace::new(
            cards_for(config.version),
            supply_policy(config.version),
            rng.r#gen(),
        );
        let landmarks = landmarks_for(config.version);
        let mut bank = Bank::standard(config.breaking);

        let mut players = Vec::with_capacity(config.num_players);
        for id in 0..config.num_players {
            let mut player = PlayerState::new(id);
            let remainder = bank.pay(STARTING_COINS, &mut player.coins);
            if remainder > 0 {
                warn!(player = id, remainder, "bank short on starting coins");
            }
            for name in STARTING_ESTABLISHMENTS {
                player.add_establishment(name);
            }
            for landmark in &landmarks {
                player.set_landmark(*landmark, landmark_card(*landmark).cost == 0);
            }
            players.push(player);
        }

        Ok(Self {
            config,
            bank,
            players,
            market,
            landmarks,
            current_player: 0,
            turn: 0,
            winner: None,
            rng,
        })
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    pub fn context<'a>(
        &'a mut self,
        decisions: &'a dyn DecisionProvider,
        narrator: &'a mut dyn Narrator,
    ) -> EffectContext<'a> {
        EffectContext {
            bank: &mut self.bank,
            players: &mut self.players,
            market: &self.market,
            decisions,
            narrator,
        }
    }

    pub fn resolve_roll(
        &mut self,
        roller: PlayerId,
        roll: u8,
        special_roll: u32,
        decisions: &dyn DecisionProvider,
        narrator: &mut dyn Narrator,
    ) -> Result<RollReport, GameError> {
        let mut ctx = self.context(decisions, narrator);
        TurnResolver::resolve_roll(&mut ctx, roller, roll, special_roll)
    }

    /// Rolls `count` dice for `player`; two dice need a Train Station.
    pub fn roll_dice(&mut self, player: PlayerId, count: u8) -> Result<DiceRoll, GameError> {
        let has_station = self.player(player)?.has_landmark(Landmark::TrainStation);
        match count {
            1 => Ok(DiceRoll {
                dice: (self.roll_die(), None),
                doubles: false,
            }),
            2 if has_station => {
                let (first, second) = (self.roll_die(), self.roll_die());
                Ok(DiceRoll {
                    dice: (first, Some(second)),
                    doubles: first == second,
                })
            }
            _ => Err(GameError::InvalidSelection(format!(
                "player {player} cannot roll {count} dice"
            ))),
        }
    }

    /// Two-dice value shared by every effect of one roll.
    pub fn special_roll(&mut self) -> u32 {
        u32::from(self.roll_die()) + u32::from(self.roll_die())
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    /// Checks that `payer` can hand over exactly `amount` under the bank's policy.
    fn ensure_can_pay(&self, payer: PlayerId, amount: u32) -> Result<(), GameError> {
        let coins = self.player(payer)?.coins;
        if coins.total() < amount {
            return Err(GameError::InsufficientCoins {
                needed: amount,
                available: coins.total(),
            });
        }
        let mut probe_coins = coins;
        let mut probe_bank = self.bank.clone();
        if probe_bank.collect(&mut probe_coins, amount) > 0 {
            return Err(GameError::ExactChangeUnavailable { needed: amount });
        }
        Ok(())
    }

    pub fn buy_establishment(
        &mut self,
        player: PlayerId,
        name: &str,
        narrator: &mut dyn Narrator,
    ) -> Result<(), GameError> {
        self.player(player)?;
        if self.market.offered_count(name) == 0 {
            return Err(GameError::CardUnavailable(name.to_string()));
        }
        let cost = self
            .market
            .find_by_name(name)
            .map(|card| card.cost)
            .ok_or_else(|| GameError::CardUnavailable(name.to_string()))?;
        if cost > 0 {
            self.ensure_can_pay(player, cost.unsigned_abs())?;
        }

        self.market.purchase(name)?;
        let buyer = &mut self.players[player];
        if cost > 0 {
            self.bank.collect(&mut buyer.coins, cost.unsigned_abs());
        } else if cost < 0 {
            let remainder = self.bank.pay(cost.unsigned_abs(), &mut buyer.coins);
            if remainder > 0 {
                warn!(player, remainder, "bank could not fund purchase");
                narrator.narrate(&format!(
                    "Bank did not have enough money. Missing: {remainder}"
                ));
            }
        }
        buyer.add_establishment(name);
        info!(player, card = name, cost, "bought establishment");
        narrator.narrate(&format!("Player {player} buys {name}"));
        Ok(())
    }

    pub fn buy_landmark(
        &mut self,
        player: PlayerId,
        landmark: Landmark,
        narrator: &mut dyn Narrator,
    ) -> Result<(), GameError> {
        if !self.landmarks.contains(&landmark) {
            return Err(GameError::InvalidSelection(format!(
                "{landmark} is not part of this game"
            )));
        }
        if self.player(player)?.has_landmark(landmark) {
            return Err(GameError::LandmarkOwned(landmark));
        }
        let cost = landmark_card(landmark).cost;
        self.ensure_can_pay(player, cost)?;

        let buyer = &mut self.players[player];
        self.bank.collect(&mut buyer.coins, cost);
        buyer.set_landmark(landmark, true);
        info!(player, %landmark, cost, "built landmark");
        narrator.narrate(&format!("Player {player} builds {landmark}"));
        Ok(())
    }

    /// Moves `amount` coins onto the player's Tech Startups, at most one per copy.
    pub fn invest(&mut self, player: PlayerId, amount: u32) -> Result<(), GameError> {
        let startups = self.player(player)?.owned(TECH_STARTUP);
        if amount == 0 || amount > startups {
            return Err(GameError::InvalidSelection(format!(
                "cannot invest {amount} with {startups} tech startups"
            )));
        }
        self.ensure_can_pay(player, amount)?;

        let investor = &mut self.players[player];
        self.bank
            .transfer(&mut investor.coins, amount, &mut investor.investment);
        Ok(())
    }

    pub fn bank_pays(&mut self, player: PlayerId, amount: u32, narrator: &mut dyn Narrator) {
        let Some(receiver) = self.players.get_mut(player) else {
            return;
        };
        let remainder = self.bank.pay(amount, &mut receiver.coins);
        narrator.narrate(&format!(
            "Player {player} gets {amount} coins from the bank."
        ));
        if remainder > 0 {
            warn!(player, remainder, "bank payment shortfall");
            narrator.narrate(&format!(
                "Bank did not have enough money. Missing: {remainder}"
            ));
        }
    }

    /// Establishments on offer that `player` can pay for right now.
    pub fn affordable_establishments(&self, player: PlayerId) -> Vec<String> {
        self.market
            .each_card()
            .into_iter()
            .filter(|(_, _, card)| {
                card.cost <= 0
                    || self
                        .ensure_can_pay(player, card.cost.unsigned_abs())
                        .is_ok()
            })
            .map(|(name, _, _)| name.to_string())
            .collect()
    }

    /// Unbuilt landmarks `player` can pay for right now, cheapest first.
    pub fn affordable_landmarks(&self, player: PlayerId) -> Vec<Landmark> {
        let Ok(owner) = self.player(player) else {
            return Vec::new();
        };
        let mut landmarks: Vec<Landmark> = self
            .landmarks
            .iter()
            .copied()
            .filter(|landmark| !owner.has_landmark(*landmark))
            .filter(|landmark| {
                self.ensure_can_pay(player, landmark_card(*landmark).cost)
                    .is_ok()
            })
            .collect();
        landmarks.sort_by_key(|landmark| landmark_card(*landmark).cost);
        landmarks
    }

    pub fn has_won(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some_and(|p| {
            self.landmarks
                .iter()
                .all(|landmark| p.has_landmark(*landmark))
        })
    }

    /// Coins held by the bank and every purse at the table.
    pub fn coins_in_play(&self) -> u32 {
        self.bank.total()
            + self
                .players
                .iter()
                .map(PlayerState::wealth)
                .sum::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::Silent;

    #[test]
    fn setup_deals_starting_hand() {
        let state = GameState::new(GameConfig::default()).expect("valid config");

        assert_eq!(state.players.len(), 4);
        for player in &state.players {
            assert_eq!(player.coins.total(), 3);
            assert_eq!(player.owned("Wheat Field"), 1);
            assert_eq!(player.owned("Bakery"), 1);
        }
        assert_eq!(state.coins_in_play(), 282);
    }

    #[test]
    fn rejects_too_many_players() {
        let config = GameConfig {
            num_players: 5,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new(config),
            Err(GameError::UnsupportedPlayerCount(5))
        ));
    }

    #[test]
    fn two_dice_need_train_station() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");
        assert!(matches!(
            state.roll_dice(0, 2),
            Err(GameError::InvalidSelection(_))
        ));
        assert!(state.roll_dice(0, 3).is_err());

        state.players[0].set_landmark(Landmark::TrainStation, true);
        let roll = state.roll_dice(0, 2).expect("station owner");
        assert!((2..=12).contains(&roll.total()));
    }

    #[test]
    fn buying_moves_coins_to_bank() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");

        state
            .buy_establishment(0, "Ranch", &mut Silent)
            .expect("ranch costs 1");

        assert_eq!(state.players[0].coins.total(), 2);
        assert_eq!(state.players[0].owned("Ranch"), 1);
        assert_eq!(state.coins_in_play(), 282);
    }

    #[test]
    fn failed_purchase_changes_nothing() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");

        let err = state
            .buy_establishment(0, "Mine", &mut Silent)
            .unwrap_err();

        assert!(matches!(err, GameError::InsufficientCoins { needed: 6, available: 3 }));
        assert_eq!(state.players[0].coins.total(), 3);
        assert_eq!(state.market.offered_count("Mine"), 6);
    }

    #[test]
    fn config_reads_partial_json() {
        let config = GameConfig::from_json(r#"{"num_players": 2, "version": "Harbor"}"#)
            .expect("valid json");
        assert_eq!(config.num_players, 2);
        assert_eq!(config.version, GameVersion::Harbor);
        assert_eq!(config.turn_limit, 1000);
    }
}
