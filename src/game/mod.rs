pub mod bank;
pub mod card;
pub mod catalog;
pub mod coins;
pub mod custom;
pub mod effect;
pub mod game;
pub mod market;
pub mod players;
pub mod resolver;
pub mod state;

pub use bank::Bank;
pub use card::{Card, LandmarkCard};
pub use coins::CoinSet;
pub use custom::{Choice, CustomEffect};
pub use effect::{Effect, EffectContext, EffectKind, Prerequisite, Priority};
pub use game::{Game, TurnSummary};
pub use market::{Marketplace, SupplyPolicy, TierKind};
pub use players::PlayerState;
pub use resolver::{RollReport, TurnResolver};
pub use state::{DiceRoll, GameConfig, GameError, GameState};
