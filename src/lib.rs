#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod game;
pub mod narrator;
pub mod players;
pub mod types;

pub use game::{Game, GameConfig, GameError, GameState};
pub use narrator::{Narrator, Silent, TracingNarrator, Transcript};
pub use players::DecisionProvider;
pub use types::{BreakingPolicy, GameVersion, Icon, Landmark, PlayerId};
