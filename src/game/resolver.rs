use itertools::Itertools;
use tracing::{debug, warn};

use crate::game::card::Card;
use crate::game::effect::EffectContext;
use crate::game::market::Marketplace;
use crate::game::players::counter_clockwise;
use crate::game::state::GameError;
use crate::types::PlayerId;

/// One `Effect::apply` call made while resolving a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub card: String,
    pub player: PlayerId,
    pub active: u32,
}

/// An effect whose decision was invalid; it was skipped without mutating state.
#[derive(Debug)]
pub struct RejectedEffect {
    pub card: String,
    pub player: PlayerId,
    pub error: GameError,
}

#[derive(Debug, Default)]
pub struct RollReport {
    pub roll: u8,
    pub special_roll: u32,
    pub applications: Vec<Application>,
    pub rejected: Vec<RejectedEffect>,
}

impl RollReport {
    /// Card names in the order they were first applied.
    pub fn card_order(&self) -> Vec<&str> {
        self.applications
            .iter()
            .map(|application| application.card.as_str())
            .dedup()
            .collect()
    }
}

/// Stateless driver for the effects triggered by a single dice roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnResolver;

impl TurnResolver {
    /// Cards triggered by `roll`, bucketed by priority while keeping catalog order inside a bucket.
    pub fn ordered_cards(market: &Marketplace, roll: u8) -> Vec<&Card> {
        market
            .find_by_roll(roll)
            .into_iter()
            .sorted_by_key(|card| card.effect.priority)
            .collect()
    }

    /// Applies every triggered card for every owner, roller first and then
    /// counter-clockwise. `special_roll` is shared by every effect of this roll.
    pub fn resolve_roll(
        ctx: &mut EffectContext<'_>,
        roller: PlayerId,
        roll: u8,
        special_roll: u32,
    ) -> Result<RollReport, GameError> {
        let num_players = ctx.players.len();
        if roller >= num_players {
            return Err(GameError::InvalidSelection(format!(
                "roller {roller} is not seated at a {num_players}-player table"
            )));
        }

        let market = ctx.market;
        let mut report = RollReport {
            roll,
            special_roll,
            ..RollReport::default()
        };

        for card in Self::ordered_cards(market, roll) {
            for player in counter_clockwise(num_players, roller) {
                let active = ctx.players[player].take_active(&card.name);
                if active == 0 {
                    continue;
                }
                debug!(card = %card.name, player, active, "card triggered");
                report.applications.push(Application {
                    card: card.name.clone(),
                    player,
                    active,
                });
                if let Err(error) =
                    card.effect
                        .apply(card, roller, player, active, special_roll, ctx)
                {
                    warn!(card = %card.name, player, %error, "effect rejected");
                    ctx.say(format!("{} was skipped: {error}", card.name));
                    report.rejected.push(RejectedEffect {
                        card: card.name.clone(),
                        player,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}
