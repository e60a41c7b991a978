//! Card behaviours that do not fit the parameterised payout shapes.
//!
//! Interactive behaviours run in two phases: [`CustomEffect::decide`] asks the
//! decision provider and returns a [`Choice`], then
//! [`CustomEffect::apply_choice`] validates that choice against the current
//! state before touching anything.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::warn;

use crate::game::card::Card;
use crate::game::coins::CoinSet;
use crate::game::effect::{EffectContext, Priority};
use crate::game::players::{counter_clockwise, pair_mut};
use crate::game::state::GameError;
use crate::types::{Icon, Landmark, PlayerId};

pub const VINEYARD: &str = "Vineyard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CustomEffect {
    Stadium,
    TvStation,
    BusinessCenter,
    TaxOffice,
    Publisher,
    TunaBoat,
    MembersOnlyClub,
    Park,
    SodaBottlingPlant,
    TechStartup,
    Winery,
    MovingCompany,
    RenovationCompany,
    DemolitionCompany,
}

/// A decision gathered before an interactive effect mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Target(PlayerId),
    Trade {
        partner: PlayerId,
        take: String,
        give: String,
    },
    Give {
        recipient: PlayerId,
        card: String,
    },
    Renovate(String),
    Demolish(Landmark),
}

impl CustomEffect {
    pub fn priority(self) -> Priority {
        use CustomEffect::*;
        match self {
            TunaBoat | MembersOnlyClub | SodaBottlingPlant | Winery | MovingCompany
            | DemolitionCompany => Priority::Conditional,
            Stadium | TvStation | BusinessCenter | TaxOffice | Publisher | Park | TechStartup
            | RenovationCompany => Priority::Interactive,
        }
    }

    /// Effects that only fire for the roller's own copies.
    pub fn roller_only(self) -> bool {
        !matches!(self, CustomEffect::TunaBoat | CustomEffect::MembersOnlyClub)
    }

    pub fn description(self) -> &'static str {
        match self {
            CustomEffect::Stadium => "Get 2 coins from each player on your turn only",
            CustomEffect::TvStation => "Take 5 coins from any one player on your turn only",
            CustomEffect::BusinessCenter => {
                "Trade one non major establishment with any one player on your turn only"
            }
            CustomEffect::TaxOffice => {
                "For each player with 10 or more coins, you get half of their coins on your turn only"
            }
            CustomEffect::Publisher => {
                "Get 1 coin from each player for each [Cup] and [Bread] they have on your turn only"
            }
            CustomEffect::TunaBoat => {
                "Roller rolls 2 dice and you receive that many coins from the bank on anyone's turn"
            }
            CustomEffect::MembersOnlyClub => "Get all of the coins of the player who rolled the dice",
            CustomEffect::Park => {
                "Redistribute all players' coins evenly among all players (if there is an uneven amount of coins, take coins from the bank to make up the difference), on your turn only"
            }
            CustomEffect::SodaBottlingPlant => {
                "Get 1 coin from the bank for every [Cup] owned by all players, on your turn only"
            }
            CustomEffect::TechStartup => {
                "At the end of your turn you can put 1 coin on this card. If this card is activated, you get that many coins from each player, on your turn only"
            }
            CustomEffect::Winery => {
                "Get 6 coins for each vineyard you have, then close this building for renovation, on your turn only"
            }
            CustomEffect::MovingCompany => {
                "You must give a non-[Major] building you own to another player. When you do, get 4 coins from the bank, on your turn only"
            }
            CustomEffect::RenovationCompany => {
                "Choose a non-[Major] building. All buildings owned by any player of that type are closed for renovations. Get 1 coin from the bank for each building closed for renovation, on your turn only"
            }
            CustomEffect::DemolitionCompany => {
                "For each Demolition Company you own, you must demolish a constructed landmark and take 8 coins from the bank, on your turn only"
            }
        }
    }

    pub fn apply(
        self,
        card: &Card,
        roller: PlayerId,
        target: PlayerId,
        active: u32,
        special_roll: u32,
        ctx: &mut EffectContext<'_>,
    ) -> Result<(), GameError> {
        if self.roller_only() && target != roller {
            return Ok(());
        }
        let others: Vec<PlayerId> = counter_clockwise(ctx.players.len(), roller)
            .skip(1)
            .collect();

        match self {
            CustomEffect::Stadium => {
                for other in others {
                    ctx.player_pays(card, other, roller, 2 * active);
                }
            }
            CustomEffect::TaxOffice => {
                for other in others {
                    let coins = ctx.players[other].coins.total();
                    if coins >= 10 {
                        ctx.player_pays(card, other, roller, coins / 2);
                    }
                }
            }
            CustomEffect::Publisher => {
                for other in others {
                    let matches =
                        ctx.icon_count(other, Icon::Cup) + ctx.icon_count(other, Icon::Bread);
                    ctx.player_pays(card, other, roller, matches * active);
                }
            }
            CustomEffect::TechStartup => {
                let invested = ctx.players[roller].investment.total();
                for other in others {
                    ctx.player_pays(card, other, roller, invested);
                }
            }
            CustomEffect::TunaBoat => ctx.bank_pays(card, target, special_roll * active),
            CustomEffect::MembersOnlyClub => {
                let everything = ctx.players[roller].coins.total();
                ctx.player_pays(card, roller, target, everything);
            }
            CustomEffect::SodaBottlingPlant => {
                let cups: u32 = (0..ctx.players.len())
                    .map(|player| ctx.icon_count(player, Icon::Cup))
                    .sum();
                ctx.bank_pays(card, roller, cups * active);
            }
            CustomEffect::Winery => {
                let vineyards = ctx.players[roller].owned(VINEYARD);
                ctx.bank_pays(card, roller, 6 * vineyards * active);
                let closed = ctx.players[roller].close_for_renovation(&card.name);
                ctx.say(format!(
                    "{closed} of player {roller}'s {} cards are closed for renovation.",
                    card.name
                ));
            }
            CustomEffect::Park => redistribute(card, roller, ctx),
            CustomEffect::TvStation => {
                if let Some(choice) = self.decide(roller, ctx)? {
                    self.apply_choice(card, roller, active, &choice, ctx)?;
                }
            }
            CustomEffect::BusinessCenter
            | CustomEffect::MovingCompany
            | CustomEffect::RenovationCompany
            | CustomEffect::DemolitionCompany => {
                for _ in 0..active {
                    let Some(choice) = self.decide(roller, ctx)? else {
                        ctx.say(format!("Nothing to choose for {} [{}].", self, card.name));
                        break;
                    };
                    self.apply_choice(card, roller, 1, &choice, ctx)?;
                }
            }
        }
        Ok(())
    }

    /// Asks the decision provider for this effect's choice.
    ///
    /// Returns `None` when there is nothing to choose from.
    pub fn decide(
        self,
        roller: PlayerId,
        ctx: &EffectContext<'_>,
    ) -> Result<Option<Choice>, GameError> {
        let others: Vec<PlayerId> = counter_clockwise(ctx.players.len(), roller)
            .skip(1)
            .collect();

        let choice = match self {
            CustomEffect::TvStation => {
                if others.is_empty() {
                    return Ok(None);
                }
                let victim = ctx
                    .decisions
                    .choose_player("Pick a player to take coins from", &others);
                Choice::Target(victim)
            }
            CustomEffect::BusinessCenter => {
                let gives = tradeable_cards(ctx, roller);
                let partners: Vec<PlayerId> = others
                    .into_iter()
                    .filter(|other| !tradeable_cards(ctx, *other).is_empty())
                    .collect();
                if gives.is_empty() || partners.is_empty() {
                    return Ok(None);
                }
                let partner = ctx
                    .decisions
                    .choose_player("Pick a player to trade cards with", &partners);
                if !partners.contains(&partner) {
                    return Err(GameError::InvalidSelection(format!(
                        "player {partner} cannot trade"
                    )));
                }
                let takes = tradeable_cards(ctx, partner);
                let take = ctx.decisions.choose_card("Pick a card to take", &takes);
                let give = ctx.decisions.choose_card("Pick a card to give", &gives);
                Choice::Trade {
                    partner,
                    take,
                    give,
                }
            }
            CustomEffect::MovingCompany => {
                let gives = tradeable_cards(ctx, roller);
                if gives.is_empty() || others.is_empty() {
                    return Ok(None);
                }
                let recipient = ctx
                    .decisions
                    .choose_player("Pick a player to give a building to", &others);
                let card = ctx.decisions.choose_card("Pick a card to give", &gives);
                Choice::Give { recipient, card }
            }
            CustomEffect::RenovationCompany => {
                let candidates = renovation_candidates(ctx);
                if candidates.is_empty() {
                    return Ok(None);
                }
                let card = ctx
                    .decisions
                    .choose_card("Pick a card to close for renovation", &candidates);
                Choice::Renovate(card)
            }
            CustomEffect::DemolitionCompany => {
                let candidates: Vec<String> = demolishable(ctx, roller)
                    .into_iter()
                    .map(|landmark| landmark.to_string())
                    .collect();
                if candidates.is_empty() {
                    return Ok(None);
                }
                let name = ctx
                    .decisions
                    .choose_card("Which landmark do you want to demolish?", &candidates);
                let landmark = Landmark::from_str(&name)
                    .map_err(|_| GameError::InvalidSelection(format!("unknown landmark {name}")))?;
                Choice::Demolish(landmark)
            }
            _ => return Ok(None),
        };
        Ok(Some(choice))
    }

    /// Validates `choice`, then carries it out. An invalid choice changes nothing.
    pub fn apply_choice(
        self,
        card: &Card,
        roller: PlayerId,
        active: u32,
        choice: &Choice,
        ctx: &mut EffectContext<'_>,
    ) -> Result<(), GameError> {
        match (self, choice) {
            (CustomEffect::TvStation, Choice::Target(victim)) => {
                ensure_other_player(ctx, roller, *victim)?;
                ctx.player_pays(card, *victim, roller, 5 * active);
            }
            (
                CustomEffect::BusinessCenter,
                Choice::Trade {
                    partner,
                    take,
                    give,
                },
            ) => {
                ensure_other_player(ctx, roller, *partner)?;
                ensure_owns_tradeable(ctx, *partner, take)?;
                ensure_owns_tradeable(ctx, roller, give)?;
                let (mine, theirs) = pair_mut(ctx.players, roller, *partner)
                    .ok_or(GameError::InvalidPlayer(*partner))?;
                mine.remove_establishment(give);
                theirs.remove_establishment(take);
                mine.add_establishment(take);
                theirs.add_establishment(give);
                ctx.say(format!(
                    "Player {roller} trades {give} for {take} with player {partner} [{}]",
                    card.name
                ));
            }
            (CustomEffect::MovingCompany, Choice::Give { recipient, card: given }) => {
                ensure_other_player(ctx, roller, *recipient)?;
                ensure_owns_tradeable(ctx, roller, given)?;
                let (mine, theirs) = pair_mut(ctx.players, roller, *recipient)
                    .ok_or(GameError::InvalidPlayer(*recipient))?;
                mine.remove_establishment(given);
                theirs.add_establishment(given);
                ctx.say(format!(
                    "Player {roller} gives {given} to player {recipient} [{}]",
                    card.name
                ));
                ctx.bank_pays(card, roller, 4);
            }
            (CustomEffect::RenovationCompany, Choice::Renovate(name)) => {
                if !renovation_candidates(ctx).contains(name) {
                    return Err(GameError::InvalidSelection(format!(
                        "{name} cannot be closed for renovation"
                    )));
                }
                let closed: u32 = ctx
                    .players
                    .iter_mut()
                    .map(|player| player.close_for_renovation(name))
                    .sum();
                ctx.say(format!(
                    "Player {roller} closes {name} for renovations [{}]",
                    card.name
                ));
                ctx.bank_pays(card, roller, closed);
            }
            (CustomEffect::DemolitionCompany, Choice::Demolish(landmark)) => {
                if !demolishable(ctx, roller).contains(landmark) {
                    return Err(GameError::InvalidSelection(format!(
                        "{landmark} cannot be demolished"
                    )));
                }
                ctx.players[roller].set_landmark(*landmark, false);
                ctx.say(format!(
                    "Player {roller} demolishes {landmark} [{}]",
                    card.name
                ));
                ctx.bank_pays(card, roller, 8);
            }
            (effect, choice) => {
                warn!(%effect, ?choice, "choice does not match effect");
                return Err(GameError::InvalidSelection(format!(
                    "{choice:?} is not a choice for {effect}"
                )));
            }
        }
        Ok(())
    }
}

/// Pools every player's coins and deals them back out evenly, topping the
/// pool up from the bank so it divides exactly. The pool makes change with the
/// bank whatever the breaking policy; only coins it cannot deal return to the
/// bank.
fn redistribute(card: &Card, roller: PlayerId, ctx: &mut EffectContext<'_>) {
    let num_players = ctx.players.len();
    let mut pool = CoinSet::empty();
    let mut messages = Vec::with_capacity(num_players + 1);
    for player in ctx.players.iter_mut() {
        let put = player.coins.transfer_all(&mut pool);
        messages.push(format!(
            "Player {} puts {put} coins into the redistribution.",
            player.id
        ));
    }
    for message in messages {
        ctx.say(message);
    }

    let players = num_players as u32;
    let top_up = (players - pool.total() % players) % players;
    let remainder = ctx.bank.pay(top_up, &mut pool);
    ctx.report_shortfall("Bank", remainder);

    let share = pool.total() / players;
    for id in counter_clockwise(num_players, roller) {
        let remainder = ctx
            .bank
            .settle(&mut pool, share, &mut ctx.players[id].coins);
        ctx.say(format!(
            "Player {id} gets {share} coins from the redistribution [{}].",
            card.name
        ));
        ctx.report_shortfall("Redistribution", remainder);
    }

    let leftover = pool.total();
    ctx.bank.collect(&mut pool, leftover);
}

fn tradeable_cards(ctx: &EffectContext<'_>, player: PlayerId) -> Vec<String> {
    ctx.players
        .get(player)
        .map(|p| {
            p.establishments
                .iter()
                .filter(|(name, owned)| owned.total > 0 && ctx.is_tradeable(name))
                .map(|(name, _)| name.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn renovation_candidates(ctx: &EffectContext<'_>) -> Vec<String> {
    let names: BTreeSet<String> = (0..ctx.players.len())
        .flat_map(|player| tradeable_cards(ctx, player))
        .collect();
    names.into_iter().collect()
}

fn demolishable(ctx: &EffectContext<'_>, player: PlayerId) -> Vec<Landmark> {
    ctx.players
        .get(player)
        .map(|p| {
            p.landmarks
                .iter()
                .filter(|(landmark, built)| **built && **landmark != Landmark::CityHall)
                .map(|(landmark, _)| *landmark)
                .collect()
        })
        .unwrap_or_default()
}

fn ensure_other_player(
    ctx: &EffectContext<'_>,
    roller: PlayerId,
    other: PlayerId,
) -> Result<(), GameError> {
    if other == roller || other >= ctx.players.len() {
        return Err(GameError::InvalidSelection(format!(
            "player {other} is not a valid opponent"
        )));
    }
    Ok(())
}

fn ensure_owns_tradeable(
    ctx: &EffectContext<'_>,
    player: PlayerId,
    card: &str,
) -> Result<(), GameError> {
    if ctx.players[player].owned(card) == 0 || !ctx.is_tradeable(card) {
        return Err(GameError::InvalidSelection(format!(
            "player {player} has no tradeable {card}"
        )));
    }
    Ok(())
}
