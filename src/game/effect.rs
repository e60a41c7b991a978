use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::game::bank::Bank;
use crate::game::card::Card;
use crate::game::custom::CustomEffect;
use crate::game::market::Marketplace;
use crate::game::players::{PlayerState, pair_mut};
use crate::game::state::GameError;
use crate::narrator::Narrator;
use crate::players::DecisionProvider;
use crate::types::{Icon, Landmark, PlayerId};

/// Resolution order bucket. Lower values resolve first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Unconditional, bank-funded income.
    Income = 0,
    /// Gated or composite effects.
    Conditional = 1,
    /// Effects that move coins or cards between players.
    Interactive = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutScope {
    RollerOnly,
    AllOwners,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankDirection {
    FromBank,
    ToBank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerDirection {
    RollerPaysOwner,
    OwnerPaysRoller,
}

/// Whose landmarks a prerequisite inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Owner,
    Roller,
}

impl Subject {
    fn resolve(self, roller: PlayerId, owner: PlayerId) -> PlayerId {
        match self {
            Subject::Owner => owner,
            Subject::Roller => roller,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Subject::Owner => "you have",
            Subject::Roller => "the player who rolled the dice has",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prerequisite {
    HasLandmark {
        landmark: Landmark,
        subject: Subject,
    },
    /// At least `min` built landmarks, never counting `excluded`.
    LandmarkCountAtLeast {
        min: usize,
        subject: Subject,
        excluded: Option<Landmark>,
    },
    /// Fewer than `max` built landmarks, never counting `excluded`.
    LandmarkCountBelow {
        max: usize,
        subject: Subject,
        excluded: Option<Landmark>,
    },
}

impl Prerequisite {
    pub fn at_least_landmarks(min: usize, subject: Subject) -> Self {
        Prerequisite::LandmarkCountAtLeast {
            min,
            subject,
            excluded: Some(Landmark::CityHall),
        }
    }

    pub fn fewer_landmarks_than(max: usize, subject: Subject) -> Self {
        Prerequisite::LandmarkCountBelow {
            max,
            subject,
            excluded: Some(Landmark::CityHall),
        }
    }

    pub fn holds(&self, players: &[PlayerState], roller: PlayerId, owner: PlayerId) -> bool {
        let subject_of = |subject: Subject| players.get(subject.resolve(roller, owner));
        match *self {
            Prerequisite::HasLandmark { landmark, subject } => {
                subject_of(subject).is_some_and(|p| p.has_landmark(landmark))
            }
            Prerequisite::LandmarkCountAtLeast {
                min,
                subject,
                excluded,
            } => subject_of(subject).is_some_and(|p| p.built_landmarks(excluded) >= min),
            Prerequisite::LandmarkCountBelow {
                max,
                subject,
                excluded,
            } => subject_of(subject).is_some_and(|p| p.built_landmarks(excluded) < max),
        }
    }

    pub fn description(&self) -> String {
        match *self {
            Prerequisite::HasLandmark { landmark, subject } => {
                format!("If {} the [{landmark}] landmark: ", subject.phrase())
            }
            Prerequisite::LandmarkCountAtLeast { min, subject, .. } => {
                format!("If {} {min} or more constructed landmarks: ", subject.phrase())
            }
            Prerequisite::LandmarkCountBelow { max, subject, .. } => {
                format!("If {} less than {max} constructed landmarks: ", subject.phrase())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    BankPayout {
        amount: u32,
        scope: PayoutScope,
        direction: BankDirection,
    },
    PeerPayout {
        amount: u32,
        direction: PeerDirection,
    },
    IconCountPayout {
        amount_per_match: u32,
        icon: Icon,
    },
    NamedCardCountPayout {
        amount_per_match: u32,
        card_name: String,
    },
    Custom(CustomEffect),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub priority: Priority,
    pub kind: EffectKind,
    pub prerequisite: Option<Prerequisite>,
}

/// Everything an effect may read or mutate while a roll resolves.
pub struct EffectContext<'a> {
    pub bank: &'a mut Bank,
    pub players: &'a mut [PlayerState],
    pub market: &'a Marketplace,
    pub decisions: &'a dyn DecisionProvider,
    pub narrator: &'a mut dyn Narrator,
}

impl EffectContext<'_> {
    pub fn say(&mut self, message: String) {
        self.narrator.narrate(&message);
    }

    pub fn bank_pays(&mut self, card: &Card, to: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let Some(player) = self.players.get_mut(to) else {
            return;
        };
        let remainder = self.bank.pay(amount, &mut player.coins);
        self.say(format!(
            "Player {to} gets {amount} coins from the bank [{}].",
            card.name
        ));
        self.report_shortfall("Bank", remainder);
    }

    pub fn bank_collects(&mut self, card: &Card, from: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let Some(player) = self.players.get_mut(from) else {
            return;
        };
        let remainder = self.bank.collect(&mut player.coins, amount);
        self.say(format!(
            "Player {from} pays {amount} coins to the bank [{}].",
            card.name
        ));
        self.report_shortfall(&format!("Player {from}"), remainder);
    }

    pub fn player_pays(&mut self, card: &Card, from: PlayerId, to: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let Some((payer, payee)) = pair_mut(self.players, from, to) else {
            return;
        };
        let remainder = self.bank.transfer(&mut payer.coins, amount, &mut payee.coins);
        self.say(format!(
            "Player {to} gets {amount} coins from player {from} [{}].",
            card.name
        ));
        self.report_shortfall(&format!("Player {from}"), remainder);
    }

    pub fn report_shortfall(&mut self, payer: &str, remainder: u32) {
        if remainder > 0 {
            warn!(payer, remainder, "payment shortfall");
            self.say(format!(
                "{payer} did not have enough money. Missing: {remainder}"
            ));
        }
    }

    /// Owned copies of every catalog card carrying `icon`.
    pub fn icon_count(&self, player: PlayerId, icon: Icon) -> u32 {
        let Some(player) = self.players.get(player) else {
            return 0;
        };
        self.market
            .find_by_icon(icon)
            .into_iter()
            .map(|card| player.owned(&card.name))
            .sum()
    }

    pub fn is_tradeable(&self, card_name: &str) -> bool {
        self.market
            .find_by_name(card_name)
            .is_some_and(|card| !card.is_major())
    }
}

impl Effect {
    pub fn new(priority: Priority, kind: EffectKind) -> Self {
        Self {
            priority,
            kind,
            prerequisite: None,
        }
    }

    pub fn bank_payout(amount: u32, scope: PayoutScope, direction: BankDirection) -> Self {
        Self::new(
            Priority::Income,
            EffectKind::BankPayout {
                amount,
                scope,
                direction,
            },
        )
    }

    pub fn peer_payout(amount: u32, direction: PeerDirection) -> Self {
        Self::new(
            Priority::Interactive,
            EffectKind::PeerPayout { amount, direction },
        )
    }

    pub fn icon_count_payout(amount_per_match: u32, icon: Icon) -> Self {
        Self::new(
            Priority::Income,
            EffectKind::IconCountPayout {
                amount_per_match,
                icon,
            },
        )
    }

    pub fn named_card_count_payout(amount_per_match: u32, card_name: &str) -> Self {
        Self::new(
            Priority::Income,
            EffectKind::NamedCardCountPayout {
                amount_per_match,
                card_name: card_name.to_string(),
            },
        )
    }

    pub fn custom(effect: CustomEffect) -> Self {
        Self::new(effect.priority(), EffectKind::Custom(effect))
    }

    /// Gates the effect; gated effects resolve with the conditional bucket.
    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisite = Some(prerequisite);
        self.priority = Priority::Conditional;
        self
    }

    pub fn description(&self) -> String {
        let body = self.kind.description();
        match &self.prerequisite {
            Some(prerequisite) => format!("{}{body}", prerequisite.description()),
            None => body,
        }
    }

    /// Applies the effect for one owner (`target`) of `active` copies of `card`.
    ///
    /// A failed prerequisite does nothing and is not an error.
    pub fn apply(
        &self,
        card: &Card,
        roller: PlayerId,
        target: PlayerId,
        active: u32,
        special_roll: u32,
        ctx: &mut EffectContext<'_>,
    ) -> Result<(), GameError> {
        for id in [roller, target] {
            if id >= ctx.players.len() {
                return Err(GameError::InvalidPlayer(id));
            }
        }
        if let Some(prerequisite) = &self.prerequisite {
            if !prerequisite.holds(ctx.players, roller, target) {
                debug!(card = %card.name, target, "prerequisite not met");
                return Ok(());
            }
        }
        debug!(card = %card.name, roller, target, active, "applying effect");

        match &self.kind {
            EffectKind::BankPayout {
                amount,
                scope,
                direction,
            } => {
                if *scope == PayoutScope::RollerOnly && target != roller {
                    return Ok(());
                }
                let total = augmented(*amount, card, &ctx.players[target]) * active;
                match direction {
                    BankDirection::FromBank => ctx.bank_pays(card, target, total),
                    BankDirection::ToBank => ctx.bank_collects(card, target, total),
                }
            }
            EffectKind::PeerPayout { amount, direction } => {
                if target == roller {
                    return Ok(());
                }
                let total = augmented(*amount, card, &ctx.players[target]) * active;
                match direction {
                    PeerDirection::RollerPaysOwner => ctx.player_pays(card, roller, target, total),
                    PeerDirection::OwnerPaysRoller => ctx.player_pays(card, target, roller, total),
                }
            }
            EffectKind::IconCountPayout {
                amount_per_match,
                icon,
            } => {
                if target != roller {
                    return Ok(());
                }
                let matches = ctx.icon_count(target, *icon);
                ctx.bank_pays(card, target, amount_per_match * matches * active);
            }
            EffectKind::NamedCardCountPayout {
                amount_per_match,
                card_name,
            } => {
                if target != roller {
                    return Ok(());
                }
                let matches = ctx.players[target].owned(card_name);
                ctx.bank_pays(card, target, amount_per_match * matches * active);
            }
            EffectKind::Custom(effect) => {
                effect.apply(card, roller, target, active, special_roll, ctx)?;
            }
        }
        Ok(())
    }
}

impl EffectKind {
    pub fn description(&self) -> String {
        match self {
            EffectKind::BankPayout {
                amount,
                scope,
                direction,
            } => {
                let when = match scope {
                    PayoutScope::RollerOnly => "your turn only",
                    PayoutScope::AllOwners => "anyone's turn",
                };
                match direction {
                    BankDirection::FromBank => {
                        format!("Get {} from the bank on {when}", coins(*amount))
                    }
                    BankDirection::ToBank => {
                        format!("Pay {} to the bank on {when}", coins(*amount))
                    }
                }
            }
            EffectKind::PeerPayout { amount, direction } => match direction {
                PeerDirection::RollerPaysOwner => format!(
                    "Get {} from the player who rolled the dice",
                    coins(*amount)
                ),
                PeerDirection::OwnerPaysRoller => format!(
                    "Pay {} to the player who rolled the dice",
                    coins(*amount)
                ),
            },
            EffectKind::IconCountPayout {
                amount_per_match,
                icon,
            } => format!(
                "Get {} from the bank for each [{icon}] establishment that you own on your turn only",
                coins(*amount_per_match)
            ),
            EffectKind::NamedCardCountPayout {
                amount_per_match,
                card_name,
            } => format!(
                "Get {} from the bank for each {card_name} that you own on your turn only",
                coins(*amount_per_match)
            ),
            EffectKind::Custom(effect) => effect.description().to_string(),
        }
    }
}

/// Per-card amount after the owner's Shopping Mall bonus.
pub fn augmented(amount: u32, card: &Card, owner: &PlayerState) -> u32 {
    if owner.has_landmark(Landmark::ShoppingMall) && card.icon.boosted_by_shopping_mall() {
        amount + 1
    } else {
        amount
    }
}

pub(crate) fn coins(amount: u32) -> String {
    if amount == 1 {
        "1 coin".to_string()
    } else {
        format!("{amount} coins")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerequisite_fragment_is_prepended() {
        let effect = Effect::peer_payout(1, PeerDirection::RollerPaysOwner).with_prerequisite(
            Prerequisite::HasLandmark {
                landmark: Landmark::Harbor,
                subject: Subject::Owner,
            },
        );
        assert_eq!(
            effect.description(),
            "If you have the [Harbor] landmark: Get 1 coin from the player who rolled the dice"
        );
        assert_eq!(effect.priority, Priority::Conditional);
    }

    #[test]
    fn landmark_count_ignores_city_hall() {
        let mut players = vec![PlayerState::new(0), PlayerState::new(1)];
        players[0].set_landmark(Landmark::CityHall, true);
        players[0].set_landmark(Landmark::Harbor, true);

        let at_least_two = Prerequisite::at_least_landmarks(2, Subject::Roller);
        let below_two = Prerequisite::fewer_landmarks_than(2, Subject::Owner);

        assert!(!at_least_two.holds(&players, 0, 1));
        assert!(below_two.holds(&players, 1, 0));
    }

    #[test]
    fn bank_payout_descriptions() {
        let effect = Effect::bank_payout(3, PayoutScope::RollerOnly, BankDirection::FromBank);
        assert_eq!(
            effect.description(),
            "Get 3 coins from the bank on your turn only"
        );
    }
}
