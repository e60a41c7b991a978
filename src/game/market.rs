use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::trace;

use crate::game::card::Card;
use crate::game::state::GameError;
use crate::types::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TierKind {
    Low,
    High,
    Major,
}

impl TierKind {
    pub fn of(card: &Card) -> Self {
        if card.icon == Icon::Major {
            TierKind::Major
        } else if card.active_numbers.iter().all(|n| *n < 7) {
            TierKind::Low
        } else {
            TierKind::High
        }
    }

    /// Distinct establishments a tier shows at once.
    pub const fn slots(self) -> usize {
        match self {
            TierKind::Low => 5,
            TierKind::High => 5,
            TierKind::Major => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyPolicy {
    /// Every card can be bought straight from its own supply.
    Flat,
    /// Cards are dealt into Low / High / Major tiers with limited slots.
    Tiered,
}

/// One market row: the offered cards plus a bag of undrawn copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    kind: TierKind,
    /// Catalog index and number of offered copies, in the order they were dealt.
    offered: Vec<(usize, u32)>,
    /// One entry per undrawn copy.
    stock: Vec<usize>,
}

impl Tier {
    fn new(kind: TierKind, catalog: &[Card]) -> Self {
        let stock = catalog
            .iter()
            .enumerate()
            .filter(|(_, card)| TierKind::of(card) == kind)
            .flat_map(|(idx, card)| std::iter::repeat(idx).take(card.supply as usize))
            .collect();
        Self {
            kind,
            offered: Vec::new(),
            stock,
        }
    }

    pub fn kind(&self) -> TierKind {
        self.kind
    }

    pub fn offered_len(&self) -> usize {
        self.offered.len()
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    fn offered_count(&self, idx: usize) -> Option<u32> {
        self.offered
            .iter()
            .find(|(offered, _)| *offered == idx)
            .map(|(_, count)| *count)
    }

    /// Draws until the tier shows `slots` distinct cards or the bag is empty.
    fn refill(&mut self, catalog: &mut [Card], rng: &mut impl Rng) {
        while self.offered.len() < self.kind.slots() && !self.stock.is_empty() {
            let pick = rng.gen_range(0..self.stock.len());
            let idx = self.stock.swap_remove(pick);
            let card = &mut catalog[idx];
            card.supply = card.supply.saturating_sub(1);
            trace!(tier = %self.kind, card = %card.name, "dealt card into market");
            match self.offered.iter_mut().find(|(offered, _)| *offered == idx) {
                Some((_, count)) => *count += 1,
                None => self.offered.push((idx, 1)),
            }
        }
    }

    /// Takes one offered copy; returns `false` if `idx` is not on offer.
    fn take(&mut self, idx: usize) -> bool {
        let Some(pos) = self.offered.iter().position(|(offered, _)| *offered == idx) else {
            return false;
        };
        let count = &mut self.offered[pos].1;
        *count -= 1;
        if *count == 0 {
            self.offered.remove(pos);
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct Marketplace {
    catalog: Vec<Card>,
    policy: SupplyPolicy,
    tiers: Vec<Tier>,
    rng: StdRng,
}

impl Marketplace {
    pub fn flat(catalog: Vec<Card>) -> Self {
        Self {
            catalog,
            policy: SupplyPolicy::Flat,
            tiers: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    pub fn tiered(mut catalog: Vec<Card>, mut rng: StdRng) -> Self {
        let mut tiers: Vec<Tier> = TierKind::iter()
            .map(|kind| Tier::new(kind, &catalog))
            .collect();
        for tier in &mut tiers {
            tier.refill(&mut catalog, &mut rng);
        }
        Self {
            catalog,
            policy: SupplyPolicy::Tiered,
            tiers,
            rng,
        }
    }

    pub fn new(catalog: Vec<Card>, policy: SupplyPolicy, seed: u64) -> Self {
        match policy {
            SupplyPolicy::Flat => Self::flat(catalog),
            SupplyPolicy::Tiered => Self::tiered(catalog, StdRng::seed_from_u64(seed)),
        }
    }

    pub fn policy(&self) -> SupplyPolicy {
        self.policy
    }

    pub fn catalog(&self) -> &[Card] {
        &self.catalog
    }

    pub fn tier(&self, kind: TierKind) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.kind == kind)
    }

    /// Buys one copy of `name` from wherever it is currently offered.
    ///
    /// Nothing changes when the card is not offered.
    pub fn purchase(&mut self, name: &str) -> Result<(), GameError> {
        let unavailable = || GameError::CardUnavailable(name.to_string());
        let idx = self.index_of(name).ok_or_else(unavailable)?;

        match self.policy {
            SupplyPolicy::Flat => {
                let card = &mut self.catalog[idx];
                if card.supply == 0 {
                    return Err(unavailable());
                }
                card.supply -= 1;
            }
            SupplyPolicy::Tiered => {
                let tier = self
                    .tiers
                    .iter_mut()
                    .find(|tier| tier.offered_count(idx).is_some())
                    .ok_or_else(unavailable)?;
                tier.take(idx);
                tier.refill(&mut self.catalog, &mut self.rng);
            }
        }
        Ok(())
    }

    /// Snapshot of what can be bought right now: name, copies on offer, card.
    pub fn each_card(&self) -> Vec<(&str, u32, &Card)> {
        match self.policy {
            SupplyPolicy::Flat => self
                .catalog
                .iter()
                .filter(|card| card.supply > 0)
                .map(|card| (card.name.as_str(), card.supply, card))
                .collect(),
            SupplyPolicy::Tiered => self
                .tiers
                .iter()
                .flat_map(|tier| tier.offered.iter())
                .map(|(idx, count)| {
                    let card = &self.catalog[*idx];
                    (card.name.as_str(), *count, card)
                })
                .collect(),
        }
    }

    pub fn offered_count(&self, name: &str) -> u32 {
        self.each_card()
            .into_iter()
            .find(|(offered, _, _)| *offered == name)
            .map_or(0, |(_, count, _)| count)
    }

    /// Cards triggered by `roll`, in catalog order, whether or not they are on offer.
    pub fn find_by_roll(&self, roll: u8) -> Vec<&Card> {
        self.catalog
            .iter()
            .filter(|card| card.is_active_on(roll))
            .collect()
    }

    pub fn find_by_icon(&self, icon: Icon) -> Vec<&Card> {
        self.catalog.iter().filter(|card| card.icon == icon).collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.catalog.iter().find(|card| card.name == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.catalog.iter().position(|card| card.name == name)
    }
}
