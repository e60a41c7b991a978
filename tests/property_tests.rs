//! Randomised checks for coin conservation and market stability.

use machikoro_rs::game::catalog::cards_for;
use machikoro_rs::game::market::{Marketplace, SupplyPolicy, TierKind};
use machikoro_rs::game::{Bank, CoinSet};
use machikoro_rs::types::{BreakingPolicy, GameVersion};
use proptest::prelude::*;

fn coin_set() -> impl Strategy<Value = CoinSet> {
    (0..20u32, 0..10u32, 0..6u32).prop_map(|(ones, fives, tens)| CoinSet::new(ones, fives, tens))
}

fn remaining_copies(market: &Marketplace) -> u32 {
    let offered: u32 = market.each_card().iter().map(|(_, count, _)| *count).sum();
    let stocked: usize = [TierKind::Low, TierKind::High, TierKind::Major]
        .into_iter()
        .filter_map(|kind| market.tier(kind))
        .map(|tier| tier.stock_len())
        .sum();
    offered + stocked as u32
}

proptest! {
    #[test]
    fn prop_transfer_conserves_coins(
        mut from in coin_set(),
        mut to in coin_set(),
        amount in 0..150u32
    ) {
        let before = from.total() + to.total();
        let available = from.total();

        let remainder = from.transfer(amount, &mut to);

        prop_assert_eq!(from.total() + to.total(), before);
        prop_assert!(remainder <= amount);
        prop_assert_eq!(available - from.total(), amount - remainder);
    }

    #[test]
    fn prop_auto_break_conserves_coins(
        mut payer in coin_set(),
        mut payee in coin_set(),
        reserve in coin_set(),
        amount in 0..100u32
    ) {
        let mut bank = Bank::with_coins(reserve, BreakingPolicy::AutoBreak);
        let before = payer.total() + payee.total() + bank.total();

        let remainder = bank.transfer(&mut payer, amount, &mut payee);

        prop_assert_eq!(payer.total() + payee.total() + bank.total(), before);
        prop_assert!(remainder <= amount);
    }

    #[test]
    fn prop_collect_pays_what_it_reports(
        mut payer in coin_set(),
        reserve in coin_set(),
        amount in 0..100u32,
        auto_break in any::<bool>()
    ) {
        let policy = if auto_break { BreakingPolicy::AutoBreak } else { BreakingPolicy::None };
        let mut bank = Bank::with_coins(reserve, policy);
        let before = payer.total();

        let remainder = bank.collect(&mut payer, amount);

        prop_assert!(payer.total() <= before);
        prop_assert_eq!(before - payer.total(), amount - remainder);
    }

    #[test]
    fn prop_tiered_market_stays_within_slots(
        seed in any::<u64>(),
        picks in proptest::collection::vec(0..12usize, 1..60)
    ) {
        let mut market = Marketplace::new(cards_for(GameVersion::Harbor), SupplyPolicy::Tiered, seed);

        for pick in picks {
            let offered = market.each_card();
            if offered.is_empty() {
                break;
            }
            let name = offered[pick % offered.len()].0.to_string();
            let before = remaining_copies(&market);

            market.purchase(&name).expect("offered card can be bought");

            prop_assert_eq!(remaining_copies(&market), before - 1);
            for kind in [TierKind::Low, TierKind::High, TierKind::Major] {
                let tier = market.tier(kind).expect("tier exists");
                prop_assert!(tier.offered_len() <= kind.slots());
                if tier.offered_len() < kind.slots() {
                    prop_assert_eq!(tier.stock_len(), 0);
                }
            }
        }
    }
}
