use serde::{Deserialize, Serialize};

use crate::game::coins::CoinSet;
use crate::types::BreakingPolicy;

/// Coins the bank holds when a game starts.
pub const BANK_SEED: CoinSet = CoinSet::new(42, 24, 12);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    coins: CoinSet,
    policy: BreakingPolicy,
}

impl Bank {
    pub fn standard(policy: BreakingPolicy) -> Self {
        Self::with_coins(BANK_SEED, policy)
    }

    pub fn with_coins(coins: CoinSet, policy: BreakingPolicy) -> Self {
        Self { coins, policy }
    }

    pub fn coins(&self) -> &CoinSet {
        &self.coins
    }

    pub fn total(&self) -> u32 {
        self.coins.total()
    }

    pub fn policy(&self) -> BreakingPolicy {
        self.policy
    }

    /// Bank pays `amount` into `to`. The bank never breaks its own coins.
    pub fn pay(&mut self, amount: u32, to: &mut CoinSet) -> u32 {
        self.coins.transfer(amount, to)
    }

    /// `from` pays `amount` into the bank, breaking coins first when the
    /// policy allows it.
    pub fn collect(&mut self, from: &mut CoinSet, amount: u32) -> u32 {
        let mut remaining = from.transfer(amount, &mut self.coins);
        while self.can_break(from, remaining) {
            if !from.break_coin(remaining, &mut self.coins) {
                break;
            }
            remaining = from.transfer(remaining, &mut self.coins);
        }
        remaining
    }

    /// `from` pays `amount` into `to`, with the bank making change when the
    /// policy allows it.
    pub fn transfer(&mut self, from: &mut CoinSet, amount: u32, to: &mut CoinSet) -> u32 {
        let mut remaining = from.transfer(amount, to);
        while self.can_break(from, remaining) {
            if !from.break_coin(remaining, &mut self.coins) {
                break;
            }
            remaining = from.transfer(remaining, to);
        }
        remaining
    }

    /// Moves `amount` from `from` to `to`, breaking `from`'s coins against
    /// the bank whatever the policy. For coins the bank itself is holding.
    pub fn settle(&mut self, from: &mut CoinSet, amount: u32, to: &mut CoinSet) -> u32 {
        let mut remaining = from.transfer(amount, to);
        while remaining > 0
            && from.total() >= remaining
            && from.break_coin(remaining, &mut self.coins)
        {
            remaining = from.transfer(remaining, to);
        }
        remaining
    }

    fn can_break(&self, from: &CoinSet, remaining: u32) -> bool {
        self.policy == BreakingPolicy::AutoBreak && remaining > 0 && from.total() >= remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bank_holds_seed_coins() {
        let bank = Bank::standard(BreakingPolicy::None);
        assert_eq!(bank.total(), 282);
    }

    #[test]
    fn no_break_policy_leaves_debt() {
        let mut bank = Bank::with_coins(CoinSet::new(20, 10, 0), BreakingPolicy::None);
        let mut player = CoinSet::new(0, 0, 1);

        let remainder = bank.collect(&mut player, 3);

        assert_eq!(remainder, 3);
        assert_eq!(player.total(), 10);
    }

    #[test]
    fn auto_break_pays_with_change() {
        let mut bank = Bank::with_coins(CoinSet::new(20, 10, 0), BreakingPolicy::AutoBreak);
        let mut player = CoinSet::new(0, 0, 1);

        let remainder = bank.collect(&mut player, 3);

        assert_eq!(remainder, 0);
        assert_eq!(player.total(), 7);
        assert_eq!(bank.total(), 73);
    }

    #[test]
    fn auto_break_between_players_conserves_value() {
        let mut bank = Bank::with_coins(CoinSet::new(20, 10, 0), BreakingPolicy::AutoBreak);
        let mut payer = CoinSet::new(0, 0, 2);
        let mut payee = CoinSet::empty();

        let remainder = bank.transfer(&mut payer, 13, &mut payee);

        assert_eq!(remainder, 0);
        assert_eq!(payee.total(), 13);
        assert_eq!(payer.total(), 7);
        assert_eq!(bank.total(), 70);
    }

    #[test]
    fn settle_makes_change_without_auto_break() {
        let mut bank = Bank::with_coins(CoinSet::new(20, 10, 0), BreakingPolicy::None);
        let mut pool = CoinSet::new(0, 0, 2);
        let mut payee = CoinSet::empty();

        let remainder = bank.settle(&mut pool, 13, &mut payee);

        assert_eq!(remainder, 0);
        assert_eq!(payee.total(), 13);
        assert_eq!(pool.total(), 7);
        assert_eq!(bank.total(), 70);
    }

    #[test]
    fn auto_break_gives_up_when_bank_has_no_change() {
        let mut bank = Bank::with_coins(CoinSet::empty(), BreakingPolicy::AutoBreak);
        let mut payer = CoinSet::new(0, 0, 1);
        let mut payee = CoinSet::empty();

        let remainder = bank.transfer(&mut payer, 4, &mut payee);

        assert_eq!(remainder, 4);
        assert_eq!(payer.total(), 10);
    }
}
