use std::fmt;

use serde::{Deserialize, Serialize};

/// A purse of physical coins in the three denominations of the game.
///
/// Counts are unsigned, so a purse can never hold a negative number of
/// coins. Value only moves between purses through [`CoinSet::transfer`] and
/// [`CoinSet::break_coin`], both of which conserve the combined total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinSet {
    ones: u32,
    fives: u32,
    tens: u32,
}

impl CoinSet {
    pub const fn new(ones: u32, fives: u32, tens: u32) -> Self {
        Self { ones, fives, tens }
    }

    pub const fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn total(&self) -> u32 {
        self.ones + self.fives * 5 + self.tens * 10
    }

    pub fn ones(&self) -> u32 {
        self.ones
    }

    pub fn fives(&self) -> u32 {
        self.fives
    }

    pub fn tens(&self) -> u32 {
        self.tens
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Moves up to `amount` into `target`, largest coins first, and returns
    /// what could not be paid.
    ///
    /// Only coins that fit inside the outstanding amount are handed over, so
    /// a purse holding a single ten cannot pay 3: nothing moves and 3 is
    /// returned.
    pub fn transfer(&mut self, amount: u32, target: &mut CoinSet) -> u32 {
        let mut remaining = amount;

        let tens = (remaining / 10).min(self.tens);
        self.tens -= tens;
        target.tens += tens;
        remaining -= tens * 10;

        let fives = (remaining / 5).min(self.fives);
        self.fives -= fives;
        target.fives += fives;
        remaining -= fives * 5;

        let ones = remaining.min(self.ones);
        self.ones -= ones;
        target.ones += ones;
        remaining -= ones;

        remaining
    }

    /// Moves every coin into `target`.
    pub fn transfer_all(&mut self, target: &mut CoinSet) -> u32 {
        let total = self.total();
        self.transfer(total, target);
        total
    }

    /// Swaps the smallest coin worth more than `owed` for the same value in
    /// smaller coins taken from `change`.
    ///
    /// Returns `false` when there is no larger coin or `change` cannot cover
    /// the exchange; nothing moves in that case.
    pub fn break_coin(&mut self, owed: u32, change: &mut CoinSet) -> bool {
        if owed < 5 && self.fives > 0 && change.ones >= 5 {
            self.fives -= 1;
            change.fives += 1;
            change.ones -= 5;
            self.ones += 5;
            return true;
        }
        if self.tens == 0 {
            return false;
        }
        if change.fives >= 2 {
            self.tens -= 1;
            change.tens += 1;
            change.fives -= 2;
            self.fives += 2;
            return true;
        }
        if change.ones >= 10 {
            self.tens -= 1;
            change.tens += 1;
            change.ones -= 10;
            self.ones += 10;
            return true;
        }
        false
    }
}

impl fmt::Display for CoinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} coins ({}x1, {}x5, {}x10)",
            self.total(),
            self.ones,
            self.fives,
            self.tens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_change_uses_five_and_one() {
        let mut payer = CoinSet::new(2, 1, 0);
        let mut target = CoinSet::empty();

        let remainder = payer.transfer(6, &mut target);

        assert_eq!(remainder, 0);
        assert_eq!(target, CoinSet::new(1, 1, 0));
        assert_eq!(payer, CoinSet::new(1, 0, 0));
    }

    #[test]
    fn ten_is_never_split() {
        let mut payer = CoinSet::new(0, 0, 1);
        let mut target = CoinSet::empty();

        let remainder = payer.transfer(3, &mut target);

        assert_eq!(remainder, 3);
        assert_eq!(payer, CoinSet::new(0, 0, 1));
        assert!(target.is_empty());
    }

    #[test]
    fn partial_payment_leaves_remainder() {
        let mut payer = CoinSet::new(1, 1, 0);
        let mut target = CoinSet::empty();

        let remainder = payer.transfer(9, &mut target);

        assert_eq!(remainder, 3);
        assert_eq!(target.total(), 6);
        assert!(payer.is_empty());
    }

    #[test]
    fn breaking_prefers_smallest_larger_coin() {
        let mut payer = CoinSet::new(0, 1, 1);
        let mut bank = CoinSet::new(10, 4, 0);

        assert!(payer.break_coin(2, &mut bank));

        assert_eq!(payer, CoinSet::new(5, 0, 1));
        assert_eq!(bank, CoinSet::new(5, 5, 0));
        assert_eq!(payer.total() + bank.total(), 45);
    }

    #[test]
    fn breaking_fails_without_change() {
        let mut payer = CoinSet::new(0, 0, 1);
        let mut bank = CoinSet::new(3, 1, 0);

        assert!(!payer.break_coin(3, &mut bank));
        assert_eq!(payer, CoinSet::new(0, 0, 1));
        assert_eq!(bank, CoinSet::new(3, 1, 0));
    }
}
