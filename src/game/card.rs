use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::game::effect::Effect;
use crate::types::{Icon, Landmark};

/// A purchasable establishment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    /// Negative costs are paid out by the bank to the buyer.
    pub cost: i32,
    pub active_numbers: SmallVec<[u8; 3]>,
    pub icon: Icon,
    pub effect: Effect,
    /// Copies left in the game box.
    pub supply: u32,
}

impl Card {
    pub fn new(
        name: &str,
        cost: i32,
        active_numbers: &[u8],
        icon: Icon,
        effect: Effect,
        supply: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            cost,
            active_numbers: SmallVec::from_slice(active_numbers),
            icon,
            effect,
            supply,
        }
    }

    pub fn is_active_on(&self, roll: u8) -> bool {
        self.active_numbers.contains(&roll)
    }

    pub fn is_major(&self) -> bool {
        self.icon == Icon::Major
    }

    pub fn description(&self) -> String {
        self.effect.description()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandmarkCard {
    pub landmark: Landmark,
    pub cost: u32,
    pub description: &'static str,
}
