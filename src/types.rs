use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Seat index of a player, counted from 0 in clockwise seating order.
pub type PlayerId = usize;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
pub enum Icon {
    Wheat,
    Cow,
    Bread,
    Cup,
    Gear,
    Factory,
    Fruit,
    Boat,
    Suitcase,
    Major,
}

impl Icon {
    /// Icons whose income the Shopping Mall raises by one coin per card.
    pub fn boosted_by_shopping_mall(self) -> bool {
        matches!(self, Icon::Cup | Icon::Bread)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
pub enum Landmark {
    #[strum(serialize = "City Hall")]
    CityHall,
    Harbor,
    #[strum(serialize = "Train Station")]
    TrainStation,
    #[strum(serialize = "Shopping Mall")]
    ShoppingMall,
    #[strum(serialize = "Amusement Park")]
    AmusementPark,
    #[strum(serialize = "Radio Tower")]
    RadioTower,
    Airport,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum GameVersion {
    Basic,
    Harbor,
    Millionaire,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BreakingPolicy {
    /// Coins are never exchanged; a payer without exact change leaves a debt.
    #[default]
    None,
    /// A payer whose total covers the debt swaps larger coins for change at the bank.
    AutoBreak,
}
