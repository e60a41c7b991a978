//! Card and landmark definitions for each game version.

use once_cell::sync::Lazy;

use crate::game::card::{Card, LandmarkCard};
use crate::game::custom::CustomEffect;
use crate::game::effect::{
    BankDirection, Effect, PayoutScope, PeerDirection, Prerequisite, Subject,
};
use crate::game::market::SupplyPolicy;
use crate::types::{GameVersion, Icon, Landmark};

/// Establishments every player starts with.
pub const STARTING_ESTABLISHMENTS: [&str; 2] = ["Wheat Field", "Bakery"];

/// Coins each player takes from the bank at setup.
pub const STARTING_COINS: u32 = 3;

pub static LANDMARKS: Lazy<Vec<LandmarkCard>> = Lazy::new(|| {
    vec![
        LandmarkCard {
            landmark: Landmark::CityHall,
            cost: 0,
            description: "If you have no coins before your building phase, you may take 1 coin from the bank",
        },
        LandmarkCard {
            landmark: Landmark::Harbor,
            cost: 2,
            description: "If you roll 10 or higher, you may add 2 to your roll",
        },
        LandmarkCard {
            landmark: Landmark::TrainStation,
            cost: 4,
            description: "You may roll 1 or 2 dice",
        },
        LandmarkCard {
            landmark: Landmark::ShoppingMall,
            cost: 10,
            description: "Each of your [Cup] and [Bread] establishments earn +1 coin",
        },
        LandmarkCard {
            landmark: Landmark::AmusementPark,
            cost: 16,
            description: "If you roll doubles take another turn after this one",
        },
        LandmarkCard {
            landmark: Landmark::RadioTower,
            cost: 22,
            description: "Once every turn you can choose to re-roll your dice",
        },
        LandmarkCard {
            landmark: Landmark::Airport,
            cost: 30,
            description: "If you do not build on your turn, you may take 10 coins from the bank",
        },
    ]
});

pub fn landmark_card(landmark: Landmark) -> LandmarkCard {
    LANDMARKS
        .iter()
        .copied()
        .find(|card| card.landmark == landmark)
        .unwrap_or(LandmarkCard {
            landmark,
            cost: 0,
            description: "",
        })
}

pub fn landmarks_for(version: GameVersion) -> Vec<Landmark> {
    use Landmark::*;
    match version {
        GameVersion::Basic => vec![TrainStation, ShoppingMall, AmusementPark, RadioTower],
        GameVersion::Harbor => vec![
            CityHall,
            Harbor,
            TrainStation,
            ShoppingMall,
            AmusementPark,
            RadioTower,
            Airport,
        ],
        GameVersion::Millionaire => {
            vec![CityHall, TrainStation, ShoppingMall, AmusementPark, RadioTower]
        }
    }
}

pub fn supply_policy(version: GameVersion) -> SupplyPolicy {
    match version {
        GameVersion::Basic => SupplyPolicy::Flat,
        GameVersion::Harbor | GameVersion::Millionaire => SupplyPolicy::Tiered,
    }
}

pub fn cards_for(version: GameVersion) -> Vec<Card> {
    let mut cards = basic_cards();
    match version {
        GameVersion::Basic => {}
        GameVersion::Harbor => cards.extend(harbor_cards()),
        GameVersion::Millionaire => cards.extend(millionaire_cards()),
    }
    cards
}

fn everyone(amount: u32) -> Effect {
    Effect::bank_payout(amount, PayoutScope::AllOwners, BankDirection::FromBank)
}

fn roller(amount: u32) -> Effect {
    Effect::bank_payout(amount, PayoutScope::RollerOnly, BankDirection::FromBank)
}

fn from_roller(amount: u32) -> Effect {
    Effect::peer_payout(amount, PeerDirection::RollerPaysOwner)
}

fn custom(effect: CustomEffect) -> Effect {
    Effect::custom(effect)
}

pub fn basic_cards() -> Vec<Card> {
    vec![
        Card::new("Wheat Field", 1, &[1], Icon::Wheat, everyone(1), 6),
        Card::new("Ranch", 1, &[2], Icon::Cow, everyone(1), 6),
        Card::new("Bakery", 1, &[2, 3], Icon::Bread, roller(1), 6),
        Card::new("Cafe", 2, &[3], Icon::Cup, from_roller(1), 6),
        Card::new("Convenience Store", 2, &[4], Icon::Bread, roller(3), 6),
        Card::new("Forest", 3, &[5], Icon::Gear, everyone(1), 6),
        Card::new("Stadium", 6, &[6], Icon::Major, custom(CustomEffect::Stadium), 4),
        Card::new("TV Station", 7, &[6], Icon::Major, custom(CustomEffect::TvStation), 4),
        Card::new(
            "Business Center",
            8,
            &[6],
            Icon::Major,
            custom(CustomEffect::BusinessCenter),
            4,
        ),
        Card::new(
            "Cheese Factory",
            5,
            &[7],
            Icon::Factory,
            Effect::icon_count_payout(3, Icon::Cow),
            6,
        ),
        Card::new(
            "Furniture Factory",
            3,
            &[8],
            Icon::Factory,
            Effect::icon_count_payout(3, Icon::Gear),
            6,
        ),
        Card::new("Mine", 6, &[9], Icon::Gear, everyone(5), 6),
        Card::new("Family Restaurant", 3, &[9, 10], Icon::Cup, from_roller(2), 6),
        Card::new("Apple Orchard", 3, &[10], Icon::Wheat, everyone(3), 6),
        Card::new(
            "Fruit and Vegetable Market",
            2,
            &[11, 12],
            Icon::Fruit,
            Effect::icon_count_payout(2, Icon::Wheat),
            6,
        ),
    ]
}

pub fn harbor_cards() -> Vec<Card> {
    let with_harbor = Prerequisite::HasLandmark {
        landmark: Landmark::Harbor,
        subject: Subject::Owner,
    };
    vec![
        Card::new("Pizza Joint", 1, &[7], Icon::Cup, from_roller(1), 6),
        Card::new("Tax Office", 4, &[8, 9], Icon::Major, custom(CustomEffect::TaxOffice), 4),
        Card::new("Hamburger Stand", 1, &[8], Icon::Cup, from_roller(1), 6),
        Card::new(
            "Sushi Bar",
            1,
            &[1],
            Icon::Cup,
            from_roller(1).with_prerequisite(with_harbor),
            6,
        ),
        Card::new("Flower Garden", 2, &[4], Icon::Wheat, everyone(1), 6),
        Card::new(
            "Flower Shop",
            1,
            &[2],
            Icon::Bread,
            Effect::named_card_count_payout(1, "Flower Garden"),
            6,
        ),
        Card::new(
            "Food Warehouse",
            2,
            &[12, 13],
            Icon::Factory,
            Effect::icon_count_payout(2, Icon::Cup),
            6,
        ),
        Card::new("Mackerel Boat", 2, &[8], Icon::Boat, everyone(2), 6),
        Card::new("Publisher", 5, &[7], Icon::Major, custom(CustomEffect::Publisher), 4),
        Card::new(
            "Tuna Boat",
            5,
            &[12, 13, 14],
            Icon::Boat,
            custom(CustomEffect::TunaBoat).with_prerequisite(with_harbor),
            6,
        ),
    ]
}

pub fn millionaire_cards() -> Vec<Card> {
    let few_landmarks = Prerequisite::fewer_landmarks_than(2, Subject::Owner);
    vec![
        Card::new(
            "General Store",
            0,
            &[2],
            Icon::Bread,
            roller(2).with_prerequisite(few_landmarks),
            6,
        ),
        Card::new(
            "Corn Field",
            2,
            &[3, 4],
            Icon::Wheat,
            everyone(1).with_prerequisite(few_landmarks),
            6,
        ),
        Card::new(
            "Demolition Company",
            2,
            &[4],
            Icon::Suitcase,
            custom(CustomEffect::DemolitionCompany)
                .with_prerequisite(Prerequisite::at_least_landmarks(1, Subject::Owner)),
            6,
        ),
        Card::new(
            "Loan Office",
            -5,
            &[5, 6],
            Icon::Suitcase,
            Effect::bank_payout(2, PayoutScope::RollerOnly, BankDirection::ToBank),
            6,
        ),
        Card::new(
            "French Restaurant",
            3,
            &[5],
            Icon::Cup,
            from_roller(5).with_prerequisite(Prerequisite::at_least_landmarks(2, Subject::Roller)),
            6,
        ),
        Card::new("Vineyard", 3, &[7], Icon::Wheat, everyone(3), 6),
        Card::new(
            "Renovation Company",
            4,
            &[8],
            Icon::Major,
            custom(CustomEffect::RenovationCompany),
            4,
        ),
        Card::new(
            "Moving Company",
            2,
            &[9, 10],
            Icon::Suitcase,
            custom(CustomEffect::MovingCompany),
            6,
        ),
        Card::new("Winery", 3, &[9], Icon::Factory, custom(CustomEffect::Winery), 6),
        Card::new("Tech Startup", 1, &[10], Icon::Major, custom(CustomEffect::TechStartup), 4),
        Card::new(
            "Soda Bottling Plant",
            5,
            &[11],
            Icon::Factory,
            custom(CustomEffect::SodaBottlingPlant),
            6,
        ),
        Card::new("Park", 3, &[11, 12, 13], Icon::Major, custom(CustomEffect::Park), 4),
        Card::new(
            "Member's Only Club",
            4,
            &[12, 13, 14],
            Icon::Cup,
            custom(CustomEffect::MembersOnlyClub)
                .with_prerequisite(Prerequisite::at_least_landmarks(3, Subject::Roller)),
            6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::effect::Priority;

    #[test]
    fn expansions_extend_basic_catalog() {
        assert_eq!(cards_for(GameVersion::Basic).len(), 15);
        assert_eq!(cards_for(GameVersion::Harbor).len(), 25);
        assert_eq!(cards_for(GameVersion::Millionaire).len(), 28);
    }

    #[test]
    fn card_names_are_unique() {
        for version in [GameVersion::Basic, GameVersion::Harbor, GameVersion::Millionaire] {
            let cards = cards_for(version);
            let mut names: Vec<_> = cards.iter().map(|card| card.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), cards.len(), "{version}");
        }
    }

    #[test]
    fn gated_cards_resolve_with_conditional_bucket() {
        let cards = cards_for(GameVersion::Millionaire);
        let general_store = cards
            .iter()
            .find(|card| card.name == "General Store")
            .expect("general store");
        assert_eq!(general_store.effect.priority, Priority::Conditional);
        assert!(general_store.description().starts_with("If you have less than 2"));
    }

    #[test]
    fn every_starting_establishment_exists() {
        let cards = basic_cards();
        for name in STARTING_ESTABLISHMENTS {
            assert!(cards.iter().any(|card| card.name == name));
        }
    }
}
