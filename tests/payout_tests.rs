//! Exact totals for the counted and directed payouts.

mod common;

use common::{Scripted, coins, state};
use machikoro_rs::narrator::Silent;
use machikoro_rs::types::{GameVersion, Landmark};

#[test]
fn test_cheese_factory_pays_per_cow() {
    let mut state = state(GameVersion::Basic, 2);
    state.players[0].add_establishment("Cheese Factory");
    state.players[0].add_establishment("Ranch");
    state.players[0].add_establishment("Ranch");
    let bank_before = state.bank.total();

    state
        .resolve_roll(0, 7, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    assert_eq!(coins(&state), vec![9, 3]);
    assert_eq!(state.bank.total(), bank_before - 6);
}

#[test]
fn test_furniture_factory_pays_per_gear_per_copy() {
    let mut state = state(GameVersion::Basic, 2);
    state.players[0].add_establishment("Furniture Factory");
    state.players[0].add_establishment("Furniture Factory");
    state.players[0].add_establishment("Forest");
    state.players[0].add_establishment("Mine");

    state
        .resolve_roll(0, 8, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    assert_eq!(coins(&state), vec![15, 3]);
}

#[test]
fn test_fruit_and_vegetable_market_counts_wheat() {
    let mut state = state(GameVersion::Basic, 2);
    state.players[0].add_establishment("Fruit and Vegetable Market");
    state.players[0].add_establishment("Apple Orchard");
    // The other player's market stays quiet on someone else's roll.
    state.players[1].add_establishment("Fruit and Vegetable Market");

    state
        .resolve_roll(0, 11, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    assert_eq!(coins(&state), vec![7, 3]);
}

#[test]
fn test_food_warehouse_counts_cups() {
    let mut state = state(GameVersion::Harbor, 2);
    state.players[0].add_establishment("Food Warehouse");
    state.players[0].add_establishment("Cafe");
    state.players[0].add_establishment("Cafe");

    state
        .resolve_roll(0, 12, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    assert_eq!(coins(&state), vec![7, 3]);
}

#[test]
fn test_flower_shop_counts_flower_gardens() {
    let mut state = state(GameVersion::Harbor, 2);
    state.players[0].add_establishment("Flower Shop");
    state.players[0].add_establishment("Flower Garden");
    state.players[0].add_establishment("Flower Garden");

    let report = state
        .resolve_roll(0, 2, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    // Bakery adds 1, the shop 1 per garden.
    assert_eq!(report.card_order(), vec!["Bakery", "Flower Shop"]);
    assert_eq!(coins(&state), vec![6, 3]);
}

#[test]
fn test_loan_office_charges_only_the_roller() {
    let mut state = state(GameVersion::Millionaire, 2);
    state.players[0].add_establishment("Loan Office");
    state.players[1].add_establishment("Loan Office");
    let bank_before = state.bank.total();

    state
        .resolve_roll(0, 5, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    assert_eq!(coins(&state), vec![1, 3]);
    assert_eq!(state.bank.total(), bank_before + 2);
}

#[test]
fn test_shopping_mall_raises_cafe_charge() {
    let mut state = state(GameVersion::Basic, 2);
    state.players[1].add_establishment("Cafe");
    state.players[1].set_landmark(Landmark::ShoppingMall, true);

    state
        .resolve_roll(0, 3, 4, &Scripted::default(), &mut Silent)
        .expect("valid roller");

    // Roller: 3 + 1 from Bakery, then 2 to the cafe owner.
    assert_eq!(coins(&state), vec![2, 5]);
}
