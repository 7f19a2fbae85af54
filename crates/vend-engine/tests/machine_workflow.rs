//! End-to-end sale, bundle and maintenance scenarios against a default machine.

use vend_core::{Denomination, Item, Money, RestockError, SaleError, SaleKind, Tender};
use vend_engine::{BundleCatalog, BundleEngine, BundleOrder, CashRegister, InventoryEngine};

fn pesos(p: i64) -> Money {
    Money::from_pesos(p)
}

fn quantity(machine: &InventoryEngine, slot: usize) -> u32 {
    machine.slot(slot).map(|s| s.quantity()).unwrap_or_default()
}

#[test]
fn red_bean_exact_payment() {
    let mut machine = InventoryEngine::new();
    assert_eq!(
        machine.slot(0).and_then(|s| s.item()).map(Item::name),
        Some("Red Bean")
    );

    let receipt = machine.sell(0, 2, pesos(10), pesos(10)).unwrap();

    assert_eq!(quantity(&machine, 0), 8);
    assert!(receipt.change.is_empty());
    let entries = machine.ledger().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].item.name(), "Red Bean");
    assert_eq!(entries[0].quantity, 2);
}

#[test]
fn change_of_two_with_a_single_one_peso_coin() {
    let mut machine = InventoryEngine::new();
    machine.replenish(1, 1);
    let reserve_before: Vec<_> = machine.register().reserve().collect();

    let err = machine.sell(0, 2, pesos(12), pesos(10)).unwrap_err();

    assert_eq!(err, SaleError::ChangeUnavailable { change: pesos(2) });
    assert_eq!(quantity(&machine, 0), 10);
    assert!(machine.ledger().entries().is_empty());
    assert_eq!(machine.register().reserve().collect::<Vec<_>>(), reserve_before);
}

#[test]
fn lone_jackfruit_cannot_be_sold() {
    let mut machine = InventoryEngine::new();
    let catalog = BundleCatalog::standard();
    let jackfruit = machine.find_slot_by_name("Jackfruit").unwrap();

    let err = BundleEngine::new(&mut machine, &catalog)
        .checkout_custom(&[jackfruit, jackfruit], pesos(20))
        .unwrap_err();

    assert!(matches!(err, SaleError::CannotSellIndividually { .. }));
    assert_eq!(quantity(&machine, jackfruit), 10);
}

#[test]
fn jackfruit_with_banana_is_allowed() {
    let mut machine = InventoryEngine::new();
    let catalog = BundleCatalog::standard();
    let jackfruit = machine.find_slot_by_name("Jackfruit").unwrap();
    let banana = machine.find_slot_by_name("Banana").unwrap();

    let receipt = BundleEngine::new(&mut machine, &catalog)
        .checkout_custom(&[jackfruit, banana], pesos(22))
        .unwrap();

    assert_eq!(receipt.kind, SaleKind::Custom);
    assert_eq!(receipt.total_price, pesos(22));
    assert_eq!(receipt.total_calories, 60.0);
    assert_eq!(quantity(&machine, jackfruit), 9);
    assert_eq!(quantity(&machine, banana), 9);
}

#[test]
fn collect_twice() {
    let mut machine = InventoryEngine::new();
    machine.sell(8, 1, pesos(30), pesos(30)).unwrap();
    machine.sell(2, 1, pesos(8), pesos(8)).unwrap();

    assert_eq!(machine.collect(), pesos(38));
    assert_eq!(machine.collect(), Money::zero());
}

#[test]
fn greedy_feasibility_examples() {
    let mut fives = CashRegister::new();
    fives.replenish(5, 3);
    assert!(fives.is_change_feasible(pesos(15), Money::zero()));

    let mut one_ten = CashRegister::new();
    one_ten.replenish(10, 1);
    assert!(!one_ten.is_change_feasible(pesos(15), Money::zero()));
}

#[test]
fn bundle_books_total_per_component_and_pays_change_once() {
    let mut machine = InventoryEngine::new();
    let catalog = BundleCatalog::standard();

    machine.replenish(5, 1);

    let receipt = BundleEngine::new(&mut machine, &catalog)
        .checkout_named("Jackfruit Delight", pesos(80))
        .unwrap();

    assert_eq!(receipt.total_price, pesos(75));
    assert_eq!(receipt.change.total(), pesos(5));
    assert!(machine.register().balance().is_zero());
    assert_eq!(receipt.lines.len(), 5);
    assert_eq!(machine.ledger().entries().len(), 5);
    // Each of the five components books the full PHP 75
    assert_eq!(machine.ledger().total_sales(), pesos(375));
    assert_eq!(
        machine.transaction_summary().quantity_sold("Jackfruit"),
        2
    );
    assert_eq!(
        receipt.preparation.first().map(String::as_str),
        Some("Shaving the refreshing Ice to perfection...")
    );
    assert_eq!(
        receipt.preparation.last().map(String::as_str),
        Some("Meal Done! Enjoy your customized creation!")
    );
}

#[test]
fn buyer_session_with_inserted_cash() {
    let mut machine = InventoryEngine::new();
    machine.replenish(1, 10);
    machine.replenish(5, 4);

    // Leche Flan (PHP 8) with a PHP 10 coin: PHP 2 back in ones
    let receipt = machine
        .purchase(2, 1, &Tender::new().with(Denomination::TEN, 1))
        .unwrap();
    assert_eq!(receipt.change.count(Denomination::ONE), 2);

    // Special turon (PHP 25) with PHP 50; no 20s, so one 10 and three 5s
    let catalog = BundleCatalog::standard();
    let receipt = BundleEngine::new(&mut machine, &catalog)
        .checkout_with_tender(
            &BundleOrder::Named("special turon".into()),
            &Tender::new().with(Denomination::FIFTY, 1),
        )
        .unwrap();
    assert_eq!(receipt.change.total(), pesos(25));
    assert_eq!(receipt.change.count(Denomination::TEN), 1);
    assert_eq!(receipt.change.count(Denomination::FIVE), 3);

    assert_eq!(machine.register().balance(), machine.register().reserve_total());
    // Leche Flan once, special turon once per component
    assert_eq!(machine.collect(), pesos(8 + 3 * 25));
}

#[test]
fn emptied_slot_takes_a_new_item() {
    let mut machine = InventoryEngine::new();
    machine.sell(7, 10, pesos(50), pesos(50)).unwrap();
    assert_eq!(quantity(&machine, 7), 0);

    let sago = Item::new("Sago", pesos(7), 35.0);
    machine.restock(7, sago.clone(), 6).unwrap();
    assert_eq!(machine.find_slot_by_name("sago"), Some(7));
    assert_eq!(machine.quote(7, 2).unwrap(), pesos(14));

    let milk = Item::new("Milk", pesos(30), 40.0);
    assert!(matches!(
        machine.restock(7, milk, 1),
        Err(RestockError::ItemMismatch { .. })
    ));
    assert_eq!(
        machine.restock(7, sago, 5),
        Err(RestockError::ExceedsCapacity {
            slot: 7,
            current: 6,
            requested: 5,
            capacity: 10
        })
    );
}

#[test]
fn receipts_serialize_for_presentation_layers() {
    let mut machine = InventoryEngine::new();
    let receipt = machine.sell(3, 1, pesos(12), pesos(12)).unwrap();

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["kind"]["type"], "single");
    assert_eq!(json["lines"][0]["item_name"], "Banana");

    let summary = serde_json::to_string(&machine.transaction_summary()).unwrap();
    assert!(summary.contains("Banana"));
}
