//! Property tests for the machine's standing invariants.

use proptest::prelude::*;
use vend_core::{Denomination, Item, Money, SaleError, SlotView, SLOT_COUNT};
use vend_engine::{BundleCatalog, BundleEngine, BundleOrder, CashRegister, InventoryEngine};

#[derive(Debug, Clone)]
enum Op {
    Sell { slot: usize, quantity: u32, paid: i64 },
    Restock { slot: usize, quantity: u32 },
    Replenish { denomination: u32, quantity: u32 },
    Custom { slots: Vec<usize>, paid: i64 },
    Named { index: usize, paid: i64 },
    Collect,
}

fn denomination_value() -> impl Strategy<Value = u32> {
    // Includes values the register does not accept
    prop_oneof![
        4 => prop::sample::select(vec![1u32, 5, 10, 20, 50, 100, 200, 500]),
        1 => prop::sample::select(vec![0u32, 2, 3, 25, 1000]),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..SLOT_COUNT + 1, 0u32..13, 0i64..400)
            .prop_map(|(slot, quantity, paid)| Op::Sell { slot, quantity, paid }),
        2 => (0..SLOT_COUNT + 1, 0u32..13)
            .prop_map(|(slot, quantity)| Op::Restock { slot, quantity }),
        2 => (denomination_value(), 0u32..6)
            .prop_map(|(denomination, quantity)| Op::Replenish { denomination, quantity }),
        2 => (prop::collection::vec(0..SLOT_COUNT, 0..5), 0i64..200)
            .prop_map(|(slots, paid)| Op::Custom { slots, paid }),
        1 => (0usize..8, 0i64..300)
            .prop_map(|(index, paid)| Op::Named { index, paid }),
        1 => Just(Op::Collect),
    ]
}

/// Everything a rejected sale must leave untouched.
#[derive(Debug, PartialEq)]
struct Snapshot {
    slots: Vec<SlotView>,
    entries: usize,
    total_sales: Money,
    reserve: Vec<(Denomination, u32)>,
}

fn snapshot(machine: &InventoryEngine) -> Snapshot {
    Snapshot {
        slots: machine.list_slots(),
        entries: machine.ledger().entries().len(),
        total_sales: machine.ledger().total_sales(),
        reserve: machine.register().reserve().collect(),
    }
}

/// Applies `op`, returning the sale result if it was a sale.
fn apply(machine: &mut InventoryEngine, catalog: &BundleCatalog, op: &Op) -> Option<Result<(), SaleError>> {
    match op {
        Op::Sell { slot, quantity, paid } => {
            let due = machine
                .slot(*slot)
                .and_then(|s| s.item())
                .map(|i| i.price_for(*quantity))
                .unwrap_or_default();
            Some(
                machine
                    .sell(*slot, *quantity, Money::from_pesos(*paid), due)
                    .map(|_| ()),
            )
        }
        Op::Restock { slot, quantity } => {
            let item = machine
                .slot(*slot)
                .and_then(|s| s.item())
                .cloned()
                .unwrap_or_else(|| Item::new("Sago", Money::from_pesos(7), 35.0));
            let _ = machine.restock(*slot, item, *quantity);
            None
        }
        Op::Replenish {
            denomination,
            quantity,
        } => {
            machine.replenish(*denomination, *quantity);
            None
        }
        Op::Custom { slots, paid } => Some(
            BundleEngine::new(machine, catalog)
                .checkout_custom(slots, Money::from_pesos(*paid))
                .map(|_| ()),
        ),
        Op::Named { index, paid } => {
            // Index 7 is not in the catalog
            let name = catalog
                .bundles()
                .get(*index)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| "sinigang".to_string());
            Some(
                BundleEngine::new(machine, catalog)
                    .checkout(&BundleOrder::Named(name), Money::from_pesos(*paid))
                    .map(|_| ()),
            )
        }
        Op::Collect => {
            machine.collect();
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: every slot stays within 0..=capacity.
    #[test]
    fn slot_quantity_stays_within_capacity(ops in prop::collection::vec(op(), 0..60)) {
        let mut machine = InventoryEngine::new();
        let catalog = BundleCatalog::standard();

        for op in &ops {
            apply(&mut machine, &catalog, op);
            for view in machine.list_slots() {
                prop_assert!(view.quantity <= view.capacity, "slot {} overfilled", view.index);
            }
        }
    }

    /// Property: balance equals the value of the reserve after every step.
    #[test]
    fn balance_matches_reserve(ops in prop::collection::vec(op(), 0..60)) {
        let mut machine = InventoryEngine::new();
        let catalog = BundleCatalog::standard();

        for op in &ops {
            apply(&mut machine, &catalog, op);
            let register = machine.register();
            prop_assert_eq!(register.balance(), register.reserve_total());
            prop_assert!(!register.balance().is_negative());
        }
    }

    /// Property: a rejected sale or checkout changes nothing.
    #[test]
    fn rejected_sale_changes_nothing(ops in prop::collection::vec(op(), 0..60)) {
        let mut machine = InventoryEngine::new();
        let catalog = BundleCatalog::standard();

        for op in &ops {
            let before = snapshot(&machine);
            if let Some(Err(_)) = apply(&mut machine, &catalog, op) {
                prop_assert_eq!(snapshot(&machine), before);
            }
        }
    }

    /// Property: replenishing a then b equals replenishing a + b once.
    #[test]
    fn replenish_is_additive(
        denomination in denomination_value(),
        a in 0u32..1000,
        b in 0u32..1000,
    ) {
        let mut split = CashRegister::new();
        split.replenish(denomination, a);
        split.replenish(denomination, b);

        let mut once = CashRegister::new();
        once.replenish(denomination, a + b);

        prop_assert_eq!(split, once);
    }

    /// Property: replenishing never lowers the balance, even at the count limit.
    #[test]
    fn replenish_never_lowers_balance(
        denomination in denomination_value(),
        counts in prop::collection::vec(
            prop_oneof![any::<u32>(), Just(u32::MAX), 0u32..10],
            1..6,
        ),
    ) {
        let mut register = CashRegister::new();
        for count in counts {
            let before = register.balance();
            register.replenish(denomination, count);
            prop_assert!(register.balance() >= before);
            prop_assert_eq!(register.balance(), register.reserve_total());
        }
    }

    /// Property: a successful sale pays out exactly paid - total.
    #[test]
    fn committed_change_is_exact(
        slot in 0..SLOT_COUNT,
        quantity in 1u32..4,
        extra in 0i64..200,
        ones in 0u32..20,
        fives in 0u32..10,
        tens in 0u32..5,
    ) {
        let mut machine = InventoryEngine::new();
        machine.replenish(1, ones);
        machine.replenish(5, fives);
        machine.replenish(10, tens);

        let due = machine.quote(slot, quantity).unwrap();
        let paid = due + Money::from_pesos(extra);
        let before = machine.register().balance();

        if let Ok(receipt) = machine.sell(slot, quantity, paid, due) {
            prop_assert_eq!(receipt.change.total(), Money::from_pesos(extra));
            prop_assert_eq!(machine.register().balance(), before - Money::from_pesos(extra));
        }
    }
}
