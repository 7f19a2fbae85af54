//! # Bundles
//!
//! Composite meals: the fixed catalog of named recipes, caller-assembled
//! custom orders, and the checkout that sells all of a bundle's components
//! against one payment.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BundleOrder::Named("halo halo")       BundleOrder::Custom([3, 6, 6])   │
//! │           │                                      │                      │
//! │           ▼                                      ▼                      │
//! │  catalog.resolve(name)                 slot items, 1 unit each          │
//! │  components → slots by item name       reject a lone ingredient-only    │
//! │  (UnknownBundle / ItemNotStocked)      item (CannotSellIndividually)    │
//! │           └──────────────────┬───────────────────┘                      │
//! │                              ▼                                          │
//! │       total = Σ unit_price × quantity over all components               │
//! │                              ▼                                          │
//! │       InventoryEngine::authorize(lines, paid, total)                    │
//! │       (per-slot stock, payment, change: once for the whole order)       │
//! │                              ▼                                          │
//! │       InventoryEngine::commit: every component decrements its slot      │
//! │       and gets a ledger entry and a booking of the full total;          │
//! │       change is paid once                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};
use vend_core::validation::validate_amount_paid;
use vend_core::{Item, Money, SaleError, SaleKind, SaleReceipt, SaleResult, Tender};

use crate::engine::{InventoryEngine, SaleLine};
use crate::ingredients::{is_ingredient_only, preparation_steps};

// =============================================================================
// Catalog
// =============================================================================

/// One ingredient of a recipe, at the recipe's own price and calories.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleComponent {
    pub item: Item,
    pub quantity: u32,
}

/// A named recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub name: String,
    pub components: Vec<BundleComponent>,
}

impl Bundle {
    fn new(name: &str, components: &[(&str, i64, f64, u32)]) -> Self {
        Bundle {
            name: name.to_string(),
            components: components
                .iter()
                .map(|&(item, pesos, calories, quantity)| BundleComponent {
                    item: Item::new(item, Money::from_pesos(pesos), calories),
                    quantity,
                })
                .collect(),
        }
    }

    /// Sum of `unit_price × quantity` over every component.
    pub fn total_price(&self) -> Money {
        self.components
            .iter()
            .map(|c| c.item.price_for(c.quantity))
            .sum()
    }

    pub fn total_calories(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.item.unit_calories() * c.quantity as f64)
            .sum()
    }
}

/// The fixed set of recipes the machine can prepare.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleCatalog {
    bundles: Vec<Bundle>,
}

impl BundleCatalog {
    pub fn new(bundles: Vec<Bundle>) -> Self {
        BundleCatalog { bundles }
    }

    /// The seven recipes on the machine's menu.
    pub fn standard() -> Self {
        BundleCatalog::new(vec![
            Bundle::new(
                "halo halo",
                &[
                    ("Red Bean", 5, 50.0, 1),
                    ("Ube Ice Cream", 10, 100.0, 1),
                    ("Leche Flan", 15, 150.0, 1),
                    ("Banana", 5, 80.0, 1),
                    ("Nata de Coco", 15, 20.0, 1),
                    ("Kaong", 20, 25.0, 1),
                    ("Jackfruit", 10, 30.0, 1),
                    ("Jackfruit", 10, 30.0, 1),
                    ("Pinipig", 5, 40.0, 1),
                    ("Milk", 30, 40.0, 1),
                ],
            ),
            Bundle::new(
                "ube milkshake",
                &[("Ube Ice Cream", 10, 100.0, 2), ("Milk", 5, 50.0, 4)],
            ),
            Bundle::new(
                "special turon",
                &[
                    ("Banana", 5, 80.0, 2),
                    ("Jackfruit", 10, 120.0, 1),
                    ("Red Bean", 5, 50.0, 1),
                ],
            ),
            Bundle::new(
                "banana milk",
                &[("Banana", 5, 80.0, 2), ("Milk", 5, 50.0, 4)],
            ),
            Bundle::new(
                "ube banana split",
                &[
                    ("Ube Ice Cream", 10, 100.0, 2),
                    ("Banana", 5, 80.0, 2),
                    ("Leche Flan", 15, 150.0, 1),
                ],
            ),
            Bundle::new(
                "jackfruit delight",
                &[
                    ("Jackfruit", 10, 120.0, 2),
                    ("Milk", 5, 50.0, 1),
                    ("Leche Flan", 15, 150.0, 1),
                    ("Nata de Coco", 15, 20.0, 1),
                    ("Kaong", 20, 25.0, 1),
                ],
            ),
            Bundle::new(
                "red bean milk tea",
                &[("Red Bean", 5, 50.0, 1), ("Milk", 5, 50.0, 3)],
            ),
        ])
    }

    /// Looks up a recipe by name, ignoring case and surrounding whitespace.
    pub fn resolve(&self, name: &str) -> Option<&Bundle> {
        let name = name.trim();
        self.bundles.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }
}

impl Default for BundleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Orders
// =============================================================================

/// What the buyer asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOrder {
    /// A catalog recipe by name.
    Named(String),
    /// Slot indices, one unit per entry. Repeat an index for more units.
    Custom(Vec<usize>),
}

/// Rejects an order made up only of one ingredient-only item.
///
/// Any second distinct item, or any item that is not ingredient-only, makes
/// the order sellable.
pub fn check_individual_sale<'a, I>(names: I) -> SaleResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names = names.into_iter();
    let Some(first) = names.next() else {
        return Err(SaleError::EmptyOrder);
    };

    let lone_item = names.all(|n| n.eq_ignore_ascii_case(first));
    if lone_item && is_ingredient_only(first) {
        return Err(SaleError::CannotSellIndividually {
            item: first.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Bundle Engine
// =============================================================================

/// Checks out bundles against a machine. Holds no state of its own.
pub struct BundleEngine<'a> {
    engine: &'a mut InventoryEngine,
    catalog: &'a BundleCatalog,
}

impl<'a> BundleEngine<'a> {
    pub fn new(engine: &'a mut InventoryEngine, catalog: &'a BundleCatalog) -> Self {
        BundleEngine { engine, catalog }
    }

    /// Checks out `order` for `amount_paid`, which must already be in the
    /// reserve if it is to be used for change.
    pub fn checkout(&mut self, order: &BundleOrder, amount_paid: Money) -> SaleResult<SaleReceipt> {
        let result = self.try_checkout(order, amount_paid);
        match &result {
            Ok(receipt) => info!(
                receipt_id = %receipt.id,
                kind = ?receipt.kind,
                total = %receipt.total_price,
                calories = receipt.total_calories,
                "Bundle checked out"
            ),
            Err(e) => warn!(order = ?order, paid = %amount_paid, error = %e, "Bundle checkout rejected"),
        }
        result
    }

    pub fn checkout_named(&mut self, name: &str, amount_paid: Money) -> SaleResult<SaleReceipt> {
        self.checkout(&BundleOrder::Named(name.to_string()), amount_paid)
    }

    pub fn checkout_custom(&mut self, slots: &[usize], amount_paid: Money) -> SaleResult<SaleReceipt> {
        self.checkout(&BundleOrder::Custom(slots.to_vec()), amount_paid)
    }

    /// Checks out `order` against inserted cash. On rejection exactly the
    /// inserted pieces are returned.
    pub fn checkout_with_tender(&mut self, order: &BundleOrder, tender: &Tender) -> SaleResult<SaleReceipt> {
        // Reject what can be rejected before any cash moves.
        self.lines_for(order)?;
        let catalog = self.catalog;
        self.engine.with_tender(tender, |engine, paid| {
            BundleEngine::new(engine, catalog).checkout(order, paid)
        })
    }

    /// Price of `order` without checking it out.
    pub fn quote(&self, order: &BundleOrder) -> SaleResult<Money> {
        let (_, lines) = self.lines_for(order)?;
        Ok(total_of(&lines))
    }

    fn try_checkout(&mut self, order: &BundleOrder, amount_paid: Money) -> SaleResult<SaleReceipt> {
        validate_amount_paid(amount_paid)?;
        let (kind, lines) = self.lines_for(order)?;
        let total_price = total_of(&lines);

        let plan = self.engine.authorize(&lines, amount_paid, total_price)?;
        let preparation = preparation_steps(lines.iter().map(|l| l.item.name()));

        Ok(self
            .engine
            .commit(kind, lines, amount_paid, total_price, plan, preparation))
    }

    /// Resolves an order to the slots it draws on.
    fn lines_for(&self, order: &BundleOrder) -> SaleResult<(SaleKind, Vec<SaleLine>)> {
        match order {
            BundleOrder::Named(name) => {
                let bundle = self
                    .catalog
                    .resolve(name)
                    .ok_or_else(|| SaleError::UnknownBundle(name.clone()))?;

                let lines = bundle
                    .components
                    .iter()
                    .map(|c| -> SaleResult<SaleLine> {
                        let slot = self.engine.find_slot_by_name(c.item.name()).ok_or_else(|| {
                            SaleError::ItemNotStocked {
                                item: c.item.name().to_string(),
                            }
                        })?;
                        Ok(SaleLine {
                            slot,
                            item: c.item.clone(),
                            quantity: c.quantity,
                        })
                    })
                    .collect::<SaleResult<Vec<_>>>()?;

                Ok((
                    SaleKind::Bundle {
                        name: bundle.name.clone(),
                    },
                    lines,
                ))
            }
            BundleOrder::Custom(slots) => {
                if slots.is_empty() {
                    return Err(SaleError::EmptyOrder);
                }

                let lines = slots
                    .iter()
                    .map(|&slot| -> SaleResult<SaleLine> {
                        let item = self
                            .engine
                            .slot(slot)
                            .and_then(|s| s.item())
                            .ok_or(SaleError::InvalidSlot { slot })?;
                        Ok(SaleLine {
                            slot,
                            item: item.clone(),
                            quantity: 1,
                        })
                    })
                    .collect::<SaleResult<Vec<_>>>()?;

                check_individual_sale(lines.iter().map(|l| l.item.name()))?;
                Ok((SaleKind::Custom, lines))
            }
        }
    }
}

fn total_of(lines: &[SaleLine]) -> Money {
    lines.iter().map(|l| l.item.price_for(l.quantity)).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
