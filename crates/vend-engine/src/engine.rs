//! # Inventory Engine
//!
//! The sale state machine. Owns the nine slots, the cash register and the
//! transaction ledger for the lifetime of the machine.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         sell(slot, qty, paid, total)                    │
//! │                                                                         │
//! │  ┌──────────────── authorize (read-only) ─────────────────┐            │
//! │  │ 1. slot exists and is bound        else InvalidSlot    │            │
//! │  │ 2. qty > 0, amounts ≥ 0            else Validation     │            │
//! │  │ 3. slot.quantity ≥ qty             else Insufficient-  │            │
//! │  │                                         Quantity       │            │
//! │  │ 4. paid ≥ total                    else Insufficient-  │            │
//! │  │                                         Payment        │            │
//! │  │ 5. is_change_feasible(paid, total) else ChangeUnavail. │            │
//! │  │ 6. plan_change(paid - total)       else ChangeUnavail. │            │
//! │  └────────────────────────────┬───────────────────────────┘            │
//! │                               ▼                                         │
//! │  ┌──────────────── commit (cannot fail) ──────────────────┐            │
//! │  │ slot.decrease(qty)                                     │            │
//! │  │ ledger.record(item, qty)               (per line)      │            │
//! │  │ ledger.add_sales(total)        (once, or per line for  │            │
//! │  │                                 bundles and customs)   │            │
//! │  │ register.pay_out(plan)                                 │            │
//! │  └────────────────────────────────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is mutated until every check has passed, so a rejected sale leaves
//! slots, ledger and reserve exactly as they were.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vend_core::validation::{
    validate_amount_paid, validate_calories, validate_item_name, validate_price,
    validate_quantity,
};
use vend_core::{
    ChangeBreakdown, Item, Money, ReceiptLine, RestockError, RestockResult, SaleError,
    SaleKind, SaleReceipt, SaleResult, SlotView, Tender, TransactionSummary, SLOT_COUNT,
};

use crate::config::MachineConfig;
use crate::error::ConfigResult;
use crate::ledger::TransactionLedger;
use crate::register::CashRegister;
use crate::slot::{RestockOutcome, Slot};

/// One line of a sale about to be committed.
///
/// `item` carries the price and calories charged for this line, which for a
/// bundle component is the recipe's, not the slot's.
#[derive(Debug, Clone)]
pub(crate) struct SaleLine {
    pub slot: usize,
    pub item: Item,
    pub quantity: u32,
}

/// The vending machine.
#[derive(Debug, Clone)]
pub struct InventoryEngine {
    slots: Vec<Slot>,
    register: CashRegister,
    ledger: TransactionLedger,
}

impl Default for InventoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryEngine {
    /// A machine stocked with the default planogram and an empty reserve.
    pub fn new() -> Self {
        let config = MachineConfig::default();
        let capacity = config.machine.slot_capacity;
        let mut slots = vec![Slot::new(capacity); SLOT_COUNT];
        for entry in &config.slots {
            slots[entry.index] = Slot::stocked(entry.item(), entry.quantity, capacity);
        }

        InventoryEngine {
            slots,
            register: CashRegister::new(),
            ledger: TransactionLedger::new(),
        }
    }

    /// A machine with no slots bound and an empty reserve.
    pub fn empty(capacity: u32) -> Self {
        InventoryEngine {
            slots: vec![Slot::new(capacity); SLOT_COUNT],
            register: CashRegister::new(),
            ledger: TransactionLedger::new(),
        }
    }

    /// Builds a machine from a validated configuration.
    pub fn from_config(config: &MachineConfig) -> ConfigResult<Self> {
        config.validate()?;

        let capacity = config.machine.slot_capacity;
        let mut engine = Self::empty(capacity);

        for entry in &config.slots {
            engine.slots[entry.index] = Slot::stocked(entry.item(), entry.quantity, capacity);
        }
        for entry in &config.float {
            engine.register.try_replenish(entry.denomination, entry.count)?;
        }

        info!(
            slots = config.slots.len(),
            capacity,
            float = %engine.register.balance(),
            "Machine initialised from config"
        );
        Ok(engine)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of every slot, in index order.
    pub fn list_slots(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotView {
                index,
                item: slot.item().cloned(),
                quantity: slot.quantity(),
                capacity: slot.capacity(),
            })
            .collect()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// True if `index` is in range and has ever been stocked.
    pub fn is_slot_occupied(&self, index: usize) -> bool {
        self.slots.get(index).map(Slot::is_bound).unwrap_or(false)
    }

    /// First slot bound to an item named `name` (case-insensitive).
    pub fn find_slot_by_name(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.item().map(|i| i.is_named(name)).unwrap_or(false))
    }

    /// Price of `quantity` units from `slot` at the slot's unit price.
    pub fn quote(&self, slot: usize, quantity: u32) -> SaleResult<Money> {
        validate_quantity(quantity)?;
        Ok(self.bound_item(slot)?.price_for(quantity))
    }

    #[inline]
    pub fn register(&self) -> &CashRegister {
        &self.register
    }

    #[inline]
    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    /// Units sold per item and the collectible sales total.
    pub fn transaction_summary(&self) -> TransactionSummary {
        self.ledger.summary()
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sells `quantity` units from `slot`.
    ///
    /// `total_price` is what the caller charged (normally [`quote`]);
    /// `amount_paid` is what the buyer handed over and must already be in
    /// the reserve if it is to be used for change.
    ///
    /// The feasibility check counts 200 bills but the payout never uses
    /// them, so a sale that passes it can still be rejected with
    /// [`SaleError::ChangeUnavailable`].
    ///
    /// [`quote`]: InventoryEngine::quote
    pub fn sell(
        &mut self,
        slot: usize,
        quantity: u32,
        amount_paid: Money,
        total_price: Money,
    ) -> SaleResult<SaleReceipt> {
        let result = self.try_sell(slot, quantity, amount_paid, total_price);
        if let Err(e) = &result {
            warn!(slot, quantity, paid = %amount_paid, due = %total_price, error = %e, "Sale rejected");
        }
        result
    }

    fn try_sell(
        &mut self,
        slot: usize,
        quantity: u32,
        amount_paid: Money,
        total_price: Money,
    ) -> SaleResult<SaleReceipt> {
        let item = self.bound_item(slot)?.clone();
        validate_quantity(quantity)?;
        validate_amount_paid(amount_paid)?;
        validate_price(total_price)?;

        let lines = vec![SaleLine {
            slot,
            item,
            quantity,
        }];
        let plan = self.authorize(&lines, amount_paid, total_price)?;

        Ok(self.commit(
            SaleKind::Single { slot },
            lines,
            amount_paid,
            total_price,
            plan,
            Vec::new(),
        ))
    }

    /// Sells from `slot` against inserted cash, charging the slot price.
    ///
    /// The tender goes into the reserve first so it can be used for change.
    /// On rejection exactly those pieces are taken back out.
    pub fn purchase(&mut self, slot: usize, quantity: u32, tender: &Tender) -> SaleResult<SaleReceipt> {
        let total_price = self.quote(slot, quantity)?;
        self.with_tender(tender, |engine, paid| {
            engine.sell(slot, quantity, paid, total_price)
        })
    }

    /// Runs `sale` with `tender` deposited, undoing the deposit if it fails.
    pub(crate) fn with_tender<F>(&mut self, tender: &Tender, sale: F) -> SaleResult<SaleReceipt>
    where
        F: FnOnce(&mut Self, Money) -> SaleResult<SaleReceipt>,
    {
        self.register.deposit(tender)?;
        let result = sale(self, tender.total());
        if result.is_err() {
            // The pieces were deposited above and nothing else ran, so they
            // are all still there.
            if let Err(e) = self.register.withdraw(tender) {
                warn!(error = %e, "Could not return tender after rejected sale");
            }
        }
        result
    }

    /// Checks stock, payment and change for `lines` without mutating.
    ///
    /// Quantities are summed per slot first so two lines drawing on the same
    /// slot cannot together take more than it holds.
    pub(crate) fn authorize(
        &self,
        lines: &[SaleLine],
        amount_paid: Money,
        total_price: Money,
    ) -> SaleResult<ChangeBreakdown> {
        let mut demand = [0u32; SLOT_COUNT];
        for line in lines {
            let held = self.bound_item(line.slot)?;
            demand[line.slot] = demand[line.slot].saturating_add(line.quantity);
            let available = self.slots[line.slot].quantity();
            if available < demand[line.slot] {
                return Err(SaleError::InsufficientQuantity {
                    item: held.name().to_string(),
                    available,
                    requested: demand[line.slot],
                });
            }
        }

        if amount_paid < total_price {
            return Err(SaleError::InsufficientPayment {
                paid: amount_paid,
                due: total_price,
            });
        }

        let change = amount_paid - total_price;
        if !self.register.is_change_feasible(amount_paid, total_price) {
            return Err(SaleError::ChangeUnavailable { change });
        }

        // Feasibility may count 200 bills that the payout order never uses.
        self.register.plan_change(change).map_err(|e| {
            debug!(change = %change, error = %e, "Feasible change could not be planned");
            SaleError::ChangeUnavailable { change }
        })
    }

    /// Applies an authorized sale. Every line decrements its slot and gets a
    /// ledger entry. A single sale books its total once; bundles and custom
    /// meals book the full total once per component line. Change is paid
    /// out once either way.
    pub(crate) fn commit(
        &mut self,
        kind: SaleKind,
        lines: Vec<SaleLine>,
        amount_paid: Money,
        total_price: Money,
        change: ChangeBreakdown,
        preparation: Vec<String>,
    ) -> SaleReceipt {
        let mut receipt_lines = Vec::with_capacity(lines.len());
        let mut total_calories = 0.0;

        for line in &lines {
            self.slots[line.slot].decrease(line.quantity);
            self.ledger.record(&line.item, line.quantity);
            total_calories += line.item.unit_calories() * line.quantity as f64;
            receipt_lines.push(ReceiptLine {
                slot: line.slot,
                item_name: line.item.name().to_string(),
                quantity: line.quantity,
                unit_price: line.item.unit_price(),
            });
        }

        let bookings = match kind {
            SaleKind::Single { .. } => 1,
            SaleKind::Bundle { .. } | SaleKind::Custom => lines.len(),
        };
        for _ in 0..bookings {
            self.ledger.add_sales(total_price);
        }
        self.register.pay_out(&change);

        let receipt = SaleReceipt {
            id: Uuid::new_v4().to_string(),
            kind,
            lines: receipt_lines,
            total_price,
            amount_paid,
            change,
            total_calories,
            preparation,
            sold_at: Utc::now(),
        };

        info!(
            receipt_id = %receipt.id,
            units = receipt.units(),
            total = %total_price,
            change = %receipt.change.total(),
            "Sale committed"
        );
        receipt
    }

    /// The item in `slot`, or `InvalidSlot` if out of range or unbound.
    fn bound_item(&self, slot: usize) -> SaleResult<&Item> {
        self.slots
            .get(slot)
            .and_then(Slot::item)
            .ok_or(SaleError::InvalidSlot { slot })
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Adds `quantity` units of `item` to `slot`.
    ///
    /// An unbound or emptied slot takes the item (clamped to capacity). A slot
    /// already holding it accepts the top-up only if the result fits.
    pub fn restock(&mut self, slot: usize, item: Item, quantity: u32) -> RestockResult<()> {
        validate_quantity(quantity)?;
        validate_item_name(item.name())?;
        validate_price(item.unit_price())?;
        validate_calories(item.unit_calories())?;

        let target = self
            .slots
            .get_mut(slot)
            .ok_or(RestockError::InvalidSlot { slot })?;

        match target.restock(&item, quantity) {
            RestockOutcome::Bound { quantity: now }
            | RestockOutcome::Rebound { quantity: now }
            | RestockOutcome::ToppedUp { quantity: now } => {
                debug!(slot, item = %item.name(), added = quantity, quantity = now, "Slot restocked");
                Ok(())
            }
            RestockOutcome::OverCapacity { current } => Err(RestockError::ExceedsCapacity {
                slot,
                current,
                requested: quantity,
                capacity: target.capacity(),
            }),
            RestockOutcome::ItemMismatch => Err(RestockError::ItemMismatch {
                slot,
                stocked: target.item().map(|i| i.name().to_string()).unwrap_or_default(),
                offered: item.name().to_string(),
            }),
        }
    }

    /// Adds cash to the reserve. Unknown denominations and zero quantities
    /// are ignored.
    pub fn replenish(&mut self, denomination: u32, quantity: u32) {
        self.register.replenish(denomination, quantity);
    }

    /// Hands over the collectible sales total and resets it to zero.
    pub fn collect(&mut self) -> Money {
        self.ledger.collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
