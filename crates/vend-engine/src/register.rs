//! # Cash Register
//!
//! The machine's own reserve of coins and bills.
//!
//! ## Two Different Greedy Passes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_change_feasible()                 plan_change() / dispense_change() │
//! │  ─────────────────────                ───────────────────────────────── │
//! │  All 8 denominations, descending      Fixed order 500,100,50,20,10,5,1  │
//! │  (500, 200, 100, ..., 1)              (200 is never paid out)           │
//! │  take min(needed, available)          take min(needed, available)       │
//! │  feasible iff remainder hits 0        fails unless remainder hits 0     │
//! │                                                                         │
//! │  Greedy, not exhaustive: reserve {20:3, 50:1, 10:0, 5:0, 1:0} cannot    │
//! │  make 60 because 50 is taken first, although 3 × 20 would do.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `balance == Σ denomination × count` after every operation. Every mutation
//! goes through [`CashRegister::adjust`], which updates both together.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use vend_core::{ChangeBreakdown, ChangePiece, CashError, Denomination, Money, Tender};

/// Coin and bill reserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashRegister {
    reserve: BTreeMap<Denomination, u32>,
    balance: Money,
}

impl Default for CashRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl CashRegister {
    /// Creates an empty register holding zero of every denomination.
    pub fn new() -> Self {
        CashRegister {
            reserve: Denomination::ALL.into_iter().map(|d| (d, 0)).collect(),
            balance: Money::zero(),
        }
    }

    /// Total value held.
    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Pieces of `denomination` held.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.reserve.get(&denomination).copied().unwrap_or(0)
    }

    /// `(denomination, count)` pairs, ascending.
    pub fn reserve(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.reserve.iter().map(|(&d, &n)| (d, n))
    }

    /// Recomputes the balance from the reserve. Equal to [`balance`] whenever
    /// the invariant holds.
    ///
    /// [`balance`]: CashRegister::balance
    pub fn reserve_total(&self) -> Money {
        self.reserve.iter().map(|(d, &n)| d.value() * n).sum()
    }

    // =========================================================================
    // Replenish / Deposit
    // =========================================================================

    /// Adds cash to the reserve.
    ///
    /// Silently ignores zero quantities. Unknown denominations and counts
    /// that would overflow are ignored with a warning.
    pub fn replenish(&mut self, denomination: u32, quantity: u32) {
        if let Err(e) = self.try_replenish(denomination, quantity) {
            warn!(denomination, quantity, error = %e, "Ignoring replenish");
        }
    }

    /// Adds cash to the reserve, reporting unknown denominations and counts
    /// that would overflow. Nothing is added on error.
    pub fn try_replenish(&mut self, denomination: u32, quantity: u32) -> Result<(), CashError> {
        let denomination = Denomination::try_from(denomination)?;
        self.check_room(denomination, quantity)?;
        if quantity > 0 {
            self.adjust(denomination, i64::from(quantity));
        }
        Ok(())
    }

    /// Deposits every piece of a buyer's tender, or nothing if any count
    /// would overflow.
    pub fn deposit(&mut self, tender: &Tender) -> Result<(), CashError> {
        for (denomination, count) in tender.iter() {
            self.check_room(denomination, count)?;
        }
        for (denomination, count) in tender.iter() {
            self.adjust(denomination, i64::from(count));
        }
        Ok(())
    }

    fn check_room(&self, denomination: Denomination, added: u32) -> Result<(), CashError> {
        let held = self.count(denomination);
        match held.checked_add(added) {
            Some(_) => Ok(()),
            None => Err(CashError::ReserveOverflow {
                denomination: denomination.pesos(),
                held,
                added,
            }),
        }
    }

    /// Takes back exactly the pieces of `tender`, or nothing if any
    /// denomination is short.
    pub fn withdraw(&mut self, tender: &Tender) -> Result<(), CashError> {
        for (denomination, count) in tender.iter() {
            let available = self.count(denomination);
            if count > available {
                return Err(CashError::ReserveShortfall {
                    denomination: denomination.pesos(),
                    needed: count,
                    available,
                });
            }
        }
        for (denomination, count) in tender.iter() {
            self.adjust(denomination, -i64::from(count));
        }
        Ok(())
    }

    // =========================================================================
    // Change
    // =========================================================================

    /// Can the reserve pay `amount_paid - total_price` exactly?
    ///
    /// Greedy over all denominations, largest first, taking
    /// `min(needed, available)` of each. Feasible iff the remainder reaches
    /// exactly zero. A negative difference is never feasible.
    pub fn is_change_feasible(&self, amount_paid: Money, total_price: Money) -> bool {
        let mut remaining = (amount_paid - total_price).cents();
        if remaining < 0 {
            return false;
        }

        for denomination in Denomination::ALL.into_iter().rev() {
            let unit = denomination.value().cents();
            let needed = remaining / unit;
            let taken = needed.min(self.count(denomination) as i64);
            remaining -= taken * unit;
        }

        remaining == 0
    }

    /// Works out which pieces `dispense_change` would pay for `change`,
    /// without touching the reserve.
    ///
    /// Walks the dispense order taking as many of each denomination as fit
    /// and are held. Fails if the remainder does not reach zero, so a count
    /// can never be driven below zero.
    pub fn plan_change(&self, change: Money) -> Result<ChangeBreakdown, CashError> {
        if change.is_negative() {
            return Err(CashError::Unpayable(change));
        }

        let mut remaining = change.cents();
        let mut pieces = Vec::new();

        for denomination in Denomination::DISPENSE_ORDER {
            let unit = denomination.value().cents();
            let needed = remaining / unit;
            let count = needed.min(self.count(denomination) as i64) as u32;
            if count == 0 {
                continue;
            }
            remaining -= count as i64 * unit;
            pieces.push(ChangePiece {
                denomination,
                count,
            });
        }

        if remaining != 0 {
            return Err(CashError::Unpayable(change));
        }

        Ok(ChangeBreakdown { pieces })
    }

    /// Pays out `change` in the fixed dispense order and removes the pieces
    /// from the reserve. Leaves the reserve untouched on error.
    pub fn dispense_change(&mut self, change: Money) -> Result<ChangeBreakdown, CashError> {
        let breakdown = self.plan_change(change)?;
        self.pay_out(&breakdown);
        Ok(breakdown)
    }

    /// Removes an already-planned breakdown from the reserve.
    pub(crate) fn pay_out(&mut self, breakdown: &ChangeBreakdown) {
        for piece in &breakdown.pieces {
            self.adjust(piece.denomination, -i64::from(piece.count));
        }
        debug!(change = %breakdown.total(), balance = %self.balance, "Change dispensed");
    }

    /// The single mutation point: moves count and balance together. The
    /// count is clamped to `0..=u32::MAX` and the balance moves by what was
    /// actually applied.
    fn adjust(&mut self, denomination: Denomination, delta: i64) {
        let count = self.reserve.entry(denomination).or_insert(0);
        let clamped = (i64::from(*count) + delta).clamp(0, i64::from(u32::MAX));
        let updated = u32::try_from(clamped).unwrap_or(u32::MAX);
        let applied = i64::from(updated) - i64::from(*count);
        *count = updated;
        self.balance += denomination.value() * applied;
        debug!(
            denomination = denomination.pesos(),
            delta = applied,
            count = updated,
            "Reserve adjusted"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
