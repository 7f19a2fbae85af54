//! # Slot
//!
//! One dispensing position: an optional bound item and a bounded quantity.
//!
//! ## Slot Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Unbound ──restock(item, n)──► Bound { qty = min(n, capacity) }        │
//! │                                   │        ▲                            │
//! │                     decrease(k)   │        │ restock(same item, n)      │
//! │                                   ▼        │ only if qty + n ≤ capacity │
//! │                               Bound { qty - k, floored at 0 }           │
//! │                                   │                                     │
//! │                                   │ qty == 0                            │
//! │                                   ▼                                     │
//! │                             Emptied (still bound; may take a new item)  │
//! │                                                                         │
//! │  Invariant: 0 ≤ quantity ≤ capacity                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use vend_core::{Item, DEFAULT_SLOT_CAPACITY};

/// What a restock did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    /// An unbound slot took the item.
    Bound { quantity: u32 },
    /// An emptied slot switched to a different item.
    Rebound { quantity: u32 },
    /// Units added to the item already in the slot.
    ToppedUp { quantity: u32 },
    /// Top-up refused: it would pass capacity. Nothing changed.
    OverCapacity { current: u32 },
    /// A non-empty slot was offered a different item. Nothing changed.
    ItemMismatch,
}

impl RestockOutcome {
    /// True if the slot was modified.
    pub fn applied(&self) -> bool {
        matches!(
            self,
            RestockOutcome::Bound { .. }
                | RestockOutcome::Rebound { .. }
                | RestockOutcome::ToppedUp { .. }
        )
    }
}

/// A dispensing position.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    item: Option<Item>,
    quantity: u32,
    capacity: u32,
}

impl Slot {
    /// Creates an unbound slot.
    pub fn new(capacity: u32) -> Self {
        Slot {
            item: None,
            quantity: 0,
            capacity,
        }
    }

    /// Creates a slot already stocked with `item`, clamped to capacity.
    pub fn stocked(item: Item, quantity: u32, capacity: u32) -> Self {
        Slot {
            item: Some(item),
            quantity: quantity.min(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.item.is_some()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Adds stock.
    ///
    /// ## Rules
    /// - Unbound (or emptied and offered a new item): binds `item`, quantity
    ///   becomes `min(add, capacity)`
    /// - Bound to the same item: adds `add` only if the result stays within
    ///   capacity, otherwise does nothing (no clamping)
    /// - Bound, non-empty, different item: does nothing
    pub fn restock(&mut self, item: &Item, add: u32) -> RestockOutcome {
        match &self.item {
            None => {
                self.item = Some(item.clone());
                self.quantity = add.min(self.capacity);
                RestockOutcome::Bound {
                    quantity: self.quantity,
                }
            }
            Some(current) if !current.is_named(item.name()) => {
                if self.quantity > 0 {
                    return RestockOutcome::ItemMismatch;
                }
                self.item = Some(item.clone());
                self.quantity = add.min(self.capacity);
                RestockOutcome::Rebound {
                    quantity: self.quantity,
                }
            }
            Some(_) => {
                let new_quantity = self.quantity.saturating_add(add);
                if new_quantity > self.capacity {
                    return RestockOutcome::OverCapacity {
                        current: self.quantity,
                    };
                }
                self.quantity = new_quantity;
                RestockOutcome::ToppedUp {
                    quantity: self.quantity,
                }
            }
        }
    }

    /// Removes `amount` units, floored at zero.
    ///
    /// Callers check sufficiency first; the floor only keeps the invariant.
    pub fn decrease(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_sub(amount);
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::new(DEFAULT_SLOT_CAPACITY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
