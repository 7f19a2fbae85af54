//! # Domain Types
//!
//! Value types shared between the engine and whatever renders it.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   SaleReceipt   │   │ ChangeBreakdown │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (UUID)      │   │  pieces         │       │
//! │  │  unit_price     │   │  kind           │   │  (denom, count) │       │
//! │  │  unit_calories  │   │  lines, change  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    SlotView     │   │   LedgerEntry   │   │ TransactionSummary  │   │
//! │  │  index, item?   │   │  item, quantity │   │  per-item totals    │   │
//! │  │  quantity       │   │  recorded_at    │   │  total_sales        │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Denomination, Money};

// =============================================================================
// Item
// =============================================================================

/// A product the machine can hold in a slot.
///
/// Immutable once constructed. Two items are the same product when their
/// names match; bundle rules compare names case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    name: String,
    unit_price: Money,
    unit_calories: f64,
}

impl Item {
    /// Creates an item from a name, unit price and calories per unit.
    pub fn new(name: impl Into<String>, unit_price: Money, unit_calories: f64) -> Self {
        Item {
            name: name.into(),
            unit_price,
            unit_calories,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn unit_calories(&self) -> f64 {
        self.unit_calories
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Price of `quantity` units.
    #[inline]
    pub fn price_for(&self, quantity: u32) -> Money {
        self.unit_price * quantity
    }
}

// =============================================================================
// Slot View
// =============================================================================

/// Read-only snapshot of one slot, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SlotView {
    pub index: usize,
    /// `None` for a position that has never been stocked.
    pub item: Option<Item>,
    pub quantity: u32,
    pub capacity: u32,
}

// =============================================================================
// Change Breakdown
// =============================================================================

/// Some number of one denomination handed back as change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangePiece {
    pub denomination: Denomination,
    pub count: u32,
}

/// Change paid out for one sale, largest denomination first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeBreakdown {
    pub pieces: Vec<ChangePiece>,
}

impl ChangeBreakdown {
    /// Total value handed back.
    pub fn total(&self) -> Money {
        self.pieces
            .iter()
            .map(|p| p.denomination.value() * p.count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of pieces of `denomination` in this breakdown.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.pieces
            .iter()
            .filter(|p| p.denomination == denomination)
            .map(|p| p.count)
            .sum()
    }
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One completed line of a sale, as kept by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    pub item: Item,
    pub quantity: u32,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

// =============================================================================
// Sale Receipt
// =============================================================================

/// What was bought: a single slot, or a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SaleKind {
    /// Plain slot sale.
    Single { slot: usize },
    /// One of the predefined bundles.
    Bundle { name: String },
    /// Caller-assembled selection of slots.
    Custom,
}

/// One dispensed line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    pub slot: usize,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Result of a committed sale or bundle checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleReceipt {
    /// Receipt identifier (UUID v4).
    pub id: String,
    pub kind: SaleKind,
    pub lines: Vec<ReceiptLine>,
    pub total_price: Money,
    pub amount_paid: Money,
    pub change: ChangeBreakdown,
    pub total_calories: f64,
    /// Preparation narration for bundles; empty for single sales.
    pub preparation: Vec<String>,
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

impl SaleReceipt {
    /// Total units dispensed across all lines.
    pub fn units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Transaction Summary
// =============================================================================

/// Units sold of one item since the machine started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryLine {
    pub item_name: String,
    pub quantity_sold: u32,
}

/// Per-item totals (first-sold order) and the collectible sales total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionSummary {
    pub lines: Vec<SummaryLine>,
    pub total_sales: Money,
}

impl TransactionSummary {
    /// Quantity sold for `item_name`, 0 if never sold.
    pub fn quantity_sold(&self, item_name: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_name == item_name)
            .map(|l| l.quantity_sold)
            .unwrap_or(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
