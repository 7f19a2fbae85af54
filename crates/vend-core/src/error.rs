//! # Error Types
//!
//! Domain-specific error types for the vending machine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── SaleError        - Why a sale or bundle checkout was rejected     │
//! │  ├── RestockError     - Why a restock was refused                      │
//! │  ├── CashError        - Register-level cash problems                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vend-engine errors (separate crate)                                   │
//! │  └── ConfigError      - Machine configuration failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → SaleError / RestockError → caller renders it  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is an expected, recoverable condition. Nothing in the
//! engine terminates the process; the caller decides how to show the message.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Sale Error
// =============================================================================

/// Reasons a sale or bundle checkout is rejected.
///
/// ## Sale State Machine
/// ```text
/// Requested ──► QuantityChecked ──► PaymentChecked ──► ChangeChecked ──► Committed
///     │               │                   │                  │
///     ▼               ▼                   ▼                  ▼
/// InvalidSlot  InsufficientQuantity  InsufficientPayment  ChangeUnavailable
/// ```
/// A rejection at any step leaves the machine exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaleError {
    /// Slot index outside the fixed range, or the slot was never stocked.
    #[error("Slot {slot} is not a valid, stocked slot")]
    InvalidSlot { slot: usize },

    /// Not enough units left in the slot.
    #[error("Insufficient quantity of {item}: available {available}, requested {requested}")]
    InsufficientQuantity {
        item: String,
        available: u32,
        requested: u32,
    },

    /// Amount paid is below the total price.
    #[error("Insufficient payment: paid {paid}, due {due}")]
    InsufficientPayment { paid: Money, due: Money },

    /// The reserve cannot make exact change.
    ///
    /// ## User Workflow
    /// ```text
    /// Pay PHP 12 for a PHP 10 purchase
    ///      │
    ///      ▼
    /// Change owed: PHP 2 → needs 2 × PHP 1, reserve holds 1
    ///      │
    ///      ▼
    /// ChangeUnavailable { change: PHP 2.00 }
    ///      │
    ///      ▼
    /// UI shows: "Please contact maintenance"
    /// ```
    #[error("Change of {change} cannot be provided in the available denominations")]
    ChangeUnavailable { change: Money },

    /// A custom order made only of one ingredient-only item.
    #[error("{item} cannot be bought individually")]
    CannotSellIndividually { item: String },

    /// Bundle name not in the catalog.
    #[error("Unknown bundle: {0}")]
    UnknownBundle(String),

    /// A bundle component has no slot holding that item.
    #[error("{item} is not stocked in this machine")]
    ItemNotStocked { item: String },

    /// A custom order with no selections.
    #[error("No items selected")]
    EmptyOrder,

    /// Input validation failed before any check ran.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The inserted cash could not be taken into the reserve.
    #[error("Cash rejected: {0}")]
    Cash(#[from] CashError),
}

// =============================================================================
// Restock Error
// =============================================================================

/// Reasons a restock is refused. The slot is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RestockError {
    /// Slot index outside the fixed range.
    #[error("Slot {slot} does not exist")]
    InvalidSlot { slot: usize },

    /// Topping up would take the slot past its capacity.
    #[error("Slot {slot} holds {current} of {capacity}; adding {requested} would exceed capacity")]
    ExceedsCapacity {
        slot: usize,
        current: u32,
        requested: u32,
        capacity: u32,
    },

    /// The slot still holds a different item.
    #[error("Slot {slot} holds {stocked}, cannot restock with {offered}")]
    ItemMismatch {
        slot: usize,
        stocked: String,
        offered: String,
    },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Cash Error
// =============================================================================

/// Register-level cash errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CashError {
    /// Value is not one of the accepted coins or bills.
    #[error("PHP {0} is not an accepted denomination")]
    InvalidDenomination(u32),

    /// Paying out would take a denomination's count below zero.
    #[error("Reserve has {available} × PHP {denomination}, needs {needed}")]
    ReserveShortfall {
        denomination: u32,
        needed: u32,
        available: u32,
    },

    /// Adding pieces would take a denomination's count past `u32::MAX`.
    #[error("Reserve has {held} × PHP {denomination}, cannot add {added} more")]
    ReserveOverflow {
        denomination: u32,
        held: u32,
        added: u32,
    },

    /// Negative, or has a centavo part no coin can pay.
    #[error("{0} cannot be paid out in coins and bills")]
    Unpayable(Money),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before business logic runs, when caller input does not meet
/// basic requirements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with SaleError.
pub type SaleResult<T> = Result<T, SaleError>;

/// Convenience type alias for Results with RestockError.
pub type RestockResult<T> = Result<T, RestockError>;

// =============================================================================
// Unit Tests
// =============================================================================
