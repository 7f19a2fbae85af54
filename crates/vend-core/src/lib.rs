//! # vend-core: Pure Business Types for Halo Vend
//!
//! Value types for a cash-accepting vending machine, with zero I/O and no
//! mutable machine state. The stateful engine lives in `vend-engine`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Halo Vend Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Presentation (console menus, windowed dialogs)         │   │
//! │  │     Pick slot ──► Insert cash ──► Show receipt / change         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated numbers                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vend-engine                                  │   │
//! │  │   InventoryEngine, CashRegister, Ledger, BundleEngine           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │ SaleError │  │   rules   │  │   │
//! │  │   │  Receipt  │  │  Tender   │  │ CashError │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO LOGGING SETUP • PURE TYPES      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, SlotView, SaleReceipt, etc.)
//! - [`money`] - Money in integer centavos, denominations, tenders
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Item, Money};
//!
//! let banana = Item::new("Banana", Money::from_pesos(12), 30.0);
//! assert_eq!(banana.price_for(2).to_string(), "PHP 24.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{
    CashError, RestockError, RestockResult, SaleError, SaleResult, ValidationError,
};
pub use money::{Denomination, Money, Tender};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of dispensing positions in the machine.
pub const SLOT_COUNT: usize = 9;

/// Units a slot holds unless configured otherwise.
pub const DEFAULT_SLOT_CAPACITY: u32 = 10;
