//! # vend-engine: Inventory & Cash Engine
//!
//! Stateful half of the vending machine: slots, the cash register, the
//! transaction ledger, and the sale and bundle state machines on top.
//!
//! ## Module Organization
//! ```text
//! vend_engine
//! ├── slot          - One dispensing position and its restock rules
//! ├── register      - Denomination reserve, change feasibility and payout
//! ├── ledger        - Completed-sale record and sales totals
//! ├── engine        - InventoryEngine: the sale state machine
//! ├── ingredients   - Per-item lookup table (restriction, preparation text)
//! ├── bundle        - Recipe catalog, custom orders, BundleEngine checkout
//! ├── config        - MachineConfig (TOML + env overrides)
//! ├── error         - ConfigError
//! └── logging       - tracing-subscriber setup for binaries
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_engine::{BundleCatalog, BundleEngine, InventoryEngine};
//! use vend_core::Money;
//!
//! let mut machine = InventoryEngine::new();
//! machine.replenish(5, 10);
//!
//! // Two Red Beans at PHP 5 each, paid with PHP 15
//! let receipt = machine
//!     .sell(0, 2, Money::from_pesos(15), Money::from_pesos(10))
//!     .unwrap();
//! assert_eq!(receipt.change.total(), Money::from_pesos(5));
//!
//! let catalog = BundleCatalog::standard();
//! let meal = BundleEngine::new(&mut machine, &catalog)
//!     .checkout_named("banana milk", Money::from_pesos(30))
//!     .unwrap();
//! assert_eq!(meal.units(), 6);
//! ```
//!
//! Single-threaded by contract: the engine takes `&mut self` for every
//! mutation and holds no locks.

pub mod bundle;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingredients;
pub mod ledger;
pub mod logging;
pub mod register;
pub mod slot;

pub use bundle::{Bundle, BundleCatalog, BundleComponent, BundleEngine, BundleOrder};
pub use config::MachineConfig;
pub use engine::InventoryEngine;
pub use error::{ConfigError, ConfigResult};
pub use ledger::TransactionLedger;
pub use register::CashRegister;
pub use slot::{RestockOutcome, Slot};
