//! # Validation Module
//!
//! Input validation for values that arrive from a presentation layer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (console menu, dialog)                          │
//! │  ├── Parses text into numbers                                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Shape checks: positive quantity, non-negative price               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                       │
//! │  └── Stateful checks: stock, payment, change                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::validation::{validate_item_name, validate_quantity};
//!
//! validate_item_name("Leche Flan").unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name the panels can show.
pub const MAX_ITEM_NAME_LEN: usize = 40;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_ITEM_NAME_LEN`] characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or restock quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use vend_core::money::Money;
/// use vend_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_pesos(5)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a calorie count: finite and non-negative.
pub fn validate_calories(calories: f64) -> ValidationResult<()> {
    if !calories.is_finite() || calories < 0.0 {
        return Err(ValidationError::Negative {
            field: "calories".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount paid. Must not be negative.
pub fn validate_amount_paid(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "amount paid".to_string(),
        });
    }

    Ok(())
}

/// Validates a slot capacity.
///
/// ## Rules
/// - Between 1 and 99 units
pub fn validate_capacity(capacity: u32) -> ValidationResult<()> {
    if capacity == 0 || capacity > 99 {
        return Err(ValidationError::OutOfRange {
            field: "slot capacity".to_string(),
            min: 1,
            max: 99,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
