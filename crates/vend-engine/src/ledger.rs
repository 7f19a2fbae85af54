//! # Transaction Ledger
//!
//! Append-only record of completed sales plus the running sales totals.
//!
//! ```text
//! entries ──────────► [Red Bean ×2] [Milk ×1] [Banana ×2] ...   (never shrinks)
//! total_sales ──────► collectible; collect() returns it and zeroes it
//! lifetime_sales ───► everything ever sold; collect() leaves it alone
//! ```

use chrono::Utc;
use tracing::{debug, info};
use vend_core::{Item, LedgerEntry, Money, SummaryLine, TransactionSummary};

/// Completed-sale ledger.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    entries: Vec<LedgerEntry>,
    total_sales: Money,
    lifetime_sales: Money,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one dispensed line.
    pub fn record(&mut self, item: &Item, quantity: u32) {
        debug!(item = %item.name(), quantity, "Ledger entry appended");
        self.entries.push(LedgerEntry {
            item: item.clone(),
            quantity,
            recorded_at: Utc::now(),
        });
    }

    /// Adds the price of a committed sale to both totals.
    pub fn add_sales(&mut self, amount: Money) {
        self.total_sales += amount;
        self.lifetime_sales += amount;
    }

    /// Returns the collectible total and resets it to zero. Entries stay.
    pub fn collect(&mut self) -> Money {
        let collected = std::mem::take(&mut self.total_sales);
        info!(collected = %collected, "Sales collected");
        collected
    }

    #[inline]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[inline]
    pub fn total_sales(&self) -> Money {
        self.total_sales
    }

    #[inline]
    pub fn lifetime_sales(&self) -> Money {
        self.lifetime_sales
    }

    /// Units sold per item name, in the order each item was first sold.
    pub fn summary(&self) -> TransactionSummary {
        let mut lines: Vec<SummaryLine> = Vec::new();
        for entry in &self.entries {
            match lines.iter_mut().find(|l| l.item_name == entry.item.name()) {
                Some(line) => line.quantity_sold += entry.quantity,
                None => lines.push(SummaryLine {
                    item_name: entry.item.name().to_string(),
                    quantity_sold: entry.quantity,
                }),
            }
        }

        TransactionSummary {
            lines,
            total_sales: self.total_sales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, pesos: i64) -> Item {
        Item::new(name, Money::from_pesos(pesos), 10.0)
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut ledger = TransactionLedger::new();
        ledger.record(&item("Milk", 30), 1);
        ledger.record(&item("Banana", 12), 2);

        let names: Vec<_> = ledger.entries().iter().map(|e| e.item.name()).collect();
        assert_eq!(names, ["Milk", "Banana"]);
    }

    #[test]
    fn test_summary_aggregates_by_name() {
        let mut ledger = TransactionLedger::new();
        ledger.record(&item("Milk", 30), 1);
        ledger.record(&item("Banana", 12), 2);
        ledger.record(&item("Milk", 30), 3);
        ledger.add_sales(Money::from_pesos(144));

        let summary = ledger.summary();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].item_name, "Milk");
        assert_eq!(summary.quantity_sold("Milk"), 4);
        assert_eq!(summary.quantity_sold("Banana"), 2);
        assert_eq!(summary.total_sales, Money::from_pesos(144));
    }

    #[test]
    fn test_collect_resets_only_collectible_total() {
        let mut ledger = TransactionLedger::new();
        ledger.record(&item("Milk", 30), 1);
        ledger.add_sales(Money::from_pesos(30));

        assert_eq!(ledger.collect(), Money::from_pesos(30));
        assert_eq!(ledger.collect(), Money::zero());
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.lifetime_sales(), Money::from_pesos(30));
    }
}
