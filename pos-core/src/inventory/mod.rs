//! Ingredient stock and sale gating

mod ledger;

pub use ledger::{InventoryError, StockLedger, StockShortage, StockUsage};
