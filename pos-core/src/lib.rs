//! Cevicheria POS core - order fulfillment and settlement engine
//!
//! # Module layout
//!
//! ```text
//! pos-core/src/
//! ├── core/       # Configuration and payment policy
//! ├── auth/       # Session context, role → capability gate
//! ├── inventory/  # Stock ledger and consumption validator
//! ├── orders/     # Event-sourced order state machine (redb)
//! ├── kanban/     # Board projection and live board watcher
//! └── utils/      # Logging
//! ```

pub mod auth;
pub mod core;
pub mod inventory;
pub mod kanban;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{PermissionGate, Session};
pub use core::{Config, OrderPolicy, PriorityThresholds};
pub use inventory::{StockLedger, StockShortage};
pub use kanban::{BoardView, BoardWatcher};
pub use orders::{OrderStorage, OrdersManager};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
