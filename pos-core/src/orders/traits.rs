//! Core traits for the command/event pipeline
//!
//! - [`CommandHandler`]: validates a command against current state and emits events
//! - [`EventApplier`]: folds one event into a snapshot (pure)
//! - [`CommandContext`]: transactional view handed to handlers

use std::collections::HashMap;

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use redb::WriteTransaction;
use thiserror::Error;

use crate::core::OrderPolicy;
use crate::inventory::{InventoryError, StockLedger};
use crate::orders::storage::{OrderStorage, StorageError};
use shared::error::{AppError, ErrorCode};
use shared::models::{DiningTable, Employee, Ingredient, Role, TableStatus};
use shared::order::{ItemStatus, ItemTransition, OrderEvent, OrderSnapshot};

/// Command metadata shared by every action
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_id: i64,
    pub operator_name: String,
    pub role: Role,
    /// Client timestamp, audit only
    pub timestamp: i64,
}

/// Errors raised while validating a command
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item {item_id} not found in order {order_id}")]
    ItemNotFound { order_id: String, item_id: String },

    #[error("Payment {payment_id} not found in order {order_id}")]
    PaymentNotFound { order_id: String, payment_id: String },

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table {table_id} is not available ({status})")]
    TableNotAvailable {
        table_id: i64,
        status: TableStatus,
        is_active: bool,
    },

    #[error("Item {item_id} cannot {transition:?} from {from}")]
    InvalidTransition {
        item_id: String,
        from: ItemStatus,
        transition: ItemTransition,
    },

    #[error("{message} ({entity_id} is {state})")]
    InvalidState {
        entity_id: String,
        state: String,
        message: String,
    },

    #[error("Order {order_id} has {} item(s) in preparation", .items.len())]
    OrderInProgress { order_id: String, items: Vec<String> },

    #[error("Cash tendered {tendered} does not cover total {total}")]
    InsufficientCash {
        order_id: String,
        total: f64,
        tendered: f64,
    },

    #[error("Payment {payment_id} can no longer be voided")]
    VoidWindowExpired {
        payment_id: String,
        paid_at: i64,
        now: i64,
        window_secs: u64,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order {order_id} is at version {actual}, expected {expected}")]
    Conflict {
        order_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for OrderError {
    fn from(err: StorageError) -> Self {
        OrderError::Storage(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::OrderNotFound(order_id) => AppError::with_message(ErrorCode::OrderNotFound, message)
                .with_detail("order_id", order_id),
            OrderError::ItemNotFound { order_id, item_id } => {
                AppError::with_message(ErrorCode::ItemNotFound, message)
                    .with_detail("order_id", order_id)
                    .with_detail("item_id", item_id)
            }
            OrderError::PaymentNotFound {
                order_id,
                payment_id,
            } => AppError::with_message(ErrorCode::PaymentNotFound, message)
                .with_detail("order_id", order_id)
                .with_detail("payment_id", payment_id),
            OrderError::TableNotFound(table_id) => {
                AppError::with_message(ErrorCode::TableNotFound, message)
                    .with_detail("table_id", table_id)
            }
            OrderError::TableNotAvailable {
                table_id,
                status,
                is_active,
            } => AppError::with_message(ErrorCode::TableNotAvailable, message)
                .with_detail("table_id", table_id)
                .with_detail("status", status.as_str())
                .with_detail("is_active", is_active),
            OrderError::InvalidTransition {
                item_id,
                from,
                transition,
            } => AppError::with_message(ErrorCode::InvalidTransition, message)
                .with_detail("item_id", item_id)
                .with_detail("from", from.as_str())
                .with_detail("transition", format!("{transition:?}").to_lowercase()),
            OrderError::InvalidState {
                entity_id, state, ..
            } => AppError::with_message(ErrorCode::InvalidState, message)
                .with_detail("entity_id", entity_id)
                .with_detail("state", state),
            OrderError::OrderInProgress { order_id, items } => {
                AppError::with_message(ErrorCode::OrderInProgress, message)
                    .with_detail("order_id", order_id)
                    .with_detail("items", items)
            }
            OrderError::InsufficientCash {
                order_id,
                total,
                tendered,
            } => AppError::with_message(ErrorCode::InsufficientCash, message)
                .with_detail("order_id", order_id)
                .with_detail("total", total)
                .with_detail("tendered", tendered),
            OrderError::VoidWindowExpired {
                payment_id,
                paid_at,
                now,
                window_secs,
            } => AppError::with_message(ErrorCode::VoidWindowExpired, message)
                .with_detail("payment_id", payment_id)
                .with_detail("paid_at", paid_at)
                .with_detail("now", now)
                .with_detail("window_secs", window_secs),
            OrderError::Inventory(e) => e.into(),
            OrderError::Validation(_) => AppError::with_message(ErrorCode::ValidationFailed, message),
            OrderError::Conflict {
                order_id,
                expected,
                actual,
            } => AppError::with_message(ErrorCode::Conflict, message)
                .with_detail("order_id", order_id)
                .with_detail("expected_version", expected)
                .with_detail("actual_version", actual),
            OrderError::Storage(_) => AppError::with_message(ErrorCode::StorageError, message),
        }
    }
}

/// Transactional context handed to command handlers
///
/// Snapshots, tables and stock read through the context see the pending
/// writes of the same command. Nothing reaches redb until the manager
/// persists the staged changes and commits.
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a OrderStorage,
    policy: OrderPolicy,
    now: i64,
    current_sequence: u64,
    snapshots: HashMap<String, OrderSnapshot>,
    snapshot_order: Vec<String>,
    tables: HashMap<i64, DiningTable>,
    ledger: Option<StockLedger>,
    consumed: HashMap<i64, Ingredient>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        txn: &'a WriteTransaction,
        storage: &'a OrderStorage,
        current_sequence: u64,
        policy: OrderPolicy,
        now: i64,
    ) -> Self {
        Self {
            txn,
            storage,
            policy,
            now,
            current_sequence,
            snapshots: HashMap::new(),
            snapshot_order: Vec::new(),
            tables: HashMap::new(),
            ledger: None,
            consumed: HashMap::new(),
        }
    }

    /// Server time of this command (Unix milliseconds)
    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn policy(&self) -> &OrderPolicy {
        &self.policy
    }

    /// Allocate the next global sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.current_sequence += 1;
        self.current_sequence
    }

    pub fn current_sequence(&self) -> u64 {
        self.current_sequence
    }

    // ========== Snapshots ==========

    /// Load a live order. Deleted orders are treated as missing.
    pub fn load_snapshot(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        let snapshot = match self.snapshots.get(order_id) {
            Some(s) => s.clone(),
            None => self
                .storage
                .get_snapshot_txn(self.txn, order_id)?
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?,
        };
        if snapshot.is_deleted() {
            return Err(OrderError::OrderNotFound(order_id.to_string()));
        }
        Ok(snapshot)
    }

    pub fn save_snapshot(&mut self, snapshot: OrderSnapshot) {
        if !self.snapshots.contains_key(&snapshot.order_id) {
            self.snapshot_order.push(snapshot.order_id.clone());
        }
        self.snapshots.insert(snapshot.order_id.clone(), snapshot);
    }

    /// Snapshots touched by this command, in first-touch order
    pub fn modified_snapshots(&self) -> impl Iterator<Item = &OrderSnapshot> {
        self.snapshot_order
            .iter()
            .filter_map(|id| self.snapshots.get(id))
    }

    // ========== Tables ==========

    pub fn load_table(&self, table_id: i64) -> Result<DiningTable, OrderError> {
        if let Some(table) = self.tables.get(&table_id) {
            return Ok(table.clone());
        }
        self.storage
            .get_table_txn(self.txn, table_id)?
            .ok_or(OrderError::TableNotFound(table_id))
    }

    /// Stage a table status change
    pub fn set_table_status(&mut self, table_id: i64, status: TableStatus) -> Result<(), OrderError> {
        let mut table = self.load_table(table_id)?;
        table.status = status;
        self.tables.insert(table_id, table);
        Ok(())
    }

    pub fn modified_tables(&self) -> impl Iterator<Item = &DiningTable> {
        self.tables.values()
    }

    // ========== Staff ==========

    pub fn load_employee(&self, employee_id: i64) -> Result<Option<Employee>, OrderError> {
        Ok(self.storage.get_employee_txn(self.txn, employee_id)?)
    }

    // ========== Stock ==========

    fn ledger(&mut self) -> Result<&mut StockLedger, OrderError> {
        if self.ledger.is_none() {
            self.ledger = Some(self.storage.load_stock_ledger_txn(self.txn)?);
        }
        self.ledger
            .as_mut()
            .ok_or_else(|| OrderError::Storage("stock ledger unavailable".to_string()))
    }

    /// Verify stock, then stage the decrement
    pub fn consume_stock(&mut self, product_id: i64, quantity: i32) -> Result<(), OrderError> {
        let changed = self.ledger()?.consume(product_id, quantity)?;
        for ingredient in changed {
            self.consumed.insert(ingredient.id, ingredient);
        }
        Ok(())
    }

    pub fn modified_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.consumed.values()
    }

    // ========== Order numbers ==========

    /// Next human-facing order number, `ORD{YYYYMMDD}{n}`
    pub fn next_order_number(&mut self) -> Result<String, OrderError> {
        let count = self.storage.next_order_count_txn(self.txn)?;
        Ok(format!(
            "ORD{}{}",
            shared::util::date_stamp(self.now),
            10_000 + count
        ))
    }
}

/// Command handler trait
///
/// Handlers never write to storage; they stage state on the context and
/// return the events that describe the change.
#[async_trait(?Send)]
pub trait CommandHandler {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError>;
}

/// Event applier trait
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent);
}
