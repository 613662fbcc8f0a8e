//! redb-based storage layer for order event sourcing
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `events` | `(order_id, sequence)` | `OrderEvent` | Event stream (append-only) |
//! | `snapshots` | `order_id` | `OrderSnapshot` | Snapshot cache |
//! | `active_orders` | `order_id` | `()` | Orders not yet deleted |
//! | `processed_commands` | `command_id` | `order_id` | Idempotency check |
//! | `sequence_counter` | `&str` | `u64` | Global sequence and order counter |
//! | `dining_tables` | `table_id` | `DiningTable` | Mesa catalog and occupancy |
//! | `employees` | `employee_id` | `Employee` | Staff catalog |
//! | `ingredients` | `ingredient_id` | `Ingredient` | Stock levels |
//! | `recipes` | `product_id` | `Vec<RecipeLine>` | Consumption ratios |
//!
//! Catalog rows live in the same database as orders so that occupancy and
//! stock changes commit atomically with the events that cause them.

use crate::inventory::StockLedger;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{DiningTable, Employee, Ingredient, RecipeLine};
use shared::order::{OrderEvent, OrderSnapshot};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for storing events: key = (order_id, sequence), value = JSON-serialized OrderEvent
const EVENTS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("events");

/// Table for storing snapshots: key = order_id, value = JSON-serialized OrderSnapshot
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Table for tracking active orders: key = order_id, value = empty (existence check)
const ACTIVE_ORDERS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("active_orders");

/// Table for tracking processed commands: key = command_id, value = order_id it touched
const PROCESSED_COMMANDS_TABLE: TableDefinition<&str, &str> =
    TableDefinition::new("processed_commands");

/// Table for counters: key = "seq" or "order_count", value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const DINING_TABLES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("dining_tables");
const EMPLOYEES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("employees");
const INGREDIENTS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("ingredients");
const RECIPES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("recipes");

const SEQUENCE_KEY: &str = "seq";
const ORDER_COUNT_KEY: &str = "order_count";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable once `commit()` returns, so a power loss
    /// never leaves a half-applied command behind.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(EVENTS_TABLE)?;
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
            let _ = write_txn.open_table(ACTIVE_ORDERS_TABLE)?;
            let _ = write_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(EMPLOYEES_TABLE)?;
            let _ = write_txn.open_table(INGREDIENTS_TABLE)?;
            let _ = write_txn.open_table(RECIPES_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    /// Get current sequence (read-only)
    pub fn get_current_sequence(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Get current sequence (within transaction)
    pub fn get_current_sequence_txn(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let table = txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Set sequence number (within transaction)
    pub fn set_sequence(&self, txn: &WriteTransaction, sequence: u64) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        table.insert(SEQUENCE_KEY, sequence)?;
        Ok(())
    }

    // ========== Order Counter (for order numbers) ==========

    /// Increment the order counter inside the command's transaction.
    ///
    /// A failed command rolls the counter back with everything else, so
    /// order numbers are never burned.
    pub fn next_order_count_txn(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(ORDER_COUNT_KEY)?
            .map(|g| g.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(ORDER_COUNT_KEY, next)?;
        Ok(next)
    }

    // ========== Command Idempotency ==========

    /// Order touched by an already processed command, if any
    pub fn get_processed_command(&self, command_id: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.map(|v| v.value().to_string()))
    }

    /// Order touched by an already processed command (within transaction)
    pub fn get_processed_command_txn(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<Option<String>> {
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        let order_id = table.get(command_id)?.map(|v| v.value().to_string());
        Ok(order_id)
    }

    /// Mark a command as processed against the order it touched
    pub fn mark_command_processed(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
        order_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        table.insert(command_id, order_id)?;
        Ok(())
    }

    // ========== Event Operations ==========

    /// Store an event
    pub fn store_event(&self, txn: &WriteTransaction, event: &OrderEvent) -> StorageResult<()> {
        let mut table = txn.open_table(EVENTS_TABLE)?;
        let key = (event.order_id.as_str(), event.sequence);
        let value = serde_json::to_vec(event)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Get all events for an order
    pub fn get_events_for_order(&self, order_id: &str) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;

        let mut events = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (_key, value) = result?;
            let event: OrderEvent = serde_json::from_slice(value.value())?;
            events.push(event);
        }

        events.sort_by_key(|e| e.sequence);
        Ok(events)
    }

    /// Get events since a given sequence (across all orders)
    pub fn get_events_since(&self, since_sequence: u64) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;

        let mut events = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let event: OrderEvent = serde_json::from_slice(value.value())?;
            if event.sequence > since_sequence {
                events.push(event);
            }
        }

        events.sort_by_key(|e| e.sequence);
        Ok(events)
    }

    // ========== Snapshot Operations ==========

    /// Store a snapshot
    pub fn store_snapshot(
        &self,
        txn: &WriteTransaction,
        snapshot: &OrderSnapshot,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
        let value = serde_json::to_vec(snapshot)?;
        table.insert(snapshot.order_id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> StorageResult<Option<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a snapshot by order ID (within transaction)
    pub fn get_snapshot_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<OrderSnapshot>> {
        let table = txn.open_table(SNAPSHOTS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Every stored snapshot, including closed and deleted orders
    pub fn get_all_snapshots(&self) -> StorageResult<Vec<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        let mut snapshots: Vec<OrderSnapshot> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            snapshots.push(serde_json::from_slice(value.value())?);
        }
        snapshots.sort_by_key(|s| s.created_at);
        Ok(snapshots)
    }

    // ========== Active Orders ==========

    /// Mark an order as active
    pub fn mark_order_active(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.insert(order_id, ())?;
        Ok(())
    }

    /// Mark an order as inactive
    pub fn mark_order_inactive(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    /// Get all active order snapshots, oldest first
    pub fn get_active_orders(&self) -> StorageResult<Vec<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let active_table = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots_table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        let mut snapshots = Vec::new();
        for result in active_table.iter()? {
            let (key, _) = result?;
            if let Some(value) = snapshots_table.get(key.value())? {
                let snapshot: OrderSnapshot = serde_json::from_slice(value.value())?;
                snapshots.push(snapshot);
            }
        }

        snapshots.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.last_sequence.cmp(&b.last_sequence))
        });
        Ok(snapshots)
    }

    // ========== Dining Tables ==========

    /// Insert or replace a table (own transaction)
    pub fn put_table(&self, table: &DiningTable) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        self.put_table_txn(&txn, table)?;
        txn.commit()?;
        Ok(())
    }

    pub fn put_table_txn(&self, txn: &WriteTransaction, table: &DiningTable) -> StorageResult<()> {
        let mut t = txn.open_table(DINING_TABLES_TABLE)?;
        let value = serde_json::to_vec(table)?;
        t.insert(table.id, value.as_slice())?;
        Ok(())
    }

    pub fn get_table(&self, table_id: i64) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;
        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: i64,
    ) -> StorageResult<Option<DiningTable>> {
        let t = txn.open_table(DINING_TABLES_TABLE)?;
        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Employees ==========

    pub fn put_employee(&self, employee: &Employee) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut t = txn.open_table(EMPLOYEES_TABLE)?;
            let value = serde_json::to_vec(employee)?;
            t.insert(employee.id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_employee_txn(
        &self,
        txn: &WriteTransaction,
        employee_id: i64,
    ) -> StorageResult<Option<Employee>> {
        let t = txn.open_table(EMPLOYEES_TABLE)?;
        match t.get(employee_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Ingredients & Recipes ==========

    pub fn put_ingredient(&self, ingredient: &Ingredient) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        self.put_ingredient_txn(&txn, ingredient)?;
        txn.commit()?;
        Ok(())
    }

    pub fn put_ingredient_txn(
        &self,
        txn: &WriteTransaction,
        ingredient: &Ingredient,
    ) -> StorageResult<()> {
        let mut t = txn.open_table(INGREDIENTS_TABLE)?;
        let value = serde_json::to_vec(ingredient)?;
        t.insert(ingredient.id, value.as_slice())?;
        Ok(())
    }

    pub fn get_ingredient(&self, ingredient_id: i64) -> StorageResult<Option<Ingredient>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(INGREDIENTS_TABLE)?;
        match t.get(ingredient_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace the recipe of a product
    pub fn put_recipe(&self, product_id: i64, lines: &[RecipeLine]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut t = txn.open_table(RECIPES_TABLE)?;
            let value = serde_json::to_vec(lines)?;
            t.insert(product_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Snapshot of stock and recipes for pure checks
    pub fn load_stock_ledger(&self) -> StorageResult<StockLedger> {
        let read_txn = self.db.begin_read()?;
        let ingredients_table = read_txn.open_table(INGREDIENTS_TABLE)?;
        let recipes_table = read_txn.open_table(RECIPES_TABLE)?;

        let mut ingredients: Vec<Ingredient> = Vec::new();
        for result in ingredients_table.iter()? {
            let (_key, value) = result?;
            ingredients.push(serde_json::from_slice(value.value())?);
        }
        let mut lines: Vec<RecipeLine> = Vec::new();
        for result in recipes_table.iter()? {
            let (_key, value) = result?;
            let recipe: Vec<RecipeLine> = serde_json::from_slice(value.value())?;
            lines.extend(recipe);
        }
        Ok(StockLedger::new(ingredients, lines))
    }

    /// Same as [`Self::load_stock_ledger`] but sees uncommitted writes of `txn`
    pub fn load_stock_ledger_txn(&self, txn: &WriteTransaction) -> StorageResult<StockLedger> {
        let mut ingredients: Vec<Ingredient> = Vec::new();
        {
            let t = txn.open_table(INGREDIENTS_TABLE)?;
            for result in t.iter()? {
                let (_key, value) = result?;
                ingredients.push(serde_json::from_slice(value.value())?);
            }
        }
        let mut lines: Vec<RecipeLine> = Vec::new();
        {
            let t = txn.open_table(RECIPES_TABLE)?;
            for result in t.iter()? {
                let (_key, value) = result?;
                let recipe: Vec<RecipeLine> = serde_json::from_slice(value.value())?;
                lines.extend(recipe);
            }
        }
        Ok(StockLedger::new(ingredients, lines))
    }
}
