//! OrdersManager - Core command processing and event generation
//!
//! This module handles:
//! - Permission checks against the caller's session
//! - Command validation and processing
//! - Event generation with global sequence numbers
//! - Persistence to redb (transactional)
//! - Snapshot updates and catalog side effects (tables, stock)
//! - Event broadcasting
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Permission gate (role → capability)
//!     ├─ 2. Idempotency check (command_id)
//!     ├─ 3. Begin write transaction
//!     ├─ 4. Version check (expected_version)
//!     ├─ 5. Convert command to action and execute
//!     ├─ 6. Apply events to snapshots via EventApplier
//!     ├─ 7. Persist events, snapshots, tables and stock
//!     ├─ 8. Mark command processed
//!     ├─ 9. Commit transaction
//!     ├─ 10. Broadcast event(s)
//!     └─ 11. Return response
//! ```

mod error;
pub use error::*;

use super::actions::CommandAction;
use super::appliers::EventAction;
use super::queries::{self, OpenAccount, OrderStats, PaymentStats, StationStats};
use super::storage::{OrderStorage, StorageError};
use super::traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier, OrderError};
use crate::auth::permissions::STOCK_CHECK_CAPABILITIES;
use crate::auth::{PermissionGate, Session};
use crate::core::{Config, OrderPolicy, PriorityThresholds};
use crate::kanban::{self, BoardView, ItemTicket};
use parking_lot::RwLock;
use shared::error::{AppError, AppResult};
use shared::models::{Capability, Ingredient, PermissionFlags};
use shared::order::{
    CommandResponse, EventPayload, ItemInput, OrderCommand, OrderCommandPayload, OrderEvent,
    OrderItem, OrderSnapshot, OrderStatus, OrderType, PaymentMethod, PaymentRecord, Station,
};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Server clock (Unix milliseconds)
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Fields accepted by [`OrdersManager::update_order_info`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderInfoUpdate {
    pub customer_name: Option<String>,
    pub guest_count: Option<i32>,
    pub table_id: Option<i64>,
    pub waiter_id: Option<i64>,
}

/// Fields accepted by [`OrdersManager::update_item`]; an empty note clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub quantity: Option<i32>,
    pub note: Option<String>,
    pub station: Option<Station>,
}

/// Fields accepted by [`OrdersManager::open_order`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub table_id: Option<i64>,
    pub waiter_id: i64,
    pub order_type: OrderType,
    pub guest_count: i32,
    pub customer_name: Option<String>,
}

/// Per-command knobs for the typed surface
///
/// `command_id` makes a retry idempotent; `expected_version` rejects the
/// command with `Conflict` when the order moved on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOptions {
    pub command_id: Option<String>,
    pub expected_version: Option<u64>,
}

impl CommandOptions {
    pub fn with_command_id(mut self, command_id: impl Into<String>) -> Self {
        self.command_id = Some(command_id.into());
        self
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Result of a settled payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub payment: PaymentRecord,
    pub change: f64,
    pub order: OrderSnapshot,
}

/// OrdersManager for command processing
///
/// The `epoch` field is a unique identifier generated on each startup.
/// Clients use it to detect restarts and trigger a full resync.
pub struct OrdersManager {
    storage: OrderStorage,
    event_tx: broadcast::Sender<OrderEvent>,
    epoch: String,
    policy: OrderPolicy,
    priority: PriorityThresholds,
    clock: Arc<RwLock<Clock>>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("epoch", &self.epoch)
            .field("policy", &self.policy)
            .finish()
    }
}

impl OrdersManager {
    /// Create a new OrdersManager backed by the configured database file
    pub fn new(config: &Config) -> ManagerResult<Self> {
        if let Some(dir) = config.database_path().parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ManagerError::Internal(format!("create {}: {e}", dir.display())))?;
        }
        let storage = OrderStorage::open(config.database_path())?;
        let manager = Self::build(storage, config.event_channel_capacity)
            .with_policy(config.order_policy())
            .with_priority(config.priority);
        tracing::info!(
            epoch = %manager.epoch,
            environment = %config.environment,
            "OrdersManager started with new epoch"
        );
        Ok(manager)
    }

    /// Create an OrdersManager with existing storage (for testing)
    #[cfg(test)]
    pub fn with_storage(storage: OrderStorage) -> Self {
        Self::build(storage, 1024)
    }

    fn build(storage: OrderStorage, capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));
        let clock: Clock = Arc::new(shared::util::now_millis);
        Self {
            storage,
            event_tx,
            epoch: uuid::Uuid::new_v4().to_string(),
            policy: OrderPolicy::default(),
            priority: PriorityThresholds::default(),
            clock: Arc::new(RwLock::new(clock)),
        }
    }

    pub fn with_policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_priority(mut self, priority: PriorityThresholds) -> Self {
        self.priority = priority;
        self
    }

    /// Replace the server clock. Shared by every clone of this manager.
    pub fn set_clock(&self, clock: impl Fn() -> i64 + Send + Sync + 'static) {
        *self.clock.write() = Arc::new(clock);
    }

    /// Current server time (Unix milliseconds)
    pub fn now(&self) -> i64 {
        let clock = self.clock.read().clone();
        clock()
    }

    /// Get the server epoch (unique instance ID)
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn policy(&self) -> &OrderPolicy {
        &self.policy
    }

    pub fn priority(&self) -> PriorityThresholds {
        self.priority
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: OrderCommand) -> CommandResponse {
        self.execute_command_with_events(cmd).0
    }

    /// Execute a command and return both the response and generated events
    ///
    /// Events are broadcast to subscribers before they are returned.
    pub fn execute_command_with_events(
        &self,
        cmd: OrderCommand,
    ) -> (CommandResponse, Vec<OrderEvent>) {
        let command_id = cmd.command_id.clone();
        match self.process_command(cmd) {
            Ok((response, events)) => {
                // Broadcast events after successful commit
                for event in &events {
                    if self.event_tx.send(event.clone()).is_err() {
                        tracing::debug!("Event broadcast skipped: no active receivers");
                        break;
                    }
                }
                (response, events)
            }
            Err(err) => {
                tracing::warn!(command_id = %command_id, error = %err, "Command rejected");
                (CommandResponse::error(command_id, err.into()), vec![])
            }
        }
    }

    /// Process command and return response with events
    ///
    /// Any error before step 9 drops the transaction, so a failed command
    /// commits nothing.
    fn process_command(
        &self,
        cmd: OrderCommand,
    ) -> ManagerResult<(CommandResponse, Vec<OrderEvent>)> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Permission gate (before any storage access)
        let session = Session::new(cmd.operator_id, cmd.operator_name.clone(), cmd.role);
        PermissionGate::require(&session, PermissionGate::capability_for(&cmd.payload))?;

        // 2. Idempotency check (before transaction)
        if let Some(order_id) = self.storage.get_processed_command(&cmd.command_id)? {
            tracing::warn!(command_id = %cmd.command_id, order_id = %order_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id, Some(order_id)), vec![]));
        }

        // 3. Begin write transaction
        let txn = self.storage.begin_write()?;

        // Double-check idempotency within transaction
        if let Some(order_id) = self
            .storage
            .get_processed_command_txn(&txn, &cmd.command_id)?
        {
            return Ok((CommandResponse::duplicate(cmd.command_id, Some(order_id)), vec![]));
        }

        // 4. Optimistic concurrency guard
        if let (Some(expected), Some(order_id)) = (cmd.expected_version, cmd.payload.order_id()) {
            let snapshot = self
                .storage
                .get_snapshot_txn(&txn, order_id)?
                .filter(|s| !s.is_deleted())
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
            if snapshot.version != expected {
                return Err(OrderError::Conflict {
                    order_id: order_id.to_string(),
                    expected,
                    actual: snapshot.version,
                }
                .into());
            }
        }

        // 5. Create context, convert to action and execute
        let current_sequence = self.storage.get_current_sequence_txn(&txn)?;
        let mut ctx = CommandContext::new(
            &txn,
            &self.storage,
            current_sequence,
            self.policy,
            self.now(),
        );
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            operator_id: cmd.operator_id,
            operator_name: cmd.operator_name.clone(),
            role: cmd.role,
            timestamp: cmd.timestamp,
        };

        let action: CommandAction = (&cmd).into();
        let events = futures::executor::block_on(action.execute(&mut ctx, &metadata))?;

        // 6. Apply events to snapshots
        for event in &events {
            let mut snapshot = ctx
                .load_snapshot(&event.order_id)
                .unwrap_or_else(|_| OrderSnapshot::new(event.order_id.clone()));

            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);

            ctx.save_snapshot(snapshot);
        }

        // 7. Persist events, snapshots and catalog side effects
        for event in &events {
            self.storage.store_event(&txn, event)?;
        }

        let mut version = None;
        for snapshot in ctx.modified_snapshots() {
            self.storage.store_snapshot(&txn, snapshot)?;

            if snapshot.is_deleted() || snapshot.status == OrderStatus::Paid {
                self.storage.mark_order_inactive(&txn, &snapshot.order_id)?;
            } else {
                self.storage.mark_order_active(&txn, &snapshot.order_id)?;
            }

            if events.first().is_some_and(|e| e.order_id == snapshot.order_id) {
                version = Some(snapshot.version);
            }
        }

        for table in ctx.modified_tables() {
            self.storage.put_table_txn(&txn, table)?;
        }
        for ingredient in ctx.modified_ingredients() {
            self.storage.put_ingredient_txn(&txn, ingredient)?;
        }

        let max_sequence = events
            .iter()
            .map(|e| e.sequence)
            .max()
            .unwrap_or(current_sequence);
        if max_sequence > current_sequence {
            self.storage.set_sequence(&txn, max_sequence)?;
        }

        // 8. Mark command processed
        let order_id = events.first().map(|e| e.order_id.clone());
        let touched = order_id.as_deref().unwrap_or_default();
        self.storage
            .mark_command_processed(&txn, &cmd.command_id, touched)?;

        // 9. Commit transaction
        txn.commit().map_err(StorageError::from)?;

        // 11. Return response
        tracing::info!(
            command_id = %cmd.command_id,
            command = cmd.payload.name(),
            order_id = ?order_id,
            event_count = events.len(),
            "Command processed successfully"
        );
        Ok((CommandResponse::success(cmd.command_id, order_id, version), events))
    }

    // ========== Typed Command Surface ==========

    /// Run a payload for `session` and return the resulting order state
    ///
    /// A replayed command id answers with the current snapshot and the
    /// events its first run recorded.
    fn submit(
        &self,
        session: &Session,
        payload: OrderCommandPayload,
        options: CommandOptions,
    ) -> AppResult<(OrderSnapshot, Vec<OrderEvent>)> {
        let mut cmd = OrderCommand::new(
            session.user_id,
            session.user_name.clone(),
            session.role,
            payload,
        );
        if let Some(command_id) = options.command_id {
            cmd = cmd.with_command_id(command_id);
        }
        if let Some(version) = options.expected_version {
            cmd = cmd.with_expected_version(version);
        }
        let command_id = cmd.command_id.clone();

        let (response, mut events) = self.execute_command_with_events(cmd);
        if let Some(err) = response.error {
            return Err(err);
        }
        let order_id = response
            .order_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::internal("command touched no order"))?;
        if response.duplicate {
            events = self
                .storage
                .get_events_for_order(&order_id)
                .map_err(ManagerError::from)?
                .into_iter()
                .filter(|e| e.command_id == command_id)
                .collect();
        }
        let snapshot = self
            .storage
            .get_snapshot(&order_id)
            .map_err(ManagerError::from)?
            .ok_or_else(|| AppError::not_found(format!("order {order_id}")))?;
        Ok((snapshot, events))
    }

    /// crear: open an order for a table and waiter
    pub fn open_order(
        &self,
        session: &Session,
        order: NewOrder,
        options: CommandOptions,
    ) -> AppResult<OrderSnapshot> {
        let payload = OrderCommandPayload::OpenOrder {
            table_id: order.table_id,
            waiter_id: order.waiter_id,
            order_type: order.order_type,
            guest_count: order.guest_count,
            customer_name: order.customer_name,
        };
        Ok(self.submit(session, payload, options)?.0)
    }

    /// Add one product line after the stock check
    pub fn add_item(
        &self,
        session: &Session,
        order_id: &str,
        item: ItemInput,
        options: CommandOptions,
    ) -> AppResult<OrderItem> {
        let payload = OrderCommandPayload::AddItem {
            order_id: order_id.to_string(),
            item,
        };
        let (snapshot, events) = self.submit(session, payload, options)?;
        let item_id = events
            .iter()
            .find_map(|e| match &e.payload {
                EventPayload::ItemAdded { item } => Some(item.item_id.clone()),
                _ => None,
            })
            .ok_or_else(|| AppError::internal("AddItem produced no ItemAdded event"))?;
        find_item(&snapshot, &item_id)
    }

    /// avanzar: move an item one step along the kitchen flow
    pub fn advance_item(
        &self,
        session: &Session,
        order_id: &str,
        item_id: &str,
        options: CommandOptions,
    ) -> AppResult<OrderItem> {
        let payload = OrderCommandPayload::AdvanceItem {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        };
        let (snapshot, _) = self.submit(session, payload, options)?;
        find_item(&snapshot, item_id)
    }

    /// cancelar: cancel an item that has not been served
    pub fn cancel_item(
        &self,
        session: &Session,
        order_id: &str,
        item_id: &str,
        reason: Option<String>,
        options: CommandOptions,
    ) -> AppResult<OrderItem> {
        let payload = OrderCommandPayload::CancelItem {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            reason,
        };
        let (snapshot, _) = self.submit(session, payload, options)?;
        find_item(&snapshot, item_id)
    }

    /// Edit quantity, note or station of a line still in the kitchen flow
    pub fn update_item(
        &self,
        session: &Session,
        order_id: &str,
        item_id: &str,
        update: ItemUpdate,
        options: CommandOptions,
    ) -> AppResult<OrderItem> {
        let payload = OrderCommandPayload::UpdateItem {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            quantity: update.quantity,
            note: update.note,
            station: update.station,
        };
        let (snapshot, _) = self.submit(session, payload, options)?;
        find_item(&snapshot, item_id)
    }

    /// Drop a line entered by mistake; returns the order without it
    pub fn remove_item(
        &self,
        session: &Session,
        order_id: &str,
        item_id: &str,
        reason: Option<String>,
        options: CommandOptions,
    ) -> AppResult<OrderSnapshot> {
        let payload = OrderCommandPayload::RemoveItem {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            reason,
        };
        Ok(self.submit(session, payload, options)?.0)
    }

    /// procesarPago: settle a served order
    pub fn process_payment(
        &self,
        session: &Session,
        order_id: &str,
        method: PaymentMethod,
        amount: f64,
        options: CommandOptions,
    ) -> AppResult<PaymentReceipt> {
        let payload = OrderCommandPayload::ProcessPayment {
            order_id: order_id.to_string(),
            method,
            amount,
        };
        let (order, events) = self.submit(session, payload, options)?;
        let payment = events
            .into_iter()
            .find_map(|e| match e.payload {
                EventPayload::PaymentProcessed { payment } => Some(payment),
                _ => None,
            })
            .ok_or_else(|| AppError::internal("ProcessPayment produced no payment"))?;
        Ok(PaymentReceipt {
            change: payment.change,
            payment,
            order,
        })
    }

    /// anularPago: void a payment inside the void window
    pub fn void_payment(
        &self,
        session: &Session,
        order_id: &str,
        payment_id: &str,
        reason: Option<String>,
        options: CommandOptions,
    ) -> AppResult<PaymentRecord> {
        let payload = OrderCommandPayload::VoidPayment {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            reason,
        };
        let (snapshot, _) = self.submit(session, payload, options)?;
        snapshot
            .find_payment(payment_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("payment {payment_id}")))
    }

    /// Edit table, waiter, guests or customer name without touching progress
    pub fn update_order_info(
        &self,
        session: &Session,
        order_id: &str,
        update: OrderInfoUpdate,
        options: CommandOptions,
    ) -> AppResult<OrderSnapshot> {
        let payload = OrderCommandPayload::UpdateOrderInfo {
            order_id: order_id.to_string(),
            customer_name: update.customer_name,
            guest_count: update.guest_count,
            table_id: update.table_id,
            waiter_id: update.waiter_id,
        };
        Ok(self.submit(session, payload, options)?.0)
    }

    /// eliminar: delete an order with nothing in the kitchen
    pub fn delete_order(
        &self,
        session: &Session,
        order_id: &str,
        reason: Option<String>,
        options: CommandOptions,
    ) -> AppResult<OrderSnapshot> {
        let payload = OrderCommandPayload::DeleteOrder {
            order_id: order_id.to_string(),
            reason,
        };
        Ok(self.submit(session, payload, options)?.0)
    }

    /// verificarStock: read-only stock sufficiency check
    pub fn check_stock(&self, session: &Session, product_id: i64, quantity: i32) -> AppResult<()> {
        PermissionGate::require_any(session, STOCK_CHECK_CAPABILITIES)?;
        let ledger = self
            .storage
            .load_stock_ledger()
            .map_err(ManagerError::from)?;
        ledger.check(product_id, quantity)?;
        Ok(())
    }

    /// Capability flags for UI gating
    pub fn permission_flags(&self, session: &Session) -> PermissionFlags {
        PermissionGate::flags(session.role)
    }

    // ========== Gated Read Models ==========

    /// Kitchen and order boards
    pub fn board(&self, session: &Session, station: Option<Station>) -> AppResult<BoardView> {
        PermissionGate::require(session, Capability::ViewAll)?;
        Ok(self.project_board(station)?)
    }

    /// Queued or preparing items waiting at least the `alta` threshold
    pub fn urgent_items(
        &self,
        session: &Session,
        station: Option<Station>,
    ) -> AppResult<Vec<ItemTicket>> {
        PermissionGate::require(session, Capability::ViewAll)?;
        let orders = self.get_active_orders()?;
        Ok(kanban::urgent_items(
            &orders,
            self.now(),
            &self.priority,
            station,
        ))
    }

    /// Served orders awaiting payment (cuentas abiertas)
    pub fn open_accounts(&self, session: &Session) -> AppResult<Vec<OpenAccount>> {
        PermissionGate::require(session, Capability::ViewPayments)?;
        let orders = self.get_active_orders()?;
        Ok(queries::open_accounts(&orders))
    }

    /// Payment counts and revenue per method, today and this month
    pub fn payment_stats(&self, session: &Session) -> AppResult<PaymentStats> {
        PermissionGate::require(session, Capability::ViewPayments)?;
        let orders = self
            .storage
            .get_all_snapshots()
            .map_err(ManagerError::from)?;
        Ok(queries::payment_stats(&orders, self.now()))
    }

    /// Order counts per status
    pub fn order_stats(&self, session: &Session) -> AppResult<OrderStats> {
        PermissionGate::require(session, Capability::ViewAll)?;
        let orders = self
            .storage
            .get_all_snapshots()
            .map_err(ManagerError::from)?;
        Ok(queries::order_stats(&orders))
    }

    /// Item counts, prep time and throughput of one kitchen station
    pub fn station_stats(&self, session: &Session, station: Station) -> AppResult<StationStats> {
        PermissionGate::require(session, Capability::ViewAll)?;
        let orders = self
            .storage
            .get_all_snapshots()
            .map_err(ManagerError::from)?;
        Ok(queries::station_stats(&orders, station, self.now()))
    }

    /// Ingredients at or below their minimum stock
    pub fn low_stock(&self, session: &Session) -> AppResult<Vec<Ingredient>> {
        PermissionGate::require_any(session, STOCK_CHECK_CAPABILITIES)?;
        let ledger = self
            .storage
            .load_stock_ledger()
            .map_err(ManagerError::from)?;
        Ok(ledger.low_stock().into_iter().cloned().collect())
    }

    /// Board projection over the active orders, ungated
    pub fn project_board(&self, station: Option<Station>) -> ManagerResult<BoardView> {
        let orders = self.get_active_orders()?;
        Ok(BoardView::build(&orders, self.now(), &self.priority, station))
    }

    // ========== Public Query Methods ==========

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> ManagerResult<Option<OrderSnapshot>> {
        Ok(self.storage.get_snapshot(order_id)?)
    }

    /// Get all active order snapshots
    pub fn get_active_orders(&self) -> ManagerResult<Vec<OrderSnapshot>> {
        Ok(self.storage.get_active_orders()?)
    }

    /// Get current sequence number
    pub fn get_current_sequence(&self) -> ManagerResult<u64> {
        Ok(self.storage.get_current_sequence()?)
    }

    /// Get events since a given sequence
    pub fn get_events_since(&self, since_sequence: u64) -> ManagerResult<Vec<OrderEvent>> {
        Ok(self.storage.get_events_since(since_sequence)?)
    }

    /// Get all events for a specific order
    pub fn get_events_for_order(&self, order_id: &str) -> ManagerResult<Vec<OrderEvent>> {
        Ok(self.storage.get_events_for_order(order_id)?)
    }

    /// Rebuild a snapshot from events (for verification)
    ///
    /// Uses EventApplier to apply each event to build the snapshot.
    pub fn rebuild_snapshot(&self, order_id: &str) -> ManagerResult<OrderSnapshot> {
        let events = self.storage.get_events_for_order(order_id)?;
        if events.is_empty() {
            return Err(StorageError::OrderNotFound(order_id.to_string()).into());
        }

        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        for event in &events {
            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);
        }

        Ok(snapshot)
    }
}

fn find_item(snapshot: &OrderSnapshot, item_id: &str) -> AppResult<OrderItem> {
    snapshot.find_item(item_id).cloned().ok_or_else(|| {
        AppError::not_found(format!("item {item_id} in order {}", snapshot.order_id))
    })
}

// Make OrdersManager Clone-able; clones share storage, channel and clock
impl Clone for OrdersManager {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            event_tx: self.event_tx.clone(),
            epoch: self.epoch.clone(),
            policy: self.policy,
            priority: self.priority,
            clock: self.clock.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
