//! Kanban board projection
//!
//! Boards are recomputed from order snapshots on demand and never stored.
//! Grouping is a stable partition: entries keep their input order inside
//! each column and nothing is re-sorted.

mod watcher;

pub use watcher::BoardWatcher;

use serde::Serialize;

use crate::core::PriorityThresholds;
use shared::order::{ItemStatus, OrderSnapshot, OrderStatus, Priority, Station};

const MINUTE_MILLIS: i64 = 60_000;

/// One board column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column<K, T> {
    pub key: K,
    pub entries: Vec<T>,
}

/// Partition `entries` into `columns` in column order.
///
/// Entries whose key is not a column are dropped.
pub fn project<K, T>(
    entries: impl IntoIterator<Item = T>,
    columns: &[K],
    key_of: impl Fn(&T) -> K,
) -> Vec<Column<K, T>>
where
    K: PartialEq + Copy,
{
    let mut board: Vec<Column<K, T>> = columns
        .iter()
        .map(|key| Column {
            key: *key,
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        let key = key_of(&entry);
        if let Some(column) = board.iter_mut().find(|c| c.key == key) {
            column.entries.push(entry);
        }
    }
    board
}

/// Wait-time priority
pub fn priority_for(wait_minutes: i64, thresholds: &PriorityThresholds) -> Priority {
    if wait_minutes >= thresholds.urgent_minutes {
        Priority::Urgent
    } else if wait_minutes >= thresholds.high_minutes {
        Priority::High
    } else if wait_minutes >= thresholds.medium_minutes {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Kitchen card for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTicket {
    pub order_id: String,
    pub order_number: String,
    pub table_number: Option<String>,
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
    pub station: Station,
    pub status: ItemStatus,
    pub note: Option<String>,
    /// Minutes since the item was ordered
    pub wait_minutes: i64,
    pub priority: Priority,
}

/// Flatten orders into item tickets, keeping order then item order
pub fn item_tickets(
    orders: &[OrderSnapshot],
    now: i64,
    thresholds: &PriorityThresholds,
    station: Option<Station>,
) -> Vec<ItemTicket> {
    orders
        .iter()
        .filter(|o| !o.is_deleted())
        .flat_map(|order| {
            order
                .items
                .iter()
                .filter(move |item| station.is_none_or(|s| item.station == s))
                .map(move |item| {
                    let wait_minutes = (now - item.created_at).max(0) / MINUTE_MILLIS;
                    ItemTicket {
                        order_id: order.order_id.clone(),
                        order_number: order.order_number.clone(),
                        table_number: order.table_number.clone(),
                        item_id: item.item_id.clone(),
                        name: item.name.clone(),
                        quantity: item.quantity,
                        station: item.station,
                        status: item.status,
                        note: item.note.clone(),
                        wait_minutes,
                        priority: priority_for(wait_minutes, thresholds),
                    }
                })
        })
        .collect()
}

/// Queued or preparing items waiting at least the high threshold
pub fn urgent_items(
    orders: &[OrderSnapshot],
    now: i64,
    thresholds: &PriorityThresholds,
    station: Option<Station>,
) -> Vec<ItemTicket> {
    item_tickets(orders, now, thresholds, station)
        .into_iter()
        .filter(|t| matches!(t.status, ItemStatus::Queued | ItemStatus::Preparing))
        .filter(|t| t.priority >= Priority::High)
        .collect()
}

/// Order card for the order-mode board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCard {
    pub order_id: String,
    pub order_number: String,
    pub table_number: Option<String>,
    pub waiter_name: String,
    pub status: OrderStatus,
    pub total: f64,
    pub item_count: usize,
}

impl From<&OrderSnapshot> for OrderCard {
    fn from(order: &OrderSnapshot) -> Self {
        Self {
            order_id: order.order_id.clone(),
            order_number: order.order_number.clone(),
            table_number: order.table_number.clone(),
            waiter_name: order.waiter_name.clone(),
            status: order.status,
            total: order.total,
            item_count: order.active_items().count(),
        }
    }
}

pub type ItemBoard = Vec<Column<ItemStatus, ItemTicket>>;
pub type OrderBoard = Vec<Column<OrderStatus, OrderCard>>;

pub fn item_board(
    orders: &[OrderSnapshot],
    now: i64,
    thresholds: &PriorityThresholds,
    station: Option<Station>,
) -> ItemBoard {
    project(
        item_tickets(orders, now, thresholds, station),
        &ItemStatus::BOARD,
        |t| t.status,
    )
}

pub fn order_board(orders: &[OrderSnapshot]) -> OrderBoard {
    project(
        orders
            .iter()
            .filter(|o| !o.is_deleted())
            .map(OrderCard::from),
        &OrderStatus::BOARD,
        |c| c.status,
    )
}

/// Read-only projected view for kitchen and cashier screens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub generated_at: i64,
    pub station: Option<Station>,
    pub items: ItemBoard,
    pub orders: OrderBoard,
    pub open_orders: usize,
    /// Sum of totals over the projected orders
    pub open_total: f64,
}

impl BoardView {
    pub fn build(
        orders: &[OrderSnapshot],
        now: i64,
        thresholds: &PriorityThresholds,
        station: Option<Station>,
    ) -> Self {
        let orders_board = order_board(orders);
        let open_total: rust_decimal::Decimal = orders_board
            .iter()
            .flat_map(|c| c.entries.iter())
            .map(|c| crate::orders::money::to_decimal(c.total))
            .sum();

        Self {
            generated_at: now,
            station,
            items: item_board(orders, now, thresholds, station),
            open_orders: orders_board.iter().map(|c| c.entries.len()).sum(),
            open_total: crate::orders::money::to_f64(open_total),
            orders: orders_board,
        }
    }

    pub fn empty(now: i64) -> Self {
        Self::build(&[], now, &PriorityThresholds::default(), None)
    }

    pub fn column(&self, status: ItemStatus) -> &[ItemTicket] {
        self.items
            .iter()
            .find(|c| c.key == status)
            .map(|c| c.entries.as_slice())
            .unwrap_or(&[])
    }
}
