//! Order snapshot - computed state from event stream

use super::types::{OrderItem, OrderType, PaymentRecord, StatusStyle};
use serde::{Deserialize, Serialize};

/// Order-level status, always derived from items and payments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Opened, no items yet
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    /// Every live item still queued
    #[serde(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "preparando")]
    Preparing,
    /// Every live item ready or served
    #[serde(rename = "lista")]
    Ready,
    /// Every live item served; awaiting payment (cuenta abierta)
    #[serde(rename = "servida")]
    Served,
    #[serde(rename = "pagada")]
    Paid,
    /// Every item cancelled
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
    ];

    /// Board column order in orders mode
    pub const BOARD: [OrderStatus; 5] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    /// No further items or edits accepted
    pub fn is_closed(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Confirmed => "confirmada",
            OrderStatus::Preparing => "preparando",
            OrderStatus::Ready => "lista",
            OrderStatus::Served => "servida",
            OrderStatus::Paid => "pagada",
            OrderStatus::Cancelled => "cancelada",
        }
    }

    pub fn style(self) -> StatusStyle {
        let (label, color, icon) = match self {
            OrderStatus::Pending => ("Pendiente", "gray", "⚫"),
            OrderStatus::Confirmed => ("Confirmada", "blue", "📋"),
            OrderStatus::Preparing => ("Preparando", "orange", "🔄"),
            OrderStatus::Ready => ("Lista", "green", "✅"),
            OrderStatus::Served => ("Servida", "purple", "🍽️"),
            OrderStatus::Paid => ("Pagada", "emerald", "💰"),
            OrderStatus::Cancelled => ("Cancelada", "red", "❌"),
        };
        StatusStyle { label, color, icon }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order snapshot - computed from event stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Order ID (assigned by server)
    pub order_id: String,
    /// Human-facing order number (numero)
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub waiter_id: i64,
    pub waiter_name: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Σ quantity × unit_price over non-cancelled items
    pub total: f64,
    pub guest_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub payments: Vec<PaymentRecord>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set while a payment is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    /// Set when an admin deletes the order; kept for audit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
    /// Monotonic version for compare-and-swap
    pub version: u64,
    /// Last applied event sequence
    pub last_sequence: u64,
}

impl OrderSnapshot {
    /// Create a new empty order
    pub fn new(order_id: String) -> Self {
        let now = crate::util::now_millis();
        Self {
            order_id,
            order_number: String::new(),
            table_id: None,
            table_number: None,
            waiter_id: 0,
            waiter_name: String::new(),
            order_type: OrderType::default(),
            status: OrderStatus::Pending,
            total: 0.0,
            guest_count: 1,
            customer_name: None,
            items: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
            closed_at: None,
            deleted_at: None,
            version: 0,
            last_sequence: 0,
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.item_id == item_id)
    }

    pub fn find_payment(&self, payment_id: &str) -> Option<&PaymentRecord> {
        self.payments.iter().find(|p| p.payment_id == payment_id)
    }

    pub fn find_payment_mut(&mut self, payment_id: &str) -> Option<&mut PaymentRecord> {
        self.payments.iter_mut().find(|p| p.payment_id == payment_id)
    }

    /// Items that count toward the total
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|i| !i.is_cancelled())
    }

    /// The payment currently settling this order, if any
    pub fn active_payment(&self) -> Option<&PaymentRecord> {
        self.payments.iter().find(|p| p.is_active())
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_settled(&self) -> bool {
        self.active_payment().is_some()
    }

    /// Items mid-preparation (preparando / listo)
    pub fn items_in_progress(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|i| i.status.is_in_progress())
    }

    pub fn has_items_in_progress(&self) -> bool {
        self.items_in_progress().next().is_some()
    }
}

impl Default for OrderSnapshot {
    fn default() -> Self {
        Self::new(String::new())
    }
}
