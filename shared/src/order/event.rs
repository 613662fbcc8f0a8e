//! Order events - immutable facts recorded after command processing

use super::types::{ItemStatus, OrderItem, OrderType, PaymentRecord, Station};
use serde::{Deserialize, Serialize};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number (authoritative ordering)
    pub sequence: u64,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Client timestamp, kept for audit only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<i64>,
    /// Operator who triggered this event
    pub operator_id: i64,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    /// Command that triggered this event
    pub command_id: String,
    pub event_type: OrderEventType,
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    // Lifecycle
    OrderOpened,
    OrderInfoUpdated,
    OrderDeleted,

    // Items
    ItemAdded,
    ItemAdvanced,
    ItemCancelled,
    ItemUpdated,
    ItemRemoved,

    // Payments
    PaymentProcessed,
    PaymentVoided,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderOpened => write!(f, "ORDER_OPENED"),
            OrderEventType::OrderInfoUpdated => write!(f, "ORDER_INFO_UPDATED"),
            OrderEventType::OrderDeleted => write!(f, "ORDER_DELETED"),
            OrderEventType::ItemAdded => write!(f, "ITEM_ADDED"),
            OrderEventType::ItemAdvanced => write!(f, "ITEM_ADVANCED"),
            OrderEventType::ItemCancelled => write!(f, "ITEM_CANCELLED"),
            OrderEventType::ItemUpdated => write!(f, "ITEM_UPDATED"),
            OrderEventType::ItemRemoved => write!(f, "ITEM_REMOVED"),
            OrderEventType::PaymentProcessed => write!(f, "PAYMENT_PROCESSED"),
            OrderEventType::PaymentVoided => write!(f, "PAYMENT_VOIDED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Lifecycle ==========
    OrderOpened {
        order_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_number: Option<String>,
        waiter_id: i64,
        waiter_name: String,
        order_type: OrderType,
        guest_count: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
    },

    /// Only the `Some` fields changed
    OrderInfoUpdated {
        #[serde(skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        guest_count: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_number: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        waiter_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        waiter_name: Option<String>,
    },

    OrderDeleted {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    // ========== Items ==========
    ItemAdded {
        item: OrderItem,
    },

    ItemAdvanced {
        item_id: String,
        from: ItemStatus,
        to: ItemStatus,
    },

    ItemCancelled {
        item_id: String,
        from: ItemStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// Only the `Some` fields changed; an empty note clears it
    ItemUpdated {
        item_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        quantity: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        station: Option<Station>,
    },

    ItemRemoved {
        item_id: String,
        name: String,
        quantity: i32,
        from: ItemStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    // ========== Payments ==========
    PaymentProcessed {
        payment: PaymentRecord,
    },

    PaymentVoided {
        payment_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl OrderEvent {
    /// Create a new event
    ///
    /// # Arguments
    /// * `sequence` - Global sequence number (authoritative ordering)
    /// * `order_id` - Order this event belongs to
    /// * `timestamp` - Server time the event takes effect
    /// * `client_timestamp` - Client-provided timestamp (for audit, may have clock skew)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        order_id: String,
        operator_id: i64,
        operator_name: String,
        command_id: String,
        timestamp: i64,
        client_timestamp: Option<i64>,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: crate::util::new_id(),
            sequence,
            order_id,
            timestamp,
            client_timestamp,
            operator_id,
            operator_name,
            command_id,
            event_type,
            payload,
        }
    }
}
