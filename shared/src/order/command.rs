//! Order commands - requests to mutate orders

use super::types::{ItemInput, OrderType, PaymentMethod, Station};
use crate::error::AppError;
use crate::models::Role;
use serde::{Deserialize, Serialize};

/// Command envelope
///
/// `command_id` is the idempotency key: a retried command with the same id
/// is acknowledged as a duplicate and never re-applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCommand {
    pub command_id: String,
    pub operator_id: i64,
    pub operator_name: String,
    /// Role of the operator's session
    pub role: Role,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Compare-and-swap guard against the order version the caller last saw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    pub fn new(
        operator_id: i64,
        operator_name: impl Into<String>,
        role: Role,
        payload: OrderCommandPayload,
    ) -> Self {
        Self {
            command_id: crate::util::new_id(),
            operator_id,
            operator_name: operator_name.into(),
            role,
            timestamp: crate::util::now_millis(),
            expected_version: None,
            payload,
        }
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    pub fn with_command_id(mut self, command_id: impl Into<String>) -> Self {
        self.command_id = command_id.into();
        self
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    OpenOrder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<i64>,
        waiter_id: i64,
        order_type: OrderType,
        guest_count: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
    },
    AddItem {
        order_id: String,
        item: ItemInput,
    },
    AdvanceItem {
        order_id: String,
        item_id: String,
    },
    CancelItem {
        order_id: String,
        item_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Only the `Some` fields change
    UpdateItem {
        order_id: String,
        item_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<i32>,
        /// An empty note clears it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        station: Option<Station>,
    },
    RemoveItem {
        order_id: String,
        item_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    ProcessPayment {
        order_id: String,
        method: PaymentMethod,
        /// Amount handed over
        amount: f64,
    },
    VoidPayment {
        order_id: String,
        payment_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    UpdateOrderInfo {
        order_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        guest_count: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        waiter_id: Option<i64>,
    },
    DeleteOrder {
        order_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl OrderCommandPayload {
    /// Target order; `None` for commands that create one
    pub fn order_id(&self) -> Option<&str> {
        match self {
            OrderCommandPayload::OpenOrder { .. } => None,
            OrderCommandPayload::AddItem { order_id, .. }
            | OrderCommandPayload::AdvanceItem { order_id, .. }
            | OrderCommandPayload::CancelItem { order_id, .. }
            | OrderCommandPayload::UpdateItem { order_id, .. }
            | OrderCommandPayload::RemoveItem { order_id, .. }
            | OrderCommandPayload::ProcessPayment { order_id, .. }
            | OrderCommandPayload::VoidPayment { order_id, .. }
            | OrderCommandPayload::UpdateOrderInfo { order_id, .. }
            | OrderCommandPayload::DeleteOrder { order_id, .. } => Some(order_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrderCommandPayload::OpenOrder { .. } => "open_order",
            OrderCommandPayload::AddItem { .. } => "add_item",
            OrderCommandPayload::AdvanceItem { .. } => "advance_item",
            OrderCommandPayload::CancelItem { .. } => "cancel_item",
            OrderCommandPayload::UpdateItem { .. } => "update_item",
            OrderCommandPayload::RemoveItem { .. } => "remove_item",
            OrderCommandPayload::ProcessPayment { .. } => "process_payment",
            OrderCommandPayload::VoidPayment { .. } => "void_payment",
            OrderCommandPayload::UpdateOrderInfo { .. } => "update_order_info",
            OrderCommandPayload::DeleteOrder { .. } => "delete_order",
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    pub command_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Order version after the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// The command id was already processed; nothing was applied
    #[serde(default)]
    pub duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order_id: Option<String>, version: Option<u64>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            version,
            duplicate: false,
            error: None,
        }
    }

    /// Acknowledge a replayed command with the order it touched first time
    pub fn duplicate(command_id: String, order_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            version: None,
            duplicate: true,
            error: None,
        }
    }

    pub fn error(command_id: String, error: AppError) -> Self {
        Self {
            command_id,
            success: false,
            order_id: None,
            version: None,
            duplicate: false,
            error: Some(error),
        }
    }
}
