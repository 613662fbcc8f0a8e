//! Shared order types: item and payment states, stations, line records

use serde::{Deserialize, Serialize};

// ============================================================================
// Item state machine
// ============================================================================

/// Kitchen preparation state of one order line
///
/// `Queued → Preparing → Ready → Served`, or `→ Cancelled` from any
/// non-terminal state. `Served` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "en_cola")]
    Queued,
    #[serde(rename = "preparando")]
    Preparing,
    #[serde(rename = "listo")]
    Ready,
    #[serde(rename = "servido")]
    Served,
    #[serde(rename = "cancelado")]
    Cancelled,
}

/// Requested item transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTransition {
    Advance,
    Cancel,
}

/// Display style derived from a state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::Queued,
        ItemStatus::Preparing,
        ItemStatus::Ready,
        ItemStatus::Served,
        ItemStatus::Cancelled,
    ];

    /// Board column order
    pub const BOARD: [ItemStatus; 3] = [ItemStatus::Queued, ItemStatus::Preparing, ItemStatus::Ready];

    /// The single transition function for items.
    ///
    /// Returns `None` when the transition is not allowed from `self`.
    pub fn apply(self, transition: ItemTransition) -> Option<ItemStatus> {
        match (self, transition) {
            (ItemStatus::Queued, ItemTransition::Advance) => Some(ItemStatus::Preparing),
            (ItemStatus::Preparing, ItemTransition::Advance) => Some(ItemStatus::Ready),
            (ItemStatus::Ready, ItemTransition::Advance) => Some(ItemStatus::Served),
            (
                ItemStatus::Queued | ItemStatus::Preparing | ItemStatus::Ready,
                ItemTransition::Cancel,
            ) => Some(ItemStatus::Cancelled),
            (ItemStatus::Served | ItemStatus::Cancelled, _) => None,
        }
    }

    pub fn next(self) -> Option<ItemStatus> {
        self.apply(ItemTransition::Advance)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Served | ItemStatus::Cancelled)
    }

    /// Mid-preparation items block order deletion
    pub fn is_in_progress(self) -> bool {
        matches!(self, ItemStatus::Preparing | ItemStatus::Ready)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Queued => "en_cola",
            ItemStatus::Preparing => "preparando",
            ItemStatus::Ready => "listo",
            ItemStatus::Served => "servido",
            ItemStatus::Cancelled => "cancelado",
        }
    }

    pub fn style(self) -> StatusStyle {
        match self {
            ItemStatus::Queued => StatusStyle {
                label: "En Cola",
                color: "blue",
                icon: "🟢",
            },
            ItemStatus::Preparing => StatusStyle {
                label: "Preparando",
                color: "yellow",
                icon: "🟡",
            },
            ItemStatus::Ready => StatusStyle {
                label: "Listo",
                color: "red",
                icon: "🔴",
            },
            ItemStatus::Served => StatusStyle {
                label: "Servido",
                color: "gray",
                icon: "⚪",
            },
            ItemStatus::Cancelled => StatusStyle {
                label: "Cancelado",
                color: "orange",
                icon: "🟠",
            },
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kitchen station an item routes to (estacion)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Station {
    #[serde(rename = "frio")]
    Cold,
    #[default]
    #[serde(rename = "caliente")]
    Hot,
    #[serde(rename = "bebida")]
    Drink,
    #[serde(rename = "postre")]
    Dessert,
}

impl Station {
    pub const ALL: [Station; 4] = [Station::Cold, Station::Hot, Station::Drink, Station::Dessert];

    pub fn label(self) -> &'static str {
        match self {
            Station::Cold => "Fríos",
            Station::Hot => "Calientes",
            Station::Drink => "Bebidas",
            Station::Dessert => "Postres",
        }
    }
}

/// Kitchen urgency derived from wait time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "urgente")]
    Urgent,
}

// ============================================================================
// Order classification
// ============================================================================

/// Service type (tipo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderType {
    #[default]
    #[serde(rename = "local")]
    DineIn,
    #[serde(rename = "llevar")]
    Takeaway,
    #[serde(rename = "delivery")]
    Delivery,
}

impl OrderType {
    pub fn requires_table(self) -> bool {
        matches!(self, OrderType::DineIn)
    }
}

// ============================================================================
// Payments
// ============================================================================

/// Payment method (metodo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "yape")]
    Yape,
    #[serde(rename = "plin")]
    Plin,
    #[serde(rename = "transferencia")]
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Yape,
        PaymentMethod::Plin,
        PaymentMethod::Transfer,
    ];

    pub fn is_cash(self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Plin => "plin",
            PaymentMethod::Transfer => "transferencia",
        }
    }
}

/// Payment record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "pagado")]
    Paid,
    #[serde(rename = "anulado")]
    Voided,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pendiente",
            PaymentStatus::Paid => "pagado",
            PaymentStatus::Voided => "anulado",
        }
    }
}

// ============================================================================
// Line records
// ============================================================================

/// Item to add to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(default)]
    pub station: Station,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Order line as stored in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub order_id: String,
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub status: ItemStatus,
    pub station: Station,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl OrderItem {
    pub fn is_cancelled(&self) -> bool {
        self.status == ItemStatus::Cancelled
    }

    /// Unrounded line amount
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Payment record (pago)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub order_id: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Settled amount (the order total at settlement)
    pub amount: f64,
    /// Amount handed over by the customer
    pub tendered: f64,
    pub change: f64,
    /// Settlement time (fecha)
    pub paid_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voided_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voided_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
}

impl PaymentRecord {
    pub fn is_active(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
