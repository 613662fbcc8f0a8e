//! Order status derivation
//!
//! The order status is never set directly; it is recomputed from items and
//! payments after every applied event.

use shared::order::{ItemStatus, OrderSnapshot, OrderStatus};

/// Derive the order status from its items and payments
pub fn derive_order_status(snapshot: &OrderSnapshot) -> OrderStatus {
    if snapshot.is_settled() {
        return OrderStatus::Paid;
    }
    if snapshot.items.is_empty() {
        return OrderStatus::Pending;
    }

    let live: Vec<ItemStatus> = snapshot.active_items().map(|i| i.status).collect();
    if live.is_empty() {
        return OrderStatus::Cancelled;
    }

    if live.iter().all(|s| *s == ItemStatus::Served) {
        OrderStatus::Served
    } else if live
        .iter()
        .all(|s| matches!(s, ItemStatus::Ready | ItemStatus::Served))
    {
        OrderStatus::Ready
    } else if live.iter().all(|s| *s == ItemStatus::Queued) {
        OrderStatus::Confirmed
    } else {
        OrderStatus::Preparing
    }
}

/// Recompute and store the derived status
pub fn refresh_status(snapshot: &mut OrderSnapshot) {
    snapshot.status = derive_order_status(snapshot);
}
