//! OrderOpened event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// OrderOpened applier
pub struct OrderOpenedApplier;

impl EventApplier for OrderOpenedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderOpened {
            order_number,
            table_id,
            table_number,
            waiter_id,
            waiter_name,
            order_type,
            guest_count,
            customer_name,
        } = &event.payload
        {
            snapshot.order_id = event.order_id.clone();
            snapshot.order_number = order_number.clone();
            snapshot.table_id = *table_id;
            snapshot.table_number = table_number.clone();
            snapshot.waiter_id = *waiter_id;
            snapshot.waiter_name = waiter_name.clone();
            snapshot.order_type = *order_type;
            snapshot.guest_count = *guest_count;
            snapshot.customer_name = customer_name.clone();
            snapshot.created_at = event.timestamp;

            finish(snapshot, event);
        }
    }
}
