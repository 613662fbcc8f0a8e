//! OrderInfoUpdated event applier
//!
//! Only fields present (Some) in the payload are updated.

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// OrderInfoUpdated applier
pub struct OrderInfoUpdatedApplier;

impl EventApplier for OrderInfoUpdatedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderInfoUpdated {
            customer_name,
            guest_count,
            table_id,
            table_number,
            waiter_id,
            waiter_name,
        } = &event.payload
        {
            if let Some(name) = customer_name {
                snapshot.customer_name = Some(name.clone());
            }
            if let Some(count) = guest_count {
                snapshot.guest_count = *count;
            }
            if let Some(id) = table_id {
                snapshot.table_id = Some(*id);
                snapshot.table_number = table_number.clone();
            }
            if let Some(id) = waiter_id {
                snapshot.waiter_id = *id;
            }
            if let Some(name) = waiter_name {
                snapshot.waiter_name = name.clone();
            }

            finish(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::testing::{item, order};
    use crate::orders::appliers::testing::event;
    use shared::order::{ItemStatus, OrderEventType, OrderStatus};

    #[test]
    fn test_partial_update_keeps_progress() {
        let mut snapshot = order("order-1", vec![item("i-1", ItemStatus::Ready, 1, 20.0)]);
        let e = event(
            5,
            OrderEventType::OrderInfoUpdated,
            EventPayload::OrderInfoUpdated {
                customer_name: Some("Mesa de Carla".into()),
                guest_count: None,
                table_id: Some(2),
                table_number: Some("M2".into()),
                waiter_id: None,
                waiter_name: None,
            },
        );
        OrderInfoUpdatedApplier.apply(&mut snapshot, &e);

        assert_eq!(snapshot.customer_name.as_deref(), Some("Mesa de Carla"));
        assert_eq!(snapshot.table_id, Some(2));
        assert_eq!(snapshot.table_number.as_deref(), Some("M2"));
        assert_eq!(snapshot.guest_count, 2);
        assert_eq!(snapshot.waiter_name, "Ana");
        assert_eq!(snapshot.status, OrderStatus::Ready);
        assert_eq!(snapshot.items[0].status, ItemStatus::Ready);
    }
}
