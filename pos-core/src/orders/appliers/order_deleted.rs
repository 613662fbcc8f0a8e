//! OrderDeleted event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// OrderDeleted applier
pub struct OrderDeletedApplier;

impl EventApplier for OrderDeletedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderDeleted { .. } = &event.payload {
            snapshot.deleted_at = Some(event.timestamp);
            finish(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::testing::order;
    use crate::orders::appliers::testing::event;
    use shared::order::OrderEventType;

    #[test]
    fn test_marks_deleted() {
        let mut snapshot = order("order-1", vec![]);
        OrderDeletedApplier.apply(
            &mut snapshot,
            &event(
                2,
                OrderEventType::OrderDeleted,
                EventPayload::OrderDeleted {
                    reason: Some("duplicada".into()),
                },
            ),
        );
        assert!(snapshot.is_deleted());
        assert_eq!(snapshot.deleted_at, Some(2_000));
    }
}
