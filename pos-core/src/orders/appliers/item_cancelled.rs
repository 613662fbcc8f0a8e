//! ItemCancelled event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderSnapshot};

/// ItemCancelled applier
pub struct ItemCancelledApplier;

impl EventApplier for ItemCancelledApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemCancelled {
            item_id, reason, ..
        } = &event.payload
        {
            if let Some(item) = snapshot.find_item_mut(item_id) {
                item.status = ItemStatus::Cancelled;
                item.updated_at = event.timestamp;
                item.cancelled_at = Some(event.timestamp);
                item.cancel_reason = reason.clone();
            }
            finish(snapshot, event);
        }
    }
}
