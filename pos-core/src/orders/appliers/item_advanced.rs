//! ItemAdvanced event applier
//!
//! Moves the item to its next state and stamps the matching timestamp.

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderSnapshot};

/// ItemAdvanced applier
pub struct ItemAdvancedApplier;

impl EventApplier for ItemAdvancedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemAdvanced { item_id, to, .. } = &event.payload {
            if let Some(item) = snapshot.find_item_mut(item_id) {
                item.status = *to;
                item.updated_at = event.timestamp;
                match to {
                    ItemStatus::Preparing => item.started_at = Some(event.timestamp),
                    ItemStatus::Ready => item.ready_at = Some(event.timestamp),
                    ItemStatus::Served => item.served_at = Some(event.timestamp),
                    ItemStatus::Queued | ItemStatus::Cancelled => {}
                }
            }
            finish(snapshot, event);
        }
    }
}
