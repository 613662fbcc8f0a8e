//! ItemRemoved event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemRemoved applier
pub struct ItemRemovedApplier;

impl EventApplier for ItemRemovedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemRemoved { item_id, .. } = &event.payload {
            snapshot.items.retain(|i| i.item_id != *item_id);
            finish(snapshot, event);
        }
    }
}
