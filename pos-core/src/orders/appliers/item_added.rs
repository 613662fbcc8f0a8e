//! ItemAdded event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemAdded applier
pub struct ItemAddedApplier;

impl EventApplier for ItemAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemAdded { item } = &event.payload {
            snapshot.items.push(item.clone());
            finish(snapshot, event);
        }
    }
}
