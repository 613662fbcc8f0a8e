//! ItemUpdated event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemUpdated applier
pub struct ItemUpdatedApplier;

impl EventApplier for ItemUpdatedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemUpdated {
            item_id,
            quantity,
            note,
            station,
        } = &event.payload
        {
            if let Some(item) = snapshot.find_item_mut(item_id) {
                if let Some(quantity) = quantity {
                    item.quantity = *quantity;
                }
                if let Some(note) = note {
                    item.note = (!note.is_empty()).then(|| note.clone());
                }
                if let Some(station) = station {
                    item.station = *station;
                }
                item.updated_at = event.timestamp;
            }
            finish(snapshot, event);
        }
    }
}
