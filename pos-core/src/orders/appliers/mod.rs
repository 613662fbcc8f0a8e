//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use crate::orders::lifecycle::refresh_status;
use crate::orders::money::recalculate_totals;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

mod item_added;
mod item_advanced;
mod item_cancelled;
mod item_removed;
mod item_updated;
mod order_deleted;
mod order_info_updated;
mod order_opened;
mod payment_processed;
mod payment_voided;

pub use item_added::ItemAddedApplier;
pub use item_advanced::ItemAdvancedApplier;
pub use item_cancelled::ItemCancelledApplier;
pub use item_removed::ItemRemovedApplier;
pub use item_updated::ItemUpdatedApplier;
pub use order_deleted::OrderDeletedApplier;
pub use order_info_updated::OrderInfoUpdatedApplier;
pub use order_opened::OrderOpenedApplier;
pub use payment_processed::PaymentProcessedApplier;
pub use payment_voided::PaymentVoidedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    OrderOpened(OrderOpenedApplier),
    OrderInfoUpdated(OrderInfoUpdatedApplier),
    OrderDeleted(OrderDeletedApplier),
    ItemAdded(ItemAddedApplier),
    ItemAdvanced(ItemAdvancedApplier),
    ItemCancelled(ItemCancelledApplier),
    ItemUpdated(ItemUpdatedApplier),
    ItemRemoved(ItemRemovedApplier),
    PaymentProcessed(PaymentProcessedApplier),
    PaymentVoided(PaymentVoidedApplier),
}

/// Convert OrderEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&OrderEvent> for EventAction {
    fn from(event: &OrderEvent) -> Self {
        match &event.payload {
            EventPayload::OrderOpened { .. } => EventAction::OrderOpened(OrderOpenedApplier),
            EventPayload::OrderInfoUpdated { .. } => {
                EventAction::OrderInfoUpdated(OrderInfoUpdatedApplier)
            }
            EventPayload::OrderDeleted { .. } => EventAction::OrderDeleted(OrderDeletedApplier),
            EventPayload::ItemAdded { .. } => EventAction::ItemAdded(ItemAddedApplier),
            EventPayload::ItemAdvanced { .. } => EventAction::ItemAdvanced(ItemAdvancedApplier),
            EventPayload::ItemCancelled { .. } => {
                EventAction::ItemCancelled(ItemCancelledApplier)
            }
            EventPayload::ItemUpdated { .. } => EventAction::ItemUpdated(ItemUpdatedApplier),
            EventPayload::ItemRemoved { .. } => EventAction::ItemRemoved(ItemRemovedApplier),
            EventPayload::PaymentProcessed { .. } => {
                EventAction::PaymentProcessed(PaymentProcessedApplier)
            }
            EventPayload::PaymentVoided { .. } => {
                EventAction::PaymentVoided(PaymentVoidedApplier)
            }
        }
    }
}

/// Bookkeeping shared by every applier: derived state, version, sequence
fn finish(snapshot: &mut OrderSnapshot, event: &OrderEvent) {
    recalculate_totals(snapshot);
    refresh_status(snapshot);
    snapshot.version += 1;
    snapshot.last_sequence = event.sequence;
    snapshot.updated_at = event.timestamp;
}
