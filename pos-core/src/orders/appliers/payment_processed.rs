//! PaymentProcessed event applier
//!
//! Records the payment and closes the order.

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// PaymentProcessed applier
pub struct PaymentProcessedApplier;

impl EventApplier for PaymentProcessedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentProcessed { payment } = &event.payload {
            snapshot.payments.push(payment.clone());
            snapshot.closed_at = Some(event.timestamp);
            finish(snapshot, event);
        }
    }
}
