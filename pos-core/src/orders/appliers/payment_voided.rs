//! PaymentVoided event applier
//!
//! Marks the payment anulado; the order reopens as served.

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentStatus};

/// PaymentVoided applier
pub struct PaymentVoidedApplier;

impl EventApplier for PaymentVoidedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentVoided { payment_id, reason } = &event.payload {
            if let Some(payment) = snapshot.find_payment_mut(payment_id) {
                payment.status = PaymentStatus::Voided;
                payment.voided_at = Some(event.timestamp);
                payment.voided_by = Some(event.operator_id);
                payment.void_reason = reason.clone();
            }
            snapshot.closed_at = None;
            finish(snapshot, event);
        }
    }
}
