//! VoidPayment command handler
//!
//! Voids (anula) a settled payment inside the configured window. The order
//! reverts to served and its table is occupied again, so the void is refused
//! once another order has taken the table.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::TableStatus;
use shared::order::{EventPayload, OrderEvent, OrderEventType, PaymentStatus};

/// VoidPayment action
#[derive(Debug, Clone)]
pub struct VoidPaymentAction {
    pub order_id: String,
    pub payment_id: String,
    pub reason: Option<String>,
}

#[async_trait(?Send)]
impl CommandHandler for VoidPaymentAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        let payment = snapshot.find_payment(&self.payment_id).ok_or_else(|| {
            OrderError::PaymentNotFound {
                order_id: self.order_id.clone(),
                payment_id: self.payment_id.clone(),
            }
        })?;

        if payment.status != PaymentStatus::Paid {
            return Err(OrderError::InvalidState {
                entity_id: self.payment_id.clone(),
                state: payment.status.as_str().to_string(),
                message: "only paid payments can be voided".to_string(),
            });
        }

        let now = ctx.now();
        let window = ctx.policy().void_window_millis();
        if now - payment.paid_at > window {
            return Err(OrderError::VoidWindowExpired {
                payment_id: self.payment_id.clone(),
                paid_at: payment.paid_at,
                now,
                window_secs: ctx.policy().void_window_secs,
            });
        }

        if let Some(table_id) = snapshot.table_id {
            let table = ctx.load_table(table_id)?;
            if !table.is_available() {
                return Err(OrderError::TableNotAvailable {
                    table_id,
                    status: table.status,
                    is_active: table.is_active,
                });
            }
            ctx.set_table_status(table_id, TableStatus::Occupied)?;
        }

        crate::security_log!(
            "WARN",
            "payment_voided",
            order_id = self.order_id.as_str(),
            payment_id = self.payment_id.as_str(),
            amount = payment.amount,
            operator_id = metadata.operator_id,
            role = metadata.role.as_str()
        );

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            now,
            Some(metadata.timestamp),
            OrderEventType::PaymentVoided,
            EventPayload::PaymentVoided {
                payment_id: self.payment_id.clone(),
                reason: self.reason.clone(),
            },
        );

        Ok(vec![event])
    }
}
