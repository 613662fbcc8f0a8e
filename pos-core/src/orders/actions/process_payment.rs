//! ProcessPayment command handler
//!
//! Settles a served order in full. Cash may exceed the total and yields
//! change; other methods must match the total. The table is released.

use async_trait::async_trait;
use tracing::info;

use crate::orders::money::settle;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::TableStatus;
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentMethod, PaymentRecord,
    PaymentStatus,
};

/// ProcessPayment action
#[derive(Debug, Clone)]
pub struct ProcessPaymentAction {
    pub order_id: String,
    pub method: PaymentMethod,
    /// Amount handed over by the customer
    pub amount: f64,
}

#[async_trait(?Send)]
impl CommandHandler for ProcessPaymentAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        if snapshot.is_settled() {
            return Err(OrderError::InvalidState {
                entity_id: self.order_id.clone(),
                state: snapshot.status.to_string(),
                message: "order is already settled".to_string(),
            });
        }
        if snapshot.status != OrderStatus::Served {
            return Err(OrderError::InvalidState {
                entity_id: self.order_id.clone(),
                state: snapshot.status.to_string(),
                message: "only fully served orders can be paid".to_string(),
            });
        }

        let tolerance = ctx.policy().cash_shortfall_tolerance;
        let settlement = settle(
            &self.order_id,
            snapshot.total,
            self.method,
            self.amount,
            tolerance,
        )?;

        if let Some(table_id) = snapshot.table_id {
            ctx.set_table_status(table_id, TableStatus::Available)?;
        }

        let now = ctx.now();
        let payment = PaymentRecord {
            payment_id: shared::util::new_id(),
            order_id: self.order_id.clone(),
            method: self.method,
            status: PaymentStatus::Paid,
            amount: settlement.amount,
            tendered: settlement.tendered,
            change: settlement.change,
            paid_at: now,
            voided_at: None,
            voided_by: None,
            void_reason: None,
        };

        info!(
            order_id = %self.order_id,
            payment_id = %payment.payment_id,
            method = self.method.as_str(),
            amount = payment.amount,
            change = payment.change,
            "Payment processed"
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
            OrderEventType::PaymentProcessed,
            EventPayload::PaymentProcessed { payment },
        );

        Ok(vec![event])
    }
}
