//! DeleteOrder command handler
//!
//! Admin-only removal of an order. Refused while any item is mid-preparation
//! and for paid orders. The snapshot and event stream are kept for audit.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::TableStatus;
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// DeleteOrder action
#[derive(Debug, Clone)]
pub struct DeleteOrderAction {
    pub order_id: String,
    pub reason: Option<String>,
}

#[async_trait(?Send)]
impl CommandHandler for DeleteOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        if snapshot.has_items_in_progress() {
            return Err(OrderError::OrderInProgress {
                order_id: self.order_id.clone(),
                items: snapshot
                    .items_in_progress()
                    .map(|i| i.item_id.clone())
                    .collect(),
            });
        }

        if snapshot.is_settled() {
            return Err(OrderError::InvalidState {
                entity_id: self.order_id.clone(),
                state: snapshot.status.to_string(),
                message: "paid orders cannot be deleted".to_string(),
            });
        }

        if let Some(table_id) = snapshot.table_id {
            ctx.set_table_status(table_id, TableStatus::Available)?;
        }

        crate::security_log!(
            "WARN",
            "order_deleted",
            order_id = self.order_id.as_str(),
            order_number = snapshot.order_number.as_str(),
            operator_id = metadata.operator_id
        );

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            ctx.now(),
            Some(metadata.timestamp),
            OrderEventType::OrderDeleted,
            EventPayload::OrderDeleted {
                reason: self.reason.clone(),
            },
        );

        Ok(vec![event])
    }
}
