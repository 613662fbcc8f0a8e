//! RemoveItem command handler
//!
//! Drops a line entered by mistake. Unlike a cancel, the line leaves the
//! snapshot; the event log keeps its name and quantity for audit.

use async_trait::async_trait;

use super::update_item::editable_item;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// RemoveItem action
#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub order_id: String,
    pub item_id: String,
    pub reason: Option<String>,
}

#[async_trait(?Send)]
impl CommandHandler for RemoveItemAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        let item = editable_item(&snapshot, &self.item_id)?;

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            ctx.now(),
            Some(metadata.timestamp),
            OrderEventType::ItemRemoved,
            EventPayload::ItemRemoved {
                item_id: self.item_id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                from: item.status,
                reason: self.reason.clone(),
            },
        );

        Ok(vec![event])
    }
}
