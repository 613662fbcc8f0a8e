//! CancelItem command handler
//!
//! Cancels an item that has not been served yet. Cancelled lines drop out
//! of the order total; consumed stock is not returned.

use async_trait::async_trait;

use super::advance_item::ensure_items_mutable;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, ItemTransition, OrderEvent, OrderEventType};

/// CancelItem action
#[derive(Debug, Clone)]
pub struct CancelItemAction {
    pub order_id: String,
    pub item_id: String,
    pub reason: Option<String>,
}

#[async_trait(?Send)]
impl CommandHandler for CancelItemAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        ensure_items_mutable(&snapshot)?;

        let item = snapshot
            .find_item(&self.item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                order_id: self.order_id.clone(),
                item_id: self.item_id.clone(),
            })?;

        let from = item.status;
        if from.apply(ItemTransition::Cancel).is_none() {
            return Err(OrderError::InvalidTransition {
                item_id: self.item_id.clone(),
                from,
                transition: ItemTransition::Cancel,
            });
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            ctx.now(),
            Some(metadata.timestamp),
            OrderEventType::ItemCancelled,
            EventPayload::ItemCancelled {
                item_id: self.item_id.clone(),
                from,
                reason: self.reason.clone(),
            },
        );

        Ok(vec![event])
    }
}
