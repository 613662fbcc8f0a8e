//! AdvanceItem command handler
//!
//! Moves an item one step forward: en_cola → preparando → listo → servido.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, ItemTransition, OrderEvent, OrderEventType, OrderSnapshot, OrderStatus,
};

/// AdvanceItem action
#[derive(Debug, Clone)]
pub struct AdvanceItemAction {
    pub order_id: String,
    pub item_id: String,
}

/// Items of a settled order are frozen
pub(super) fn ensure_items_mutable(snapshot: &OrderSnapshot) -> Result<(), OrderError> {
    if snapshot.status == OrderStatus::Paid {
        return Err(OrderError::InvalidState {
            entity_id: snapshot.order_id.clone(),
            state: snapshot.status.to_string(),
            message: "items of a paid order cannot change".to_string(),
        });
    }
    Ok(())
}

#[async_trait(?Send)]
impl CommandHandler for AdvanceItemAction {
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
        let to = from
            .apply(ItemTransition::Advance)
            .ok_or_else(|| OrderError::InvalidTransition {
                item_id: self.item_id.clone(),
                from,
                transition: ItemTransition::Advance,
            })?;

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            ctx.now(),
            Some(metadata.timestamp),
            OrderEventType::ItemAdvanced,
            EventPayload::ItemAdvanced {
                item_id: self.item_id.clone(),
                from,
                to,
            },
        );

        Ok(vec![event])
    }
}
