//! AddItem command handler
//!
//! Adds one product line to an open order after the stock check passes.
//! Ingredient stock is decremented in the same transaction.

use async_trait::async_trait;

use crate::orders::money::validate_item_input;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, ItemInput, ItemStatus, OrderEvent, OrderEventType, OrderItem,
};

/// AddItem action
#[derive(Debug, Clone)]
pub struct AddItemAction {
    pub order_id: String,
    pub item: ItemInput,
}

#[async_trait(?Send)]
impl CommandHandler for AddItemAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        validate_item_input(&self.item)?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        if snapshot.status.is_closed() {
            return Err(OrderError::InvalidState {
                entity_id: self.order_id.clone(),
                state: snapshot.status.to_string(),
                message: "cannot add items to a closed order".to_string(),
            });
        }

        ctx.consume_stock(self.item.product_id, self.item.quantity)?;

        let now = ctx.now();
        let item = OrderItem {
            item_id: shared::util::new_id(),
            order_id: self.order_id.clone(),
            product_id: self.item.product_id,
            name: self.item.name.trim().to_string(),
            quantity: self.item.quantity,
            unit_price: self.item.unit_price,
            status: ItemStatus::Queued,
            station: self.item.station,
            note: self.item.note.clone(),
            created_at: now,
            updated_at: now,
            started_at: None,
            ready_at: None,
            served_at: None,
            cancelled_at: None,
            cancel_reason: None,
        };

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            now,
            Some(metadata.timestamp),
            OrderEventType::ItemAdded,
            EventPayload::ItemAdded { item },
        );

        Ok(vec![event])
    }
}
