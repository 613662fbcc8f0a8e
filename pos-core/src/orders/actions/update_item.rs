//! UpdateItem command handler
//!
//! Edits quantity, note or station of a line the kitchen has not finished.
//! A larger quantity goes through the stock check for the extra portions;
//! a smaller one does not return stock.

use async_trait::async_trait;

use crate::orders::money::validate_quantity;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderItem, OrderSnapshot, Station};

/// UpdateItem action
#[derive(Debug, Clone)]
pub struct UpdateItemAction {
    pub order_id: String,
    pub item_id: String,
    pub quantity: Option<i32>,
    pub note: Option<String>,
    pub station: Option<Station>,
}

/// Find a line that can still be edited or removed
pub(super) fn editable_item<'a>(
    snapshot: &'a OrderSnapshot,
    item_id: &str,
) -> Result<&'a OrderItem, OrderError> {
    if snapshot.status.is_closed() {
        return Err(OrderError::InvalidState {
            entity_id: snapshot.order_id.clone(),
            state: snapshot.status.to_string(),
            message: "items of a paid or cancelled order cannot change".to_string(),
        });
    }

    let item = snapshot
        .find_item(item_id)
        .ok_or_else(|| OrderError::ItemNotFound {
            order_id: snapshot.order_id.clone(),
            item_id: item_id.to_string(),
        })?;
    if item.status.is_terminal() {
        return Err(OrderError::InvalidState {
            entity_id: item_id.to_string(),
            state: item.status.to_string(),
            message: "served or cancelled items cannot change".to_string(),
        });
    }
    Ok(item)
}

#[async_trait(?Send)]
impl CommandHandler for UpdateItemAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        if self.quantity.is_none() && self.note.is_none() && self.station.is_none() {
            return Err(OrderError::Validation("No fields to update".to_string()));
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        let item = editable_item(&snapshot, &self.item_id)?;

        if let Some(quantity) = self.quantity
            && quantity > item.quantity
        {
            ctx.consume_stock(item.product_id, quantity - item.quantity)?;
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
            OrderEventType::ItemUpdated,
            EventPayload::ItemUpdated {
                item_id: self.item_id.clone(),
                quantity: self.quantity,
                note: self.note.as_ref().map(|n| n.trim().to_string()),
                station: self.station,
            },
        );

        Ok(vec![event])
    }
}
