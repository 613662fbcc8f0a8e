//! UpdateOrderInfo command handler
//!
//! Edits order metadata (customer, guests, table, waiter) without touching
//! item progress. Moving to another table releases the old one.

use async_trait::async_trait;

use crate::orders::money::validate_guest_count;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::TableStatus;
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// UpdateOrderInfo action
#[derive(Debug, Clone)]
pub struct UpdateOrderInfoAction {
    pub order_id: String,
    pub customer_name: Option<String>,
    pub guest_count: Option<i32>,
    pub table_id: Option<i64>,
    pub waiter_id: Option<i64>,
}

#[async_trait(?Send)]
impl CommandHandler for UpdateOrderInfoAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load and validate state
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        if snapshot.status.is_closed() {
            return Err(OrderError::InvalidState {
                entity_id: self.order_id.clone(),
                state: snapshot.status.to_string(),
                message: "closed orders cannot be edited".to_string(),
            });
        }

        if self.customer_name.is_none()
            && self.guest_count.is_none()
            && self.table_id.is_none()
            && self.waiter_id.is_none()
        {
            return Err(OrderError::Validation("No fields to update".to_string()));
        }

        if let Some(count) = self.guest_count {
            validate_guest_count(count)?;
        }
        let guests = self.guest_count.unwrap_or(snapshot.guest_count);

        // 2. Table move
        let moved_to = match self.table_id {
            Some(table_id) if snapshot.table_id != Some(table_id) => {
                let table = ctx.load_table(table_id)?;
                if !table.is_available() {
                    return Err(OrderError::TableNotAvailable {
                        table_id,
                        status: table.status,
                        is_active: table.is_active,
                    });
                }
                Some(table)
            }
            _ => None,
        };

        let effective_table = match &moved_to {
            Some(table) => Some(table.clone()),
            None => match snapshot.table_id {
                Some(id) => Some(ctx.load_table(id)?),
                None => None,
            },
        };
        if let Some(table) = &effective_table
            && guests > table.capacity
        {
            return Err(OrderError::Validation(format!(
                "guest_count {guests} exceeds capacity {} of table {}",
                table.capacity, table.number
            )));
        }

        // 3. Waiter change
        let waiter = match self.waiter_id {
            Some(waiter_id) => Some(
                ctx.load_employee(waiter_id)?
                    .filter(|e| e.can_serve_tables())
                    .ok_or_else(|| {
                        OrderError::Validation(format!(
                            "waiter {waiter_id} is not an active mozo"
                        ))
                    })?,
            ),
            None => None,
        };

        if let Some(table) = &moved_to {
            if let Some(old) = snapshot.table_id {
                ctx.set_table_status(old, TableStatus::Available)?;
            }
            ctx.set_table_status(table.id, TableStatus::Occupied)?;
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
            OrderEventType::OrderInfoUpdated,
            EventPayload::OrderInfoUpdated {
                customer_name: self.customer_name.clone(),
                guest_count: self.guest_count,
                table_id: moved_to.as_ref().map(|t| t.id),
                table_number: moved_to.as_ref().map(|t| t.number.clone()),
                waiter_id: waiter.as_ref().map(|w| w.id),
                waiter_name: waiter.as_ref().map(|w| w.display_name.clone()),
            },
        );

        Ok(vec![event])
    }
}
