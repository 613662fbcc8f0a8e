//! OpenOrder command handler
//!
//! Creates a new order for a table and waiter. The order id and order number
//! are generated server side; the table becomes occupied on commit.

use async_trait::async_trait;
use tracing::info;

use crate::orders::money::validate_guest_count;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::TableStatus;
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderType};

/// OpenOrder action
#[derive(Debug, Clone)]
pub struct OpenOrderAction {
    pub table_id: Option<i64>,
    pub waiter_id: i64,
    pub order_type: OrderType,
    pub guest_count: i32,
    pub customer_name: Option<String>,
}

#[async_trait(?Send)]
impl CommandHandler for OpenOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        validate_guest_count(self.guest_count)?;

        // 1. Waiter must be an active mozo/mesero
        let waiter = ctx
            .load_employee(self.waiter_id)?
            .filter(|e| e.can_serve_tables())
            .ok_or_else(|| {
                OrderError::Validation(format!(
                    "waiter {} is not an active mozo",
                    self.waiter_id
                ))
            })?;

        // 2. Table rules
        let table = match (self.order_type.requires_table(), self.table_id) {
            (true, None) => {
                return Err(OrderError::Validation(
                    "table_id is required for dine-in orders".to_string(),
                ));
            }
            (_, Some(table_id)) => {
                let table = ctx.load_table(table_id)?;
                if !table.is_available() {
                    return Err(OrderError::TableNotAvailable {
                        table_id,
                        status: table.status,
                        is_active: table.is_active,
                    });
                }
                if self.guest_count > table.capacity {
                    return Err(OrderError::Validation(format!(
                        "guest_count {} exceeds capacity {} of table {}",
                        self.guest_count, table.capacity, table.number
                    )));
                }
                Some(table)
            }
            (false, None) => None,
        };

        // 3. Identity
        let order_id = shared::util::new_id();
        let order_number = ctx.next_order_number()?;
        if let Some(table) = &table {
            ctx.set_table_status(table.id, TableStatus::Occupied)?;
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            ctx.now(),
            Some(metadata.timestamp),
            OrderEventType::OrderOpened,
            EventPayload::OrderOpened {
                order_number: order_number.clone(),
                table_id: table.as_ref().map(|t| t.id),
                table_number: table.as_ref().map(|t| t.number.clone()),
                waiter_id: waiter.id,
                waiter_name: waiter.display_name.clone(),
                order_type: self.order_type,
                guest_count: self.guest_count,
                customer_name: self.customer_name.clone(),
            },
        );

        info!(order_id = %order_id, order_number = %order_number, seq, "Order opened");
        Ok(vec![event])
    }
}
