//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{OrderCommand, OrderCommandPayload, OrderEvent};

mod add_item;
mod advance_item;
mod cancel_item;
mod delete_order;
mod open_order;
mod process_payment;
mod remove_item;
mod update_item;
mod update_order_info;
mod void_payment;

pub use add_item::AddItemAction;
pub use advance_item::AdvanceItemAction;
pub use cancel_item::CancelItemAction;
pub use delete_order::DeleteOrderAction;
pub use open_order::OpenOrderAction;
pub use process_payment::ProcessPaymentAction;
pub use remove_item::RemoveItemAction;
pub use update_item::UpdateItemAction;
pub use update_order_info::UpdateOrderInfoAction;
pub use void_payment::VoidPaymentAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    OpenOrder(OpenOrderAction),
    AddItem(AddItemAction),
    AdvanceItem(AdvanceItemAction),
    CancelItem(CancelItemAction),
    UpdateItem(UpdateItemAction),
    RemoveItem(RemoveItemAction),
    ProcessPayment(ProcessPaymentAction),
    VoidPayment(VoidPaymentAction),
    UpdateOrderInfo(UpdateOrderInfoAction),
    DeleteOrder(DeleteOrderAction),
}

#[async_trait(?Send)]
impl CommandHandler for CommandAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        match self {
            CommandAction::OpenOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::AddItem(action) => action.execute(ctx, metadata).await,
            CommandAction::AdvanceItem(action) => action.execute(ctx, metadata).await,
            CommandAction::CancelItem(action) => action.execute(ctx, metadata).await,
            CommandAction::UpdateItem(action) => action.execute(ctx, metadata).await,
            CommandAction::RemoveItem(action) => action.execute(ctx, metadata).await,
            CommandAction::ProcessPayment(action) => action.execute(ctx, metadata).await,
            CommandAction::VoidPayment(action) => action.execute(ctx, metadata).await,
            CommandAction::UpdateOrderInfo(action) => action.execute(ctx, metadata).await,
            CommandAction::DeleteOrder(action) => action.execute(ctx, metadata).await,
        }
    }
}

/// Convert OrderCommand to CommandAction
///
/// This is the ONLY place with a match on OrderCommandPayload.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::OpenOrder {
                table_id,
                waiter_id,
                order_type,
                guest_count,
                customer_name,
            } => CommandAction::OpenOrder(OpenOrderAction {
                table_id: *table_id,
                waiter_id: *waiter_id,
                order_type: *order_type,
                guest_count: *guest_count,
                customer_name: customer_name.clone(),
            }),
            OrderCommandPayload::AddItem { order_id, item } => {
                CommandAction::AddItem(AddItemAction {
                    order_id: order_id.clone(),
                    item: item.clone(),
                })
            }
            OrderCommandPayload::AdvanceItem { order_id, item_id } => {
                CommandAction::AdvanceItem(AdvanceItemAction {
                    order_id: order_id.clone(),
                    item_id: item_id.clone(),
                })
            }
            OrderCommandPayload::CancelItem {
                order_id,
                item_id,
                reason,
            } => CommandAction::CancelItem(CancelItemAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                reason: reason.clone(),
            }),
            OrderCommandPayload::UpdateItem {
                order_id,
                item_id,
                quantity,
                note,
                station,
            } => CommandAction::UpdateItem(UpdateItemAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                quantity: *quantity,
                note: note.clone(),
                station: *station,
            }),
            OrderCommandPayload::RemoveItem {
                order_id,
                item_id,
                reason,
            } => CommandAction::RemoveItem(RemoveItemAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                reason: reason.clone(),
            }),
            OrderCommandPayload::ProcessPayment {
                order_id,
                method,
                amount,
            } => CommandAction::ProcessPayment(ProcessPaymentAction {
                order_id: order_id.clone(),
                method: *method,
                amount: *amount,
            }),
            OrderCommandPayload::VoidPayment {
                order_id,
                payment_id,
                reason,
            } => CommandAction::VoidPayment(VoidPaymentAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                reason: reason.clone(),
            }),
            OrderCommandPayload::UpdateOrderInfo {
                order_id,
                customer_name,
                guest_count,
                table_id,
                waiter_id,
            } => CommandAction::UpdateOrderInfo(UpdateOrderInfoAction {
                order_id: order_id.clone(),
                customer_name: customer_name.clone(),
                guest_count: *guest_count,
                table_id: *table_id,
                waiter_id: *waiter_id,
            }),
            OrderCommandPayload::DeleteOrder { order_id, reason } => {
                CommandAction::DeleteOrder(DeleteOrderAction {
                    order_id: order_id.clone(),
                    reason: reason.clone(),
                })
            }
        }
    }
}

/// Fixtures shared by the action tests
#[cfg(test)]
pub(crate) mod testing {
    use crate::orders::traits::CommandMetadata;
    use shared::models::Role;
    use shared::order::{
        ItemStatus, OrderItem, OrderSnapshot, OrderType, Station,
    };

    pub fn metadata(role: Role) -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: 1,
            operator_name: "Test User".to_string(),
            role,
            timestamp: 1_234_567_890,
        }
    }

    pub fn item(item_id: &str, status: ItemStatus, quantity: i32, unit_price: f64) -> OrderItem {
        OrderItem {
            item_id: item_id.to_string(),
            order_id: "order-1".to_string(),
            product_id: 100,
            name: "Ceviche clásico".to_string(),
            quantity,
            unit_price,
            status,
            station: Station::Cold,
            note: None,
            created_at: 0,
            updated_at: 0,
            started_at: None,
            ready_at: None,
            served_at: None,
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    /// Dine-in order at table 1 holding the given items
    pub fn order(order_id: &str, items: Vec<OrderItem>) -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        snapshot.order_number = "ORD2024030510001".to_string();
        snapshot.table_id = Some(1);
        snapshot.table_number = Some("M1".to_string());
        snapshot.waiter_id = 7;
        snapshot.waiter_name = "Ana".to_string();
        snapshot.order_type = OrderType::DineIn;
        snapshot.guest_count = 2;
        snapshot.items = items;
        crate::orders::money::recalculate_totals(&mut snapshot);
        crate::orders::lifecycle::refresh_status(&mut snapshot);
        snapshot
    }
}
