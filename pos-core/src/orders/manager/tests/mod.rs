use super::*;
use shared::error::ErrorCode;
use shared::models::{DiningTable, Employee, Role, TableStatus};
use shared::order::{ItemStatus, OrderEventType, PaymentStatus};
use std::sync::atomic::{AtomicI64, Ordering};

/// 2024-03-05T12:00:00Z
const T0: i64 = 1_709_640_000_000;
const HOUR: i64 = 3_600_000;

/// Product with a recipe: 2 units of ingredient 1 per portion
const CEVICHE: i64 = 100;
/// Product without a recipe
const CHICHA: i64 = 200;

fn table(id: i64, number: &str, capacity: i32, status: TableStatus) -> DiningTable {
    DiningTable {
        id,
        number: number.to_string(),
        capacity,
        status,
        is_active: true,
    }
}

fn employee(id: i64, name: &str, role: Role) -> Employee {
    Employee {
        id,
        username: name.to_lowercase(),
        display_name: name.to_string(),
        role,
        is_active: true,
    }
}

/// Seeded catalog:
/// - tables M1 (4 seats), M2 (6 seats), M3 (reserved)
/// - waiters Ana (7) and Beto (9), cook Luis (8)
/// - ingredient Pescado with 100 kg, recipe 2 kg per ceviche
fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    storage
        .put_table(&table(1, "M1", 4, TableStatus::Available))
        .unwrap();
    storage
        .put_table(&table(2, "M2", 6, TableStatus::Available))
        .unwrap();
    storage
        .put_table(&table(3, "M3", 4, TableStatus::Reserved))
        .unwrap();
    storage
        .put_employee(&employee(7, "Ana", Role::Waiter))
        .unwrap();
    storage
        .put_employee(&employee(9, "Beto", Role::Waiter))
        .unwrap();
    storage
        .put_employee(&employee(8, "Luis", Role::Kitchen))
        .unwrap();
    set_stock(&storage, 100.0);
    storage
        .put_recipe(
            CEVICHE,
            &[shared::models::RecipeLine {
                product_id: CEVICHE,
                ingredient_id: 1,
                required_quantity: 2.0,
            }],
        )
        .unwrap();

    let manager = OrdersManager::with_storage(storage);
    manager.set_clock(|| T0);
    manager
}

fn set_stock(storage: &OrderStorage, stock: f64) {
    storage
        .put_ingredient(&Ingredient {
            id: 1,
            name: "Pescado".to_string(),
            stock,
            min_stock: 1.0,
            unit: "kg".to_string(),
        })
        .unwrap();
}

/// Drive the manager clock from the returned handle
fn manual_clock(manager: &OrdersManager, start: i64) -> Arc<AtomicI64> {
    let now = Arc::new(AtomicI64::new(start));
    let handle = now.clone();
    manager.set_clock(move || handle.load(Ordering::SeqCst));
    now
}

fn admin() -> Session {
    Session::new(1, "Admin", Role::Admin)
}

fn waiter() -> Session {
    Session::new(7, "Ana", Role::Waiter)
}

fn kitchen() -> Session {
    Session::new(8, "Luis", Role::Kitchen)
}

fn cashier() -> Session {
    Session::new(5, "Caja", Role::Cashier)
}

fn dine_in(table_id: i64) -> NewOrder {
    NewOrder {
        table_id: Some(table_id),
        waiter_id: 7,
        order_type: OrderType::DineIn,
        guest_count: 2,
        customer_name: None,
    }
}

fn ceviche(quantity: i32) -> ItemInput {
    ItemInput {
        product_id: CEVICHE,
        name: "Ceviche clásico".to_string(),
        quantity,
        unit_price: 25.0,
        station: Station::Cold,
        note: None,
    }
}

fn chicha(quantity: i32) -> ItemInput {
    ItemInput {
        product_id: CHICHA,
        name: "Chicha morada".to_string(),
        quantity,
        unit_price: 8.5,
        station: Station::Drink,
        note: None,
    }
}

/// Open an order on `table_id` and add `items`; returns (order_id, item_ids)
fn open_with_items(
    manager: &OrdersManager,
    table_id: i64,
    items: Vec<ItemInput>,
) -> (String, Vec<String>) {
    let order = manager
        .open_order(&waiter(), dine_in(table_id), CommandOptions::default())
        .unwrap();
    let item_ids = items
        .into_iter()
        .map(|item| {
            manager
                .add_item(&waiter(), &order.order_id, item, CommandOptions::default())
                .unwrap()
                .item_id
        })
        .collect();
    (order.order_id, item_ids)
}

/// Advance every live item of the order until served
fn serve_all(manager: &OrdersManager, order_id: &str) {
    let snapshot = manager.get_snapshot(order_id).unwrap().unwrap();
    for item in snapshot.active_items() {
        let mut status = item.status;
        while status != ItemStatus::Served {
            status = manager
                .advance_item(&kitchen(), order_id, &item.item_id, CommandOptions::default())
                .unwrap()
                .status;
        }
    }
}

/// Order on `table_id` with 2 ceviches (50.00), fully served
fn served_order(manager: &OrdersManager, table_id: i64) -> String {
    let (order_id, _) = open_with_items(manager, table_id, vec![ceviche(2)]);
    serve_all(manager, &order_id);
    order_id
}

fn table_status(manager: &OrdersManager, table_id: i64) -> TableStatus {
    manager
        .storage()
        .get_table(table_id)
        .unwrap()
        .unwrap()
        .status
}

fn error_code(result: AppResult<impl std::fmt::Debug>) -> ErrorCode {
    result.expect_err("expected an error").code
}

mod test_item_edits;
mod test_items;
mod test_payments;
