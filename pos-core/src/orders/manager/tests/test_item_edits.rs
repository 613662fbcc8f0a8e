use super::*;

fn quantity(quantity: i32) -> ItemUpdate {
    ItemUpdate {
        quantity: Some(quantity),
        ..ItemUpdate::default()
    }
}

#[test]
fn test_update_item_quantity_and_stock() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1), chicha(1)]);

    let item = manager
        .update_item(&waiter(), &order_id, &items[0], quantity(3), CommandOptions::default())
        .unwrap();
    assert_eq!(item.quantity, 3);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total, 83.5);
    assert_eq!(snapshot.version, 4);
    // 2 kg at open, 4 kg more for the extra portions
    let fish = manager.storage().get_ingredient(1).unwrap().unwrap();
    assert_eq!(fish.stock, 94.0);

    // Fewer portions keep the stock as is
    manager
        .update_item(&waiter(), &order_id, &items[0], quantity(2), CommandOptions::default())
        .unwrap();
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total, 58.5);
    let fish = manager.storage().get_ingredient(1).unwrap().unwrap();
    assert_eq!(fish.stock, 94.0);
}

#[test]
fn test_update_item_note_and_station() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1)]);

    let update = ItemUpdate {
        note: Some("  sin ají ".into()),
        station: Some(Station::Hot),
        ..ItemUpdate::default()
    };
    let item = manager
        .update_item(&waiter(), &order_id, &items[0], update, CommandOptions::default())
        .unwrap();
    assert_eq!(item.note.as_deref(), Some("sin ají"));
    assert_eq!(item.station, Station::Hot);
    assert_eq!(item.quantity, 1);

    let hot = manager.board(&kitchen(), Some(Station::Hot)).unwrap();
    assert_eq!(hot.column(ItemStatus::Queued).len(), 1);

    let clear = ItemUpdate {
        note: Some(String::new()),
        ..ItemUpdate::default()
    };
    let item = manager
        .update_item(&waiter(), &order_id, &items[0], clear, CommandOptions::default())
        .unwrap();
    assert_eq!(item.note, None);
}

#[test]
fn test_update_item_rejections() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1)]);

    set_stock(manager.storage(), 1.0);
    let result = manager.update_item(
        &waiter(),
        &order_id,
        &items[0],
        quantity(2),
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InsufficientStock);

    let result = manager.update_item(
        &waiter(),
        &order_id,
        &items[0],
        ItemUpdate::default(),
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::ValidationFailed);

    let result = manager.update_item(
        &kitchen(),
        &order_id,
        &items[0],
        quantity(2),
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::PermissionDenied);

    serve_all(&manager, &order_id);
    let result = manager.update_item(
        &waiter(),
        &order_id,
        &items[0],
        quantity(2),
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InvalidState);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.items[0].quantity, 1);
    assert_eq!(snapshot.total, 25.0);
}

#[test]
fn test_remove_item() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1), chicha(2)]);

    let snapshot = manager
        .remove_item(
            &waiter(),
            &order_id,
            &items[1],
            Some("mesa equivocada".into()),
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.total, 25.0);
    assert_eq!(snapshot.status, OrderStatus::Confirmed);

    let events = manager.get_events_for_order(&order_id).unwrap();
    let removed = events.last().unwrap();
    assert_eq!(removed.event_type, OrderEventType::ItemRemoved);

    // Last line gone: the order waits for items again
    let snapshot = manager
        .remove_item(&waiter(), &order_id, &items[0], None, CommandOptions::default())
        .unwrap();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.status, OrderStatus::Pending);
    assert_eq!(manager.rebuild_snapshot(&order_id).unwrap(), snapshot);

    let result =
        manager.remove_item(&waiter(), &order_id, &items[0], None, CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::ItemNotFound);
}

#[test]
fn test_paid_order_items_are_frozen() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);
    manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();
    let item_id = manager.get_snapshot(&order_id).unwrap().unwrap().items[0]
        .item_id
        .clone();

    let result =
        manager.remove_item(&admin(), &order_id, &item_id, None, CommandOptions::default());
    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(err.detail("state"), Some(&serde_json::json!("pagada")));

    let result =
        manager.update_item(&admin(), &order_id, &item_id, quantity(1), CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InvalidState);
}
