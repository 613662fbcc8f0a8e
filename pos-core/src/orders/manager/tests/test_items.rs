use super::*;

#[test]
fn test_item_lifecycle_drives_order_status() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1), chicha(1)]);
    let (fish, drink) = (&items[0], &items[1]);

    let status = |manager: &OrdersManager| {
        manager.get_snapshot(&order_id).unwrap().unwrap().status
    };
    assert_eq!(status(&manager), OrderStatus::Confirmed);

    now.store(T0 + 60_000, Ordering::SeqCst);
    let item = manager
        .advance_item(&kitchen(), &order_id, fish, CommandOptions::default())
        .unwrap();
    assert_eq!(item.status, ItemStatus::Preparing);
    assert_eq!(item.started_at, Some(T0 + 60_000));
    assert_eq!(status(&manager), OrderStatus::Preparing);

    now.store(T0 + 120_000, Ordering::SeqCst);
    let item = manager
        .advance_item(&kitchen(), &order_id, fish, CommandOptions::default())
        .unwrap();
    assert_eq!(item.status, ItemStatus::Ready);
    assert_eq!(item.ready_at, Some(T0 + 120_000));
    // The drink is still queued
    assert_eq!(status(&manager), OrderStatus::Preparing);

    manager.advance_item(&kitchen(), &order_id, drink, CommandOptions::default()).unwrap();
    manager.advance_item(&kitchen(), &order_id, drink, CommandOptions::default()).unwrap();
    assert_eq!(status(&manager), OrderStatus::Ready);

    // Waiters carry plates to the table
    let item = manager.advance_item(&waiter(), &order_id, fish, CommandOptions::default()).unwrap();
    assert_eq!(item.status, ItemStatus::Served);
    assert!(item.served_at.is_some());
    assert_eq!(status(&manager), OrderStatus::Ready);

    manager.advance_item(&waiter(), &order_id, drink, CommandOptions::default()).unwrap();
    assert_eq!(status(&manager), OrderStatus::Served);
}

#[test]
fn test_terminal_items_reject_transitions() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1), chicha(1)]);
    let (fish, drink) = (&items[0], &items[1]);

    for _ in 0..3 {
        manager.advance_item(&kitchen(), &order_id, fish, CommandOptions::default()).unwrap();
    }
    manager
        .cancel_item(&kitchen(), &order_id, drink, None, CommandOptions::default())
        .unwrap();

    let before = manager.get_snapshot(&order_id).unwrap().unwrap();

    for item_id in [fish, drink] {
        let result = manager.advance_item(
            &kitchen(),
            &order_id,
            item_id,
            CommandOptions::default(),
        );
        assert_eq!(error_code(result), ErrorCode::InvalidTransition);
        let result = manager.cancel_item(
            &kitchen(),
            &order_id,
            item_id,
            None,
            CommandOptions::default(),
        );
        assert_eq!(error_code(result), ErrorCode::InvalidTransition);
    }

    let after = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_cancel_from_each_live_state() {
    let manager = create_test_manager();
    let (order_id, items) =
        open_with_items(&manager, 1, vec![chicha(1), chicha(1), chicha(1), chicha(1)]);

    // items[i] advanced i times: queued, preparing, ready, (served stays)
    for (steps, item_id) in items.iter().enumerate() {
        for _ in 0..steps.min(3) {
            manager
                .advance_item(&kitchen(), &order_id, item_id, CommandOptions::default())
                .unwrap();
        }
    }

    for item_id in &items[..3] {
        let item = manager
            .cancel_item(
                &kitchen(),
                &order_id,
                item_id,
                Some("error de comanda".into()),
                CommandOptions::default(),
            )
            .unwrap();
        assert_eq!(item.status, ItemStatus::Cancelled);
        assert_eq!(item.cancel_reason.as_deref(), Some("error de comanda"));
        assert_eq!(item.cancelled_at, Some(T0));
    }

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total, 8.5);
    assert_eq!(snapshot.status, OrderStatus::Served);
}

#[test]
fn test_all_items_cancelled_closes_order() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![chicha(1)]);

    manager
        .cancel_item(&kitchen(), &order_id, &items[0], None, CommandOptions::default())
        .unwrap();
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Cancelled);
    assert_eq!(snapshot.total, 0.0);

    let result = manager.add_item(&waiter(), &order_id, chicha(1), CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InvalidState);
}

#[test]
fn test_unknown_item() {
    let manager = create_test_manager();
    let (order_id, _) = open_with_items(&manager, 1, vec![chicha(1)]);

    let result = manager.advance_item(&kitchen(), &order_id, "nope", CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::ItemNotFound);
    let result = manager.advance_item(
        &kitchen(),
        "missing-order",
        "nope",
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::OrderNotFound);
}

#[test]
fn test_add_item_validation() {
    let manager = create_test_manager();
    let (order_id, _) = open_with_items(&manager, 1, vec![]);

    let mut free = chicha(1);
    free.unit_price = -1.0;
    assert_eq!(
        error_code(manager.add_item(&waiter(), &order_id, free, CommandOptions::default())),
        ErrorCode::ValidationFailed
    );

    let mut nan = chicha(1);
    nan.unit_price = f64::NAN;
    assert_eq!(
        error_code(manager.add_item(&waiter(), &order_id, nan, CommandOptions::default())),
        ErrorCode::ValidationFailed
    );

    assert_eq!(
        error_code(manager.add_item(&waiter(), &order_id, chicha(0), CommandOptions::default())),
        ErrorCode::ValidationFailed
    );

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.version, 1);
}

#[test]
fn test_stock_gates_sales() {
    let manager = create_test_manager();
    set_stock(manager.storage(), 3.0);
    let (order_id, _) = open_with_items(&manager, 1, vec![]);

    // 2 kg per ceviche: one fits, two do not
    manager.check_stock(&waiter(), CEVICHE, 1).unwrap();
    let err = manager.check_stock(&waiter(), CEVICHE, 2).unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);

    manager.add_item(&waiter(), &order_id, ceviche(1), CommandOptions::default()).unwrap();
    let fish = manager.storage().get_ingredient(1).unwrap().unwrap();
    assert_eq!(fish.stock, 1.0);

    let result = manager.add_item(&waiter(), &order_id, ceviche(1), CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InsufficientStock);
    let fish = manager.storage().get_ingredient(1).unwrap().unwrap();
    assert_eq!(fish.stock, 1.0);

    // Products without a recipe always pass
    manager.check_stock(&waiter(), CHICHA, 500).unwrap();
}

#[test]
fn test_cancel_does_not_restock() {
    let manager = create_test_manager();
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(3)]);
    manager
        .cancel_item(&kitchen(), &order_id, &items[0], None, CommandOptions::default())
        .unwrap();

    let fish = manager.storage().get_ingredient(1).unwrap().unwrap();
    assert_eq!(fish.stock, 94.0);
}

#[test]
fn test_low_stock_listing() {
    let manager = create_test_manager();
    assert!(manager.low_stock(&admin()).unwrap().is_empty());

    set_stock(manager.storage(), 3.0);
    let (order_id, _) = open_with_items(&manager, 1, vec![]);
    manager.add_item(&waiter(), &order_id, ceviche(1), CommandOptions::default()).unwrap();

    let low = manager.low_stock(&kitchen()).unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Pescado");
}

#[test]
fn test_urgent_items_and_board() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1)]);
    now.store(T0 + 5 * 60_000, Ordering::SeqCst);
    let (_, late) = open_with_items(&manager, 2, vec![chicha(1)]);

    now.store(T0 + 22 * 60_000, Ordering::SeqCst);
    let urgent = manager.urgent_items(&kitchen(), None).unwrap();
    assert_eq!(urgent.len(), 1);
    assert_eq!(urgent[0].item_id, items[0]);

    now.store(T0 + 26 * 60_000, Ordering::SeqCst);
    assert_eq!(manager.urgent_items(&kitchen(), None).unwrap().len(), 2);
    let drinks = manager
        .urgent_items(&kitchen(), Some(Station::Drink))
        .unwrap();
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].item_id, late[0]);

    manager.advance_item(&kitchen(), &order_id, &items[0], CommandOptions::default()).unwrap();
    let board = manager.board(&kitchen(), None).unwrap();
    assert_eq!(board.column(ItemStatus::Queued).len(), 1);
    assert_eq!(board.column(ItemStatus::Preparing).len(), 1);
    assert_eq!(board.open_orders, 2);
}

#[test]
fn test_station_stats_flow() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);
    let (order_id, items) = open_with_items(&manager, 1, vec![ceviche(1), ceviche(1)]);
    let (_, drinks) = open_with_items(&manager, 2, vec![chicha(1)]);

    // First ceviche: started at +5 min, served at +17 min
    now.store(T0 + 5 * 60_000, Ordering::SeqCst);
    manager
        .advance_item(&kitchen(), &order_id, &items[0], CommandOptions::default())
        .unwrap();
    now.store(T0 + 12 * 60_000, Ordering::SeqCst);
    manager
        .advance_item(&kitchen(), &order_id, &items[0], CommandOptions::default())
        .unwrap();
    now.store(T0 + 17 * 60_000, Ordering::SeqCst);
    manager
        .advance_item(&waiter(), &order_id, &items[0], CommandOptions::default())
        .unwrap();

    let stats = manager.station_stats(&kitchen(), Station::Cold).unwrap();
    assert_eq!(stats.served_last_24h, 1);
    assert_eq!(stats.avg_prep_minutes, 12.0);
    assert_eq!(stats.active_tables, 1);
    assert_eq!(stats.by_status[0].status, ItemStatus::Queued);
    assert_eq!(stats.by_status[0].count, 1);

    let bar = manager.station_stats(&cashier(), Station::Drink).unwrap();
    assert_eq!(bar.by_status[0].count, drinks.len());
    assert_eq!(bar.served_last_24h, 0);

    // A day later the served ceviche leaves the window
    now.store(T0 + 17 * 60_000 + 24 * HOUR + 1, Ordering::SeqCst);
    let stats = manager.station_stats(&kitchen(), Station::Cold).unwrap();
    assert_eq!(stats.served_last_24h, 0);
    assert_eq!(stats.avg_prep_minutes, 0.0);
}
