use super::*;

const DAY: i64 = 24 * HOUR;

#[test]
fn test_cash_payment_exact() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);

    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();

    assert_eq!(receipt.change, 0.0);
    assert_eq!(receipt.payment.amount, 50.0);
    assert_eq!(receipt.payment.tendered, 50.0);
    assert_eq!(receipt.payment.paid_at, T0);
    assert_eq!(receipt.order.status, OrderStatus::Paid);
    assert_eq!(receipt.order.closed_at, Some(T0));
    assert_eq!(table_status(&manager, 1), TableStatus::Available);
    assert!(manager.get_active_orders().unwrap().is_empty());
}

#[test]
fn test_cash_payment_with_change() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);

    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            70.0,
            CommandOptions::default(),
        )
        .unwrap();

    assert_eq!(receipt.change, 20.0);
    assert_eq!(receipt.payment.amount, 50.0);
    assert_eq!(receipt.payment.tendered, 70.0);
}

#[test]
fn test_cash_payment_short() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);

    let err = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            49.99,
            CommandOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientCash);
    assert_eq!(err.detail("tendered"), Some(&serde_json::json!(49.99)));

    // Nothing was recorded
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert!(snapshot.payments.is_empty());
    assert_eq!(snapshot.status, OrderStatus::Served);
    assert_eq!(table_status(&manager, 1), TableStatus::Occupied);
}

#[test]
fn test_cash_shortfall_tolerance() {
    let manager = create_test_manager().with_policy(OrderPolicy {
        cash_shortfall_tolerance: rust_decimal::Decimal::new(5, 2),
        ..OrderPolicy::default()
    });
    let order_id = served_order(&manager, 1);

    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            49.97,
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(receipt.change, 0.0);
    assert_eq!(receipt.payment.amount, 50.0);
}

#[test]
fn test_non_cash_requires_exact_amount() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);

    for method in [PaymentMethod::Card, PaymentMethod::Yape] {
        let result = manager.process_payment(
            &cashier(),
            &order_id,
            method,
            55.0,
            CommandOptions::default(),
        );
        assert_eq!(error_code(result), ErrorCode::ValidationFailed);
    }

    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Plin,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(receipt.change, 0.0);
    assert_eq!(receipt.payment.method, PaymentMethod::Plin);
}

#[test]
fn test_non_cash_rejects_sub_cent_difference() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);

    for amount in [49.995, 49.99, 50.01] {
        let result = manager.process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Card,
            amount,
            CommandOptions::default(),
        );
        assert_eq!(error_code(result), ErrorCode::ValidationFailed);
    }

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert!(snapshot.payments.is_empty());
    assert_eq!(snapshot.status, OrderStatus::Served);
}

#[test]
fn test_payment_preconditions() {
    let manager = create_test_manager();
    let (order_id, _) = open_with_items(&manager, 1, vec![ceviche(2)]);

    // Not served yet
    let result = manager.process_payment(
        &cashier(),
        &order_id,
        PaymentMethod::Cash,
        50.0,
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InvalidState);

    serve_all(&manager, &order_id);
    for amount in [0.0, -10.0, f64::INFINITY] {
        let result = manager.process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            amount,
            CommandOptions::default(),
        );
        assert_eq!(error_code(result), ErrorCode::ValidationFailed);
    }

    manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();

    // Already settled
    let result = manager.process_payment(
        &cashier(),
        &order_id,
        PaymentMethod::Cash,
        50.0,
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InvalidState);
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.payments.len(), 1);
}

#[test]
fn test_paid_order_is_frozen() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);
    let item_id = manager.get_snapshot(&order_id).unwrap().unwrap().items[0]
        .item_id
        .clone();
    manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Card,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();

    let result = manager.add_item(&waiter(), &order_id, chicha(1), CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InvalidState);
    let result = manager.cancel_item(
        &admin(),
        &order_id,
        &item_id,
        None,
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InvalidState);
    let result = manager.delete_order(&admin(), &order_id, None, CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InvalidState);
    let update = OrderInfoUpdate {
        customer_name: Some("tarde".into()),
        ..Default::default()
    };
    let result = manager.update_order_info(&waiter(), &order_id, update, CommandOptions::default());
    assert_eq!(error_code(result), ErrorCode::InvalidState);
}

#[test]
fn test_void_payment_reopens_account() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);
    let order_id = served_order(&manager, 1);
    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            70.0,
            CommandOptions::default(),
        )
        .unwrap();

    now.store(T0 + 2 * HOUR, Ordering::SeqCst);
    let voided = manager
        .void_payment(
            &cashier(),
            &order_id,
            &receipt.payment.payment_id,
            Some("cobro duplicado".into()),
            CommandOptions::default(),
        )
        .unwrap();

    assert_eq!(voided.status, PaymentStatus::Voided);
    assert_eq!(voided.voided_at, Some(T0 + 2 * HOUR));
    assert_eq!(voided.voided_by, Some(5));
    assert_eq!(voided.void_reason.as_deref(), Some("cobro duplicado"));

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Served);
    assert_eq!(snapshot.closed_at, None);
    assert_eq!(table_status(&manager, 1), TableStatus::Occupied);
    assert_eq!(manager.get_active_orders().unwrap().len(), 1);

    // The account can be settled again
    let receipt = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Yape,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(receipt.order.payments.len(), 2);
    assert_eq!(receipt.order.status, OrderStatus::Paid);
}

#[test]
fn test_void_refused_after_table_reopened() {
    let manager = create_test_manager();
    let first = served_order(&manager, 1);
    let receipt = manager
        .process_payment(
            &cashier(),
            &first,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(table_status(&manager, 1), TableStatus::Available);

    // M1 is seated again before the cashier notices the mistake
    let second = served_order(&manager, 1);
    assert_eq!(table_status(&manager, 1), TableStatus::Occupied);

    let err = manager
        .void_payment(
            &admin(),
            &first,
            &receipt.payment.payment_id,
            None,
            CommandOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableNotAvailable);
    assert_eq!(err.detail("table_id"), Some(&serde_json::json!(1)));

    let snapshot = manager.get_snapshot(&first).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert_eq!(snapshot.payments[0].status, PaymentStatus::Paid);

    // Settling the second order frees M1 and nothing else holds it
    manager
        .process_payment(
            &cashier(),
            &second,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();
    assert_eq!(table_status(&manager, 1), TableStatus::Available);
    assert!(manager.get_active_orders().unwrap().is_empty());
}

#[test]
fn test_void_window_boundary() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);

    let first = served_order(&manager, 1);
    let second = served_order(&manager, 2);
    let p1 = manager
        .process_payment(&cashier(), &first, PaymentMethod::Cash, 50.0, CommandOptions::default())
        .unwrap()
        .payment;
    let p2 = manager
        .process_payment(&cashier(), &second, PaymentMethod::Cash, 50.0, CommandOptions::default())
        .unwrap()
        .payment;

    // Exactly 24h is still voidable
    now.store(T0 + DAY, Ordering::SeqCst);
    manager
        .void_payment(&admin(), &first, &p1.payment_id, None, CommandOptions::default())
        .unwrap();

    // 24h + 1s is not
    now.store(T0 + DAY + 1_000, Ordering::SeqCst);
    let err = manager
        .void_payment(&admin(), &second, &p2.payment_id, None, CommandOptions::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::VoidWindowExpired);
    assert_eq!(err.detail("window_secs"), Some(&serde_json::json!(86_400)));

    let snapshot = manager.get_snapshot(&second).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert_eq!(snapshot.payments[0].status, PaymentStatus::Paid);
}

#[test]
fn test_void_requires_paid_payment() {
    let manager = create_test_manager();
    let order_id = served_order(&manager, 1);
    let payment = manager
        .process_payment(
            &cashier(),
            &order_id,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap()
        .payment;

    manager
        .void_payment(&cashier(), &order_id, &payment.payment_id, None, CommandOptions::default())
        .unwrap();
    let result = manager.void_payment(
        &cashier(),
        &order_id,
        &payment.payment_id,
        None,
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::InvalidState);

    let result = manager.void_payment(
        &cashier(),
        &order_id,
        "no-such-payment",
        None,
        CommandOptions::default(),
    );
    assert_eq!(error_code(result), ErrorCode::PaymentNotFound);
}

#[test]
fn test_open_accounts_and_stats() {
    let manager = create_test_manager();
    let paid = served_order(&manager, 1);
    let open = served_order(&manager, 2);

    let payment = manager
        .process_payment(&cashier(), &paid, PaymentMethod::Cash, 60.0, CommandOptions::default())
        .unwrap()
        .payment;

    let accounts = manager.open_accounts(&cashier()).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].order_id, open);
    assert_eq!(accounts[0].total, 50.0);
    assert_eq!(accounts[0].lines[0].line_total, 50.0);

    manager
        .process_payment(&cashier(), &open, PaymentMethod::Card, 50.0, CommandOptions::default())
        .unwrap();
    manager
        .void_payment(&cashier(), &paid, &payment.payment_id, None, CommandOptions::default())
        .unwrap();

    let stats = manager.payment_stats(&admin()).unwrap();
    assert_eq!(stats.paid_count, 1);
    assert_eq!(stats.voided_count, 1);
    assert_eq!(stats.revenue, 50.0);
    assert_eq!(stats.revenue_today, 50.0);
    assert_eq!(stats.revenue_month, 50.0);
    let card = stats
        .by_method
        .iter()
        .find(|m| m.method == PaymentMethod::Card)
        .unwrap();
    assert_eq!((card.count, card.amount), (1, 50.0));
}

#[test]
fn test_revenue_rolls_over_days() {
    let manager = create_test_manager();
    let now = manual_clock(&manager, T0);
    let first = served_order(&manager, 1);
    manager
        .process_payment(
            &cashier(),
            &first,
            PaymentMethod::Cash,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();

    now.store(T0 + DAY, Ordering::SeqCst);
    let second = served_order(&manager, 1);
    manager
        .process_payment(
            &cashier(),
            &second,
            PaymentMethod::Yape,
            50.0,
            CommandOptions::default(),
        )
        .unwrap();

    let stats = manager.payment_stats(&cashier()).unwrap();
    assert_eq!(stats.revenue, 100.0);
    assert_eq!(stats.revenue_today, 50.0);
    assert_eq!(stats.revenue_month, 100.0);

    let orders = manager.order_stats(&admin()).unwrap();
    assert_eq!(orders.total_orders, 2);
    assert_eq!(orders.active_orders, 0);
    let paid = orders
        .by_status
        .iter()
        .find(|c| c.status == OrderStatus::Paid)
        .unwrap();
    assert_eq!(paid.count, 2);
}
