//! Read models over order snapshots (cashier, dashboard and station views)

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::orders::money::{line_total, to_decimal, to_f64};
use shared::order::{
    ItemStatus, OrderSnapshot, OrderStatus, PaymentMethod, PaymentStatus, Station,
};
use shared::util::date_stamp;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const MINUTE_MS: i64 = 60 * 1000;

/// One line of an open account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountLine {
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// A fully served order awaiting payment (cuenta abierta)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAccount {
    pub order_id: String,
    pub order_number: String,
    pub table_number: Option<String>,
    pub waiter_name: String,
    pub customer_name: Option<String>,
    pub guest_count: i32,
    pub total: f64,
    pub lines: Vec<AccountLine>,
    pub updated_at: i64,
}

/// Served, unpaid, not deleted orders in input order
pub fn open_accounts(snapshots: &[OrderSnapshot]) -> Vec<OpenAccount> {
    snapshots
        .iter()
        .filter(|s| !s.is_deleted() && s.status == OrderStatus::Served)
        .map(|s| OpenAccount {
            order_id: s.order_id.clone(),
            order_number: s.order_number.clone(),
            table_number: s.table_number.clone(),
            waiter_name: s.waiter_name.clone(),
            customer_name: s.customer_name.clone(),
            guest_count: s.guest_count,
            total: s.total,
            lines: s
                .active_items()
                .map(|i| AccountLine {
                    item_id: i.item_id.clone(),
                    name: i.name.clone(),
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                    line_total: to_f64(line_total(i)),
                })
                .collect(),
            updated_at: s.updated_at,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub count: usize,
    pub amount: f64,
}

/// Payment statistics for the cashier dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentStats {
    pub paid_count: usize,
    pub voided_count: usize,
    /// Sum of active (pagado) payments
    pub revenue: f64,
    /// Active payments taken on the current UTC day (ingresos hoy)
    pub revenue_today: f64,
    /// Active payments taken in the current UTC month (ingresos mes)
    pub revenue_month: f64,
    /// One entry per method, in [`PaymentMethod::ALL`] order
    pub by_method: Vec<MethodTotal>,
}

pub fn payment_stats(snapshots: &[OrderSnapshot], now: i64) -> PaymentStats {
    let today = date_stamp(now);
    let month = today.get(..6).unwrap_or_default();
    let mut paid_count = 0;
    let mut voided_count = 0;
    let mut revenue = Decimal::ZERO;
    let mut revenue_today = Decimal::ZERO;
    let mut revenue_month = Decimal::ZERO;
    let mut per_method: Vec<(PaymentMethod, usize, Decimal)> = PaymentMethod::ALL
        .iter()
        .map(|m| (*m, 0, Decimal::ZERO))
        .collect();

    for payment in snapshots.iter().flat_map(|s| s.payments.iter()) {
        match payment.status {
            PaymentStatus::Paid => {
                paid_count += 1;
                let amount = to_decimal(payment.amount);
                revenue += amount;
                let paid_on = date_stamp(payment.paid_at);
                if paid_on.starts_with(month) {
                    revenue_month += amount;
                    if paid_on == today {
                        revenue_today += amount;
                    }
                }
                if let Some(entry) = per_method.iter_mut().find(|(m, _, _)| *m == payment.method) {
                    entry.1 += 1;
                    entry.2 += amount;
                }
            }
            PaymentStatus::Voided => voided_count += 1,
            PaymentStatus::Pending => {}
        }
    }

    PaymentStats {
        paid_count,
        voided_count,
        revenue: to_f64(revenue),
        revenue_today: to_f64(revenue_today),
        revenue_month: to_f64(revenue_month),
        by_method: per_method
            .into_iter()
            .map(|(method, count, amount)| MethodTotal {
                method,
                count,
                amount: to_f64(amount),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Order counts for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    /// Every order that was not deleted
    pub total_orders: usize,
    /// Not deleted, not paid, not cancelled
    pub active_orders: usize,
    pub deleted_orders: usize,
    /// One entry per status, in [`OrderStatus::ALL`] order
    pub by_status: Vec<OrderStatusCount>,
}

pub fn order_stats(snapshots: &[OrderSnapshot]) -> OrderStats {
    let deleted_orders = snapshots.iter().filter(|s| s.is_deleted()).count();
    let live: Vec<&OrderSnapshot> = snapshots.iter().filter(|s| !s.is_deleted()).collect();

    OrderStats {
        total_orders: live.len(),
        active_orders: live.iter().filter(|s| !s.status.is_closed()).count(),
        deleted_orders,
        by_status: OrderStatus::ALL
            .iter()
            .map(|status| OrderStatusCount {
                status: *status,
                count: live.iter().filter(|s| s.status == *status).count(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStatusCount {
    pub status: ItemStatus,
    pub count: usize,
}

/// Workload and throughput of one kitchen station (estadisticas de estacion)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub station: Station,
    /// One entry per item status, in [`ItemStatus::ALL`] order
    pub by_status: Vec<ItemStatusCount>,
    /// Mean minutes from start of preparation to served, last 24h
    pub avg_prep_minutes: f64,
    /// Items served in the last 24h
    pub served_last_24h: usize,
    /// Tables still waiting on a queued, preparing or ready item
    pub active_tables: usize,
}

/// Station stats over non-deleted orders; the 24h window ends at `now`
pub fn station_stats(snapshots: &[OrderSnapshot], station: Station, now: i64) -> StationStats {
    let mut counts = [0usize; ItemStatus::ALL.len()];
    let mut prep_total = Decimal::ZERO;
    let mut served_last_24h = 0usize;
    let mut tables = BTreeSet::new();

    for snapshot in snapshots.iter().filter(|s| !s.is_deleted()) {
        for item in snapshot.items.iter().filter(|i| i.station == station) {
            if let Some(slot) = ItemStatus::ALL.iter().position(|s| *s == item.status) {
                counts[slot] += 1;
            }
            if !item.status.is_terminal()
                && let Some(table_id) = snapshot.table_id
            {
                tables.insert(table_id);
            }
            if let Some(served_at) = item.served_at
                && item.status == ItemStatus::Served
                && served_at >= now - DAY_MS
            {
                let started = item.started_at.unwrap_or(item.created_at);
                served_last_24h += 1;
                prep_total += Decimal::from(served_at - started) / Decimal::from(MINUTE_MS);
            }
        }
    }

    let avg_prep = if served_last_24h == 0 {
        Decimal::ZERO
    } else {
        prep_total / Decimal::from(served_last_24h)
    };

    StationStats {
        station,
        by_status: ItemStatus::ALL
            .iter()
            .zip(counts)
            .map(|(status, count)| ItemStatusCount {
                status: *status,
                count,
            })
            .collect(),
        avg_prep_minutes: to_f64(avg_prep),
        served_last_24h,
        active_tables: tables.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::testing::{item, order};
    use shared::order::{ItemStatus, PaymentRecord};

    fn payment(id: &str, method: PaymentMethod, status: PaymentStatus, amount: f64) -> PaymentRecord {
        PaymentRecord {
            payment_id: id.into(),
            order_id: "order-1".into(),
            method,
            status,
            amount,
            tendered: amount,
            change: 0.0,
            paid_at: 0,
            voided_at: None,
            voided_by: None,
            void_reason: None,
        }
    }

    #[test]
    fn test_open_accounts_only_served() {
        let served = order(
            "a",
            vec![
                item("i-1", ItemStatus::Served, 2, 18.5),
                item("i-2", ItemStatus::Cancelled, 1, 10.0),
            ],
        );
        let cooking = order("b", vec![item("i-3", ItemStatus::Preparing, 1, 10.0)]);
        let mut deleted = order("c", vec![item("i-4", ItemStatus::Served, 1, 10.0)]);
        deleted.deleted_at = Some(1);

        let accounts = open_accounts(&[served, cooking, deleted]);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].order_id, "a");
        assert_eq!(accounts[0].total, 37.0);
        assert_eq!(accounts[0].lines.len(), 1);
        assert_eq!(accounts[0].lines[0].line_total, 37.0);
    }

    #[test]
    fn test_payment_stats() {
        let mut a = order("a", vec![]);
        a.payments = vec![
            payment("p-1", PaymentMethod::Cash, PaymentStatus::Voided, 40.0),
            payment("p-2", PaymentMethod::Yape, PaymentStatus::Paid, 40.0),
        ];
        let mut b = order("b", vec![]);
        b.payments = vec![payment("p-3", PaymentMethod::Cash, PaymentStatus::Paid, 12.35)];

        let stats = payment_stats(&[a, b], 0);
        assert_eq!(stats.paid_count, 2);
        assert_eq!(stats.voided_count, 1);
        assert_eq!(stats.revenue, 52.35);

        let cash = stats
            .by_method
            .iter()
            .find(|m| m.method == PaymentMethod::Cash)
            .unwrap();
        assert_eq!((cash.count, cash.amount), (1, 12.35));
        assert_eq!(stats.by_method.len(), PaymentMethod::ALL.len());
    }

    /// 2024-03-05T12:00:00Z
    const NOW: i64 = 1_709_640_000_000;
    const DAY: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_revenue_today_and_month() {
        let paid_at = |id: &str, amount: f64, at: i64| {
            let mut p = payment(id, PaymentMethod::Cash, PaymentStatus::Paid, amount);
            p.paid_at = at;
            p
        };
        let mut a = order("a", vec![]);
        a.payments = vec![
            paid_at("p-1", 30.0, NOW - 60_000),
            paid_at("p-2", 20.5, NOW - 2 * DAY),
        ];
        let mut b = order("b", vec![]);
        b.payments = vec![paid_at("p-3", 100.0, NOW - 10 * DAY)];
        let mut voided = payment("p-4", PaymentMethod::Yape, PaymentStatus::Voided, 45.0);
        voided.paid_at = NOW;
        b.payments.push(voided);

        let stats = payment_stats(&[a, b], NOW);
        assert_eq!(stats.revenue_today, 30.0);
        // 2024-02-24 falls in the previous month
        assert_eq!(stats.revenue_month, 50.5);
        assert_eq!(stats.revenue, 150.5);
    }

    #[test]
    fn test_order_stats_by_status() {
        let served = order("a", vec![item("i-1", ItemStatus::Served, 1, 10.0)]);
        let cooking = order("b", vec![item("i-2", ItemStatus::Preparing, 1, 10.0)]);
        let cancelled = order("c", vec![item("i-3", ItemStatus::Cancelled, 1, 10.0)]);
        let mut deleted = order("d", vec![]);
        deleted.deleted_at = Some(1);

        let stats = order_stats(&[served, cooking, cancelled, deleted]);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.active_orders, 2);
        assert_eq!(stats.deleted_orders, 1);
        assert_eq!(stats.by_status.len(), OrderStatus::ALL.len());
        let count = |status: OrderStatus| {
            stats
                .by_status
                .iter()
                .find(|c| c.status == status)
                .map(|c| c.count)
        };
        assert_eq!(count(OrderStatus::Served), Some(1));
        assert_eq!(count(OrderStatus::Cancelled), Some(1));
        assert_eq!(count(OrderStatus::Pending), Some(0));
    }

    #[test]
    fn test_station_stats() {
        let mut fast = item("i-1", ItemStatus::Served, 1, 20.0);
        fast.started_at = Some(NOW - 30 * 60_000);
        fast.served_at = Some(NOW - 20 * 60_000);
        let mut slow = item("i-2", ItemStatus::Served, 1, 20.0);
        slow.started_at = Some(NOW - 60 * 60_000);
        slow.served_at = Some(NOW - 35 * 60_000);
        let mut yesterday = item("i-3", ItemStatus::Served, 1, 20.0);
        yesterday.started_at = Some(NOW - 2 * DAY);
        yesterday.served_at = Some(NOW - 2 * DAY + 60_000);
        let waiting = item("i-4", ItemStatus::Queued, 1, 20.0);
        let mut hot = item("i-5", ItemStatus::Queued, 1, 20.0);
        hot.station = Station::Hot;

        let first = order("a", vec![fast, slow, yesterday]);
        let mut second = order("b", vec![waiting, hot]);
        second.table_id = Some(2);

        let stats = station_stats(&[first, second], Station::Cold, NOW);
        assert_eq!(stats.served_last_24h, 2);
        // (10 + 25) / 2
        assert_eq!(stats.avg_prep_minutes, 17.5);
        assert_eq!(stats.active_tables, 1);
        let served = &stats.by_status[3];
        assert_eq!((served.status, served.count), (ItemStatus::Served, 3));
        assert_eq!(stats.by_status[0].count, 1);

        let idle = station_stats(&[], Station::Dessert, NOW);
        assert_eq!(idle.avg_prep_minutes, 0.0);
        assert_eq!(idle.active_tables, 0);
    }
}
