//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` (soles, two decimals) but every sum and
//! comparison goes through `Decimal`.

use crate::orders::traits::OrderError;
use rust_decimal::prelude::*;
use shared::order::{ItemInput, OrderItem, OrderSnapshot, PaymentMethod};

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (S/ 1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;
const MAX_GUESTS: i32 = 999;

#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::Validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate an item before it is added to an order
pub fn validate_item_input(item: &ItemInput) -> Result<(), OrderError> {
    if item.name.trim().is_empty() {
        return Err(OrderError::Validation("item name is required".to_string()));
    }

    require_finite(item.unit_price, "unit_price")?;
    if item.unit_price < 0.0 {
        return Err(OrderError::Validation(format!(
            "unit_price must be non-negative, got {}",
            item.unit_price
        )));
    }
    if item.unit_price > MAX_PRICE {
        return Err(OrderError::Validation(format!(
            "unit_price exceeds maximum allowed ({MAX_PRICE}), got {}",
            item.unit_price
        )));
    }

    validate_quantity(item.quantity)?;

    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), OrderError> {
    if quantity < 1 {
        return Err(OrderError::Validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::Validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

pub fn validate_guest_count(count: i32) -> Result<(), OrderError> {
    if !(1..=MAX_GUESTS).contains(&count) {
        return Err(OrderError::Validation(format!(
            "guest_count must be between 1 and {MAX_GUESTS}, got {count}"
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculations
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// quantity × unit_price
pub fn line_total(item: &OrderItem) -> Decimal {
    to_decimal(item.unit_price) * Decimal::from(item.quantity)
}

/// Σ line totals over non-cancelled items
pub fn calculate_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .filter(|i| !i.is_cancelled())
        .map(line_total)
        .sum()
}

/// Recompute the order total from its items
pub fn recalculate_totals(snapshot: &mut OrderSnapshot) {
    snapshot.total = to_f64(calculate_total(&snapshot.items));
}

/// Resolved amounts for one settlement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// Amount recorded on the payment (the order total)
    pub amount: f64,
    pub tendered: f64,
    pub change: f64,
}

/// Resolve a settlement of `total` with `amount` handed over via `method`.
///
/// Amounts carry at most two decimals. Cash may exceed the total and yields
/// change; it may fall short by at most `cash_tolerance`. Other methods must
/// match the total exactly.
pub fn settle(
    order_id: &str,
    total: f64,
    method: PaymentMethod,
    amount: f64,
    cash_tolerance: Decimal,
) -> Result<Settlement, OrderError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(OrderError::Validation(format!(
            "payment amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::Validation(format!(
            "payment amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT}), got {amount}"
        )));
    }

    let total_dec = to_decimal(total);
    let tendered_dec = to_decimal(amount);
    if tendered_dec.normalize().scale() > DECIMAL_PLACES {
        return Err(OrderError::Validation(format!(
            "payment amount must have at most {DECIMAL_PLACES} decimal places, got {amount}"
        )));
    }

    if method.is_cash() {
        if tendered_dec < total_dec - cash_tolerance {
            return Err(OrderError::InsufficientCash {
                order_id: order_id.to_string(),
                total,
                tendered: amount,
            });
        }
        let change = (tendered_dec - total_dec).max(Decimal::ZERO);
        return Ok(Settlement {
            amount: to_f64(total_dec),
            tendered: to_f64(tendered_dec),
            change: to_f64(change),
        });
    }

    if tendered_dec != total_dec {
        return Err(OrderError::Validation(format!(
            "{} payment must match the order total {total}, got {amount}",
            method.as_str()
        )));
    }
    Ok(Settlement {
        amount: to_f64(total_dec),
        tendered: to_f64(tendered_dec),
        change: 0.0,
    })
}
