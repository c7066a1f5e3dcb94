//! Derived money values for cart lines and orders.
//!
//! These are always computed from quantity and unit price at the moment they
//! are needed; nothing here is stored independently of its inputs.

use rust_decimal::Decimal;

/// Price of a single line: `quantity × unit_price`.
pub fn line_price(quantity: i16, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Largest amount the order total and item price columns (`NUMERIC(10, 2)`)
/// can hold.
pub const MAX_ORDER_TOTAL: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Whether an amount fits the stored order total and item price columns.
pub fn fits_order_total(amount: Decimal) -> bool {
    amount <= MAX_ORDER_TOTAL
}

/// Order total: the sum of all line prices.
pub fn order_total<I>(line_prices: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    line_prices.into_iter().sum()
}
