//! Menu catalog validation and slug helpers.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Menu prices are `NUMERIC(6, 2)`: at most four integer digits.
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Number of decimal places allowed on a price.
pub const PRICE_SCALE: u32 = 2;

/// Validate a menu item price: non-negative, at most two decimal places, and
/// within the column's precision.
///
/// Signature matches `#[validate(custom(function = ...))]`.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(price_error("Price must not be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(price_error("Price must have at most 2 decimal places"));
    }
    if *price > MAX_PRICE {
        return Err(price_error("Price must not exceed 9999.99"));
    }
    Ok(())
}

fn price_error(message: &'static str) -> ValidationError {
    ValidationError::new("price").with_message(message.into())
}

/// Derive a URL slug from a title: lowercase ASCII alphanumerics separated
/// by single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
