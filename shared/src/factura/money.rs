//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for display/serialization.

use rust_decimal::prelude::*;

use super::CartItem;
use crate::error::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// IVA rate applied to the discounted subtotal (21%)
pub const IVA_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Maximum allowed unit price
const MAX_PRICE: f64 = 100_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub(crate) fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{} debe ser un número finito, se recibió {}", field_name, value),
        ));
    }
    Ok(())
}

/// Validate a cart line before it enters the session
pub fn validate_cart_item(item: &CartItem) -> Result<(), AppError> {
    require_finite(item.precio_unitario, "precio_unitario")?;
    if item.precio_unitario < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("el precio no puede ser negativo: {}", item.precio_unitario),
        ));
    }
    if item.precio_unitario > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!(
                "el precio supera el máximo permitido ({}): {}",
                MAX_PRICE, item.precio_unitario
            ),
        ));
    }
    validate_quantity(item.cantidad)
}

/// Quantity must be positive and within bounds
pub fn validate_quantity(cantidad: i32) -> Result<(), AppError> {
    if cantidad <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("la cantidad debe ser positiva: {}", cantidad),
        ));
    }
    if cantidad > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "la cantidad supera el máximo permitido ({}): {}",
                MAX_QUANTITY, cantidad
            ),
        ));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
