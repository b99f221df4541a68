//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `#[validate(custom = ...)]`.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Decimales que admite la columna `sales.price` (NUMERIC(12, 2))
const PRICE_MAX_SCALE: u32 = 2;
/// Dígitos enteros que admite la columna `sales.price`
const PRICE_MAX_INTEGER_DIGITS: u32 = 10;

/// Validar que un precio sea positivo y quepa en NUMERIC(12, 2) sin redondeo
pub fn validate_positive_price(value: &Decimal) -> Result<(), ValidationError> {
    let code = if *value <= Decimal::ZERO {
        Some("positive")
    } else if value.normalize().scale() > PRICE_MAX_SCALE {
        Some("price_scale")
    } else if *value >= Decimal::from(10_i64.pow(PRICE_MAX_INTEGER_DIGITS)) {
        Some("price_too_large")
    } else {
        None
    };

    match code {
        Some(code) => {
            let mut error = ValidationError::new(code);
            error.add_param("value".into(), &value.to_string());
            Err(error)
        }
        None => Ok(()),
    }
}

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
