//! Field validators shared by the request inputs

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::GymError;

/// Largest monthly price a plan row holds, `NUMERIC(10, 2)`
pub(crate) fn max_monthly_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Largest enrollment price a row holds, `NUMERIC(14, 2)`
pub(crate) fn max_total_price() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Reject empty or whitespace-only text
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Accept monthly prices from zero up to [`max_monthly_price`]
pub(crate) fn monthly_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative").with_message("must not be negative".into()));
    }
    if *value > max_monthly_price() {
        return Err(ValidationError::new("too_large")
            .with_message(format!("must be at most {}", max_monthly_price()).into()));
    }
    Ok(())
}

/// Reject plans whose whole-duration price overflows an enrollment row
pub(crate) fn total_price_fits(duration: i32, price: Decimal) -> Result<(), GymError> {
    match Decimal::from(duration).checked_mul(price) {
        Some(total) if total <= max_total_price() => Ok(()),
        _ => Err(GymError::Validation(format!(
            "price: {price} over {duration} months exceeds {}",
            max_total_price()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("How do I stretch?").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("  \n\t").is_err());
    }

    #[test]
    fn test_monthly_price() {
        assert!(monthly_price(&dec!(0)).is_ok());
        assert!(monthly_price(&dec!(129.90)).is_ok());
        assert!(monthly_price(&dec!(99999999.99)).is_ok());
        assert!(monthly_price(&dec!(-0.01)).is_err());
        assert!(monthly_price(&dec!(100000000)).is_err());
    }

    #[test]
    fn test_total_price_fits() {
        assert!(total_price_fits(120, dec!(999999.99)).is_ok());
        assert!(total_price_fits(10_000, dec!(99999999.99)).is_ok());
        assert!(matches!(
            total_price_fits(10_001, dec!(99999999.99)),
            Err(GymError::Validation(_))
        ));
    }
}
