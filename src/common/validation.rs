// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// Valores monetários, percentuais e quantidades nunca são negativos.
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("negative_value".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_only_strictly_negative_values() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(1050, 2)).is_ok());
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
    }
}
