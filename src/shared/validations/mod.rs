use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::shared::types::DomainError;

/// Money amounts (rates, limits) may be zero but never negative.
pub fn ensure_non_negative(value: Decimal, field: &str) -> Result<Decimal, DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::Validation(format!(
            "{}: must not be negative (got {})",
            field, value
        )));
    }
    Ok(value)
}

pub fn ensure_positive(value: i32, field: &str) -> Result<i32, DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation(format!(
            "{}: must be positive (got {})",
            field, value
        )));
    }
    Ok(value)
}

/// Sorted, duplicate-free id set.
pub fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_allowed() {
        assert!(ensure_non_negative(Decimal::ZERO, "rate").is_ok());
        assert!(ensure_non_negative(Decimal::new(-1, 2), "rate").is_err());
    }

    #[test]
    fn capacity_must_be_positive() {
        assert!(ensure_positive(1, "capacity").is_ok());
        assert!(ensure_positive(0, "capacity").is_err());
        assert!(ensure_positive(-4, "capacity").is_err());
    }

    #[test]
    fn distinct_ids_sorts_and_dedupes() {
        assert_eq!(distinct_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(distinct_ids(&[]).is_empty());
    }
}
