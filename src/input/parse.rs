//! Locale tolerant number parsing for text inputs

use super::{Field, InputError};

/// Parse a decimal number, accepting either `.` or `,` as the separator
pub fn parse_decimal(field: Field, text: &str) -> Result<f64, InputError> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse a whole number. Fractional input is truncated toward zero.
pub fn parse_whole(field: Field, text: &str) -> Result<i64, InputError> {
    let value = parse_decimal(field, text).map_err(|_| InputError::NotAWholeNumber {
        field,
        value: text.to_string(),
    })?;
    // `as` saturates at the i64 bounds
    Ok(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(Field::InitialSum, "1234.5").unwrap(), 1234.5);
        assert_eq!(parse_decimal(Field::InitialSum, " 1234,5 ").unwrap(), 1234.5);
        assert_eq!(parse_decimal(Field::GrowthRate, "-7").unwrap(), -7.0);
        assert_eq!(parse_decimal(Field::GrowthRate, "1e2").unwrap(), 100.0);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for text in ["", "  ", "abc", "1,000.5", "NaN", "inf", "12%"] {
            let err = parse_decimal(Field::DividendYield, text).unwrap_err();
            assert_eq!(
                err,
                InputError::NotANumber { field: Field::DividendYield, value: text.to_string() }
            );
        }
    }

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_whole(Field::PeriodYears, "20").unwrap(), 20);
        assert_eq!(parse_whole(Field::PeriodYears, "20.9").unwrap(), 20);
        assert_eq!(parse_whole(Field::PeriodYears, "20,9").unwrap(), 20);
        assert_eq!(parse_whole(Field::PeriodYears, "-0.5").unwrap(), 0);
        assert!(matches!(
            parse_whole(Field::PeriodYears, "ten"),
            Err(InputError::NotAWholeNumber { .. })
        ));
    }
}
