//! Money parsing helpers.

use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use storefront_app::domain::money::is_valid_amount;

use crate::extensions::*;

/// Parse a decimal string such as `"50.00"` into an amount.
pub(crate) trait MoneyExt {
    fn into_amount(self, field: &str) -> Result<Decimal, StatusError>;
}

impl MoneyExt for &str {
    fn into_amount(self, field: &str) -> Result<Decimal, StatusError> {
        let amount = self
            .trim()
            .parse::<Decimal>()
            .or_400(&format!("\"{field}\" must be a decimal string"))?;

        if !is_valid_amount(amount) {
            return Err(StatusError::bad_request().brief(format!(
                "\"{field}\" must be non-negative with at most two decimal places"
            )));
        }

        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_two_place_amounts() -> TestResult {
        assert_eq!("50.00".into_amount("price")?, Decimal::new(5000, 2));
        assert_eq!(" 7 ".into_amount("price")?, Decimal::new(7, 0));

        Ok(())
    }

    #[test]
    fn rejects_malformed_and_out_of_range_amounts() {
        for input in ["abc", "-1.00", "1.005", ""] {
            let result = input.into_amount("price");

            assert!(
                matches!(&result, Err(error) if error.code == StatusCode::BAD_REQUEST),
                "expected 400 for {input:?}, got {result:?}"
            );
        }
    }
}
