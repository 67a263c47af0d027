//! DTOs for the exchange rate endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// `GET /api/fx?base=EUR&symbols=USD,GBP`
#[derive(Debug, Deserialize, Validate)]
pub struct FxParams {
    #[serde(deserialize_with = "super::trim::upper")]
    #[validate(custom(function = "validate_currency"))]
    pub base: String,

    /// Comma-separated currency codes.
    #[serde(default, deserialize_with = "super::trim::option")]
    #[validate(custom(function = "validate_symbols"))]
    pub symbols: Option<String>,
}

impl FxParams {
    /// Requested symbols, upper-cased, blanks dropped.
    pub fn symbol_list(&self) -> Vec<String> {
        self.symbols
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(|c| c.trim().to_ascii_uppercase())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn validate_currency(base: &str) -> Result<(), ValidationError> {
    if is_currency_code(base) {
        Ok(())
    } else {
        Err(ValidationError::new("currency")
            .with_message("Expected a 3-letter currency code".into()))
    }
}

fn validate_symbols(symbols: &str) -> Result<(), ValidationError> {
    let all_valid = symbols
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .all(is_currency_code);

    if all_valid {
        Ok(())
    } else {
        Err(ValidationError::new("symbols")
            .with_message("Expected comma-separated 3-letter currency codes".into()))
    }
}
