//! DTOs for the VIES VAT validation endpoints.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::infrastructure::providers::vies::VatRequest;

/// Country prefix followed by 2 to 13 alphanumerics.
static VAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{2,13}$").unwrap());

/// VAT check input, from query string or JSON body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VatParams {
    #[serde(deserialize_with = "super::trim::upper")]
    #[validate(regex(path = "*VAT_REGEX", message = "Invalid VAT number"))]
    pub vat: String,

    #[serde(default, deserialize_with = "super::trim::option")]
    #[validate(length(max = 200))]
    pub trader_name: Option<String>,

    #[serde(default, deserialize_with = "super::trim::option")]
    #[validate(length(max = 300))]
    pub trader_address: Option<String>,
}

impl From<VatParams> for VatRequest {
    fn from(params: VatParams) -> Self {
        Self {
            vat: params.vat,
            trader_name: params.trader_name,
            trader_address: params.trader_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vat_is_normalized() {
        let body = json!({ "vat": " fr40303265045 ", "traderName": "  " });
        let params: VatParams = serde_json::from_value(body).unwrap();
        assert!(params.validate().is_ok());

        let request = VatRequest::from(params);
        assert_eq!(request.vat, "FR40303265045");
        assert_eq!(request.trader_name, None);
    }

    #[test]
    fn test_malformed_vat() {
        for vat in ["", "FR", "F1234", "123456789", "FR1", "FR12345678901234", "FR-1234"] {
            let params: VatParams = serde_json::from_value(json!({ "vat": vat })).unwrap();
            assert!(params.validate().is_err(), "{vat:?} should be rejected");
        }
    }
}
