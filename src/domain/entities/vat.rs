//! VAT number check entity.

use serde::{Deserialize, Serialize};

/// Result of a VIES VAT number check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatCheck {
    /// Full VAT number as checked, country prefix included.
    pub vat: String,
    pub country_code: String,
    pub valid: bool,
    pub name: Option<String>,
    pub address: Option<String>,
    pub request_date: Option<String>,
    pub company_type: Option<String>,
}
