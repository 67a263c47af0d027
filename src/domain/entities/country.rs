//! Country metadata entity.

use serde::{Deserialize, Serialize};

/// A country as exposed by `/api/countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, empty when the upstream omits it.
    pub code: String,
    pub name: String,
    pub region: String,
    pub capital: Option<String>,
    pub languages: Vec<String>,
    pub currencies: Vec<CountryCurrency>,
    /// Standard VAT rate in percent, when known.
    pub vat: Option<f64>,
}

/// A currency in use in a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCurrency {
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
}
