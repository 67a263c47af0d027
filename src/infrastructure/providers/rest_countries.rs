//! REST Countries (v3.1) payload mapping.

use crate::domain::entities::{Country, CountryCurrency};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Translation preferred for display names.
const PREFERRED_TRANSLATION: &str = "fra";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCountry {
    cca2: Option<String>,
    name: Option<RawName>,
    translations: BTreeMap<String, RawName>,
    region: Option<String>,
    capital: Vec<String>,
    languages: BTreeMap<String, String>,
    currencies: BTreeMap<String, RawCurrency>,
    #[serde(rename = "vatRates")]
    vat_rates: Option<RawVatRates>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawName {
    common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCurrency {
    name: Option<String>,
    symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVatRates {
    standard: Option<f64>,
}

/// Maps the `/all` array. Anything that is not an array yields an empty
/// list; entries that do not deserialize are skipped.
pub fn normalize(data: &Value) -> Vec<Country> {
    let Some(entries) = data.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match RawCountry::deserialize(entry) {
            Ok(raw) => Some(normalize_country(raw)),
            Err(e) => {
                debug!("Skipping malformed country entry: {}", e);
                None
            }
        })
        .collect()
}

fn normalize_country(raw: RawCountry) -> Country {
    let name = raw
        .translations
        .get(PREFERRED_TRANSLATION)
        .and_then(|t| t.common.clone())
        .or_else(|| raw.name.and_then(|n| n.common))
        .unwrap_or_else(|| "Unknown".to_string());

    Country {
        code: raw.cca2.unwrap_or_default(),
        name,
        region: raw.region.unwrap_or_else(|| "N/A".to_string()),
        capital: raw.capital.into_iter().next(),
        languages: raw.languages.into_values().collect(),
        currencies: raw
            .currencies
            .into_iter()
            .map(|(code, meta)| CountryCurrency {
                name: meta.name.unwrap_or_else(|| code.clone()),
                symbol: meta.symbol,
                code,
            })
            .collect(),
        vat: raw.vat_rates.and_then(|v| v.standard),
    }
}
