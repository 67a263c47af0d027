//! European Central Bank SDMX-JSON payload mapping.
//!
//! The primary FX feed is requested with `dimensionAtObservation=AllDimensions`,
//! so observations are keyed by colon-separated dimension indices
//! (`"0:3:0:0:0:0"`) and the second index points into the CURRENCY dimension.
//! Some mirrors serve a flat `{ base, date, rates }` document instead; both
//! shapes are accepted.

use crate::domain::entities::{FxRates, FxSource};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Currency all ECB reference rates are quoted against.
pub const ECB_BASE: &str = "EUR";

/// Position of the CURRENCY dimension in observation keys.
const CURRENCY_DIMENSION: usize = 1;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxMessage {
    #[serde(rename = "dataSets")]
    data_sets: Vec<SdmxDataSet>,
    structure: Option<SdmxStructure>,
    // Flat variant
    base: Option<String>,
    date: Option<String>,
    rates: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxDataSet {
    observations: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxStructure {
    dimensions: SdmxDimensions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxDimensions {
    observation: Vec<SdmxDimension>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxDimension {
    values: Vec<SdmxValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SdmxValue {
    id: Option<String>,
}

/// Maps an ECB response to rates against `base`.
///
/// Returns `None` when no rate can be extracted, or when `base` is neither
/// EUR nor one of the quoted currencies.
pub fn normalize(data: &Value, base: &str, today: &str) -> Option<FxRates> {
    let message = SdmxMessage::deserialize(data).ok()?;

    let observed = observation_rates(&message);
    let (ecb_base, date, rates) = if !observed.is_empty() {
        (ECB_BASE.to_string(), today.to_string(), observed)
    } else {
        let rates = message.rates.filter(|r| !r.is_empty())?;
        (
            message.base.unwrap_or_else(|| ECB_BASE.to_string()),
            message.date.unwrap_or_else(|| today.to_string()),
            rates,
        )
    };

    let rates = rebase(rates, &ecb_base, base)?;

    Some(FxRates {
        base: base.to_string(),
        date,
        rates,
        source: FxSource::Ecb,
    })
}

fn observation_rates(message: &SdmxMessage) -> BTreeMap<String, f64> {
    let mut rates = BTreeMap::new();

    let Some(data_set) = message.data_sets.first() else {
        return rates;
    };
    let Some(currencies) = message
        .structure
        .as_ref()
        .and_then(|s| s.dimensions.observation.get(CURRENCY_DIMENSION))
    else {
        return rates;
    };

    for (key, value) in &data_set.observations {
        let Some(index) = key
            .split(':')
            .nth(CURRENCY_DIMENSION)
            .and_then(|i| i.parse::<usize>().ok())
        else {
            continue;
        };
        let Some(currency) = currencies.values.get(index).and_then(|v| v.id.clone()) else {
            continue;
        };
        let rate = match value {
            Value::Array(items) => items.first().and_then(Value::as_f64),
            other => other.as_f64(),
        };
        if let Some(rate) = rate {
            rates.insert(currency, rate);
        }
    }

    rates
}

/// Converts rates quoted against `from` into rates quoted against `to`
/// through the cross rate.
fn rebase(rates: BTreeMap<String, f64>, from: &str, to: &str) -> Option<BTreeMap<String, f64>> {
    if from == to {
        return Some(rates);
    }

    let pivot = *rates.get(to)?;
    if pivot == 0.0 {
        return None;
    }

    let mut rebased: BTreeMap<String, f64> = rates
        .into_iter()
        .filter(|(code, _)| code != to)
        .map(|(code, rate)| (code, rate / pivot))
        .collect();
    rebased.insert(from.to_string(), 1.0 / pivot);
    Some(rebased)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TODAY: &str = "2026-03-04";

    fn sdmx_fixture() -> Value {
        json!({
            "dataSets": [{
                "observations": {
                    "0:0:0:0:0:0": [1.0850, 0, 0],
                    "0:1:0:0:0:0": [0.8560, 0, 0],
                    "0:2:0:0:0:0": [162.5, 0, 0]
                }
            }],
            "structure": {
                "dimensions": {
                    "observation": [
                        { "id": "FREQ", "values": [{ "id": "D" }] },
                        { "id": "CURRENCY", "values": [{ "id": "USD" }, { "id": "GBP" }, { "id": "JPY" }] }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_sdmx_observations() {
        let fx = normalize(&sdmx_fixture(), "EUR", TODAY).unwrap();
        assert_eq!(fx.base, "EUR");
        assert_eq!(fx.date, TODAY);
        assert_eq!(fx.source, FxSource::Ecb);
        assert_eq!(fx.rates.get("USD"), Some(&1.0850));
        assert_eq!(fx.rates.get("GBP"), Some(&0.8560));
        assert_eq!(fx.rates.len(), 3);
    }

    #[test]
    fn test_scalar_observation_values() {
        let data = json!({
            "dataSets": [{ "observations": { "0:0": 1.2 } }],
            "structure": { "dimensions": { "observation": [
                { "values": [{ "id": "D" }] },
                { "values": [{ "id": "CHF" }] }
            ] } }
        });
        let fx = normalize(&data, "EUR", TODAY).unwrap();
        assert_eq!(fx.rates.get("CHF"), Some(&1.2));
    }

    #[test]
    fn test_rebase_to_quoted_currency() {
        let fx = normalize(&sdmx_fixture(), "USD", TODAY).unwrap();
        assert_eq!(fx.base, "USD");
        assert!(!fx.rates.contains_key("USD"));

        let eur = fx.rates["EUR"];
        assert!((eur - 1.0 / 1.0850).abs() < 1e-12);
        let gbp = fx.rates["GBP"];
        assert!((gbp - 0.8560 / 1.0850).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_base_is_parse_failure() {
        assert!(normalize(&sdmx_fixture(), "XYZ", TODAY).is_none());
    }

    #[test]
    fn test_flat_rates_variant() {
        let data = json!({ "base": "EUR", "date": "2026-03-01", "rates": { "USD": 1.08 } });
        let fx = normalize(&data, "EUR", TODAY).unwrap();
        assert_eq!(fx.date, "2026-03-01");
        assert_eq!(fx.rates.get("USD"), Some(&1.08));
    }

    #[test]
    fn test_unusable_payloads() {
        assert!(normalize(&json!({}), "EUR", TODAY).is_none());
        assert!(normalize(&json!("<html>maintenance</html>"), "EUR", TODAY).is_none());
        assert!(normalize(&json!({ "dataSets": [] }), "EUR", TODAY).is_none());
        assert!(normalize(&json!({ "rates": {} }), "EUR", TODAY).is_none());
    }

    #[test]
    fn test_observations_with_unknown_index_are_ignored() {
        let data = json!({
            "dataSets": [{ "observations": { "0:9:0": [1.0], "bad": [2.0], "0:0:0": [3.0] } }],
            "structure": { "dimensions": { "observation": [
                { "values": [] },
                { "values": [{ "id": "SEK" }] }
            ] } }
        });
        let fx = normalize(&data, "EUR", TODAY).unwrap();
        assert_eq!(fx.rates.len(), 1);
        assert_eq!(fx.rates.get("SEK"), Some(&3.0));
    }
}
