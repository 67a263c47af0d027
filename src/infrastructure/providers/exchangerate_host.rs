//! exchangerate.host `latest` payload mapping (FX fallback provider).

use crate::domain::entities::{FxRates, FxSource};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LatestRates {
    date: Option<String>,
    rates: Option<BTreeMap<String, f64>>,
}

/// Maps a `latest` response. The requested base is authoritative since the
/// provider echoes it inconsistently.
pub fn normalize(data: &Value, base: &str, today: &str) -> Option<FxRates> {
    let latest = LatestRates::deserialize(data).ok()?;
    let rates = latest.rates?;

    Some(FxRates {
        base: base.to_string(),
        date: latest.date.unwrap_or_else(|| today.to_string()),
        rates,
        source: FxSource::ExchangerateHost,
    })
}
