//! Foreign exchange rates entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Provider that produced a set of rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FxSource {
    /// European Central Bank reference rates.
    Ecb,
    /// exchangerate.host, used as fallback.
    ExchangerateHost,
}

impl FxSource {
    /// How long rates from this source may be cached.
    ///
    /// Fallback data is trusted for a shorter period than the primary feed.
    pub fn ttl(self) -> Duration {
        match self {
            Self::Ecb => Duration::from_secs(24 * 60 * 60),
            Self::ExchangerateHost => Duration::from_secs(60 * 60),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::ExchangerateHost => "EXCHANGERATE_HOST",
        }
    }
}

/// Exchange rates for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRates {
    pub base: String,
    /// Reference date, `YYYY-MM-DD`.
    pub date: String,
    pub rates: BTreeMap<String, f64>,
    pub source: FxSource,
}

impl FxRates {
    /// Keeps only the requested currencies. An empty filter keeps everything.
    pub fn retain_symbols(mut self, symbols: &[String]) -> Self {
        if !symbols.is_empty() {
            self.rates.retain(|code, _| symbols.contains(code));
        }
        self
    }
}
