//! Trade statistics entities.

use serde::{Deserialize, Serialize};

/// Direction of a trade flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeFlow {
    #[default]
    Import,
    Export,
}

impl TradeFlow {
    /// Comtrade `rg` code: 1 = import, 2 = export.
    pub fn comtrade_code(self) -> u8 {
        match self {
            Self::Import => 1,
            Self::Export => 2,
        }
    }
}

/// One reporter/partner/commodity observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSeries {
    pub reporter: String,
    pub partner: String,
    pub flow: TradeFlow,
    pub period: String,
    pub hs: String,
    pub value: f64,
    pub qty: Option<f64>,
    pub qty_unit: Option<String>,
}

/// Aggregates over all returned series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTotals {
    pub count: usize,
    pub value: f64,
    /// Present only when every series reports a quantity.
    pub qty: Option<f64>,
}

/// Normalized payload of `/api/trade`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub series: Vec<TradeSeries>,
    pub totals: TradeTotals,
}

impl TradeSummary {
    pub fn from_series(series: Vec<TradeSeries>) -> Self {
        let value = series.iter().map(|s| s.value).sum();
        let qty = series
            .iter()
            .map(|s| s.qty)
            .sum::<Option<f64>>()
            .filter(|_| !series.is_empty());

        Self {
            totals: TradeTotals {
                count: series.len(),
                value,
                qty,
            },
            series,
        }
    }
}
