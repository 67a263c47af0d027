//! UN Comtrade payload mapping and request URL construction.

use crate::domain::entities::{TradeFlow, TradeSeries, TradeSummary};
use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Header carrying the subscription key.
pub const KEY_HEADER: HeaderName = HeaderName::from_static("x-comtrade-key");

/// Rows requested per page.
const PAGE_SIZE: &str = "20";

/// Validated parameters of a trade query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeQuery {
    pub hs: String,
    pub reporter: String,
    pub partner: Option<String>,
    pub flow: TradeFlow,
    /// `YYYY` (annual) or `YYYYMM` (monthly).
    pub period: String,
    pub page: Option<u32>,
}

impl TradeQuery {
    pub fn year(&self) -> Option<i32> {
        self.period.get(..4)?.parse().ok()
    }

    fn frequency(&self) -> &'static str {
        if self.period.len() == 6 { "M" } else { "A" }
    }
}

/// Builds the Comtrade request URL for `query`.
pub fn request_url(base: &Url, query: &TradeQuery) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("type", "C")
            .append_pair("freq", query.frequency())
            .append_pair("px", "HS")
            .append_pair("cc", &query.hs)
            .append_pair("r", &query.reporter)
            .append_pair("rg", &query.flow.comtrade_code().to_string())
            .append_pair("ps", &query.period)
            .append_pair("fmt", "json")
            .append_pair("max", PAGE_SIZE);
        if let Some(partner) = &query.partner {
            pairs.append_pair("p", partner);
        }
        if let Some(page) = query.page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    url
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComtradeResponse {
    dataset: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComtradeRow {
    #[serde(rename = "rtTitle")]
    rt_title: Option<String>,
    #[serde(rename = "rtCode")]
    rt_code: Option<Value>,
    #[serde(rename = "ptTitle")]
    pt_title: Option<String>,
    #[serde(rename = "ptCode")]
    pt_code: Option<Value>,
    #[serde(rename = "flowCode", alias = "rgCode")]
    flow_code: Option<Value>,
    period: Option<Value>,
    #[serde(rename = "cmdCode")]
    cmd_code: Option<Value>,
    #[serde(rename = "TradeValue", alias = "primaryValue")]
    trade_value: Option<Value>,
    #[serde(rename = "Qty", alias = "qty")]
    qty: Option<Value>,
    #[serde(rename = "qtDesc", alias = "qtyUnitAbbr")]
    qty_unit: Option<String>,
}

/// Maps a Comtrade response into series plus totals.
pub fn normalize(data: &Value) -> TradeSummary {
    let dataset = ComtradeResponse::deserialize(data)
        .map(|r| r.dataset)
        .unwrap_or_default();

    let series = dataset
        .iter()
        .filter_map(|entry| match ComtradeRow::deserialize(entry) {
            Ok(row) => Some(normalize_row(row)),
            Err(e) => {
                debug!("Skipping malformed Comtrade row: {}", e);
                None
            }
        })
        .collect();

    TradeSummary::from_series(series)
}

fn normalize_row(row: ComtradeRow) -> TradeSeries {
    let flow = match row.flow_code.as_ref().and_then(as_text).as_deref() {
        Some("2") | Some("X") => TradeFlow::Export,
        _ => TradeFlow::Import,
    };

    TradeSeries {
        reporter: row
            .rt_title
            .or_else(|| row.rt_code.as_ref().and_then(as_text))
            .unwrap_or_default(),
        partner: row
            .pt_title
            .or_else(|| row.pt_code.as_ref().and_then(as_text))
            .unwrap_or_default(),
        flow,
        period: row.period.as_ref().and_then(as_text).unwrap_or_default(),
        hs: row.cmd_code.as_ref().and_then(as_text).unwrap_or_default(),
        value: row.trade_value.as_ref().and_then(as_number).unwrap_or(0.0),
        qty: row.qty.as_ref().and_then(as_number).filter(|q| *q != 0.0),
        qty_unit: row.qty_unit.filter(|u| !u.is_empty()),
    }
}

/// Upstream mixes numbers and strings for codes.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
