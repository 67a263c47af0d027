//! DTOs for the trade statistics endpoint.

use regex::Regex;
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::TradeFlow;
use crate::infrastructure::providers::comtrade::TradeQuery;

/// HS commodity code, 2 to 10 digits.
static HS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{2,10}$").unwrap());

/// `YYYY` or `YYYYMM`.
static PERIOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}(0[1-9]|1[0-2])?$").unwrap());

fn default_reporter() -> String {
    "all".to_string()
}

/// Trade query, accepted as query string (`GET`) or JSON body (`POST`).
///
/// `page` may arrive as a number (JSON) or a string (query string).
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct TradeParams {
    #[serde(deserialize_with = "super::trim::string")]
    #[validate(regex(path = "*HS_REGEX", message = "Expected 2 to 10 digits"))]
    pub hs: String,

    #[serde(default = "default_reporter", deserialize_with = "super::trim::string")]
    #[validate(length(min = 2, max = 10))]
    pub reporter: String,

    #[serde(default, deserialize_with = "super::trim::option")]
    #[validate(length(min = 2, max = 10))]
    pub partner: Option<String>,

    #[serde(default)]
    pub flow: TradeFlow,

    #[serde(deserialize_with = "super::trim::string")]
    #[validate(regex(path = "*PERIOD_REGEX", message = "Expected YYYY or YYYYMM"))]
    pub period: String,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub page: Option<u32>,
}

impl From<TradeParams> for TradeQuery {
    fn from(params: TradeParams) -> Self {
        Self {
            hs: params.hs,
            reporter: params.reporter,
            partner: params.partner,
            flow: params.flow,
            period: params.period,
            page: params.page,
        }
    }
}
