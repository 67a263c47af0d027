//! DTOs for the TARIC link endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

static TARIC_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6,10}$").unwrap());

/// `GET /api/taric-link?code=850760`
#[derive(Debug, Deserialize, Validate)]
pub struct TaricParams {
    #[serde(deserialize_with = "super::trim::string")]
    #[validate(regex(path = "*TARIC_CODE_REGEX", message = "Expected 6 to 10 digits"))]
    pub code: String,
}
