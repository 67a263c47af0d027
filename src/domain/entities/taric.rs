//! TARIC consultation link entity.

use serde::{Deserialize, Serialize};

/// Deep link into the EU TARIC consultation for a commodity code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaricLink {
    pub code: String,
    pub link: String,
}

impl TaricLink {
    /// Appends the commodity code to the consultation base URL.
    pub fn build(base_url: &str, code: &str) -> Self {
        Self {
            code: code.to_string(),
            link: format!("{}&Taric={}", base_url, code),
        }
    }
}
