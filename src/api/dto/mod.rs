//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use Serde for deserialization and validator for input
//! validation; see [`crate::api::extract`].

pub mod fx;
pub mod health;
pub mod taric;
pub mod trade;
pub mod vies;
pub mod weather;

/// Serde helpers that trim incoming strings before validation.
pub(crate) mod trim {
    use serde::{Deserialize, Deserializer};

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.trim().to_string())
    }

    /// Trimmed and upper-cased.
    pub fn upper<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.trim().to_ascii_uppercase())
    }

    /// Blank strings become `None`.
    pub fn option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        Ok(opt
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }
}
