//! Cache key construction.
//!
//! Keys are namespaced per route. Parameter sets too long or too varied to
//! embed verbatim are hashed.

use serde::Serialize;
use sha2::{Digest, Sha256};

pub const COUNTRIES_ALL: &str = "countries:all";

pub fn fx(base: &str) -> String {
    format!("fx:{}", base)
}

pub fn taric(code: &str) -> String {
    format!("taric:{}", code)
}

pub fn weather(suffix: &str) -> String {
    format!("weather:{}", suffix)
}

/// `trade:<sha256>` over the JSON form of `params`.
///
/// Field order follows the struct definition, so equal parameters always
/// hash the same.
pub fn trade<T: Serialize>(params: &T) -> String {
    format!("trade:{}", digest(params))
}

fn digest<T: Serialize>(params: &T) -> String {
    let canonical = serde_json::to_vec(params).unwrap_or_default();
    hex::encode(Sha256::digest(&canonical))
}
