//! Upstream payload mappings.
//!
//! Each provider deserializes its raw response into private structs with
//! `#[serde(default)]` and maps them onto the stable entities in
//! [`crate::domain::entities`]. Missing fields never fail a mapping.

pub mod comtrade;
pub mod ecb;
pub mod exchangerate_host;
pub mod open_meteo;
pub mod rest_countries;
pub mod vies;
