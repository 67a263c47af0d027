//! Application layer services implementing the fetch pipeline.
//!
//! Services consume the cache trait and the fetch client and hand handlers a
//! normalized payload together with its caching metadata.
//!
//! # Available Services
//!
//! - [`services::CountriesService`] - Country metadata
//! - [`services::FxService`] - Exchange rates with provider fallback
//! - [`services::TradeService`] - Comtrade statistics with credential fallback
//! - [`services::TaricService`] - TARIC consultation links
//! - [`services::ViesService`] - VAT number validation
//! - [`services::WeatherService`] - Current weather

pub mod services;
