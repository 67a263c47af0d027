//! Normalized payloads served by the API.
//!
//! These shapes are stable regardless of which upstream produced the data.
//! Optional upstream fields map to `None` or empty collections; see
//! [`crate::infrastructure::providers`] for the per-provider mappings.
//!
//! # Entity Types
//!
//! - [`Country`] - Country metadata
//! - [`FxRates`] - Exchange rates for one base currency
//! - [`TradeSummary`] - Trade statistics with totals
//! - [`Weather`] - Current weather conditions
//! - [`VatCheck`] - VIES VAT number validation result
//! - [`TaricLink`] - TARIC consultation deep link

pub mod country;
pub mod fx;
pub mod taric;
pub mod trade;
pub mod vat;
pub mod weather;

pub use country::{Country, CountryCurrency};
pub use fx::{FxRates, FxSource};
pub use taric::TaricLink;
pub use trade::{TradeFlow, TradeSeries, TradeSummary, TradeTotals};
pub use vat::VatCheck;
pub use weather::Weather;
