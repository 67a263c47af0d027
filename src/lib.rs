//! # Trade Data API
//!
//! A resilient JSON API for an import/export platform, built with Axum.
//! It aggregates country metadata, exchange rates, UN Comtrade statistics,
//! TARIC links, VIES VAT checks and current weather behind one envelope.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Normalized payloads and the rate limiter
//! - **Application Layer** ([`application`]) - Per-resource services: cache, fetch, fallback
//! - **Infrastructure Layer** ([`infrastructure`]) - Cache backends, outbound HTTP, provider mappings
//! - **API Layer** ([`api`]) - Handlers, validated DTOs, envelope and middleware
//!
//! ## Features
//!
//! - Uniform `{ ok, data | error, code, status }` envelope
//! - Redis or bounded in-memory caching with per-resource TTLs
//! - Provider fallback (ECB then exchangerate.host, primary then secondary Comtrade key)
//! - Timeouts and linear-backoff retries on every upstream call
//! - Per-route, per-client fixed-window rate limiting
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"          # Optional
//! export COMTRADE_PRIMARY_KEY="..."                  # Optional, enables /api/trade
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;
