//! Request helpers shared by the API layer.
//!
//! - [`client_ip`] - Client identity behind optional reverse proxies
//! - [`cache_keys`] - Route-namespaced cache keys

pub mod cache_keys;
pub mod client_ip;
