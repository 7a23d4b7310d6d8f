//! # Soroscope Server
//!
//! The attestation lookup proxy: a small HTTP service that fronts the
//! attestation registry with a process-lifetime, first-call-wins cache, and
//! serves the dashboard's static assets for every other path.

pub mod cache;
pub mod service;

pub use cache::{AttestationCache, CachedResponse};
pub use service::{ProxyConfig, ProxyService};
