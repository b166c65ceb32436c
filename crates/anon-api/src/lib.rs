//! HTTP client for the anonymisation backend
//!
//! Implements `anon_core::Backend` against the service's JSON endpoints:
//! file extraction, entity detection, finalization (stepwise and one-shot),
//! and report persistence.

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::ApiError;
