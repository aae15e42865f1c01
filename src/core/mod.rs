//! Core components of the `omnifolio-edgar` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`EdgarClient`] and its builder (rate limit, retry, endpoints).
//! - The primary [`EdgarError`] type.
//! - Shared data models ([`FilingReference`], [`FormType`]).
//! - The TTL [`ResultCache`] for computed results.
//! - The shared [`FilingStore`] written by ingestion and read by the engines.

/// The main client (`EdgarClient`), builder, and fetch configuration.
pub mod client;
/// The primary error type (`EdgarError`) for the crate.
pub mod error;
/// Shared data models used across API modules.
pub mod models;

pub mod cache;
pub mod store;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::EdgarClient`
pub use cache::{Cached, CacheSource, ResultCache};
pub use client::{Backoff, EdgarClient, EdgarClientBuilder, RetryConfig};
pub use error::EdgarError;
pub use models::{FilingReference, FormType};
pub use store::{FilingStore, NarrativeFiling};
