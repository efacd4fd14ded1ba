//! Hosted Table Infrastructure
//!
//! This crate talks to the managed database that owns the claims table. The
//! database exposes each table over a PostgREST-style REST API; this crate
//! wraps that API and adapts it to the `ClaimsPort` trait.
//!
//! # Architecture
//!
//! - `TableClient`: one table's rows endpoint, with the access key attached
//!   to every request
//! - `RestClaimsAdapter`: `ClaimsPort` on top of a `TableClient`
//! - `StoreConfig`: endpoint, access key and table name, read from the
//!   environment at startup
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{RestClaimsAdapter, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let adapter = RestClaimsAdapter::new(&config)?;
//! let claims = adapter.list_claims().await?;
//! ```

pub mod config;
pub mod client;
pub mod error;
pub mod adapters;

pub use config::StoreConfig;
pub use client::TableClient;
pub use error::StoreError;
pub use adapters::RestClaimsAdapter;
