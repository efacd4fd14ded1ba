//! Core Kernel - Foundational types shared by the claims façade crates
//!
//! This crate provides the building blocks used across the workspace:
//! - `PortError`, the error contract every storage adapter speaks
//! - `DomainPort`, the marker trait for port traits
//! - Adapter health-check types used by readiness checks

pub mod ports;

pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
