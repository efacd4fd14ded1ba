//! Port adapters backed by the hosted table API

pub mod claims;

pub use claims::RestClaimsAdapter;
