//! Claims Domain
//!
//! This crate holds the claim record and the three operations the façade
//! offers over the hosted claims table.
//!
//! # Operations
//!
//! ```text
//! list    -> select every row
//! create  -> insert one row, echo it back
//! delete  -> delete rows matching a claim number
//! ```
//!
//! Persistence, constraint checks and access control all live in the store.
//! This crate only decides what "zero rows" means for each operation.

pub mod claim;
pub mod field;
pub mod ports;
pub mod service;
pub mod error;

pub use claim::{Claim, ClaimTimestamp};
pub use field::Field;
pub use ports::ClaimsPort;
pub use service::ClaimsService;
pub use error::{ClaimsError, InvalidTimestamp};
