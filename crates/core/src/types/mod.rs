//! Core types for the customer registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod postal_code;

pub use id::CustomerId;
pub use postal_code::{PostalCode, PostalCodeError};
