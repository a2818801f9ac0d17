//! Customer Registry Core - Shared types library.
//!
//! This crate provides common types used across the registry components:
//! - `api` - HTTP server exposing the customer CRUD surface
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including test harnesses.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids and postal codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
