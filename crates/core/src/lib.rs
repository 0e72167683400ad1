//! Doughda Core - Shared domain types library.
//!
//! This crate provides the types used across all Doughda components:
//! - `storage` - Key-value persistence adapter and repositories
//! - `storefront` - Public bakery page and read-only JSON API
//! - `admin` - Password-gated admin console and full JSON API
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP. Every mutation rule (id assignment, partial updates,
//! holiday matching, upload validation) lives here so it can be tested
//! without a backend.
//!
//! # Modules
//!
//! - [`types`] - Products, holidays, store status and hours, prices, ids
//! - [`calendar`] - Month grid used by the storefront holiday calendar
//! - [`upload`] - Image upload validation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calendar;
pub mod error;
pub mod types;
pub mod upload;

pub use error::ValidationError;
pub use types::*;
