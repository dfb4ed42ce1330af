//! Restaurant Orders Core - Shared types library.
//!
//! This crate provides common types used across the workspace:
//! - `server` - HTTP backend for the ordering workflow
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, contact fields, order
//!   statuses, and pagination.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
