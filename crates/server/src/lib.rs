//! Restaurant Orders Server - HTTP backend for the ordering workflow.
//!
//! # Architecture
//!
//! - Axum web framework with JSON request/response envelopes
//! - `PostgreSQL` via sqlx for all state
//! - Stateless services constructed per request over a shared pool
//!
//! Layering, outermost first: `routes` (transport, DTO shaping, error→HTTP
//! mapping) → `services` (business logic, typed errors) → `db`
//! (repositories) → `models` (domain types).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
