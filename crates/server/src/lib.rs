//! StorePulse server library.
//!
//! This crate provides the sync/metrics service as a library, allowing it
//! to be driven by the `storepulse-server` binary, exercised from tests,
//! and reused by the CLI (migrations, seeding, admin management).
//!
//! # Architecture
//!
//! - Axum web framework over a `PostgreSQL` store (sqlx)
//! - Shopify Admin REST API as the single upstream source
//! - Background scheduler re-running the three syncs on a fixed interval
//! - Bearer-token (JWT) gate in front of the metrics endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod shopify;
pub mod state;
