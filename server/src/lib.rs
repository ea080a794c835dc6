//! Computer catalog library
//!
//! Exposes the record store, image bucket, services and HTTP routes
//! so the binary and the integration tests share one implementation.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod services;
pub mod storage;
