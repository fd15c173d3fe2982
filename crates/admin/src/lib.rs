//! Voltlane Admin library.
//!
//! Rollup views over the storefront's tables, plus the only code path
//! allowed to transition order status.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod stats;
