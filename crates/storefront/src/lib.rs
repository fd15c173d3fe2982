//! Voltlane Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod payment;
pub mod reviews;
pub mod routes;
pub mod session;
pub mod state;
pub mod wishlist;
