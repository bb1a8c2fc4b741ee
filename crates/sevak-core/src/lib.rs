//! Core types and trait definitions for the Sevak volunteer registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod auth;
pub mod error;
pub mod image;
pub mod store;
pub mod volunteer;

pub use error::{Error, Result};
