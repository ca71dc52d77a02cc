//! # streamhub-core
//!
//! Core crate for the StreamHub client. Contains configuration schemas
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other StreamHub crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
