//! # keel-core
//!
//! Shared error and result types for keel. Every fallible operation in the
//! workspace returns [`Result`] and propagates errors with `?` - no panics
//! in production code.

#![forbid(unsafe_code)]

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
