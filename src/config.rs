//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive a splice run
//! and helpers to load it from disk and the environment.

mod load;
mod schema;

pub use schema::*;
