//! # Artist Manager Common Library
//!
//! Core of the artist management backend:
//! - Entity Store bootstrap (schema, connection pool)
//! - Entity models and form-tolerant request parsing
//! - Repository operations for artists, albums, concerts and contracts
//! - Dashboard aggregation
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod input;

pub use error::{Error, Result};
