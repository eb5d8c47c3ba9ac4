//! Shared types for the lunch recommendation system
//!
//! Contains the recommendation record shape, weather input, provider
//! identifiers and logging helpers used by both the recommender library
//! and the HTTP front end.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
