//! Recommender library for lunch recommendations
//!
//! Prompts a generative model with today's cafeteria menu and weather, then
//! runs the model's answer through a consistency layer: category
//! classification, deduplication against the previous batch, and soup-menu
//! hierarchy correction.

pub mod core;
pub mod error;
pub mod recommender_impl;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{RecommenderError, RecommenderResult};
pub use recommender_impl::Recommender;
pub use services::*;
pub use traits::*;
pub use types::*;
