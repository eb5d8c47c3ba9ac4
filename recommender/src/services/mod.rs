//! Recommender services implementations

pub mod gemini_provider;
pub mod response_parser;

#[cfg(test)]
pub mod tests;

pub use gemini_provider::*;
pub use response_parser::*;
