//! Tests for recommender services
//!
//! The Gemini client is exercised against a local mock HTTP server; the
//! parser against representative model outputs.
