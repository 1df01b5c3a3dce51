//! Error types for the configuration and loading boundaries.
//!
//! Searching itself never fails; these errors only surface when scoring rules
//! or post collections are read from JSON.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid scoring rules: {0}")]
  InvalidRules(String),

  #[error("malformed JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
