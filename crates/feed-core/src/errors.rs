//! Error types for the feed model.
//!
//! Transport and configuration failures live in `feed-client` and
//! `feed-config`. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors raised while building feed settings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (zero page size, overflowing limits).
    #[error("Validation error: {0}")]
    Validation(String),
}
