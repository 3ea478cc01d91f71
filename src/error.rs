//! Import pipeline error taxonomy.
//!
//! Three failure classes flow through the pipeline:
//! - [`ImportError::Fetch`] — network failure, non-2xx status, or a body that
//!   could not be decompressed.
//! - [`ImportError::Decode`] — malformed JSON or a payload missing required
//!   fields.
//! - [`ImportError::Storage`] — connection or insert failure against SQLite.
//!
//! Fetch and decode errors inside the pagination loop stop fetching but are
//! carried as a warning on the outcome; the run still persists what it has.
//! Storage errors are fatal to the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("storage failed: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ImportError {
    pub fn fetch(msg: impl std::fmt::Display) -> Self {
        ImportError::Fetch(msg.to_string())
    }

    pub fn decode(msg: impl std::fmt::Display) -> Self {
        ImportError::Decode(msg.to_string())
    }
}
