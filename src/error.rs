//! Error types for building styled text and loading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("range {start}..{end} is out of bounds for text of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("offset {0} is not on a char boundary")]
    NotCharBoundary(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
