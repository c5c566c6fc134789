use thiserror::Error;

/// Failures surfaced by the stat store and its storage backend.
#[derive(Error, Debug)]
pub enum StatError {
    #[error("unknown stat '{0}'. Allowed: goals, assists, motm, dotm")]
    InvalidStatName(String),
    #[error("unknown action '{0}'. Allowed: increase, decrease")]
    InvalidDirection(String),
    #[error("stats database error: {0}")]
    Storage(#[from] sled::Error),
    #[error("failed to encode player stats: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode player stats: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}
