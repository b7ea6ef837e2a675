use thiserror::Error as ThisError;

use crate::Mode;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Both interior zones are populated and no border location can join them.
    #[error("Cannot construct MST")]
    InfeasibleTopology,
    #[error("{mode} needs at least {required} locations, found {found}")]
    DegenerateInput {
        mode: Mode,
        required: usize,
        found: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
