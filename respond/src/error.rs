use std::io;

use http::header::{InvalidHeaderName, InvalidHeaderValue};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("response was already written")]
    AlreadyWritten,

    #[error(transparent)]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("sink failed to accept the response: {0}")]
    Sink(#[from] io::Error),
}
