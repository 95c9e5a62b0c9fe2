use std::{fmt, io, num::ParseIntError, str::Utf8Error};

use http::header::ToStrError;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    HttpError(#[from] http::Error),
    #[error("request head is not valid utf-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("header value is not visible ascii: {0}")]
    HeaderValue(#[from] ToStrError),
    #[error("invalid content length: {0}")]
    ContentLength(#[from] ParseIntError),
    #[error("unsupported http version")]
    UnsupportedVersion,
    #[error("malformed request")]
    InvalidFormat,
    #[error("body is larger than reported ({received} > {expected})")]
    BodyTooLarge { expected: usize, received: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to format response: {0}")]
    Fmt(#[from] fmt::Error),
    #[error("header value is not visible ascii: {0}")]
    HeaderValue(#[from] ToStrError),
}
