use hyper::http;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("The status code is invalid: {0}")]
    InvalidStatusCode(u16),
    #[error("Invalid header name")]
    InvalidHeaderName(#[from] hyper::header::InvalidHeaderName),
    #[error("Invalid header value")]
    InvalidHeaderValue(#[from] hyper::header::InvalidHeaderValue),
    #[error("Invalid body")]
    InvalidBody,
    #[error("Hyper error: {0}")]
    HyperError(#[from] hyper::Error),
    #[error("Http Error: {0}")]
    HttpError(#[from] http::Error),
    #[error("No fixture matched {method} {url}")]
    UnmatchedRequest { method: String, url: String },
}
