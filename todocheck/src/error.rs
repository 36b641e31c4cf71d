use hyper::http;
use std::{fmt::Display, time::Duration};

#[derive(Debug)]
pub enum Error {
    Transport(hyper::Error),
    Timeout(Duration),
    SessionAcquisition(String),
    Auth(u16),
    Config(String),
    MissingCapture(String),
    UnknownDependency {
        scenario: String,
        depends_on: String,
    },
    InvalidHeaderName(String),
    InvalidHeaderValue(String),
    Http(http::Error),
    Json(serde_json::Error),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport failure: {}", e),
            Error::Timeout(duration) => {
                write!(f, "no response within {} ms", duration.as_millis())
            }
            Error::SessionAcquisition(reason) => {
                write!(f, "couldn't acquire a session token: {}", reason)
            }
            Error::Auth(status) => write!(f, "credentials rejected with status {}", status),
            Error::Config(reason) => write!(f, "invalid configuration: {}", reason),
            Error::MissingCapture(key) => {
                write!(f, "placeholder '{{{}}}' has no captured value", key)
            }
            Error::UnknownDependency {
                scenario,
                depends_on,
            } => write!(
                f,
                "scenario '{}' depends on '{}' which is not declared before it",
                scenario, depends_on
            ),
            Error::InvalidHeaderName(name) => write!(f, "invalid header name '{}'", name),
            Error::InvalidHeaderValue(name) => write!(f, "invalid value for header '{}'", name),
            Error::Http(e) => write!(f, "http error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Error::Transport(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::Http(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
