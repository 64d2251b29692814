use std::io;

use thiserror::Error;

use crate::http::request::{DEFAULT_PROTOCOL, Method, RequestLine};

/// Longest request line accepted, terminator included.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 2 or 3 space-separated tokens, got {0}")]
    TokenCount(usize),
    #[error("request without a protocol version must use GET, got {0:?}")]
    SimpleRequestMethod(String),
    #[error("malformed protocol version {0:?}")]
    InvalidVersion(String),
}

/// Failure to read a complete request line off the connection.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("connection closed before a full request line arrived")]
    ClosedEarly,
    #[error("request line longer than {} bytes", MAX_REQUEST_LINE)]
    TooLong,
    #[error("request line is not valid UTF-8")]
    NotUtf8,
    #[error("timed out waiting for the request line")]
    TimedOut,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parses one request line with its terminator already stripped.
///
/// Tokens are split on every single space, so doubled spaces produce empty
/// tokens and change the count. A two-token line is only accepted for `GET`
/// and gets [`DEFAULT_PROTOCOL`]. A third token must look like
/// `HTTP/<major>.<minor>` with both parts non-empty; the parts are not
/// checked for being numeric.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();

    match tokens.as_slice() {
        [method, target] => {
            if *method != "GET" {
                return Err(ParseError::SimpleRequestMethod(method.to_string()));
            }
            Ok(RequestLine {
                method: Method::Get,
                target: target.to_string(),
                version: DEFAULT_PROTOCOL.to_string(),
            })
        }
        [method, target, version] => {
            if !is_valid_version(version) {
                return Err(ParseError::InvalidVersion(version.to_string()));
            }
            Ok(RequestLine {
                method: Method::parse(method),
                target: target.to_string(),
                version: version.to_string(),
            })
        }
        _ => Err(ParseError::TokenCount(tokens.len())),
    }
}

fn is_valid_version(token: &str) -> bool {
    let Some(number) = token.strip_prefix("HTTP/") else {
        return false;
    };

    let parts: Vec<&str> = number.split('.').collect();
    matches!(parts.as_slice(), [major, minor] if !major.is_empty() && !minor.is_empty())
}

/// Strips the line terminator: `\r\n`, or a bare `\n`.
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}
