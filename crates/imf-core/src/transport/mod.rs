//! HTTP transport seam.
//!
//! The pipeline only depends on the [`Transport`] trait; [`CurlTransport`] is the
//! libcurl-backed implementation used by the CLI.

mod easy;
mod headers;

pub use easy::CurlTransport;
pub use headers::{parse_status_line, Headers};

use crate::config::FetchPolicy;

/// Final response of a GET, after redirects.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    /// Header block of the final response only; redirect hops are discarded.
    pub headers: Headers,
    /// Buffered body. Empty when the transfer was cut short on headers or
    /// when the body grew past the policy cap.
    pub body: Vec<u8>,
    /// Body bytes received from the wire, including any past the cap.
    pub body_len: u64,
    /// False when the transfer was abandoned before the body ended, so
    /// `body_len` is only a lower bound.
    pub body_complete: bool,
}

impl Response {
    /// A fully buffered response (`body_len` equals the body length).
    pub fn new(status: u32, headers: Headers, body: Vec<u8>) -> Self {
        let body_len = body.len() as u64;
        Self {
            status,
            headers,
            body,
            body_len,
            body_complete: true,
        }
    }
}

/// Transport-level failure: the request never produced a usable 2xx response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// DNS, connect, TLS, timeout and other libcurl failures.
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response had a non-2xx status.
    #[error("HTTP {code}")]
    Http { code: u32 },
    /// The server answered, but with a header the client refused to parse.
    #[error("malformed response header: {0}")]
    MalformedHeader(String),
}

impl TransportError {
    /// True when no usable response arrived. A malformed header is a bad
    /// response rather than a network failure.
    pub fn is_network(&self) -> bool {
        !matches!(self, TransportError::MalformedHeader(_))
    }
}

/// Issues a GET for one URL under `policy`.
pub trait Transport {
    fn get(&self, url: &str, policy: &FetchPolicy) -> Result<Response, TransportError>;
}

/// True when the status line and headers alone settle the outcome, so the
/// body does not need to be read: non-2xx status, wrong content type, or a
/// `Content-Length` that is malformed or above the cap.
pub fn body_not_needed(status: u32, headers: &Headers, policy: &FetchPolicy) -> bool {
    if !(200..300).contains(&status) {
        return true;
    }
    if !headers
        .content_type()
        .starts_with(policy.required_mime_prefix.as_str())
    {
        return true;
    }
    match headers.content_length() {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_or(true, |declared| declared > policy.max_bytes),
        None => false,
    }
}

/// Accepts only absolute `http` / `https` URLs.
pub fn check_url(url: &str) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}
