//! Single GET over the curl easy interface.
//!
//! The body is buffered in memory up to the policy cap. Past the cap the
//! transfer keeps running but only counts bytes, so the reported size is exact
//! without holding the whole body, up to a hard ceiling of twice the cap where
//! the transfer is abandoned. When the first body bytes arrive and the headers
//! already decide the outcome, the transfer is aborted instead.

use super::{
    body_not_needed, check_url, parse_status_line, Headers, Response, Transport, TransportError,
};
use crate::config::FetchPolicy;
use std::cell::RefCell;
use std::os::raw::c_uint;
use std::time::Duration;

/// Upper bound on redirect hops followed for one URL.
const MAX_REDIRECTS: u32 = 30;

/// Bodies are counted up to this multiple of `max_bytes`, then abandoned.
const COUNT_CEILING_FACTOR: u64 = 2;

/// CURLE_WEIRD_SERVER_REPLY: libcurl rejects an unparseable `Content-Length` with it.
const CURLE_WEIRD_SERVER_REPLY: c_uint = 8;

/// libcurl-backed [`Transport`]. Stateless; a new easy handle is used per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

/// State shared by the header and write callbacks during one transfer.
struct Exchange {
    status: Option<u32>,
    headers: Headers,
    body: Vec<u8>,
    received: u64,
    max_bytes: u64,
    ceiling: u64,
    headers_checked: bool,
    cut_short: bool,
    /// False once the body was abandoned at the ceiling.
    complete: bool,
}

impl Exchange {
    fn new(max_bytes: u64) -> Self {
        Self {
            status: None,
            headers: Headers::default(),
            body: Vec::new(),
            received: 0,
            max_bytes,
            ceiling: max_bytes.saturating_mul(COUNT_CEILING_FACTOR),
            headers_checked: false,
            cut_short: false,
            complete: true,
        }
    }

    /// A status line starts a new header block (redirect hop or interim response).
    fn header_line(&mut self, data: &[u8]) {
        let line = String::from_utf8_lossy(data);
        let line = line.trim_end();
        if let Some(code) = parse_status_line(line) {
            self.status = Some(code);
            self.headers = Headers::default();
            self.headers_checked = false;
            return;
        }
        self.headers.push_line(line);
    }

    /// Returns the number of bytes consumed; anything short of `data.len()` aborts the transfer.
    fn body_chunk(&mut self, data: &[u8], policy: &FetchPolicy) -> usize {
        if !self.headers_checked {
            self.headers_checked = true;
            if let Some(status) = self.status {
                if body_not_needed(status, &self.headers, policy) {
                    self.cut_short = true;
                    return 0;
                }
            }
        }
        self.received += data.len() as u64;
        if self.received <= self.max_bytes {
            self.body.extend_from_slice(data);
            return data.len();
        }
        if !self.body.is_empty() {
            self.body = Vec::new();
        }
        if self.received > self.ceiling {
            self.cut_short = true;
            self.complete = false;
            return 0;
        }
        data.len()
    }
}

/// True for libcurl's refusal of a response whose `Content-Length` is not a valid length.
fn malformed_content_length(e: &curl::Error) -> bool {
    e.code() == CURLE_WEIRD_SERVER_REPLY
        && e.extra_description()
            .map_or(false, |d| d.to_ascii_lowercase().contains("content-length"))
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, policy: &FetchPolicy) -> Result<Response, TransportError> {
        check_url(url)?;
        let timeout = Duration::from_secs(policy.request_timeout_secs);

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(&policy.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(timeout)?;
        // Read timeout: abort if no bytes arrive for `timeout`.
        easy.low_speed_limit(1)?;
        easy.low_speed_time(timeout)?;

        let exchange = RefCell::new(Exchange::new(policy.max_bytes));
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                exchange.borrow_mut().header_line(data);
                true
            })?;
            transfer.write_function(|data| {
                Ok(exchange.borrow_mut().body_chunk(data, policy))
            })?;
            transfer.perform()
        };
        let exchange = exchange.into_inner();

        match performed {
            Ok(()) => {}
            Err(e) if exchange.cut_short && e.is_write_error() => {
                tracing::debug!(url, received = exchange.received, "transfer stopped early");
            }
            Err(e) if malformed_content_length(&e) => {
                let detail = e.extra_description().unwrap_or("invalid Content-Length");
                return Err(TransportError::MalformedHeader(detail.to_string()));
            }
            Err(e) => return Err(TransportError::Curl(e)),
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http { code });
        }

        Ok(Response {
            status: code,
            headers: exchange.headers,
            body: exchange.body,
            body_len: exchange.received,
            body_complete: exchange.complete,
        })
    }
}
