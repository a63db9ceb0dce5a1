//! Response header block parsing.

/// Header fields of one HTTP response, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Builds a header block from raw lines, skipping status lines and blanks.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut headers = Headers::default();
        for line in lines {
            headers.push_line(line.as_ref());
        }
        headers
    }

    /// Adds a `Name: value` line. Lines without a colon are ignored.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || parse_status_line(line).is_some() {
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            self.insert(name.trim(), value.trim());
        }
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// First value for `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Content-Type` value, or the empty string when absent.
    pub fn content_type(&self) -> &str {
        self.get("content-type").unwrap_or("")
    }

    /// Raw `Content-Length` value; parsing is left to the caller so malformed
    /// values can be reported.
    pub fn content_length(&self) -> Option<&str> {
        self.get("content-length")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses `HTTP/1.1 200 OK` / `HTTP/2 404` into the status code.
pub fn parse_status_line(line: &str) -> Option<u32> {
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
