//! Interactive URL prompt.

use imf_core::batch::split_urls;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter one or more image URLs (comma-separated): ";

/// What the user supplied.
#[derive(Debug, PartialEq, Eq)]
pub enum UrlInput {
    /// Nothing but whitespace.
    Empty,
    /// Some text, but every comma-separated entry was blank.
    NoValid,
    Urls(Vec<String>),
}

pub fn collect_from_line(line: &str) -> UrlInput {
    let line = line.trim();
    if line.is_empty() {
        return UrlInput::Empty;
    }
    let urls = split_urls(line);
    if urls.is_empty() {
        UrlInput::NoValid
    } else {
        UrlInput::Urls(urls)
    }
}

/// Writes the prompt and reads one line. End of input counts as an empty line.
pub fn prompt_for_urls<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<UrlInput> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(collect_from_line(&line))
}
