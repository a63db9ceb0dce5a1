//! Filename extraction from URL path.

/// Returns the final segment of the URL's path (the text after the last `/`).
///
/// Query and fragment are not part of the path, and `;params` after the last
/// segment are dropped. Returns `None` if the URL cannot be parsed. The segment
/// is returned as it appears in the URL (percent-encoding kept) and may be
/// empty when the path ends with `/`.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next().unwrap_or("");
    let segment = segment.split(';').next().unwrap_or("");
    Some(segment.to_string())
}
