//! URL modeling and filename derivation.
//!
//! Saved images are named after the last segment of the URL path, falling back
//! to a fixed name when the segment has no extension.

mod path;

pub use path::last_path_segment;

/// Used when the URL path yields no segment with a `.` in it.
pub const DEFAULT_FILENAME: &str = "downloaded_image.jpg";

/// Derives the filename an image from `url` is saved under (before collision suffixes).
///
/// # Examples
///
/// - `derive_filename("https://example.com/cat.jpg")` → `"cat.jpg"`
/// - `derive_filename("https://example.com/gallery/")` → `"downloaded_image.jpg"`
/// - `derive_filename("https://example.com/image?id=4")` → `"downloaded_image.jpg"`
pub fn derive_filename(url: &str) -> String {
    match last_path_segment(url) {
        Some(segment) if segment.contains('.') => segment,
        _ => DEFAULT_FILENAME.to_string(),
    }
}

/// Splits `name` into base and extension at the last `.`; the extension keeps
/// its dot.
///
/// Leading dots belong to the base, so `".png"` has no extension and `"a.tar.gz"`
/// splits into `("a.tar", ".gz")`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let stripped = name.trim_start_matches('.');
    let offset = name.len() - stripped.len();
    match stripped.rfind('.') {
        Some(idx) => name.split_at(offset + idx),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(derive_filename("https://example.com/cat.jpg"), "cat.jpg");
        assert_eq!(
            derive_filename("https://cdn.example.com/path/to/photo.final.png"),
            "photo.final.png"
        );
    }

    #[test]
    fn derive_filename_fallbacks() {
        assert_eq!(derive_filename("https://example.com/"), DEFAULT_FILENAME);
        assert_eq!(derive_filename("https://example.com"), DEFAULT_FILENAME);
        assert_eq!(derive_filename("https://example.com/image"), DEFAULT_FILENAME);
        assert_eq!(
            derive_filename("https://example.com/dir.v2/"),
            DEFAULT_FILENAME
        );
        assert_eq!(derive_filename("::garbage::"), DEFAULT_FILENAME);
    }

    #[test]
    fn derive_filename_ignores_query_dots() {
        assert_eq!(
            derive_filename("https://example.com/render?file=a.png"),
            DEFAULT_FILENAME
        );
    }

    #[test]
    fn derive_filename_drops_path_params() {
        assert_eq!(derive_filename("https://example.com/a.jpg;v=1"), "a.jpg");
        assert_eq!(
            derive_filename("https://example.com/image;type=a.png"),
            DEFAULT_FILENAME
        );
    }

    #[test]
    fn split_extension_at_last_dot() {
        assert_eq!(split_extension("cat.jpg"), ("cat", ".jpg"));
        assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
    }

    #[test]
    fn split_extension_leading_dots_stay_in_base() {
        assert_eq!(split_extension(".png"), (".png", ""));
        assert_eq!(split_extension("..png"), ("..png", ""));
        assert_eq!(split_extension(".hidden.gif"), (".hidden", ".gif"));
    }
}
