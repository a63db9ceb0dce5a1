//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args_prompts() {
    let cli = parse(&["imf"]);
    assert!(cli.urls.is_empty());
    assert!(cli.dir.is_none());
}

#[test]
fn cli_parse_positional_urls() {
    let cli = parse(&[
        "imf",
        "https://example.com/cat.jpg",
        "https://example.com/a.png,https://example.com/b.png",
    ]);
    assert_eq!(
        cli.urls,
        vec![
            "https://example.com/cat.jpg",
            "https://example.com/a.png,https://example.com/b.png"
        ]
    );
}

#[test]
fn cli_parse_dir() {
    let cli = parse(&["imf", "--dir", "/tmp/pics", "https://example.com/cat.jpg"]);
    assert_eq!(cli.dir.as_deref(), Some(Path::new("/tmp/pics")));
    assert_eq!(cli.urls.len(), 1);
}

#[test]
fn cli_parse_unknown_flag_fails() {
    assert!(Cli::try_parse_from(["imf", "--overwrite"]).is_err());
}
