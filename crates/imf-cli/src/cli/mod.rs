//! CLI for the IMF image fetcher.

mod fetch;
mod prompt;

use anyhow::Result;
use clap::Parser;
use imf_core::config::{self, FetcherConfig};
use std::io;
use std::path::PathBuf;

use fetch::run_fetch;
use prompt::{collect_from_line, prompt_for_urls, UrlInput};

const BANNER: &str = "🖼️ Ubuntu Image Fetcher: download images safely and mindfully";

/// Top-level CLI for the IMF image fetcher.
#[derive(Debug, Parser)]
#[command(name = "imf", version)]
#[command(
    about = "IMF: fetch images from URLs, skipping non-images, oversized files and duplicates",
    long_about = None
)]
pub struct Cli {
    /// Image URLs to fetch (each argument may hold several, comma-separated).
    /// When omitted, URLs are read from an interactive prompt.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Directory to save images in. Defaults to `target_dir` from the config file.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("config unavailable, using defaults: {:#}", e);
            FetcherConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        println!("{}\n", BANNER);

        let input = if self.urls.is_empty() {
            let stdin = io::stdin();
            prompt_for_urls(&mut stdin.lock(), &mut io::stdout()).unwrap_or_else(|e| {
                tracing::warn!("failed to read URLs from stdin: {}", e);
                UrlInput::Empty
            })
        } else {
            collect_from_line(&self.urls.join(","))
        };

        let urls = match input {
            UrlInput::Empty => {
                println!("No URLs provided. Exiting.");
                return Ok(());
            }
            UrlInput::NoValid => {
                println!("No valid URLs provided. Exiting.");
                return Ok(());
            }
            UrlInput::Urls(urls) => urls,
        };

        let target_dir = self.dir.unwrap_or(cfg.target_dir);
        run_fetch(&urls, &target_dir, cfg.policy)
    }
}

#[cfg(test)]
mod tests;
