use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Directory (relative to the working directory) that receives saved images.
pub const DEFAULT_TARGET_DIR: &str = "Fetched_Images";

/// Acceptance rules and request parameters applied to every URL in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchPolicy {
    /// Largest accepted body, in bytes (declared or actual).
    pub max_bytes: u64,
    /// `Content-Type` must start with this prefix.
    pub required_mime_prefix: String,
    /// Connect timeout, and the longest stall tolerated while reading.
    pub request_timeout_secs: u64,
    /// Sent as the `User-Agent` request header.
    pub user_agent: String,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            required_mime_prefix: "image/".to_string(),
            request_timeout_secs: 10,
            user_agent: "UbuntuImageFetcher/1.0".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/imf/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Where saved images go. Relative paths resolve against the working directory.
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
    /// Optional policy table; missing keys fall back to built-in defaults.
    #[serde(default)]
    pub policy: FetchPolicy,
}

fn default_target_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET_DIR)
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            policy: FetchPolicy::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imf")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetcherConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetcherConfig::default();
        assert_eq!(cfg.target_dir, PathBuf::from("Fetched_Images"));
        assert_eq!(cfg.policy.max_bytes, 10_485_760);
        assert_eq!(cfg.policy.required_mime_prefix, "image/");
        assert_eq!(cfg.policy.request_timeout_secs, 10);
        assert_eq!(cfg.policy.user_agent, "UbuntuImageFetcher/1.0");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetcherConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.target_dir, cfg.target_dir);
        assert_eq!(parsed.policy, cfg.policy);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            target_dir = "/tmp/pics"

            [policy]
            max_bytes = 2048
            required_mime_prefix = "image/png"
            request_timeout_secs = 3
            user_agent = "test-agent/0.1"
        "#;
        let cfg: FetcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.target_dir, PathBuf::from("/tmp/pics"));
        assert_eq!(cfg.policy.max_bytes, 2048);
        assert_eq!(cfg.policy.required_mime_prefix, "image/png");
        assert_eq!(cfg.policy.request_timeout_secs, 3);
        assert_eq!(cfg.policy.user_agent, "test-agent/0.1");
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: FetcherConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.target_dir, PathBuf::from(DEFAULT_TARGET_DIR));
        assert_eq!(cfg.policy, FetchPolicy::default());
    }

    #[test]
    fn config_toml_partial_policy() {
        let toml = r#"
            [policy]
            max_bytes = 512
        "#;
        let cfg: FetcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.policy.max_bytes, 512);
        assert_eq!(cfg.policy.required_mime_prefix, "image/");
        assert_eq!(cfg.target_dir, PathBuf::from(DEFAULT_TARGET_DIR));
    }
}
