use std::path::Path;

use serde::Deserialize;

/// Binary-level configuration, loaded once at startup and passed by
/// reference to the replay loop - never held in a global/static.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Protocol version a batch entry is assumed to run under when it
    /// doesn't name its own.
    pub default_version: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG`
    /// isn't set.
    pub log_level: String
}

impl Default for Config {
    fn default() -> Self {
        Config { default_version: "0.1.0".to_string(), log_level: "info".to_string() }
    }
}

impl Config {
    pub fn load(path: &Path) -> eyre::Result<Config> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn default_version_tuple(&self) -> eyre::Result<(u64, u64, u64)> {
        parse_version(&self.default_version)
    }
}

pub fn parse_version(s: &str) -> eyre::Result<(u64, u64, u64)> {
    let parts: Vec<&str> = s.split('.').collect();
    let [major, minor, patch] = parts[..] else {
        eyre::bail!("version `{s}` must be in MAJOR.MINOR.PATCH form");
    };
    Ok((major.parse()?, minor.parse()?, patch.parse()?))
}
