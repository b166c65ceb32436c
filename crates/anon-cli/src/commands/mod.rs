pub mod download;
pub mod extract;
pub mod review;
pub mod run;

use anon_config::Config;
use anon_core::{Level, Mode};
use anyhow::Result;

/// Flag value if given, else the configured default
pub fn resolve_level(flag: Option<String>, config: &Config) -> Result<Level> {
    let value = flag.unwrap_or_else(|| config.defaults.level.clone());
    Ok(value.parse()?)
}

pub fn resolve_mode(flag: Option<String>, config: &Config) -> Result<Mode> {
    let value = flag.unwrap_or_else(|| config.defaults.mode.clone());
    Ok(value.parse()?)
}
