//! Optional user configuration, read from
//! `<config dir>/ember/config.toml`:
//!
//! ```toml
//! rom_dir = "/home/user/roms"
//! scale = 3
//! ```

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory searched for machine ROM images.
    pub rom_dir: Option<PathBuf>,
    /// Default window scale factor.
    pub scale: Option<u32>,
}

/// Load the config file; missing or unreadable files yield defaults,
/// malformed ones are reported and skipped.
pub fn load() -> Config {
    let Some(path) = dirs::config_dir().map(|d| d.join("ember").join("config.toml")) else {
        return Config::default();
    };
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring malformed config {}: {e}", path.display());
            Config::default()
        }
    }
}
