//! Config file location.

use std::path::PathBuf;

use anyhow::{Result, bail};

/// Application directory name under the config root.
const APP_DIR: &str = "cinedeck";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set, returns `$XDG_CONFIG_HOME/cinedeck/config.toml`.
/// - Otherwise returns `~/.config/cinedeck/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let home = std::env::var("HOME").ok();
    default_config_path(xdg.as_deref(), home.as_deref())
}

/// Picks the default path from the given environment values.
fn default_config_path(xdg_config_home: Option<&str>, home: Option<&str>) -> Result<PathBuf> {
    let root = match (xdg_config_home, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".config"),
        _ => bail!("HOME environment variable is not set"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}
