//! Optional config file and default path resolution.
//!
//! `config.toml` lives in the XDG config directory and can pin the data
//! directory and users-file path. CLI flags and environment variables
//! override it; without either, the XDG data directory is used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FundbookConfig {
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub auth: AuthSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LedgerSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthSection {
    pub users_file: Option<String>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<FundbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config file if one exists; otherwise return defaults.
pub fn load_config_if_present() -> anyhow::Result<FundbookConfig> {
    let path = default_config_path()?;
    if path.exists() {
        read_config(&path)
    } else {
        Ok(FundbookConfig::default())
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fundbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("fundbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fundbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("fundbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
