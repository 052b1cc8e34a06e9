use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/sysinst/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Root of the provisioning tree. Relative paths resolve against the working directory.
    pub system_directory: PathBuf,
    /// Blacklist rules, e.g. `mvn:org.foo/bar` or `*commons-collections*;type=bundle`.
    #[serde(default)]
    pub blacklisted_rules: Vec<String>,
    /// Local Maven-layout repositories searched by the local downloader, in order.
    #[serde(default)]
    pub repositories: Vec<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            system_directory: PathBuf::from("system"),
            blacklisted_rules: Vec::new(),
            repositories: default_local_repository().into_iter().collect(),
        }
    }
}

impl InstallerConfig {
    /// `system_directory` made absolute against the current working directory.
    pub fn absolute_system_directory(&self) -> Result<PathBuf> {
        std::path::absolute(&self.system_directory).with_context(|| {
            format!(
                "cannot resolve system directory {}",
                self.system_directory.display()
            )
        })
    }
}

/// `~/.m2/repository`, if a home directory is known.
pub fn default_local_repository() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".m2").join("repository"))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sysinst")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<InstallerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = InstallerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<InstallerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: InstallerConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
