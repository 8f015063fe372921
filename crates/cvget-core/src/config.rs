use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retrieval backend: library HTTP via curl, or an external download utility
/// for environments where library HTTP is blocked by a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalBackend {
    #[default]
    Curl,
    External,
}

/// Global configuration loaded from `~/.config/cvget/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvgetConfig {
    /// Retrieval backend: "curl" (default) or "external".
    #[serde(default)]
    pub backend: RetrievalBackend,
    /// User-Agent header sent with downloads. Some dataset hosts reject the
    /// default library agent; a browser-like value works around that.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Program invoked by the external backend (default "curl").
    #[serde(default)]
    pub external_command: Option<String>,
    /// Base data directory; when absent, `data/` under the current directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Default User-Agent when the config does not set one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default program for the external retrieval backend.
pub const DEFAULT_EXTERNAL_COMMAND: &str = "curl";

impl CvgetConfig {
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn external_command(&self) -> &str {
        self.external_command
            .as_deref()
            .unwrap_or(DEFAULT_EXTERNAL_COMMAND)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cvget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CvgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CvgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CvgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
