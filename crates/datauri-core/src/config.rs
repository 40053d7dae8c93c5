use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default accepted image suffixes.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "gif"];

/// Default inline size ceiling in bytes.
pub const DEFAULT_MAX_BYTES: u64 = 2048;

/// Invalid task configuration. Raised before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown task `{0}`")]
    UnknownTask(String),
    #[error("task `{task}` is missing required field `{field}`")]
    MissingField { task: String, field: &'static str },
    #[error("invalid image extension regex `{pattern}`: {source}")]
    InvalidExtensionRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// User-level defaults loaded from `~/.config/datauri/config.toml`.
///
/// Tasks that leave `image_extensions` or `max_bytes` unset inherit these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatauriConfig {
    /// Accepted image suffixes, without the leading dot.
    pub image_extensions: Vec<String>,
    /// Maximum source image size that is still inlined.
    pub max_bytes: u64,
}

impl Default for DatauriConfig {
    fn default() -> Self {
        Self {
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("datauri")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DatauriConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DatauriConfig> {
    if !path.exists() {
        let default_cfg = DatauriConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: DatauriConfig = toml::from_str(&data)?;
    Ok(cfg)
}
