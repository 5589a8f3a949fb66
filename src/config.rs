use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration.
///
/// Sources, later ones winning:
/// - built-in defaults
/// - `config.toml` in the working directory (optional)
/// - `RECIPES_`-prefixed env vars, `__` between section and key
///   (e.g. `RECIPES_STORAGE__UPLOAD_DIR=/srv/uploads`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    /// Request body cap; applies to image uploads.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_url: String,
    pub upload_dir: PathBuf,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            loglevel: "info".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:recipes.db".to_string(),
            upload_dir: PathBuf::from("static/uploads"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("RECIPES_").split("__"))
    }
}
