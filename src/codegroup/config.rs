use crate::error::{CodeGroupError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TABLE: &str = "code_files";

pub const ENV_URL: &str = "CODEGROUP_URL";
pub const ENV_KEY: &str = "CODEGROUP_KEY";
pub const ENV_TABLE: &str = "CODEGROUP_TABLE";
pub const ENV_CONFIG_DIR: &str = "CODEGROUP_CONFIG_DIR";

/// Backend connection settings, stored in `config.json` in the platform
/// config directory and overridable from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodegroupConfig {
    /// Backend URL: `https://…` for a REST table, `file:///…` for a local one
    #[serde(default)]
    pub url: String,

    /// Access key sent with every REST request
    #[serde(default)]
    pub key: String,

    /// Table holding the records
    #[serde(default = "default_table")]
    pub table: String,

    /// Where opened and pulled files are written (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for CodegroupConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: default_table(),
            download_dir: None,
        }
    }
}

impl CodegroupConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| CodeGroupError::local_io(&config_path, e))?;
        let config: CodegroupConfig = serde_json::from_str(&content).map_err(|e| {
            CodeGroupError::Config(format!("{} is invalid: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_URL) {
            self.url = url;
        }
        if let Some(key) = get(ENV_KEY) {
            self.key = key;
        }
        if let Some(table) = get(ENV_TABLE) {
            self.table = table;
        }
    }

    /// Config file merged with the process environment.
    pub fn resolve<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let mut config = Self::load(config_dir)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(CodeGroupError::Config(format!(
                "no backend URL (set {} or \"url\" in {})",
                ENV_URL, CONFIG_FILENAME
            )));
        }

        let parsed = Url::parse(url)
            .map_err(|e| CodeGroupError::Config(format!("invalid backend URL '{}': {}", url, e)))?;

        match parsed.scheme() {
            "file" => Ok(()),
            "http" | "https" => {
                if self.key.trim().is_empty() {
                    return Err(CodeGroupError::Config(format!(
                        "no access key (set {} or \"key\" in {})",
                        ENV_KEY, CONFIG_FILENAME
                    )));
                }
                if self.table.trim().is_empty() {
                    return Err(CodeGroupError::Config("table name is empty".to_string()));
                }
                Ok(())
            }
            other => Err(CodeGroupError::Config(format!(
                "unsupported backend URL scheme '{}'",
                other
            ))),
        }
    }

    /// Directory of a `file://` backend, if that is what is configured.
    pub fn file_store_dir(&self) -> Option<PathBuf> {
        Url::parse(self.url.trim())
            .ok()
            .filter(|u| u.scheme() == "file")
            .and_then(|u| u.to_file_path().ok())
    }
}
