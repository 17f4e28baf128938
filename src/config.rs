use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(about = "Runs the bookmarks service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Overrides `app.port` from the config file
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_base_path")]
    base_path: String,
    #[serde(default)]
    api_token: String,
}

fn default_port() -> u16 {
    8000
}

fn default_base_path() -> String {
    "/bookmarks".to_string()
}

fn default_database() -> String {
    "bookmarks.db".to_string()
}

fn default_sync_interval() -> u64 {
    60
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn get_base_path(&self) -> &str {
        &self.base_path
    }

    pub fn get_api_token(&self) -> &str {
        &self.api_token
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Libsql,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Storage {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub turso_url: Option<String>,
    #[serde(default)]
    pub turso_auth_token: Option<String>,
    #[serde(default = "default_sync_interval")]
    pub sync_interval_seconds: u64,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            backend: Backend::default(),
            database: default_database(),
            turso_url: None,
            turso_auth_token: None,
            sync_interval_seconds: default_sync_interval(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub storage: Storage,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        let yaml_with_env = Config::substitute_env_vars(&yaml_str)?;
        Config::from_yaml(&yaml_with_env)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<()> {
        if self.app.api_token.trim().is_empty() {
            anyhow::bail!("app.api_token must be set");
        }
        self.app.base_path = normalize_base_path(&self.app.base_path);
        Ok(())
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!(var = var_name, "environment variable not found");
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

/// `api/bookmarks/` becomes `/api/bookmarks`.
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_yaml("app:\n  api_token: secret\n").unwrap();
        assert_eq!(cfg.app.get_port(), 8000);
        assert_eq!(cfg.app.get_base_path(), "/bookmarks");
        assert_eq!(cfg.app.get_api_token(), "secret");
        assert_eq!(cfg.storage.backend, Backend::Libsql);
        assert_eq!(cfg.storage.database, "bookmarks.db");
        assert_eq!(cfg.storage.sync_interval_seconds, 60);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
app:
  port: 9090
  base_path: api/bookmarks/
  api_token: secret
storage:
  backend: memory
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.app.get_port(), 9090);
        assert_eq!(cfg.app.get_base_path(), "/api/bookmarks");
        assert_eq!(cfg.storage.backend, Backend::Memory);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        assert!(Config::from_yaml("app:\n  port: 8000\n").is_err());
        assert!(Config::from_yaml("app:\n  api_token: \"  \"\n").is_err());
    }

    #[test]
    fn test_substitute_env_vars_uses_defaults() {
        let out = Config::substitute_env_vars(
            "token: ${BOOKMARKS_TEST_UNSET_VAR:-fallback}\nport: ${BOOKMARKS_TEST_OTHER_UNSET}",
        )
        .unwrap();
        assert_eq!(out, "token: fallback\nport: ");
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/bookmarks"), "/bookmarks");
        assert_eq!(normalize_base_path("/api/bookmarks/"), "/api/bookmarks");
        assert_eq!(normalize_base_path("bookmarks"), "/bookmarks");
    }
}
