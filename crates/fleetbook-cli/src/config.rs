// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use fleetbook_app::Credentials;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            auth: Auth::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub data_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Auth {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub search_debounce_ms: Option<u64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            search_debounce_ms: Some(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FLEETBOOK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FLEETBOOK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(fleetbook_store::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [storage], [auth], and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(data_path) = &self.storage.data_path {
            fleetbook_store::validate_data_path(data_path)?;
        }

        if let Some(username) = &self.auth.username
            && username.trim().is_empty()
        {
            bail!("auth.username in {} must not be blank", path.display());
        }

        if let Some(password) = &self.auth.password
            && password.is_empty()
        {
            bail!("auth.password in {} must not be empty", path.display());
        }

        if let Some(debounce) = self.ui.search_debounce_ms
            && debounce == 0
        {
            bail!(
                "ui.search_debounce_ms in {} must be positive; omit the key for the default",
                path.display()
            );
        }

        Ok(())
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.storage.data_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => fleetbook_store::default_data_path(),
        }
    }

    /// Login credentials: explicit config wins, then the environment, then
    /// the built-in defaults.
    pub fn credentials(&self) -> Credentials {
        let username = self
            .auth
            .username
            .clone()
            .or_else(|| env::var("FLEETBOOK_USERNAME").ok())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        let password = self
            .auth
            .password
            .clone()
            .or_else(|| env::var("FLEETBOOK_PASSWORD").ok())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_owned());
        Credentials::new(username, password)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(
            self.ui
                .search_debounce_ms
                .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
        )
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# fleetbook config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/fleetbook/fleetbook.json)\n# data_path = \"/absolute/path/to/fleetbook.json\"\n\n[auth]\n# Also settable via FLEETBOOK_USERNAME / FLEETBOOK_PASSWORD.\nusername = \"{}\"\npassword = \"{}\"\n\n[ui]\nsearch_debounce_ms = {}\n",
            path.display(),
            DEFAULT_USERNAME,
            DEFAULT_PASSWORD,
            DEFAULT_SEARCH_DEBOUNCE_MS,
        )
    }
}
