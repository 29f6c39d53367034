//! Engine configuration and its JSON persistence.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    core::errors::{BudgetError, Result},
    domain::Catalog,
    utils::persistence::write_atomic,
};

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const HOME_ENV_VAR: &str = "BUDGET_TRACKER_HOME";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory holding the ledger files. Defaults to `~/.budget_tracker`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    /// Optional catalog file replacing the built-in categories, providers, and templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            backup_retention: Self::default_backup_retention(),
            catalog_path: None,
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_log_filter() -> String {
        "budget_tracker=info".into()
    }

    /// Configured data directory, else `$BUDGET_TRACKER_HOME`, else `~/.budget_tracker`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        app_data_dir()
    }

    /// Loads the configured catalog, or the built-in one when none is set.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path).map_err(|err| {
                BudgetError::ConfigError(format!(
                    "catalog `{}` could not be loaded: {}",
                    path.display(),
                    err
                ))
            }),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Returns the application data directory, honouring `BUDGET_TRACKER_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| BudgetError::ConfigError(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| BudgetError::ConfigError(err.to_string()))?;
        write_atomic(&self.path, &json)
    }
}
