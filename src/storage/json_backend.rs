use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    core::errors::BudgetError,
    domain::{CategoryBudgetOverride, LedgerData},
    utils::persistence::write_atomic,
};

use super::{Result, StorageBackend, CATEGORIES_KEY, DATA_KEY};

const FILE_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "budget-tracker-backup-";
const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed storage: one JSON file per key plus a backups folder.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self> {
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, FILE_EXTENSION))
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&data).map_err(|err| {
            BudgetError::StorageError(format!("`{}` is malformed: {}", path.display(), err))
        })?;
        Ok(Some(value))
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&path, &json)?;
        debug!(path = %path.display(), "stored");
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_data(&self) -> Result<Option<LedgerData>> {
        self.read_key(DATA_KEY)
    }

    fn save_data(&self, data: &LedgerData) -> Result<()> {
        self.write_key(DATA_KEY, data)
    }

    fn load_overrides(&self) -> Result<Option<Vec<CategoryBudgetOverride>>> {
        self.read_key(CATEGORIES_KEY)
    }

    fn save_overrides(&self, overrides: &[CategoryBudgetOverride]) -> Result<()> {
        self.write_key(CATEGORIES_KEY, overrides)
    }

    fn write_backup(&self, contents: &str, date: NaiveDate) -> Result<String> {
        fs::create_dir_all(&self.backups_dir)?;
        let name = backup_name(date);
        write_atomic(&self.backup_path(&name), contents)?;
        self.prune_backups()?;
        Ok(name)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if parse_backup_date(&file_name).is_some() {
                entries.push(file_name);
            }
        }
        entries.sort_by_key(|name| Reverse(parse_backup_date(name)));
        Ok(entries)
    }

    fn read_backup(&self, backup_name: &str) -> Result<String> {
        if parse_backup_date(backup_name).is_none() {
            return Err(BudgetError::StorageError(format!(
                "`{}` is not a backup name",
                backup_name
            )));
        }
        let path = self.backup_path(backup_name);
        if !path.exists() {
            return Err(BudgetError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// File name of the backup taken on `date`.
pub fn backup_name(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        BACKUP_PREFIX,
        date.format(BACKUP_DATE_FORMAT),
        FILE_EXTENSION
    )
}

fn parse_backup_date(name: &str) -> Option<NaiveDate> {
    let stem = name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    NaiveDate::parse_from_str(stem, BACKUP_DATE_FORMAT).ok()
}
