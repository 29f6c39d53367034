pub mod json_backend;

use chrono::NaiveDate;

use crate::{
    core::errors::BudgetError,
    domain::{CategoryBudgetOverride, LedgerData},
};

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Key holding the ledger records.
pub const DATA_KEY: &str = "budget-tracker-data";
/// Key holding the category budget overrides.
pub const CATEGORIES_KEY: &str = "budget-tracker-categories";

/// Abstraction over persistence backends capable of storing the ledger blob,
/// budget overrides, and dated backups.
///
/// `load_*` returns `Ok(None)` when nothing has been stored yet and an error
/// when stored content cannot be read or parsed.
pub trait StorageBackend: Send + Sync {
    fn load_data(&self) -> Result<Option<LedgerData>>;
    fn save_data(&self, data: &LedgerData) -> Result<()>;
    fn load_overrides(&self) -> Result<Option<Vec<CategoryBudgetOverride>>>;
    fn save_overrides(&self, overrides: &[CategoryBudgetOverride]) -> Result<()>;

    /// Writes `contents` as the backup for `date`, returning the backup name.
    fn write_backup(&self, contents: &str, date: NaiveDate) -> Result<String>;
    /// Backup names, newest first.
    fn list_backups(&self) -> Result<Vec<String>>;
    fn read_backup(&self, backup_name: &str) -> Result<String>;
}

pub use json_backend::JsonStorage;
