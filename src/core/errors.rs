use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, service, and storage layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Income not found: {0}")]
    IncomeNotFound(String),
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(String),
    #[error("Subscription template not found: {0}")]
    TemplateNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
