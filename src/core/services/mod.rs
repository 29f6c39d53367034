pub mod budget_service;
pub mod expense_service;
pub mod income_service;
pub mod installment_service;
pub mod subscription_service;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use expense_service::ExpenseService;
pub use income_service::IncomeService;
pub use installment_service::InstallmentService;
pub use subscription_service::SubscriptionService;
pub use summary_service::SummaryService;

use crate::core::errors::{BudgetError, Result};

/// Rejects zero, negative, and non-finite amounts.
pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BudgetError::InvalidInput(format!(
            "amount must be greater than zero (got {amount})"
        )));
    }
    Ok(())
}

/// Trims a description, rejecting blank input.
pub(crate) fn normalize_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::InvalidInput("description must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests;
