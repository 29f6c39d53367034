//! Business logic helpers for managing one-off expenses.

use chrono::{DateTime, Utc};

use crate::core::errors::{BudgetError, Result};
use crate::core::services::{normalize_description, validate_amount};
use crate::domain::{Expense, LedgerData, NewExpense};

/// Provides validated add/remove helpers for ledger expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates the draft, stamps it, and appends it to the ledger.
    pub fn add(data: &mut LedgerData, draft: NewExpense, now: DateTime<Utc>) -> Result<Expense> {
        validate_amount(draft.amount)?;
        let description = normalize_description(&draft.description)?;
        let expense = Expense::from_draft(
            NewExpense {
                description,
                ..draft
            },
            now,
        );
        data.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Removes the expense identified by `id`, returning the removed record.
    pub fn remove(data: &mut LedgerData, id: &str) -> Result<Expense> {
        data.remove_expense(id)
            .ok_or_else(|| BudgetError::ExpenseNotFound(id.to_string()))
    }

    /// Removes every part of an installment plan, returning how many were dropped.
    pub fn remove_installment_group(data: &mut LedgerData, group_id: &str) -> Result<usize> {
        let before = data.expenses.len();
        data.expenses
            .retain(|expense| expense.installment_group_id.as_deref() != Some(group_id));
        let removed = before - data.expenses.len();
        if removed == 0 {
            return Err(BudgetError::ExpenseNotFound(format!(
                "installment group {group_id}"
            )));
        }
        Ok(removed)
    }
}
