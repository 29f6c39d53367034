use chrono::{DateTime, Utc};

use crate::core::errors::{BudgetError, Result};
use crate::core::services::{normalize_description, validate_amount};
use crate::domain::{Income, LedgerData, NewIncome};

pub struct IncomeService;

impl IncomeService {
    pub fn add(data: &mut LedgerData, draft: NewIncome, now: DateTime<Utc>) -> Result<Income> {
        validate_amount(draft.amount)?;
        let description = normalize_description(&draft.description)?;
        let income = Income::from_draft(
            NewIncome {
                description,
                ..draft
            },
            now,
        );
        data.incomes.push(income.clone());
        Ok(income)
    }

    pub fn remove(data: &mut LedgerData, id: &str) -> Result<Income> {
        data.remove_income(id)
            .ok_or_else(|| BudgetError::IncomeNotFound(id.to_string()))
    }
}
