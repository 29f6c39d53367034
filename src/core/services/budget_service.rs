//! Category budget rules: weekly derivation, overrides, and spend-versus-budget views.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::core::errors::{BudgetError, Result};
use crate::domain::{
    common::{days_in_month, total, DateWindow},
    BudgetOverview, BudgetTotals, Catalog, Category, CategoryBudgetOverride, CategoryBudgetUsage,
    Expense, LedgerData,
};

const WEEKLY_ROUNDING_STEP: f64 = 5.0;
const DAYS_PER_WEEK: f64 = 7.0;
const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Stateless budgeting utilities that operate over ledger snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Derives a weekly budget from a monthly one for the month containing `reference`.
    ///
    /// The daily rate times seven is rounded up to the next multiple of 5.
    pub fn compute_weekly_budget(monthly_budget: f64, reference: NaiveDate) -> f64 {
        let days = days_in_month(reference.year(), reference.month()) as f64;
        let weekly = (monthly_budget / days) * DAYS_PER_WEEK;
        let steps = (weekly / WEEKLY_ROUNDING_STEP - ROUNDING_TOLERANCE).ceil();
        (steps * WEEKLY_ROUNDING_STEP).max(0.0)
    }

    /// Catalog categories with overrides applied and weekly budgets derived.
    pub fn categories(
        catalog: &Catalog,
        overrides: &[CategoryBudgetOverride],
        reference: NaiveDate,
    ) -> Vec<Category> {
        catalog
            .categories
            .iter()
            .map(|category| Self::resolve(category, overrides, reference))
            .collect()
    }

    /// Single category with its effective budgets, if the catalog knows it.
    pub fn category(
        catalog: &Catalog,
        overrides: &[CategoryBudgetOverride],
        category_id: &str,
        reference: NaiveDate,
    ) -> Option<Category> {
        catalog
            .category(category_id)
            .map(|category| Self::resolve(category, overrides, reference))
    }

    fn resolve(
        category: &Category,
        overrides: &[CategoryBudgetOverride],
        reference: NaiveDate,
    ) -> Category {
        let monthly_budget = overrides
            .iter()
            .find(|entry| entry.category_id == category.id)
            .map(|entry| entry.monthly_budget)
            .unwrap_or(category.monthly_budget);
        Category {
            monthly_budget,
            weekly_budget: Self::compute_weekly_budget(monthly_budget, reference),
            ..category.clone()
        }
    }

    /// Records a monthly budget for a category, replacing any earlier override.
    pub fn apply_override(
        overrides: &mut Vec<CategoryBudgetOverride>,
        catalog: &Catalog,
        category_id: &str,
        monthly_budget: f64,
    ) -> Result<()> {
        if catalog.category(category_id).is_none() {
            return Err(BudgetError::CategoryNotFound(category_id.to_string()));
        }
        if !monthly_budget.is_finite() || monthly_budget < 0.0 {
            return Err(BudgetError::InvalidInput(format!(
                "monthly budget must be zero or positive (got {monthly_budget})"
            )));
        }
        overrides.retain(|entry| entry.category_id != category_id);
        overrides.push(CategoryBudgetOverride::new(category_id, monthly_budget));
        Ok(())
    }

    /// Sum of a category's expenses dated inside `window`.
    pub fn spent_in_window(data: &LedgerData, category_id: &str, window: DateWindow) -> f64 {
        total(
            data.expenses
                .iter()
                .filter(|expense| expense.category_id == category_id)
                .filter(|expense| window.contains(expense.date)),
        )
    }

    pub fn weekly_spent_by_category(
        data: &LedgerData,
        category_id: &str,
        now: DateTime<Utc>,
    ) -> f64 {
        Self::spent_in_window(data, category_id, DateWindow::week_of(now))
    }

    pub fn monthly_spent_by_category(
        data: &LedgerData,
        category_id: &str,
        now: DateTime<Utc>,
    ) -> f64 {
        Self::spent_in_window(data, category_id, DateWindow::month_of(now))
    }

    /// Builds the per-category usage rows and the totals over budgeted categories.
    pub fn overview(data: &LedgerData, categories: &[Category], now: DateTime<Utc>) -> BudgetOverview {
        let week = DateWindow::week_of(now);
        let month = DateWindow::month_of(now);
        let week_expenses: Vec<&Expense> = in_window(data, week);
        let month_expenses: Vec<&Expense> = in_window(data, month);

        let (visible, hidden): (Vec<_>, Vec<_>) = categories
            .iter()
            .map(|category| {
                let weekly_spent = sum_for(&week_expenses, &category.id);
                let monthly_spent = sum_for(&month_expenses, &category.id);
                CategoryBudgetUsage::new(category.clone(), weekly_spent, monthly_spent)
            })
            .partition(|usage| usage.category.is_budgeted());

        let totals = BudgetTotals::from_usages(&visible);
        debug!(
            visible = visible.len(),
            hidden = hidden.len(),
            monthly_spent = totals.monthly_spent,
            "budget overview computed"
        );
        BudgetOverview {
            visible,
            hidden,
            totals,
        }
    }
}

fn in_window(data: &LedgerData, window: DateWindow) -> Vec<&Expense> {
    data.expenses
        .iter()
        .filter(|expense| window.contains(expense.date))
        .collect()
}

fn sum_for(expenses: &[&Expense], category_id: &str) -> f64 {
    expenses
        .iter()
        .filter(|expense| expense.category_id == category_id)
        .map(|expense| expense.amount)
        .sum()
}
