//! The persisted ledger blob and the derived views computed from it.

use serde::{Deserialize, Serialize};

use crate::domain::{
    category::Category,
    expense::Expense,
    income::Income,
    subscription::Subscription,
};

/// Every financial record the tracker owns. This is the exported/imported blob.
///
/// All three lists are required when deserializing so that an import missing
/// one of them is rejected rather than silently emptied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerData {
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub subscriptions: Vec<Subscription>,
}

impl LedgerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty() && self.subscriptions.is_empty()
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn income(&self, id: &str) -> Option<&Income> {
        self.incomes.iter().find(|income| income.id == id)
    }

    pub fn subscription(&self, id: &str) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    pub fn subscription_mut(&mut self, id: &str) -> Option<&mut Subscription> {
        self.subscriptions.iter_mut().find(|sub| sub.id == id)
    }

    pub fn remove_expense(&mut self, id: &str) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        Some(self.expenses.remove(index))
    }

    pub fn remove_income(&mut self, id: &str) -> Option<Income> {
        let index = self.incomes.iter().position(|income| income.id == id)?;
        Some(self.incomes.remove(index))
    }

    pub fn remove_subscription(&mut self, id: &str) -> Option<Subscription> {
        let index = self.subscriptions.iter().position(|sub| sub.id == id)?;
        Some(self.subscriptions.remove(index))
    }

    /// All parts of one installment plan, ordered by installment number.
    pub fn installment_group(&self, group_id: &str) -> Vec<&Expense> {
        let mut parts: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|expense| expense.installment_group_id.as_deref() == Some(group_id))
            .collect();
        parts.sort_by_key(|expense| expense.installment_number);
        parts
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
        self.incomes.clear();
        self.subscriptions.clear();
    }
}

/// Frequently repeated manual expense offered as a one-tap entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickAddSuggestion {
    pub description: String,
    pub amount: f64,
    pub category_id: String,
    pub count: usize,
}

/// Spend against a single category's weekly and monthly budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudgetUsage {
    pub category: Category,
    pub weekly_spent: f64,
    pub monthly_spent: f64,
    /// Share of the weekly budget used, capped at 100.
    pub weekly_percent: f64,
    pub monthly_percent: f64,
    pub weekly_raw_percent: f64,
    pub monthly_raw_percent: f64,
}

impl CategoryBudgetUsage {
    pub fn new(category: Category, weekly_spent: f64, monthly_spent: f64) -> Self {
        let weekly_raw_percent = percent_of(weekly_spent, category.weekly_budget);
        let monthly_raw_percent = percent_of(monthly_spent, category.monthly_budget);
        Self {
            category,
            weekly_spent,
            monthly_spent,
            weekly_percent: weekly_raw_percent.min(100.0),
            monthly_percent: monthly_raw_percent.min(100.0),
            weekly_raw_percent,
            monthly_raw_percent,
        }
    }

    pub fn is_over_weekly(&self) -> bool {
        self.weekly_raw_percent > 100.0
    }

    pub fn is_over_monthly(&self) -> bool {
        self.monthly_raw_percent > 100.0
    }
}

/// Budget and spend summed over every visible category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub weekly_budget: f64,
    pub monthly_budget: f64,
    pub weekly_spent: f64,
    pub monthly_spent: f64,
    pub weekly_percent: f64,
    pub monthly_percent: f64,
    pub weekly_raw_percent: f64,
    pub monthly_raw_percent: f64,
}

impl BudgetTotals {
    pub fn from_usages<'a, I>(usages: I) -> Self
    where
        I: IntoIterator<Item = &'a CategoryBudgetUsage>,
    {
        let mut totals = Self::default();
        for usage in usages {
            totals.weekly_budget += usage.category.weekly_budget;
            totals.monthly_budget += usage.category.monthly_budget;
            totals.weekly_spent += usage.weekly_spent;
            totals.monthly_spent += usage.monthly_spent;
        }
        totals.weekly_raw_percent = percent_of(totals.weekly_spent, totals.weekly_budget);
        totals.monthly_raw_percent = percent_of(totals.monthly_spent, totals.monthly_budget);
        totals.weekly_percent = totals.weekly_raw_percent.min(100.0);
        totals.monthly_percent = totals.monthly_raw_percent.min(100.0);
        totals
    }
}

/// Budget screen model: budgeted categories, unbudgeted ones, and their totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub visible: Vec<CategoryBudgetUsage>,
    pub hidden: Vec<CategoryBudgetUsage>,
    pub totals: BudgetTotals,
}

fn percent_of(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        (spent / budget) * 100.0
    } else {
        0.0
    }
}
