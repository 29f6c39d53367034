//! Time-windowed aggregates: balance, month and week totals, suggestions, and history.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    common::{from_cents, to_cents, total, Dated, DateWindow},
    Expense, Income, LedgerData, QuickAddSuggestion,
};

/// How far back expenses count toward quick-add suggestions.
pub const SUGGESTION_LOOKBACK_DAYS: i64 = 30;
/// Minimum repetitions before an expense is suggested.
pub const SUGGESTION_MIN_COUNT: usize = 2;
/// History length shown by default.
pub const RECENT_LIMIT: usize = 30;

pub struct SummaryService;

impl SummaryService {
    pub fn current_month_expenses(data: &LedgerData, now: DateTime<Utc>) -> Vec<&Expense> {
        within(&data.expenses, DateWindow::month_of(now))
    }

    pub fn current_month_incomes(data: &LedgerData, now: DateTime<Utc>) -> Vec<&Income> {
        within(&data.incomes, DateWindow::month_of(now))
    }

    pub fn current_week_expenses(data: &LedgerData, now: DateTime<Utc>) -> Vec<&Expense> {
        within(&data.expenses, DateWindow::week_of(now))
    }

    pub fn total_month_expenses(data: &LedgerData, now: DateTime<Utc>) -> f64 {
        total(Self::current_month_expenses(data, now))
    }

    pub fn total_month_income(data: &LedgerData, now: DateTime<Utc>) -> f64 {
        total(Self::current_month_incomes(data, now))
    }

    /// Every income minus every expense that is already due.
    ///
    /// Future installment parts and subscription charges do not reduce the balance.
    pub fn total_balance(data: &LedgerData, now: DateTime<Utc>) -> f64 {
        let income = total(&data.incomes);
        let spent = total(data.expenses.iter().filter(|expense| expense.date <= now));
        income - spent
    }

    /// Manual expenses repeated at least twice in the last 30 days, most frequent first.
    ///
    /// Entries are grouped by lowercased description and amount; each group keeps
    /// the category of its first occurrence.
    pub fn quick_add_suggestions(data: &LedgerData, now: DateTime<Utc>) -> Vec<QuickAddSuggestion> {
        let cutoff = now - Duration::days(SUGGESTION_LOOKBACK_DAYS);
        let mut index: HashMap<(String, i64), usize> = HashMap::new();
        let mut groups: Vec<QuickAddSuggestion> = Vec::new();

        for expense in data
            .expenses
            .iter()
            .filter(|expense| expense.created_at >= cutoff && expense.is_manual())
        {
            let key = (expense.description.to_lowercase(), to_cents(expense.amount));
            match index.get(&key) {
                Some(&slot) => groups[slot].count += 1,
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(QuickAddSuggestion {
                        description: key.0,
                        amount: from_cents(key.1),
                        category_id: expense.category_id.clone(),
                        count: 1,
                    });
                }
            }
        }

        groups.retain(|group| group.count >= SUGGESTION_MIN_COUNT);
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }

    /// Expenses dated after `now`, soonest first.
    pub fn upcoming_expenses(
        data: &LedgerData,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Vec<&Expense> {
        let mut upcoming: Vec<&Expense> = data
            .expenses
            .iter()
            .filter(|expense| expense.date > now)
            .collect();
        upcoming.sort_by_key(|expense| expense.date);
        truncate(upcoming, limit)
    }

    /// Most recently entered expenses first.
    pub fn recent_expenses(data: &LedgerData, limit: Option<usize>) -> Vec<&Expense> {
        let mut recent: Vec<&Expense> = data.expenses.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        truncate(recent, Some(limit.unwrap_or(RECENT_LIMIT)))
    }

    pub fn recent_incomes(data: &LedgerData, limit: Option<usize>) -> Vec<&Income> {
        let mut recent: Vec<&Income> = data.incomes.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        truncate(recent, Some(limit.unwrap_or(RECENT_LIMIT)))
    }
}

fn within<T: Dated>(records: &[T], window: DateWindow) -> Vec<&T> {
    records
        .iter()
        .filter(|record| window.contains(record.date()))
        .collect()
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
