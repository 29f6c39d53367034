//! Subscription maintenance and idempotent charge generation.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::core::errors::{BudgetError, Result};
use crate::core::services::validate_amount;
use crate::domain::{
    common::{end_of_day, new_id},
    Catalog, Expense, LedgerData, NewSubscription, Subscription, SUBSCRIPTION_CATEGORY_ID,
};

pub struct SubscriptionService;

impl SubscriptionService {
    pub fn add(
        data: &mut LedgerData,
        catalog: &Catalog,
        draft: NewSubscription,
    ) -> Result<Subscription> {
        validate_amount(draft.amount)?;
        if draft.interval_days == 0 {
            return Err(BudgetError::InvalidInput(
                "subscription interval must be at least one day".into(),
            ));
        }
        if catalog.template(&draft.template_id).is_none() {
            return Err(BudgetError::TemplateNotFound(draft.template_id));
        }
        let subscription = Subscription::from_draft(draft);
        data.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    /// Removes the subscription. Charges it already generated stay in the ledger.
    pub fn remove(data: &mut LedgerData, id: &str) -> Result<Subscription> {
        data.remove_subscription(id)
            .ok_or_else(|| BudgetError::SubscriptionNotFound(id.to_string()))
    }

    /// Flips the active flag, returning the new state.
    pub fn toggle(data: &mut LedgerData, id: &str) -> Result<bool> {
        let subscription = data
            .subscription_mut(id)
            .ok_or_else(|| BudgetError::SubscriptionNotFound(id.to_string()))?;
        subscription.active = !subscription.active;
        Ok(subscription.active)
    }

    pub fn active(data: &LedgerData) -> Vec<&Subscription> {
        data.subscriptions.iter().filter(|sub| sub.active).collect()
    }

    /// Creates the charges every active subscription owes up to the end of today.
    ///
    /// An occurrence is skipped when an expense for the same subscription is
    /// already dated on that calendar day, so repeated calls add nothing new.
    /// Returns the expenses that were appended.
    pub fn generate_expenses(
        data: &mut LedgerData,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Vec<Expense> {
        let until = end_of_day(now);
        let existing: HashSet<(&str, NaiveDate)> = data
            .expenses
            .iter()
            .filter_map(|expense| {
                expense
                    .subscription_id
                    .as_deref()
                    .map(|sub_id| (sub_id, expense.date.date_naive()))
            })
            .collect();

        let mut generated = Vec::new();
        for sub in data.subscriptions.iter().filter(|sub| sub.active) {
            if sub.interval_days == 0 {
                warn!(subscription = %sub.id, "skipping subscription with a zero-day interval");
                continue;
            }
            let label = catalog.subscription_label(&sub.template_id);
            for date in sub.occurrences_until(until) {
                if existing.contains(&(sub.id.as_str(), date.date_naive())) {
                    continue;
                }
                generated.push(Expense {
                    id: new_id(),
                    amount: sub.amount,
                    category_id: SUBSCRIPTION_CATEGORY_ID.to_string(),
                    description: label.clone(),
                    date,
                    created_at: now,
                    is_installment: false,
                    installment_group_id: None,
                    installment_number: None,
                    total_installments: None,
                    installment_provider_id: None,
                    subscription_id: Some(sub.id.clone()),
                });
            }
        }

        debug!(generated = generated.len(), "subscription charges generated");
        data.expenses.extend(generated.iter().cloned());
        generated
    }
}
