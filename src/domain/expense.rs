//! Expense records, including installment parts and subscription charges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Amounted, Dated, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_installment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

impl Expense {
    /// Materialises a draft into a stored record.
    pub fn from_draft(draft: NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            amount: draft.amount,
            category_id: draft.category_id,
            description: draft.description,
            date: draft.date,
            created_at,
            is_installment: false,
            installment_group_id: None,
            installment_number: None,
            total_installments: None,
            installment_provider_id: None,
            subscription_id: None,
        }
    }

    /// True for charges generated from a subscription.
    pub fn is_subscription_charge(&self) -> bool {
        self.subscription_id.is_some()
    }

    /// True for one-off expenses typed in by the user.
    pub fn is_manual(&self) -> bool {
        !self.is_installment && !self.is_subscription_charge()
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Expense {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// Caller supplied fields for a one-off expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub fn new(
        amount: f64,
        category_id: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            category_id: category_id.into(),
            description: description.into(),
            date,
        }
    }
}

/// Parameters of a purchase split into dated installments.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPlan {
    pub total_amount: f64,
    pub category_id: String,
    pub description: String,
    pub installments: u32,
    pub first_payment: DateTime<Utc>,
    pub provider_id: String,
}

/// One row of an installment split computed ahead of saving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPreview {
    pub number: u32,
    pub amount: f64,
    pub date: DateTime<Utc>,
}
