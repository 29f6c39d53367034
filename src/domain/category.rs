//! Domain types representing spending categories and their budgets.

use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity};

/// Groups expenses for budgeting and reporting.
///
/// `weekly_budget` is derived from `monthly_budget` for the month being viewed
/// and is recomputed whenever categories are listed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub weekly_budget: f64,
    #[serde(default)]
    pub monthly_budget: f64,
    pub color: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        monthly_budget: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            weekly_budget: 0.0,
            monthly_budget,
            color: color.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Categories without a monthly budget are hidden from the budget overview.
    pub fn is_budgeted(&self) -> bool {
        self.monthly_budget > 0.0
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// User supplied monthly budget that replaces a category's catalog default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudgetOverride {
    pub category_id: String,
    pub monthly_budget: f64,
}

impl CategoryBudgetOverride {
    pub fn new(category_id: impl Into<String>, monthly_budget: f64) -> Self {
        Self {
            category_id: category_id.into(),
            monthly_budget,
        }
    }
}

/// Merchant or lender that finances an installment plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentProvider {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Identifiable for InstallmentProvider {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for InstallmentProvider {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Well-known recurring service a subscription can be created from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_amount: Option<f64>,
}

impl Identifiable for SubscriptionTemplate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for SubscriptionTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}
