use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Amounted, Dated, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn from_draft(draft: NewIncome, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            created_at,
        }
    }
}

impl Identifiable for Income {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Income {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Income {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl NewIncome {
    pub fn new(amount: f64, description: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
        }
    }
}
