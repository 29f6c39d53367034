//! Recurring subscriptions that generate expenses at a fixed day interval.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Amounted, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub template_id: String,
    pub amount: f64,
    pub start_date: DateTime<Utc>,
    pub interval_days: u32,
    pub active: bool,
}

impl Subscription {
    pub fn from_draft(draft: NewSubscription) -> Self {
        Self {
            id: new_id(),
            template_id: draft.template_id,
            amount: draft.amount,
            start_date: draft.start_date,
            interval_days: draft.interval_days,
            active: draft.active,
        }
    }

    /// Charge dates from `start_date` up to and including `until`.
    ///
    /// Yields nothing when `interval_days` is zero.
    pub fn occurrences_until(&self, until: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let step = Duration::days(self.interval_days as i64);
        let first = (self.interval_days > 0).then_some(self.start_date);
        std::iter::successors(first, move |current| Some(*current + step))
            .take_while(move |current| *current <= until)
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Subscription {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub template_id: String,
    pub amount: f64,
    pub start_date: DateTime<Utc>,
    pub interval_days: u32,
    pub active: bool,
}

impl NewSubscription {
    /// Active subscription with the given cadence.
    pub fn new(
        template_id: impl Into<String>,
        amount: f64,
        start_date: DateTime<Utc>,
        interval_days: u32,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            amount,
            start_date,
            interval_days,
            active: true,
        }
    }
}
