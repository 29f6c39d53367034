//! Splits purchases into dated installment expenses.
//!
//! Every part except the first gets the per-part amount rounded down to the
//! cent; the first part absorbs the remainder so the parts always add up to
//! the purchase total. Parts are spaced 30 days apart.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::core::errors::{BudgetError, Result};
use crate::core::services::{normalize_description, validate_amount};
use crate::domain::{
    common::{from_cents, new_id, to_cents},
    Expense, InstallmentPlan, InstallmentPreview, LedgerData,
};

pub const INSTALLMENT_SPACING_DAYS: i64 = 30;
pub const MIN_INSTALLMENTS: u32 = 2;
/// Thirty years of monthly payments.
pub const MAX_INSTALLMENTS: u32 = 360;

pub struct InstallmentService;

impl InstallmentService {
    /// Per-part amounts, first part first. Empty when `count` is zero.
    pub fn split(total_amount: f64, count: u32) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let total_cents = to_cents(total_amount);
        let parts = count as i64;
        let base = total_cents.div_euclid(parts);
        let first = total_cents - base * (parts - 1);
        std::iter::once(first)
            .chain(std::iter::repeat(base).take(count as usize - 1))
            .map(from_cents)
            .collect()
    }

    /// Due date of the 1-based installment `number`, or `None` past the calendar's range.
    pub fn due_date(first_payment: DateTime<Utc>, number: u32) -> Option<DateTime<Utc>> {
        let offset = INSTALLMENT_SPACING_DAYS.checked_mul(i64::from(number).checked_sub(1)?)?;
        first_payment.checked_add_signed(Duration::try_days(offset)?)
    }

    /// The schedule a plan would produce, without touching the ledger.
    ///
    /// Returns nothing for non-positive totals, a part count outside
    /// `MIN_INSTALLMENTS..=MAX_INSTALLMENTS`, or due dates beyond the calendar's range.
    pub fn preview(
        total_amount: f64,
        count: u32,
        first_payment: DateTime<Utc>,
    ) -> Vec<InstallmentPreview> {
        if total_amount.is_nan()
            || total_amount <= 0.0
            || !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count)
        {
            return Vec::new();
        }
        Self::split(total_amount, count)
            .into_iter()
            .zip(1..)
            .map(|(amount, number)| {
                Self::due_date(first_payment, number).map(|date| InstallmentPreview {
                    number,
                    amount,
                    date,
                })
            })
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }

    /// Appends one expense per installment, all sharing a fresh group id.
    pub fn add_plan(
        data: &mut LedgerData,
        plan: InstallmentPlan,
        now: DateTime<Utc>,
    ) -> Result<Vec<Expense>> {
        validate_amount(plan.total_amount)?;
        let description = normalize_description(&plan.description)?;
        if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&plan.installments) {
            return Err(BudgetError::InvalidInput(format!(
                "an installment plan needs {MIN_INSTALLMENTS} to {MAX_INSTALLMENTS} payments (got {})",
                plan.installments
            )));
        }
        let schedule = Self::preview(plan.total_amount, plan.installments, plan.first_payment);
        if schedule.is_empty() {
            return Err(BudgetError::InvalidInput(
                "installment due dates fall outside the supported calendar range".into(),
            ));
        }

        let group_id = new_id();
        let count = plan.installments;
        let parts: Vec<Expense> = schedule
            .into_iter()
            .map(|part| Expense {
                id: new_id(),
                amount: part.amount,
                category_id: plan.category_id.clone(),
                description: format!("{description} ({}/{count})", part.number),
                date: part.date,
                created_at: now,
                is_installment: true,
                installment_group_id: Some(group_id.clone()),
                installment_number: Some(part.number),
                total_installments: Some(count),
                installment_provider_id: Some(plan.provider_id.clone()),
                subscription_id: None,
            })
            .collect();

        debug!(group = %group_id, parts = parts.len(), "installment plan created");
        data.expenses.extend(parts.iter().cloned());
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn first_payment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn split_gives_remainder_to_first_part() {
        assert_eq!(InstallmentService::split(100.0, 3), vec![33.34, 33.33, 33.33]);
        assert_eq!(InstallmentService::split(10.0, 4), vec![2.5, 2.5, 2.5, 2.5]);
        assert_eq!(InstallmentService::split(0.05, 2), vec![0.03, 0.02]);
    }

    #[test]
    fn split_parts_sum_to_total_in_cents() {
        for (total, count) in [(99.99, 7), (1234.56, 12), (0.1, 3), (250.0, 6)] {
            let parts = InstallmentService::split(total, count);
            let sum: i64 = parts.iter().map(|part| to_cents(*part)).sum();
            assert_eq!(sum, to_cents(total), "total {total} over {count} parts");
        }
    }

    #[test]
    fn preview_spaces_parts_thirty_days_apart() {
        let preview = InstallmentService::preview(90.0, 3, first_payment());
        assert_eq!(preview.len(), 3);
        assert_eq!(preview[0].date, first_payment());
        assert_eq!(
            preview[2].date,
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(preview[1].number, 2);
    }

    #[test]
    fn preview_is_empty_for_invalid_input() {
        assert!(InstallmentService::preview(0.0, 3, first_payment()).is_empty());
        assert!(InstallmentService::preview(50.0, 1, first_payment()).is_empty());
    }

    #[test]
    fn add_plan_links_parts_to_one_group() {
        let mut data = LedgerData::new();
        let plan = InstallmentPlan {
            total_amount: 100.0,
            category_id: "shopping".into(),
            description: "Laptop".into(),
            installments: 3,
            first_payment: first_payment(),
            provider_id: "klarna".into(),
        };
        let parts = InstallmentService::add_plan(&mut data, plan, first_payment()).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].description, "Laptop (1/3)");
        assert_eq!(parts[2].description, "Laptop (3/3)");
        let group = parts[0].installment_group_id.clone().unwrap();
        assert_eq!(data.installment_group(&group).len(), 3);
        assert!(parts.iter().all(|part| part.is_installment));
        assert!(parts
            .iter()
            .all(|part| part.installment_provider_id.as_deref() == Some("klarna")));
    }

    #[test]
    fn add_plan_rejects_single_payment() {
        let mut data = LedgerData::new();
        let plan = InstallmentPlan {
            total_amount: 100.0,
            category_id: "shopping".into(),
            description: "Laptop".into(),
            installments: 1,
            first_payment: first_payment(),
            provider_id: "none".into(),
        };
        assert!(InstallmentService::add_plan(&mut data, plan, first_payment()).is_err());
        assert!(data.expenses.is_empty());
    }

    #[test]
    fn oversized_plans_are_rejected_instead_of_overflowing() {
        assert!(InstallmentService::preview(100.0, 4_000_000, first_payment()).is_empty());
        assert!(InstallmentService::preview(100.0, u32::MAX, first_payment()).is_empty());
        assert_eq!(InstallmentService::preview(360.0, MAX_INSTALLMENTS, first_payment()).len(), 360);

        let mut data = LedgerData::new();
        let plan = InstallmentPlan {
            total_amount: 100.0,
            category_id: "shopping".into(),
            description: "Laptop".into(),
            installments: 4_000_000,
            first_payment: first_payment(),
            provider_id: "none".into(),
        };
        assert!(matches!(
            InstallmentService::add_plan(&mut data, plan, first_payment()),
            Err(BudgetError::InvalidInput(_))
        ));
        assert!(data.expenses.is_empty());
    }

    #[test]
    fn due_dates_past_the_calendar_end_yield_no_schedule() {
        let far_future = DateTime::<Utc>::MAX_UTC - Duration::days(45);
        assert!(InstallmentService::due_date(far_future, 2).is_none());
        assert!(InstallmentService::preview(100.0, 3, far_future).is_empty());
    }
}
