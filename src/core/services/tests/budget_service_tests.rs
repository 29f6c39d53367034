use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::core::errors::BudgetError;
use crate::core::services::{BudgetService, ExpenseService};
use crate::domain::{Catalog, CategoryBudgetOverride, LedgerData, NewExpense};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

#[test]
fn weekly_budget_rounds_up_to_multiple_of_five() {
    // 400 / 30 * 7 = 93.33
    assert_eq!(BudgetService::compute_weekly_budget(400.0, date(2024, 4, 10)), 95.0);
    // 300 / 31 * 7 = 67.74
    assert_eq!(BudgetService::compute_weekly_budget(300.0, date(2024, 1, 10)), 70.0);
}

#[test]
fn weekly_budget_keeps_exact_multiples() {
    assert_eq!(BudgetService::compute_weekly_budget(310.0, date(2024, 1, 1)), 70.0);
    assert_eq!(BudgetService::compute_weekly_budget(290.0, date(2024, 2, 1)), 70.0);
    assert_eq!(BudgetService::compute_weekly_budget(0.0, date(2024, 2, 1)), 0.0);
}

#[test]
fn weekly_budget_depends_on_month_length() {
    let february = BudgetService::compute_weekly_budget(150.0, date(2023, 2, 1));
    let march = BudgetService::compute_weekly_budget(150.0, date(2023, 3, 1));
    // 150/28*7 = 37.5 -> 40; 150/31*7 = 33.87 -> 35
    assert_eq!(february, 40.0);
    assert_eq!(march, 35.0);
}

#[test]
fn override_replaces_catalog_budget_and_previous_override() {
    let catalog = Catalog::builtin();
    let mut overrides = vec![CategoryBudgetOverride::new("groceries", 100.0)];
    BudgetService::apply_override(&mut overrides, &catalog, "groceries", 620.0).unwrap();
    assert_eq!(overrides.len(), 1);

    let groceries =
        BudgetService::category(&catalog, &overrides, "groceries", date(2024, 1, 5)).unwrap();
    assert_eq!(groceries.monthly_budget, 620.0);
    // 620 / 31 * 7 = 140
    assert_eq!(groceries.weekly_budget, 140.0);

    let dining = BudgetService::category(&catalog, &overrides, "dining", date(2024, 1, 5)).unwrap();
    assert_eq!(dining.monthly_budget, 150.0);
}

#[test]
fn override_rejects_unknown_category_and_negative_budget() {
    let catalog = Catalog::builtin();
    let mut overrides = Vec::new();
    assert!(matches!(
        BudgetService::apply_override(&mut overrides, &catalog, "pets", 10.0),
        Err(BudgetError::CategoryNotFound(_))
    ));
    assert!(matches!(
        BudgetService::apply_override(&mut overrides, &catalog, "dining", -1.0),
        Err(BudgetError::InvalidInput(_))
    ));
    assert!(overrides.is_empty());
}

#[test]
fn spent_by_category_respects_week_and_month_windows() {
    let mut data = LedgerData::new();
    // Wednesday 2024-05-15 is "now"; week runs Mon 13 to Sun 19.
    let now = at(2024, 5, 15);
    for (amount, day) in [(10.0, 13), (20.0, 19), (40.0, 2), (80.0, 20)] {
        let draft = NewExpense::new(amount, "dining", "Meal", at(2024, 5, day));
        ExpenseService::add(&mut data, draft, now).unwrap();
    }
    let other = NewExpense::new(5.0, "transport", "Bus", at(2024, 5, 14));
    ExpenseService::add(&mut data, other, now).unwrap();
    let last_month = NewExpense::new(7.0, "dining", "Meal", at(2024, 4, 30));
    ExpenseService::add(&mut data, last_month, now).unwrap();

    assert_eq!(BudgetService::weekly_spent_by_category(&data, "dining", now), 30.0);
    assert_eq!(BudgetService::monthly_spent_by_category(&data, "dining", now), 150.0);
    assert_eq!(BudgetService::weekly_spent_by_category(&data, "transport", now), 5.0);
}

#[test]
fn overview_splits_hidden_categories_and_totals_visible_ones() {
    let catalog = Catalog::builtin();
    let now = at(2024, 4, 10);
    let categories = BudgetService::categories(&catalog, &[], now.date_naive());
    let mut data = LedgerData::new();
    ExpenseService::add(
        &mut data,
        NewExpense::new(500.0, "groceries", "Big shop", now),
        now,
    )
    .unwrap();
    ExpenseService::add(&mut data, NewExpense::new(25.0, "other", "Gift", now), now).unwrap();

    let overview = BudgetService::overview(&data, &categories, now);
    assert_eq!(overview.hidden.len(), 1);
    assert_eq!(overview.hidden[0].category.id, "other");
    assert_eq!(overview.visible.len(), categories.len() - 1);

    let groceries = overview
        .visible
        .iter()
        .find(|usage| usage.category.id == "groceries")
        .unwrap();
    assert_eq!(groceries.monthly_percent, 100.0);
    assert_eq!(groceries.monthly_raw_percent, 125.0);

    let monthly_budget: f64 = overview
        .visible
        .iter()
        .map(|usage| usage.category.monthly_budget)
        .sum();
    assert_eq!(overview.totals.monthly_budget, monthly_budget);
    // Spend in hidden categories does not count toward the totals.
    assert_eq!(overview.totals.monthly_spent, 500.0);
}
