mod common;

use std::fs;

use budget_tracker::{
    config::Config,
    domain::{NewExpense, NewIncome, NewSubscription},
    storage::{CATEGORIES_KEY, DATA_KEY},
    BudgetTracker,
};
use common::{at, open_tracker, reference_now, setup_test_env, temp_data_dir};

fn data_file(dir: &std::path::Path) -> std::path::PathBuf {
    dir.join(format!("{DATA_KEY}.json"))
}

#[test]
fn records_and_overrides_persist_across_reopen() {
    let (mut tracker, _config, data_dir) = setup_test_env();
    tracker
        .add_expense(NewExpense::new(18.25, "dining", "Pizza", at(2024, 7, 16)))
        .unwrap();
    tracker
        .add_income(NewIncome::new(2500.0, "Salary", at(2024, 7, 1)))
        .unwrap();
    tracker
        .add_subscription(NewSubscription::new("spotify", 10.99, at(2024, 7, 5), 30))
        .unwrap();
    tracker.update_category_budget("groceries", 450.0).unwrap();

    assert!(data_file(&data_dir).exists());
    assert!(data_dir.join(format!("{CATEGORIES_KEY}.json")).exists());

    let reopened = open_tracker(&data_dir, reference_now());
    assert_eq!(reopened.data(), tracker.data());
    assert_eq!(reopened.category("groceries").unwrap().monthly_budget, 450.0);
    assert_eq!(reopened.category("dining").unwrap().monthly_budget, 150.0);
}

#[test]
fn malformed_storage_falls_back_to_empty_defaults() {
    let data_dir = temp_data_dir();
    fs::write(data_file(&data_dir), "{ definitely not json").unwrap();
    fs::write(data_dir.join(format!("{CATEGORIES_KEY}.json")), "[1, 2").unwrap();

    let mut tracker = open_tracker(&data_dir, reference_now());
    assert!(tracker.data().is_empty());
    assert!(tracker.budget_overrides().is_empty());

    tracker
        .add_income(NewIncome::new(10.0, "Refund", at(2024, 7, 3)))
        .unwrap();
    let reopened = open_tracker(&data_dir, reference_now());
    assert_eq!(reopened.incomes().len(), 1);
}

#[test]
fn failed_write_keeps_previous_file_intact() {
    let (mut tracker, _config, data_dir) = setup_test_env();
    tracker
        .add_expense(NewExpense::new(5.0, "other", "Coffee", at(2024, 7, 16)))
        .unwrap();
    let path = data_file(&data_dir);
    let original = fs::read_to_string(&path).unwrap();

    // A directory squatting on the temp file name makes the write fail.
    let tmp = path.with_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    let result = tracker.add_expense(NewExpense::new(7.0, "other", "Tea", at(2024, 7, 16)));
    assert!(result.is_err(), "expected the save to fail");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(tracker.expenses().len(), 1);

    let _ = fs::remove_dir_all(&tmp);

    // The rejected record must not ride along with the next successful save.
    tracker
        .add_expense(NewExpense::new(2.0, "other", "Water", at(2024, 7, 16)))
        .unwrap();
    let reopened = open_tracker(&data_dir, reference_now());
    let descriptions: Vec<&str> = reopened
        .expenses()
        .iter()
        .map(|expense| expense.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Coffee", "Water"]);
}

#[test]
fn import_requires_every_record_list() {
    let (mut tracker, _config, data_dir) = setup_test_env();
    tracker
        .add_income(NewIncome::new(100.0, "Gift", at(2024, 7, 2)))
        .unwrap();

    assert!(!tracker.import_data(r#"{ "expenses": [], "incomes": [] }"#));
    assert!(!tracker.import_data(r#"{ "expenses": {}, "incomes": [], "subscriptions": [] }"#));
    assert_eq!(tracker.incomes().len(), 1);

    assert!(tracker.import_data(r#"{ "expenses": [], "incomes": [], "subscriptions": [] }"#));
    assert!(tracker.data().is_empty());
    let reopened = open_tracker(&data_dir, reference_now());
    assert!(reopened.data().is_empty());
}

#[test]
fn export_uses_camel_case_field_names() {
    let (mut tracker, _config, _dir) = setup_test_env();
    tracker
        .add_expense(NewExpense::new(3.5, "transport", "Bus", at(2024, 7, 15)))
        .unwrap();
    let exported = tracker.export_data().unwrap();
    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    let expense = &value["expenses"][0];
    assert_eq!(expense["categoryId"], "transport");
    assert!(expense.get("createdAt").is_some());
    assert_eq!(expense["isInstallment"], false);
}

#[test]
fn backups_are_dated_pruned_and_restorable() {
    let data_dir = temp_data_dir();
    let mut tracker = open_tracker(&data_dir, at(2024, 7, 1));
    tracker
        .add_expense(NewExpense::new(20.0, "shopping", "Socks", at(2024, 7, 1)))
        .unwrap();

    for day in 1..=4 {
        tracker.set_clock(std::sync::Arc::new(budget_tracker::FixedClock::new(at(2024, 7, day))));
        tracker.write_backup().unwrap();
    }
    let backups = tracker.list_backups().unwrap();
    assert_eq!(
        backups,
        vec![
            "budget-tracker-backup-2024-07-04.json",
            "budget-tracker-backup-2024-07-03.json",
            "budget-tracker-backup-2024-07-02.json",
        ]
    );

    tracker.clear_all_data().unwrap();
    assert!(tracker.expenses().is_empty());
    assert!(tracker.restore_backup(&backups[2]).unwrap());
    assert_eq!(tracker.expenses().len(), 1);
}

#[test]
fn tracker_opens_from_saved_config() {
    let (_tracker, config_manager, data_dir) = setup_test_env();
    let config = Config {
        data_dir: Some(data_dir.clone()),
        backup_retention: 2,
        ..Config::default()
    };
    config_manager.save(&config).unwrap();

    let loaded = config_manager.load().unwrap();
    let mut tracker = BudgetTracker::from_config(&loaded).unwrap();
    tracker
        .add_income(NewIncome::new(50.0, "Sold bike", at(2024, 7, 10)))
        .unwrap();
    assert!(data_file(&data_dir).exists());
}
