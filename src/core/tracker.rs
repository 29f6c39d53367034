use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::core::errors::Result;
use crate::core::services::{
    BudgetService, ExpenseService, IncomeService, InstallmentService, SubscriptionService,
    SummaryService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    BudgetOverview, Catalog, Category, CategoryBudgetOverride, Expense, Income, InstallmentPlan,
    InstallmentPreview, InstallmentProvider, LedgerData, NewExpense, NewIncome, NewSubscription,
    QuickAddSuggestion, Subscription, SubscriptionTemplate,
};
use crate::storage::{JsonStorage, StorageBackend};

/// Facade that owns the ledger state and persists every change through the storage backend.
///
/// All "now"-relative views (current week and month, balance, upcoming,
/// suggestions) are evaluated against the injected [`Clock`].
pub struct BudgetTracker {
    data: LedgerData,
    overrides: Vec<CategoryBudgetOverride>,
    catalog: Catalog,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl BudgetTracker {
    /// Loads stored state. Missing or unreadable content falls back to empty defaults.
    pub fn open(storage: Box<dyn StorageBackend>, catalog: Catalog, clock: Arc<dyn Clock>) -> Self {
        let data = match storage.load_data() {
            Ok(Some(data)) => data,
            Ok(None) => LedgerData::default(),
            Err(err) => {
                warn!(error = %err, "stored ledger data unreadable, starting empty");
                LedgerData::default()
            }
        };
        let overrides = match storage.load_overrides() {
            Ok(Some(overrides)) => overrides,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "stored budget overrides unreadable, using catalog budgets");
                Vec::new()
            }
        };
        info!(
            expenses = data.expenses.len(),
            incomes = data.incomes.len(),
            subscriptions = data.subscriptions.len(),
            overrides = overrides.len(),
            "ledger opened"
        );
        Self {
            data,
            overrides,
            catalog,
            storage,
            clock,
        }
    }

    /// Opens the JSON store described by `config` with the system clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = JsonStorage::with_retention(config.resolve_data_dir(), config.backup_retention)?;
        let catalog = config.load_catalog()?;
        Ok(Self::open(Box::new(storage), catalog, Arc::new(SystemClock)))
    }

    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    pub fn incomes(&self) -> &[Income] {
        &self.data.incomes
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.data.subscriptions
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn budget_overrides(&self) -> &[CategoryBudgetOverride] {
        &self.overrides
    }

    // -- categories & budgets ------------------------------------------------

    pub fn categories(&self) -> Vec<Category> {
        BudgetService::categories(&self.catalog, &self.overrides, self.clock.today())
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        BudgetService::category(&self.catalog, &self.overrides, id, self.clock.today())
    }

    pub fn provider(&self, id: &str) -> Option<&InstallmentProvider> {
        self.catalog.provider(id)
    }

    pub fn template(&self, id: &str) -> Option<&SubscriptionTemplate> {
        self.catalog.template(id)
    }

    pub fn compute_weekly_budget(&self, monthly_budget: f64) -> f64 {
        BudgetService::compute_weekly_budget(monthly_budget, self.clock.today())
    }

    pub fn update_category_budget(&mut self, category_id: &str, monthly_budget: f64) -> Result<()> {
        let mut staged = self.overrides.clone();
        BudgetService::apply_override(&mut staged, &self.catalog, category_id, monthly_budget)?;
        self.storage.save_overrides(&staged)?;
        self.overrides = staged;
        info!(category = category_id, monthly_budget, "category budget updated");
        Ok(())
    }

    pub fn weekly_spent_by_category(&self, category_id: &str) -> f64 {
        BudgetService::weekly_spent_by_category(&self.data, category_id, self.now())
    }

    pub fn monthly_spent_by_category(&self, category_id: &str) -> f64 {
        BudgetService::monthly_spent_by_category(&self.data, category_id, self.now())
    }

    pub fn budget_overview(&self) -> BudgetOverview {
        BudgetService::overview(&self.data, &self.categories(), self.now())
    }

    // -- records --------------------------------------------------------------

    pub fn add_expense(&mut self, draft: NewExpense) -> Result<Expense> {
        let now = self.now();
        let expense = self.commit(|data| ExpenseService::add(data, draft, now))?;
        info!(id = %expense.id, amount = expense.amount, "expense added");
        Ok(expense)
    }

    pub fn add_installment_expenses(&mut self, plan: InstallmentPlan) -> Result<Vec<Expense>> {
        let now = self.now();
        let parts = self.commit(|data| InstallmentService::add_plan(data, plan, now))?;
        info!(parts = parts.len(), "installment plan added");
        Ok(parts)
    }

    pub fn installment_preview(
        &self,
        total_amount: f64,
        installments: u32,
        first_payment: DateTime<Utc>,
    ) -> Vec<InstallmentPreview> {
        InstallmentService::preview(total_amount, installments, first_payment)
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<Expense> {
        let removed = self.commit(|data| ExpenseService::remove(data, id))?;
        info!(id, "expense deleted");
        Ok(removed)
    }

    pub fn delete_installment_group(&mut self, group_id: &str) -> Result<usize> {
        let removed = self.commit(|data| ExpenseService::remove_installment_group(data, group_id))?;
        info!(group = group_id, removed, "installment plan deleted");
        Ok(removed)
    }

    pub fn add_income(&mut self, draft: NewIncome) -> Result<Income> {
        let now = self.now();
        let income = self.commit(|data| IncomeService::add(data, draft, now))?;
        info!(id = %income.id, amount = income.amount, "income added");
        Ok(income)
    }

    pub fn delete_income(&mut self, id: &str) -> Result<Income> {
        let removed = self.commit(|data| IncomeService::remove(data, id))?;
        info!(id, "income deleted");
        Ok(removed)
    }

    // -- subscriptions ----------------------------------------------------------

    pub fn add_subscription(&mut self, draft: NewSubscription) -> Result<Subscription> {
        let catalog = &self.catalog;
        let subscription = Self::stage(self.storage.as_ref(), &mut self.data, |data| {
            SubscriptionService::add(data, catalog, draft)
        })?;
        info!(id = %subscription.id, template = %subscription.template_id, "subscription added");
        Ok(subscription)
    }

    pub fn remove_subscription(&mut self, id: &str) -> Result<Subscription> {
        let removed = self.commit(|data| SubscriptionService::remove(data, id))?;
        info!(id, "subscription removed");
        Ok(removed)
    }

    /// Flips a subscription between active and paused, returning the new state.
    pub fn toggle_subscription(&mut self, id: &str) -> Result<bool> {
        let active = self.commit(|data| SubscriptionService::toggle(data, id))?;
        info!(id, active, "subscription toggled");
        Ok(active)
    }

    pub fn active_subscriptions(&self) -> Vec<&Subscription> {
        SubscriptionService::active(&self.data)
    }

    /// Generates owed subscription charges; storage is only touched when some were created.
    pub fn generate_subscription_expenses(&mut self) -> Result<Vec<Expense>> {
        let now = self.now();
        let mut staged = self.data.clone();
        let generated = SubscriptionService::generate_expenses(&mut staged, &self.catalog, now);
        if !generated.is_empty() {
            self.storage.save_data(&staged)?;
            self.data = staged;
            info!(generated = generated.len(), "subscription charges recorded");
        }
        Ok(generated)
    }

    // -- summaries ----------------------------------------------------------------

    pub fn current_month_expenses(&self) -> Vec<&Expense> {
        SummaryService::current_month_expenses(&self.data, self.now())
    }

    pub fn current_month_incomes(&self) -> Vec<&Income> {
        SummaryService::current_month_incomes(&self.data, self.now())
    }

    pub fn current_week_expenses(&self) -> Vec<&Expense> {
        SummaryService::current_week_expenses(&self.data, self.now())
    }

    pub fn total_month_expenses(&self) -> f64 {
        SummaryService::total_month_expenses(&self.data, self.now())
    }

    pub fn total_month_income(&self) -> f64 {
        SummaryService::total_month_income(&self.data, self.now())
    }

    pub fn total_balance(&self) -> f64 {
        SummaryService::total_balance(&self.data, self.now())
    }

    pub fn quick_add_suggestions(&self) -> Vec<QuickAddSuggestion> {
        SummaryService::quick_add_suggestions(&self.data, self.now())
    }

    pub fn upcoming_expenses(&self, limit: Option<usize>) -> Vec<&Expense> {
        SummaryService::upcoming_expenses(&self.data, self.now(), limit)
    }

    pub fn recent_expenses(&self, limit: Option<usize>) -> Vec<&Expense> {
        SummaryService::recent_expenses(&self.data, limit)
    }

    pub fn recent_incomes(&self, limit: Option<usize>) -> Vec<&Income> {
        SummaryService::recent_incomes(&self.data, limit)
    }

    // -- import / export ------------------------------------------------------------

    /// Pretty-printed JSON of every record.
    pub fn export_data(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Replaces every record with the contents of `json`.
    ///
    /// Returns `false`, leaving the current state untouched, when the payload is
    /// not a complete ledger blob or cannot be stored.
    pub fn import_data(&mut self, json: &str) -> bool {
        let data: LedgerData = match serde_json::from_str(json) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "rejected import");
                return false;
            }
        };
        if let Err(err) = self.storage.save_data(&data) {
            warn!(error = %err, "import could not be stored");
            return false;
        }
        info!(
            expenses = data.expenses.len(),
            incomes = data.incomes.len(),
            subscriptions = data.subscriptions.len(),
            "ledger imported"
        );
        self.data = data;
        true
    }

    /// Stores today's export as a dated backup, returning its name.
    pub fn write_backup(&self) -> Result<String> {
        let json = self.export_data()?;
        let name = self.storage.write_backup(&json, self.clock.today())?;
        info!(backup = %name, "backup written");
        Ok(name)
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        self.storage.list_backups()
    }

    /// Imports a stored backup; `Ok(false)` when its contents are not a valid ledger.
    pub fn restore_backup(&mut self, backup_name: &str) -> Result<bool> {
        let json = self.storage.read_backup(backup_name)?;
        Ok(self.import_data(&json))
    }

    /// Drops every record and budget override.
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.storage.save_data(&LedgerData::default())?;
        if let Err(err) = self.storage.save_overrides(&[]) {
            if let Err(restore_err) = self.storage.save_data(&self.data) {
                warn!(error = %restore_err, "ledger records could not be restored after a failed clear");
            }
            return Err(err);
        }
        self.data.clear();
        self.overrides.clear();
        info!("all ledger data cleared");
        Ok(())
    }

    /// Applies `mutate` to a copy of the records and keeps it only once it is stored.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut LedgerData) -> Result<T>) -> Result<T> {
        Self::stage(self.storage.as_ref(), &mut self.data, mutate)
    }

    fn stage<T>(
        storage: &dyn StorageBackend,
        data: &mut LedgerData,
        mutate: impl FnOnce(&mut LedgerData) -> Result<T>,
    ) -> Result<T> {
        let mut staged = data.clone();
        let outcome = mutate(&mut staged)?;
        storage.save_data(&staged)?;
        *data = staged;
        Ok(outcome)
    }
}
