//! Plain ledger records and the derived view types built from them.

pub mod catalog;
pub mod category;
pub mod common;
pub mod expense;
pub mod income;
pub mod ledger;
pub mod subscription;

pub use catalog::{display_name, is_icon_class, Catalog, SUBSCRIPTION_CATEGORY_ID};
pub use category::{Category, CategoryBudgetOverride, InstallmentProvider, SubscriptionTemplate};
pub use common::{Amounted, DateWindow, Dated, Identifiable, NamedEntity};
pub use expense::{Expense, InstallmentPlan, InstallmentPreview, NewExpense};
pub use income::{Income, NewIncome};
pub use ledger::{BudgetOverview, BudgetTotals, CategoryBudgetUsage, LedgerData, QuickAddSuggestion};
pub use subscription::{NewSubscription, Subscription};
