#![doc(test(attr(deny(warnings))))]

//! Budget Tracker is a personal ledger engine: expenses, incomes, recurring
//! subscriptions, installment plans, and weekly/monthly category budgets,
//! persisted as JSON with import, export, and dated backups.

pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{BudgetError, BudgetTracker, Clock, FixedClock, Result, SystemClock};
pub use crate::storage::{JsonStorage, StorageBackend};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with(&config::Config::default());
}

/// Like [`init`], filtering with the configured `log_filter` unless `RUST_LOG` is set.
pub fn init_with(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_filter);
        tracing::info!(filter = %config.log_filter, "Budget Tracker tracing initialized.");
    });
}
