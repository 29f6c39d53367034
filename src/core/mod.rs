//! Ledger engine: error type, clock, derivation services, and the tracker facade.

pub mod errors;
pub mod services;
pub mod time;
pub mod tracker;

pub use errors::{BudgetError, Result};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::BudgetTracker;
