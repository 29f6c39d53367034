//! Shared traits, date windows, and money helpers for ledger records.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for records stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Records that carry an effective date.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

/// Generates a fresh opaque record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Sums the amounts of the provided records.
pub fn total<'a, T, I>(records: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records.into_iter().map(Amounted::amount).sum()
}

/// Half-open time range `[start, end)` used for every windowed aggregate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Calendar month containing `reference`.
    pub fn month_of(reference: DateTime<Utc>) -> Self {
        let date = reference.date_naive();
        let first = first_of_month(date.year(), date.month());
        let next = if date.month() == 12 {
            first_of_month(date.year() + 1, 1)
        } else {
            first_of_month(date.year(), date.month() + 1)
        };
        Self::new(start_of_day(first), start_of_day(next))
    }

    /// Monday-to-Sunday week containing `reference`.
    pub fn week_of(reference: DateTime<Utc>) -> Self {
        let date = reference.date_naive();
        let offset = date.weekday().num_days_from_monday() as i64;
        let monday = date - Duration::days(offset);
        let start = start_of_day(monday);
        Self::new(start, start + Duration::days(7))
    }
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Last representable millisecond of the day containing `instant`.
pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(instant.date_naive()) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = first_of_month(next_year, next_month);
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Converts an amount to whole cents, rounding half away from zero.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Rounds an amount to the nearest cent.
pub fn round_cents(amount: f64) -> f64 {
    from_cents(to_cents(amount))
}
