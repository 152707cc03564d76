//! Date-grouped transaction lists and their grand totals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{NaiveDate, TransactionRecord};

/// Records sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    /// Canonical `yyyy-MM-dd` key, or the raw date string when it could
    /// not be parsed.
    pub date_key: String,
    /// Records for the day, in input order.
    pub records: Vec<TransactionRecord>,
}

impl DateGroup {
    /// Sum of the group's totals.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        total(&self.records)
    }
}

/// Grouping key of a record.
#[inline]
#[must_use]
pub fn date_key(record: &TransactionRecord) -> String {
    record.calendar_date().map_or_else(
        || record.date.clone(),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

/// Groups records by day, most recent day first.
///
/// Every input record lands in exactly one group. Groups whose date does
/// not parse come after all dated groups.
#[inline]
#[must_use]
pub fn group_by_date(records: &[TransactionRecord]) -> Vec<DateGroup> {
    let mut by_day: BTreeMap<(Option<NaiveDate>, String), Vec<TransactionRecord>> =
        BTreeMap::new();
    for record in records {
        by_day
            .entry((record.calendar_date(), date_key(record)))
            .or_default()
            .push(record.clone());
    }
    by_day
        .into_iter()
        .rev()
        .map(|((_, date_key), records)| DateGroup { date_key, records })
        .collect()
}

/// Sum of `total` over all records.
#[inline]
#[must_use]
pub fn total(records: &[TransactionRecord]) -> f64 {
    records.iter().map(|record| record.total).sum()
}

/// Both transaction lists, grouped for display.
///
/// The totals cover the full lists regardless of the chart window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    /// Income grouped by day.
    pub income: Vec<DateGroup>,
    /// Expenses grouped by day.
    pub expenses: Vec<DateGroup>,
    /// Sum of every income total.
    pub total_income: f64,
    /// Sum of every expense total.
    pub total_expense: f64,
}

impl Ledger {
    /// Builds the ledger from the cached lists.
    #[inline]
    #[must_use]
    pub fn build(income: &[TransactionRecord], expenses: &[TransactionRecord]) -> Self {
        Self {
            income: group_by_date(income),
            expenses: group_by_date(expenses),
            total_income: total(income),
            total_expense: total(expenses),
        }
    }
}
