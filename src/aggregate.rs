//! Time-bucket aggregation behind the dashboard bar chart.
//!
//! [`aggregate`] turns the flat income and expense lists into a fixed
//! sequence of buckets: seven days of the Monday-starting week around the
//! reference date, or the twelve calendar months. Every bucket is present
//! even when nothing landed in it, so the chart axis never changes width.

use chrono::{Datelike as _, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{TransactionKind, TransactionRecord};

/// Day labels of a weekly chart, Monday first.
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month labels of a monthly chart.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Granularity of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// One bucket per day of the current week.
    #[default]
    Weekly,
    /// One bucket per calendar month.
    Monthly,
}

impl ChartMode {
    /// Number of buckets a chart in this mode always has.
    #[inline]
    #[must_use]
    pub const fn bucket_count(self) -> usize {
        match self {
            Self::Weekly => DAY_LABELS.len(),
            Self::Monthly => MONTH_LABELS.len(),
        }
    }
}

impl core::fmt::Display for ChartMode {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::Weekly => f.write_str("Weekly"),
            Self::Monthly => f.write_str("Monthly"),
        }
    }
}

/// One time slot of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBucket {
    /// Short display name (`Mon`, `Jan`, ...).
    pub label: &'static str,
    /// Position in the sequence.
    pub index: usize,
    /// Sum of income totals.
    pub income_total: f64,
    /// Sum of expense totals.
    pub expense_total: f64,
    /// Sum of taxes from both lists.
    pub tax_total: f64,
    /// `income_total - expense_total`, set after summation.
    pub balance: f64,
    /// Whether any record landed here.
    pub has_data: bool,
    /// Calendar day of the bucket; weekly charts only.
    pub anchor_date: Option<NaiveDate>,
}

impl ChartBucket {
    /// Creates a zero-filled bucket.
    const fn empty(label: &'static str, index: usize, anchor_date: Option<NaiveDate>) -> Self {
        Self {
            label,
            index,
            income_total: 0.0,
            expense_total: 0.0,
            tax_total: 0.0,
            balance: 0.0,
            has_data: false,
            anchor_date,
        }
    }

    /// Adds one record's amounts.
    fn add(&mut self, record: &TransactionRecord) {
        match record.kind {
            TransactionKind::Income => self.income_total += record.total,
            TransactionKind::Expense => self.expense_total += record.total,
        }
        self.tax_total += record.tax;
        self.has_data = true;
    }

    /// Derives the balance and reasserts `has_data` from the totals.
    fn finish(&mut self) {
        self.balance = self.income_total - self.expense_total;
        if self.income_total > 0.0 || self.expense_total > 0.0 {
            self.has_data = true;
        }
    }
}

/// Aggregated chart series with its default selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Granularity the buckets were built for.
    pub mode: ChartMode,
    /// Date that defines the current week or month.
    pub reference_date: NaiveDate,
    /// Fully materialized bucket sequence.
    pub buckets: Vec<ChartBucket>,
    /// Bucket selected by default, see [`default_selection`].
    pub selected_index: usize,
}

/// Buckets `income` and `expenses` for `mode` around `reference_date`.
///
/// Weekly charts only count records inside the Monday-starting week that
/// contains `reference_date`; other records are ignored. Monthly charts
/// put every record into the bucket of its calendar month, whatever the
/// year. Records whose date does not parse are skipped.
///
/// Amounts are routed by each record's [`TransactionKind`], so the two
/// lists may be passed in either order or mixed.
#[inline]
#[must_use]
pub fn aggregate(
    income: &[TransactionRecord],
    expenses: &[TransactionRecord],
    mode: ChartMode,
    reference_date: NaiveDate,
) -> Chart {
    let start = week_start(reference_date);
    let mut buckets = empty_buckets(mode, start);

    for record in income.iter().chain(expenses) {
        let Some(date) = record.calendar_date() else {
            tracing::debug!(
                id = record.id,
                date = %record.date,
                "skipping record with unparseable date"
            );
            continue;
        };
        let Some(bucket) = bucket_index(mode, start, date).and_then(|index| buckets.get_mut(index))
        else {
            continue;
        };
        bucket.add(record);
    }

    for bucket in &mut buckets {
        bucket.finish();
    }

    let selected_index = default_selection(&buckets, reference_date, mode);
    tracing::debug!(%mode, %reference_date, selected_index, "chart aggregated");

    Chart {
        mode,
        reference_date,
        buckets,
        selected_index,
    }
}

/// Returns the bucket that should be selected before the user picks one.
///
/// Weekly: the bucket anchored on `reference_date`, or `0` if none is.
/// Monthly: the zero-based month of `reference_date`.
#[inline]
#[must_use]
pub fn default_selection(
    buckets: &[ChartBucket],
    reference_date: NaiveDate,
    mode: ChartMode,
) -> usize {
    match mode {
        ChartMode::Weekly => buckets
            .iter()
            .position(|bucket| bucket.anchor_date == Some(reference_date))
            .unwrap_or(0),
        ChartMode::Monthly => usize::try_from(reference_date.month0()).unwrap_or(0),
    }
}

/// Returns the Monday of the week containing `date`.
#[inline]
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Builds the zero-filled bucket sequence for `mode`.
fn empty_buckets(mode: ChartMode, week_start: NaiveDate) -> Vec<ChartBucket> {
    match mode {
        ChartMode::Weekly => DAY_LABELS
            .iter()
            .enumerate()
            .map(|(index, &label)| {
                let anchor = u64::try_from(index)
                    .ok()
                    .and_then(|offset| week_start.checked_add_days(Days::new(offset)));
                ChartBucket::empty(label, index, anchor)
            })
            .collect(),
        ChartMode::Monthly => MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(index, &label)| ChartBucket::empty(label, index, None))
            .collect(),
    }
}

/// Maps a record date to its bucket, or `None` if it falls outside the
/// chart.
fn bucket_index(mode: ChartMode, week_start: NaiveDate, date: NaiveDate) -> Option<usize> {
    match mode {
        ChartMode::Weekly => {
            let offset = date.signed_duration_since(week_start).num_days();
            usize::try_from(offset)
                .ok()
                .filter(|&index| index < DAY_LABELS.len())
        }
        ChartMode::Monthly => usize::try_from(date.month0()).ok(),
    }
}
