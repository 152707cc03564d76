//! In-memory dashboard state: the cached lists plus the chart built from
//! them.
//!
//! The cache is never persisted. Every change to the lists, the mode or
//! the reference date rebuilds the chart from scratch.

use crate::aggregate::{Chart, ChartMode, aggregate};
use crate::fetch::{FetchStatus, Fetched};
use crate::ledger::Ledger;
use crate::models::{NaiveDate, TransactionRecord};
use crate::presenter::{Bar, ChartPresenter, Headline};

/// Cached finances and the current chart view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Cached income list, newest additions first.
    income: Vec<TransactionRecord>,
    /// Cached expense list, newest additions first.
    expenses: Vec<TransactionRecord>,
    /// Outcome of the last income fetch.
    income_status: FetchStatus,
    /// Outcome of the last expense fetch.
    expense_status: FetchStatus,
    /// Bucketing granularity.
    mode: ChartMode,
    /// Date the chart is anchored to.
    reference_date: NaiveDate,
    /// Current chart and selection.
    presenter: ChartPresenter,
}

impl Dashboard {
    /// Creates an empty dashboard. All buckets start zeroed.
    #[inline]
    #[must_use]
    pub fn new(mode: ChartMode, reference_date: NaiveDate) -> Self {
        Self {
            income: Vec::new(),
            expenses: Vec::new(),
            income_status: FetchStatus::NotFetched,
            expense_status: FetchStatus::NotFetched,
            mode,
            reference_date,
            presenter: ChartPresenter::new(aggregate(&[], &[], mode, reference_date)),
        }
    }

    /// Replaces the cache with a refresh result and rebuilds the chart.
    ///
    /// A list that failed or had no credential is replaced by an empty
    /// list; its status records why.
    #[inline]
    pub fn apply(&mut self, fetched: Fetched) {
        self.income_status = fetched.income.status();
        self.expense_status = fetched.expenses.status();
        self.income = fetched.income.into_records();
        self.expenses = fetched.expenses.into_records();
        tracing::debug!(
            income = self.income.len(),
            expenses = self.expenses.len(),
            "dashboard refreshed"
        );
        self.rebuild();
    }

    /// Switches between weekly and monthly buckets and resets the
    /// selection to the new mode's default.
    #[inline]
    pub fn set_mode(&mut self, mode: ChartMode) {
        self.mode = mode;
        self.rebuild();
    }

    /// Moves the chart to another reference date.
    #[inline]
    pub fn set_reference_date(&mut self, reference_date: NaiveDate) {
        self.reference_date = reference_date;
        self.rebuild();
    }

    /// Selects a bucket; see [`ChartPresenter::select`].
    #[inline]
    pub fn select(&mut self, index: usize) -> bool {
        self.presenter.select(index)
    }

    /// Adds a newly created income record to the front of the cache.
    #[inline]
    pub fn push_income(&mut self, record: TransactionRecord) {
        self.income.insert(0, record);
        self.rebuild();
    }

    /// Adds a newly created expense record to the front of the cache.
    #[inline]
    pub fn push_expense(&mut self, record: TransactionRecord) {
        self.expenses.insert(0, record);
        self.rebuild();
    }

    /// Current chart mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> ChartMode {
        self.mode
    }

    /// Current reference date.
    #[inline]
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// The chart with its selection.
    #[inline]
    #[must_use]
    pub const fn presenter(&self) -> &ChartPresenter {
        &self.presenter
    }

    /// The aggregated chart.
    #[inline]
    #[must_use]
    pub const fn chart(&self) -> &Chart {
        self.presenter.chart()
    }

    /// Figures for the selected bucket.
    #[inline]
    #[must_use]
    pub fn headline(&self) -> Headline {
        self.presenter.headline()
    }

    /// Bars to draw.
    #[inline]
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        self.presenter.bars()
    }

    /// Builds the grouped ledger from the cache.
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> Ledger {
        Ledger::build(&self.income, &self.expenses)
    }

    /// Cached income records.
    #[inline]
    #[must_use]
    pub fn income(&self) -> &[TransactionRecord] {
        &self.income
    }

    /// Cached expense records.
    #[inline]
    #[must_use]
    pub fn expenses(&self) -> &[TransactionRecord] {
        &self.expenses
    }

    /// State of the income list.
    #[inline]
    #[must_use]
    pub const fn income_status(&self) -> FetchStatus {
        self.income_status
    }

    /// State of the expense list.
    #[inline]
    #[must_use]
    pub const fn expense_status(&self) -> FetchStatus {
        self.expense_status
    }

    /// Recomputes the chart and selects its default bucket.
    fn rebuild(&mut self) {
        self.presenter = ChartPresenter::new(aggregate(
            &self.income,
            &self.expenses,
            self.mode,
            self.reference_date,
        ));
    }
}
