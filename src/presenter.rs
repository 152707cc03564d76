//! Selection state and derived figures for rendering a [`Chart`].

use serde::Serialize;

use crate::aggregate::{Chart, ChartBucket, ChartMode};

/// Smallest bar height, in percent of the chart area.
pub const MIN_BAR_HEIGHT: f64 = 5.0;

/// Height of the tallest bar, in percent of the chart area.
pub const MAX_BAR_HEIGHT: f64 = 80.0;

/// The four figures shown above the chart for the selected bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Headline {
    /// Expense total.
    pub expense: f64,
    /// Income minus expense.
    pub balance: f64,
    /// Tax total.
    pub tax: f64,
    /// Income total.
    pub income: f64,
}

impl From<&ChartBucket> for Headline {
    #[inline]
    fn from(bucket: &ChartBucket) -> Self {
        Self {
            expense: bucket.expense_total,
            balance: bucket.balance,
            tax: bucket.tax_total,
            income: bucket.income_total,
        }
    }
}

/// Visual state of one bar. Exactly one applies to each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarState {
    /// The bucket is the current selection.
    Selected,
    /// The bucket holds data but is not selected.
    HasData,
    /// Neither selected nor holding data.
    Empty,
}

/// Everything needed to draw one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    /// Axis label.
    pub label: &'static str,
    /// Height in percent.
    pub height: f64,
    /// Visual state.
    pub state: BarState,
}

/// A chart plus the user's current selection.
///
/// The selection starts at the chart's default and afterwards changes only
/// through [`ChartPresenter::select`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPresenter {
    /// Aggregated series.
    chart: Chart,
    /// Currently selected bucket.
    selected: usize,
}

impl ChartPresenter {
    /// Wraps a chart, selecting its default bucket.
    #[inline]
    #[must_use]
    pub const fn new(chart: Chart) -> Self {
        let selected = chart.selected_index;
        Self { chart, selected }
    }

    /// Returns the underlying chart.
    #[inline]
    #[must_use]
    pub const fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Returns the selected bucket index.
    #[inline]
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selects a bucket.
    ///
    /// Returns `false` and keeps the current selection if `index` is out of
    /// range. Selecting never triggers a refetch.
    #[inline]
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.chart.buckets.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Returns the selected bucket, if the chart has one at that index.
    #[inline]
    #[must_use]
    pub fn selected_bucket(&self) -> Option<&ChartBucket> {
        self.chart.buckets.get(self.selected)
    }

    /// Figures for the selected bucket; all zero when there is none.
    #[inline]
    #[must_use]
    pub fn headline(&self) -> Headline {
        self.selected_bucket().map(Headline::from).unwrap_or_default()
    }

    /// Caption above the bars: `This Week`, or the selected month.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.chart.mode {
            ChartMode::Weekly => "This Week",
            ChartMode::Monthly => self.selected_bucket().map_or("", |bucket| bucket.label),
        }
    }

    /// Bars in bucket order.
    #[inline]
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        let heights = bar_heights(&self.chart.buckets);
        self.chart
            .buckets
            .iter()
            .zip(heights)
            .map(|(bucket, height)| Bar {
                label: bucket.label,
                height,
                state: bar_state(bucket, self.selected),
            })
            .collect()
    }
}

/// Scales each bucket's income to a bar height.
///
/// Heights are `income / max * 80`, floored at `5`, where `max` is the
/// largest income or expense total of any bucket, floored at `1`.
#[inline]
#[must_use]
pub fn bar_heights(buckets: &[ChartBucket]) -> Vec<f64> {
    let max_value = buckets
        .iter()
        .map(|bucket| bucket.income_total.max(bucket.expense_total))
        .fold(1.0_f64, f64::max);
    buckets
        .iter()
        .map(|bucket| (bucket.income_total / max_value * MAX_BAR_HEIGHT).max(MIN_BAR_HEIGHT))
        .collect()
}

/// Classifies a bucket for drawing.
#[inline]
#[must_use]
pub const fn bar_state(bucket: &ChartBucket, selected: usize) -> BarState {
    if bucket.index == selected {
        BarState::Selected
    } else if bucket.has_data {
        BarState::HasData
    } else {
        BarState::Empty
    }
}
