//! Fetch adapter: loads both transaction lists for the dashboard.
//!
//! Each list resolves to a [`FetchOutcome`] so callers can tell "no
//! records" from "no credential" and "request failed". The two lists are
//! always fetched concurrently and the join never fails.

use serde::Serialize;

use crate::error::{FinanceError, Result};
use crate::models::TransactionRecord;
#[cfg(any(feature = "async", feature = "blocking"))]
use crate::session::Session;

#[cfg(feature = "async")]
use crate::client::FinanceClient;
#[cfg(feature = "blocking")]
use crate::client::FinanceBlockingClient;

/// Coarse state of one list, without the records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStatus {
    /// No fetch has completed yet.
    #[default]
    NotFetched,
    /// The backend returned the list.
    Loaded,
    /// The session had no token, so nothing was requested.
    NoCredential,
    /// The request or its decoding failed.
    Failed,
}

/// Result of fetching one list.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The complete list, in backend order.
    Loaded(Vec<TransactionRecord>),
    /// No token was available; no request was sent.
    NoCredential,
    /// The request failed; the data is unknown.
    Failed(FinanceError),
}

impl FetchOutcome {
    /// Classifies a client result for the list called `list`.
    ///
    /// A missing token becomes [`FetchOutcome::NoCredential`]; any other
    /// error is logged and kept in [`FetchOutcome::Failed`].
    #[inline]
    #[must_use]
    pub fn from_result<T: Into<TransactionRecord>>(list: &str, result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) => {
                let records: Vec<TransactionRecord> = items.into_iter().map(Into::into).collect();
                tracing::debug!(list, count = records.len(), "list loaded");
                Self::Loaded(records)
            }
            Err(FinanceError::MissingToken) => {
                tracing::debug!(list, "no access token, skipping fetch");
                Self::NoCredential
            }
            Err(err) => {
                tracing::warn!(list, error = %err, "fetch failed, showing no data");
                Self::Failed(err)
            }
        }
    }

    /// The fetched records, or an empty slice when nothing was loaded.
    #[inline]
    #[must_use]
    #[allow(
        clippy::pattern_type_mismatch,
        reason = "borrows the loaded records through default binding"
    )]
    pub fn records(&self) -> &[TransactionRecord] {
        match self {
            Self::Loaded(records) => records,
            Self::NoCredential | Self::Failed(_) => &[],
        }
    }

    /// Consumes the outcome, yielding the records or an empty list.
    #[inline]
    #[must_use]
    pub fn into_records(self) -> Vec<TransactionRecord> {
        match self {
            Self::Loaded(records) => records,
            Self::NoCredential | Self::Failed(_) => Vec::new(),
        }
    }

    /// The outcome without its payload.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> FetchStatus {
        match *self {
            Self::Loaded(_) => FetchStatus::Loaded,
            Self::NoCredential => FetchStatus::NoCredential,
            Self::Failed(_) => FetchStatus::Failed,
        }
    }
}

/// Both list outcomes of one refresh.
#[derive(Debug)]
pub struct Fetched {
    /// Income list outcome.
    pub income: FetchOutcome,
    /// Expense list outcome.
    pub expenses: FetchOutcome,
}

/// Fetches the income list.
#[cfg(feature = "async")]
#[inline]
#[tracing::instrument(skip_all)]
pub async fn fetch_income(client: &FinanceClient, session: &Session) -> FetchOutcome {
    FetchOutcome::from_result("income", client.incomes(session).await)
}

/// Fetches the expense list.
#[cfg(feature = "async")]
#[inline]
#[tracing::instrument(skip_all)]
pub async fn fetch_expenses(client: &FinanceClient, session: &Session) -> FetchOutcome {
    FetchOutcome::from_result("expense", client.expenses(session).await)
}

/// Fetches both lists concurrently and waits for both to settle.
#[cfg(feature = "async")]
#[inline]
#[tracing::instrument(skip_all)]
pub async fn fetch_all(client: &FinanceClient, session: &Session) -> Fetched {
    let (income, expenses) = tokio::join!(
        fetch_income(client, session),
        fetch_expenses(client, session)
    );
    Fetched { income, expenses }
}

/// Fetches the income list, blocking the calling thread.
#[cfg(feature = "blocking")]
#[inline]
#[tracing::instrument(skip_all)]
pub fn fetch_income_blocking(client: &FinanceBlockingClient, session: &Session) -> FetchOutcome {
    FetchOutcome::from_result("income", client.incomes(session))
}

/// Fetches the expense list, blocking the calling thread.
#[cfg(feature = "blocking")]
#[inline]
#[tracing::instrument(skip_all)]
pub fn fetch_expenses_blocking(client: &FinanceBlockingClient, session: &Session) -> FetchOutcome {
    FetchOutcome::from_result("expense", client.expenses(session))
}

/// Fetches both lists on two scoped threads and waits for both.
#[cfg(feature = "blocking")]
#[inline]
#[tracing::instrument(skip_all)]
pub fn fetch_all_blocking(client: &FinanceBlockingClient, session: &Session) -> Fetched {
    std::thread::scope(|scope| {
        let income = scope.spawn(|| fetch_income_blocking(client, session));
        let expenses = fetch_expenses_blocking(client, session);
        match income.join() {
            Ok(income) => Fetched { income, expenses },
            Err(payload) => std::panic::resume_unwind(payload),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, ExpenseId, Income, IncomeCategory, IncomeId};

    fn income(id: i64, total: f64) -> Income {
        Income {
            id: IncomeId::new(id),
            date: "2024-08-19".to_owned(),
            income_category: IncomeCategory::Salary,
            description: None,
            total,
            tax: Some(1.0),
        }
    }

    #[test]
    fn loaded_keeps_backend_order() {
        let outcome =
            FetchOutcome::from_result("income", Ok(vec![income(2, 10.0), income(1, 20.0)]));
        assert_eq!(outcome.status(), FetchStatus::Loaded);
        let ids: Vec<_> = outcome.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn loaded_empty_is_still_loaded() {
        let outcome = FetchOutcome::from_result::<Income>("income", Ok(Vec::new()));
        assert_eq!(outcome.status(), FetchStatus::Loaded);
        assert!(outcome.records().is_empty());
    }

    #[test]
    fn missing_token_is_no_credential() {
        let outcome =
            FetchOutcome::from_result::<Expense>("expense", Err(FinanceError::MissingToken));
        assert_eq!(outcome.status(), FetchStatus::NoCredential);
        assert!(outcome.into_records().is_empty());
    }

    #[test]
    fn api_error_is_failed_with_reason() {
        let outcome = FetchOutcome::from_result::<Expense>(
            "expense",
            Err(FinanceError::Api {
                status: 500,
                message: "boom".to_owned(),
            }),
        );
        assert_eq!(outcome.status(), FetchStatus::Failed);
        assert!(outcome.records().is_empty());
        assert!(matches!(
            outcome,
            FetchOutcome::Failed(FinanceError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn expense_records_convert() {
        let expense = Expense {
            id: ExpenseId::new(4),
            date: "2024-08-18".to_owned(),
            expense_category: ExpenseCategory::Groceries,
            description: None,
            total: Some(40.0),
            tax: Some(2.0),
            receipt: None,
        };
        let records = FetchOutcome::from_result("expense", Ok(vec![expense])).into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Groceries");
    }

    #[test]
    fn default_status_is_not_fetched() {
        assert_eq!(FetchStatus::default(), FetchStatus::NotFetched);
    }
}
