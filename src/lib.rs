//! Client and dashboard pipeline for a personal finance tracking backend.
//!
//! The crate fetches a user's income and expense lists, buckets them into
//! a weekly or monthly chart, derives the headline figures and bar
//! heights for the selected bucket, and groups both lists by day for the
//! transaction ledger.
//!
//! ```no_run
//! # #[cfg(feature = "async")]
//! # async fn demo() -> finance_dashboard::error::Result<()> {
//! use finance_dashboard::aggregate::{ChartMode, aggregate};
//! use finance_dashboard::client::FinanceClient;
//! use finance_dashboard::fetch::fetch_all;
//! use finance_dashboard::models::NaiveDate;
//! use finance_dashboard::session::Session;
//!
//! let client = FinanceClient::builder().build()?;
//! let session = Session::with_token("token");
//! let fetched = fetch_all(&client, &session).await;
//! let today = NaiveDate::from_ymd_opt(2024, 8, 19).unwrap_or_default();
//! let chart = aggregate(
//!     fetched.income.records(),
//!     fetched.expenses.records(),
//!     ChartMode::Weekly,
//!     today,
//! );
//! assert_eq!(chart.buckets.len(), 7);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod ledger;
pub mod models;
pub mod presenter;
pub mod session;
