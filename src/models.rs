//! Data models for the finance backend.
//!
//! Wire types mirror the backend's JSON; [`TransactionRecord`] is the
//! merged shape the dashboard pipeline consumes.

mod enums;
mod ids;
mod receipt;
mod transaction;
mod user;

pub use chrono::NaiveDate;
pub use enums::{ExpenseCategory, IncomeCategory, TransactionKind};
pub use ids::{ExpenseId, IncomeId, ReceiptId, UserId};
pub use receipt::{NewReceipt, Receipt};
pub use transaction::{
    Expense, Income, NewExpense, NewIncome, TransactionRecord, parse_calendar_date,
};
pub use user::{
    AccessToken, ChangeEmail, ChangeName, ChangePassword, Credentials, Detail, SignUp, User,
};
